//! Rendering the extraction manifest as a JSON report.

mod json;

pub use json::{
    load_report, to_json, to_pretty_string, write_report, JsonFormat, DEFAULT_REPORT_PATH,
};
