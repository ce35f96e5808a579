//! JSON report rendering.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Manifest;

/// Report file written when none is configured.
pub const DEFAULT_REPORT_PATH: &str = "output.json";

const INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a manifest to its report JSON.
pub fn to_json(manifest: &Manifest, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Pretty => to_pretty_string(manifest),
        JsonFormat::Compact => serde_json::to_string(manifest)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e))),
    }
}

/// Write the report for `manifest` to `path`, replacing any existing file.
pub fn write_report(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = to_json(manifest, JsonFormat::Pretty)?;
    fs::write(path, json)?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

/// Read a report back, keeping key order.
pub fn load_report(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::Render(format!("Invalid report {}: {}", path.display(), e)))
}

/// Pretty-print any serializable value the way reports are written.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;
    String::from_utf8(out).map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageRecord;
    use tempfile::tempdir;

    fn sample() -> Manifest {
        vec![PageRecord::new(1, "Merhaba dünya"), PageRecord::new(2, "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\n    \"text\": {\n        \"page_1\""));
        // Non-ASCII stays verbatim
        assert!(json.contains("dünya"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_write_and_load_report() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("output.json");
        fs::write(&path, "stale content that is longer than the new report").unwrap();

        write_report(&sample(), &path).unwrap();
        let value = load_report(&path).unwrap();

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["text", "images"]);
        assert_eq!(value["text"]["page_1"], "Merhaba dünya");
        assert_eq!(value["images"]["page_2"], serde_json::json!([]));
    }

    #[test]
    fn test_load_report_rejects_garbage() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("output.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_report(&path), Err(Error::Render(_))));
    }
}
