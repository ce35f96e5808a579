//! pdfharvest - desktop window for extracting PDF text and images

mod app;
mod clipboard;
mod dialogs;
mod state;
mod thumbnails;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use pdfharvest::{
    ExtractOptions, ImageNaming, PdfExtractor, Pipeline, PipelineOptions, DEFAULT_IMAGE_DIR,
    DEFAULT_REPORT_PATH,
};

use app::HarvestApp;
use state::{Session, TITLE_IDLE};

#[derive(Parser)]
#[command(name = "pdfharvest")]
#[command(version)]
#[command(about = "Extract text and images from a PDF into a JSON report", long_about = None)]
struct Cli {
    /// PDF file to preselect
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory that receives extracted images (cleared on every run)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_IMAGE_DIR)]
    images_dir: PathBuf,

    /// Where the JSON report is written
    #[arg(long, value_name = "FILE", default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// Name image files after their real encoding (.jpg, .jp2, ...) instead of .png
    #[arg(long)]
    name_by_format: bool,

    /// Fail on the first page whose text cannot be extracted
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn pipeline(&self) -> Pipeline {
        let naming = if self.name_by_format {
            ImageNaming::ByFormat
        } else {
            ImageNaming::Legacy
        };
        let mut options = ExtractOptions::new()
            .with_output_dir(&self.images_dir)
            .with_naming(naming);
        if self.strict {
            options = options.strict();
        }

        Pipeline::with_options(
            Box::new(PdfExtractor::with_options(options)),
            PipelineOptions::new().with_report_path(&self.report),
        )
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = Session::new(cli.pipeline());
    if let Some(input) = &cli.input {
        session = session.with_path(input.display().to_string());
    }
    log::info!(
        "Images go to {}, report to {}",
        cli.images_dir.display(),
        cli.report.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE_IDLE)
            .with_inner_size([600.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        TITLE_IDLE,
        options,
        Box::new(|_cc| Box::new(HarvestApp::new(session))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["pdfharvest"]);
        assert!(cli.input.is_none());
        assert_eq!(cli.images_dir, PathBuf::from("images"));
        assert_eq!(cli.report, PathBuf::from("output.json"));
        assert_eq!(cli.pipeline().report_path(), PathBuf::from("output.json"));
        assert_eq!(cli.pipeline().extractor_name(), "pdf");
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "pdfharvest",
            "doc.pdf",
            "--images-dir",
            "out/imgs",
            "--report",
            "out/report.json",
            "--name-by-format",
            "--strict",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("doc.pdf")));
        assert_eq!(cli.images_dir, PathBuf::from("out/imgs"));
        assert!(cli.name_by_format);
        assert!(cli.strict);
    }
}
