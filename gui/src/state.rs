//! Window state, independent of any widget toolkit.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use pdfharvest::render::to_pretty_string;
use pdfharvest::{
    export_image, load_report, to_json, validate_input, Error, ImageRef, JsonFormat, Manifest,
    Pipeline,
};

pub const TITLE_IDLE: &str = "PDF Text & Image Extractor";
pub const TITLE_PROCESSING: &str = "Processing PDF... Loading...";
pub const TITLE_ERROR: &str = "PDF Processing Error!";

/// How long "Copied to clipboard" stays visible.
pub const COPY_CONFIRMATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// `painted` flips once the processing title has been drawn.
    Processing { painted: bool },
    Done,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message; the window is disabled until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct Session {
    pipeline: Pipeline,
    /// Contents of the editable path field
    pub path_input: String,
    phase: Phase,
    manifest: Option<Manifest>,
    preview: String,
    notice: Option<Notice>,
    copied_at: Option<Instant>,
}

impl Session {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            path_input: String::new(),
            phase: Phase::Idle,
            manifest: None,
            preview: String::new(),
            notice: None,
            copied_at: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path_input = path.into();
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Pretty-printed report shown in the preview pane.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, Phase::Processing { .. })
    }

    /// Whether the controls should accept input.
    pub fn is_interactive(&self) -> bool {
        self.notice.is_none() && !self.is_processing()
    }

    pub fn title(&self) -> &'static str {
        match self.phase {
            Phase::Processing { .. } => TITLE_PROCESSING,
            Phase::Error => TITLE_ERROR,
            Phase::Idle | Phase::Done => TITLE_IDLE,
        }
    }

    /// Handle the Start button.
    pub fn request_start(&mut self) {
        if !self.is_interactive() {
            return;
        }
        match validate_input(&self.path_input) {
            Ok(_) => self.phase = Phase::Processing { painted: false },
            Err(e) => {
                log::warn!("{}", e);
                self.notice = Some(Notice::error("Error", "Please select a PDF file."));
            }
        }
    }

    /// Record that a frame with the processing title has been shown.
    pub fn mark_painted(&mut self) {
        if self.phase == (Phase::Processing { painted: false }) {
            self.phase = Phase::Processing { painted: true };
        }
    }

    /// Run the pipeline if a start was requested and already painted.
    ///
    /// Blocks for the whole extraction. Returns `true` when the manifest
    /// changed and thumbnails need rebuilding.
    pub fn run_pending(&mut self) -> bool {
        if self.phase != (Phase::Processing { painted: true }) {
            return false;
        }

        let result = validate_input(&self.path_input).and_then(|path| self.pipeline.run(&path));
        match result {
            Ok(manifest) => {
                self.preview = self.reload_preview(&manifest);
                self.manifest = Some(manifest);
                self.phase = Phase::Done;
            }
            Err(e) => {
                log::error!("Processing failed: {}", e);
                self.manifest = None;
                self.preview.clear();
                self.notice = Some(Notice::error("Error", failure_message(&e)));
                self.phase = Phase::Error;
            }
        }
        true
    }

    fn reload_preview(&self, manifest: &Manifest) -> String {
        let report_path = self.pipeline.report_path();
        match load_report(report_path).and_then(|value| to_pretty_string(&value)) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Cannot reload {}: {}", report_path.display(), e);
                to_json(manifest, JsonFormat::Pretty).unwrap_or_default()
            }
        }
    }

    /// Dismiss the current notice; an error returns the window to Idle.
    pub fn acknowledge(&mut self) {
        self.notice = None;
        if self.phase == Phase::Error {
            self.phase = Phase::Idle;
        }
    }

    /// Copy `image` to `destination`, or do nothing if the dialog was cancelled.
    pub fn save_image(&mut self, image: &ImageRef, destination: Option<PathBuf>) {
        let Some(destination) = destination else {
            return;
        };
        let title = image.file_name();
        self.notice = Some(match export_image(image.path(), &destination) {
            Ok(bytes) => {
                log::info!("Saved {} ({} bytes) to {}", title, bytes, destination.display());
                Notice::info(
                    title,
                    format!("Image saved successfully: {}", destination.display()),
                )
            }
            Err(e) => {
                log::error!("{}", e);
                Notice::error(title, format!("Image could not be saved: {}", e))
            }
        });
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn copy_failed(&mut self, reason: impl std::fmt::Display) {
        self.notice = Some(Notice::error(
            "Error",
            format!("Could not copy to clipboard: {}", reason),
        ));
    }

    /// Time left on the copy confirmation, if it is still showing.
    pub fn copy_confirmation_remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.copied_at?);
        COPY_CONFIRMATION.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

fn failure_message(error: &Error) -> String {
    match error {
        Error::EmptyResult => "Could not extract text or images from the PDF.".to_string(),
        e if e.is_validation() => "Please select a PDF file.".to_string(),
        other => format!("Could not process the PDF: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfharvest::{DocumentExtractor, PageRecord, PipelineOptions, Result};
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    /// Returns a canned manifest for any path.
    struct StubExtractor {
        manifest: Manifest,
    }

    impl DocumentExtractor for StubExtractor {
        fn name(&self) -> &str {
            "stub"
        }

        fn extract(&self, _path: &Path) -> Result<Manifest> {
            Ok(self.manifest.clone())
        }
    }

    fn session(manifest: Manifest) -> (Session, TempDir) {
        let tmp = tempdir().unwrap();
        let pipeline = Pipeline::with_options(
            Box::new(StubExtractor { manifest }),
            PipelineOptions::new().with_report_path(tmp.path().join("output.json")),
        );
        (Session::new(pipeline), tmp)
    }

    fn hello() -> Manifest {
        vec![PageRecord::new(1, "Hello"), PageRecord::new(2, "")]
            .into_iter()
            .collect()
    }

    fn start(session: &mut Session) -> bool {
        session.request_start();
        session.mark_painted();
        session.run_pending()
    }

    #[test]
    fn test_empty_path_shows_notice_and_stays_idle() {
        let (mut session, tmp) = session(hello());

        session.request_start();

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Error);
        assert!(!tmp.path().join("output.json").exists());
    }

    #[test]
    fn test_processing_waits_for_paint() {
        let (session, _tmp) = session(hello());
        let mut session = session.with_path("doc.pdf");

        session.request_start();
        assert_eq!(session.title(), TITLE_PROCESSING);
        assert!(!session.run_pending());
        assert_eq!(session.phase(), Phase::Processing { painted: false });

        session.mark_painted();
        assert!(session.run_pending());
        assert_eq!(session.phase(), Phase::Done);
    }

    #[test]
    fn test_success_loads_preview() {
        let (session, _tmp) = session(hello());
        let mut session = session.with_path("doc.pdf");

        assert!(start(&mut session));

        assert_eq!(session.title(), TITLE_IDLE);
        assert_eq!(session.manifest().unwrap().page_count(), 2);
        assert!(session.preview().starts_with("{\n    \"text\": {"));
        assert!(session.preview().contains("\"page_1\": \"Hello\""));
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_empty_result_goes_to_error_then_idle() {
        let blank: Manifest = vec![PageRecord::new(1, "")].into_iter().collect();
        let (session, _tmp) = session(blank);
        let mut session = session.with_path("doc.pdf");

        start(&mut session);

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.title(), TITLE_ERROR);
        assert!(session.manifest().is_none());
        assert!(!session.is_interactive());

        session.acknowledge();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.is_interactive());
    }

    #[test]
    fn test_start_ignored_while_notice_open() {
        let (mut session, _tmp) = session(hello());
        session.request_start();
        session.path_input = "doc.pdf".into();

        session.request_start();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_save_image_copies_bytes() {
        let (mut session, tmp) = session(hello());
        let source = tmp.path().join("page_1_img_1.png");
        fs::write(&source, b"\x89PNG fake image bytes").unwrap();
        let image = ImageRef::new(1, 1, &source);
        let destination = tmp.path().join("saved.png");

        session.save_image(&image, Some(destination.clone()));

        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.title, "page_1_img_1.png");
        assert_eq!(fs::read(destination).unwrap(), fs::read(source).unwrap());
    }

    #[test]
    fn test_save_image_failure_and_cancel() {
        let (mut session, tmp) = session(hello());
        let image = ImageRef::new(1, 1, tmp.path().join("missing.png"));

        session.save_image(&image, None);
        assert!(session.notice().is_none());

        session.save_image(&image, Some(tmp.path().join("out.png")));
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_copy_confirmation_expires() {
        let (mut session, _tmp) = session(hello());
        let now = Instant::now();
        assert_eq!(session.copy_confirmation_remaining(now), None);

        session.mark_copied(now);
        assert_eq!(
            session.copy_confirmation_remaining(now + Duration::from_secs(1)),
            Some(Duration::from_secs(2))
        );
        assert_eq!(session.copy_confirmation_remaining(now + COPY_CONFIRMATION), None);
    }
}
