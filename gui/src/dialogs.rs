//! Native file dialogs.

use std::path::PathBuf;

use rfd::FileDialog;

pub fn pick_pdf() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select a PDF file")
        .add_filter("PDF Files", &["pdf"])
        .pick_file()
}

/// Ask where to save a copy of an extracted image.
pub fn pick_save_destination(suggested_name: &str) -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Save image")
        .add_filter("PNG Files", &["png"])
        .set_file_name(suggested_name)
        .save_file()
        .map(with_default_extension)
}

/// Append `.png` when the chosen name has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_default_extension() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/picture")),
            PathBuf::from("/tmp/picture.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/picture.jpg")),
            PathBuf::from("/tmp/picture.jpg")
        );
    }
}
