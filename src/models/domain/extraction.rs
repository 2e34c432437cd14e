use std::path::Path;

use tempfile::NamedTempFile;

/// A multipart upload staged on disk for the lifetime of one request.
///
/// The backing file is removed when the value is dropped or discarded, so an
/// `UploadedFile` never outlives the request that received it.
#[derive(Debug)]
pub struct UploadedFile {
    file: NamedTempFile,
    mime_type: String,
    file_name: String,
}

impl UploadedFile {
    pub fn new(
        file: NamedTempFile,
        mime_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            file,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Deletes the staged file now rather than waiting for drop.
    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            log::warn!("Failed to remove staged upload {}: {}", path.display(), e);
        }
    }
}

/// Reference to a file held by the model provider's file store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub uri: String,
    pub mime_type: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionResult {
    Text(String),
    FileReference(FileHandle),
}

/// One piece of content sent to the generative model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    File(FileHandle),
}

impl PromptPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PromptPart::Text(text) => Some(text),
            PromptPart::File(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_removes_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = NamedTempFile::new_in(dir.path()).unwrap();
        let path = file.path().to_path_buf();
        let upload = UploadedFile::new(file, "application/pdf", "notes.pdf");

        assert!(path.exists());
        assert_eq!(upload.mime_type(), "application/pdf");
        assert_eq!(upload.file_name(), "notes.pdf");

        upload.discard();
        assert!(!path.exists());
    }

    #[test]
    fn drop_removes_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = NamedTempFile::new_in(dir.path()).unwrap();
        let path = file.path().to_path_buf();

        drop(UploadedFile::new(file, "image/png", "diagram.png"));
        assert!(!path.exists());
    }
}
