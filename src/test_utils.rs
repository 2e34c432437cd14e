#[cfg(test)]
pub mod fixtures {
    use std::{io::Write, path::Path};

    use crate::models::domain::UploadedFile;
    use crate::services::pdf_service::render_pdf;

    pub const SAMPLE_QUIZ_JSON: &str = r#"{
        "questions": [
            {
                "question": "What gas do plants absorb during photosynthesis?",
                "options": ["Oxygen", "Carbon dioxide", "Nitrogen", "Helium"],
                "answer": "Carbon dioxide"
            }
        ],
        "answerKey": ["Carbon dioxide"]
    }"#;

    /// Stages `bytes` in `dir` the same way the multipart transport does.
    pub fn staged_upload(dir: &Path, bytes: &[u8], mime_type: &str) -> UploadedFile {
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(dir)
            .expect("temp dir should be writable");
        file.write_all(bytes).expect("staged upload should be writable");
        UploadedFile::new(file, mime_type, "fixture")
    }

    /// A small, valid PDF containing `text`.
    pub fn test_pdf_bytes(text: &str) -> Vec<u8> {
        render_pdf(text).expect("fixture PDF should render")
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::path::Path;

    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// Asserts that no staged upload was left behind in `dir`.
    pub fn assert_dir_empty(dir: &Path) {
        let leftovers: Vec<_> = std::fs::read_dir(dir)
            .expect("upload dir should exist")
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        assert!(leftovers.is_empty(), "Leftover uploads: {:?}", leftovers);
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;

    #[test]
    fn test_fixture_pdf_has_header() {
        assert!(test_pdf_bytes("fixture").starts_with(b"%PDF-"));
    }

    #[test]
    fn test_fixture_quiz_json_is_valid() {
        let value: serde_json::Value = serde_json::from_str(SAMPLE_QUIZ_JSON).unwrap();
        assert_eq!(value["questions"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_staged_upload_lives_in_dir_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let upload = staged_upload(dir.path(), b"bytes", "image/png");
        assert!(upload.path().starts_with(dir.path()));

        drop(upload);
        assert_dir_empty(dir.path());
    }
}
