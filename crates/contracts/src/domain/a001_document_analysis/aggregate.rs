use serde::{Deserialize, Serialize};

/// Upload endpoint: the page root accepts the document as multipart form data.
pub const UPLOAD_PATH: &str = "/";

/// Multipart field name carrying the document.
pub const UPLOAD_FIELD: &str = "file";

/// Largest document the client will send (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions the analysis server knows how to extract text from.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf", "docx"];

/// Successful reply of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Text extracted from the document (OCR or DOCX paragraphs)
    pub original_text: String,
    /// Markdown produced by the language model
    pub ai_analysis: String,
}

/// Value for the `accept` attribute of a file picker, e.g. `.png,.jpg`.
pub fn accept_attribute() -> String {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_attribute() {
        assert_eq!(accept_attribute(), ".png,.jpg,.jpeg,.pdf,.docx");
    }

    #[test]
    fn test_analysis_ignores_extra_fields() {
        let json = r#"{"original_text":"A","ai_analysis":"**B**","elapsed":1.5}"#;
        let parsed: DocumentAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.original_text, "A");
        assert_eq!(parsed.ai_analysis, "**B**");
    }

    #[test]
    fn test_analysis_requires_both_fields() {
        let json = r#"{"original_text":"A"}"#;
        assert!(serde_json::from_str::<DocumentAnalysis>(json).is_err());
    }
}
