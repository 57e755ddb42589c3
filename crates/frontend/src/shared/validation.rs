//! Client-side checks that run before anything is sent.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a file.")]
    NoFile,
    #[error("File size exceeds {}MB.", format_mib(.limit_bytes))]
    FileTooLarge { limit_bytes: u64 },
    #[error("Please enter a question.")]
    EmptyQuestion,
}

/// Anything the user can pick or drop as a document.
pub trait SelectedFile: Clone + 'static {
    fn name(&self) -> String;
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
}

impl SelectedFile for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn mime_type(&self) -> String {
        self.type_()
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }
}

/// Size check shared by every path that can change the selection.
pub fn validate_file<F: SelectedFile>(file: &F, max_bytes: u64) -> Result<(), ValidationError> {
    if file.size() > max_bytes {
        return Err(ValidationError::FileTooLarge {
            limit_bytes: max_bytes,
        });
    }
    Ok(())
}

/// `10485760` -> `"10"`, `524288` -> `"0.5"`; at most two decimals.
fn format_mib(bytes: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let bytes = *bytes;
    if bytes % MIB == 0 {
        return (bytes / MIB).to_string();
    }
    let text = format!("{:.2}", bytes as f64 / MIB as f64);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Trimmed question text, or an error when nothing is left.
pub fn validate_question(raw: &str) -> Result<String, ValidationError> {
    let question = raw.trim();
    if question.is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    Ok(question.to_string())
}


#[cfg(test)]
mod tests {
    use super::test_support::FakeFile;
    use super::*;

    const LIMIT: u64 = 10 * 1024 * 1024;

    #[test]
    fn test_file_at_limit_is_accepted() {
        assert_eq!(validate_file(&FakeFile::new("a.pdf", LIMIT), LIMIT), Ok(()));
        assert_eq!(validate_file(&FakeFile::new("empty.pdf", 0), LIMIT), Ok(()));
    }

    #[test]
    fn test_file_over_limit() {
        let err = validate_file(&FakeFile::new("big.pdf", LIMIT + 1), LIMIT).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 10MB.");
    }

    #[test]
    fn test_fractional_limit_is_not_truncated() {
        let half = 512 * 1024;
        let err = validate_file(&FakeFile::new("a.pdf", half + 1), half).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 0.5MB.");

        let odd = 1_500_000;
        let err = validate_file(&FakeFile::new("a.pdf", odd + 1), odd).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 1.43MB.");
    }

    #[test]
    fn test_question_is_trimmed() {
        assert_eq!(validate_question("  hello \n"), Ok("hello".to_string()));
        assert_eq!(validate_question(" \t "), Err(ValidationError::EmptyQuestion));
    }
}
