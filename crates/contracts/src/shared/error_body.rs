use serde::{Deserialize, Serialize};

/// Error envelope both endpoints use, with any HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The server message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|m| !m.trim().is_empty())
    }
}
