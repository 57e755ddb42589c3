//! Application configuration
//!
//! Defaults live in an embedded TOML document. A few values can be overridden per page
//! load through the query string, e.g. `?lock_scope=per_operation&alert_duration_ms=5000`.

use crate::shared::markdown::MarkdownOptions;
use crate::shared::processing_gate::LockScope;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
# Prefix for the upload and chat endpoints; empty means same origin.
api_base = ""
max_upload_bytes = 10485760
alert_duration_ms = 3000
# "shared": uploads and questions exclude each other.
# "per_operation": each operation only excludes itself.
lock_scope = "shared"

[markdown]
breaks = true
gfm = true
smartypants = false
sanitize = true
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid embedded config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid query override: {0}")]
    Query(#[from] serde_qs::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
    pub max_upload_bytes: u64,
    pub alert_duration_ms: u32,
    pub lock_scope: LockScope,
    pub markdown: MarkdownOptions,
}

/// Values a page may override from its query string
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryOverrides {
    lock_scope: Option<LockScope>,
    alert_duration_ms: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            max_upload_bytes: contracts::domain::a001_document_analysis::aggregate::MAX_UPLOAD_BYTES,
            alert_duration_ms: 3000,
            lock_scope: LockScope::Shared,
            markdown: MarkdownOptions::default(),
        }
    }
}

impl AppConfig {
    /// Parse the embedded defaults
    pub fn embedded() -> Result<Self, ConfigError> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }

    /// Apply overrides from a `location.search` string (leading `?` optional).
    pub fn with_query(mut self, search: &str) -> Result<Self, ConfigError> {
        let query = search.trim_start_matches('?');
        if query.is_empty() {
            return Ok(self);
        }
        let overrides: QueryOverrides = serde_qs::from_str(query)?;
        if let Some(scope) = overrides.lock_scope {
            self.lock_scope = scope;
        }
        if let Some(ms) = overrides.alert_duration_ms {
            self.alert_duration_ms = ms;
        }
        Ok(self)
    }

    /// Embedded defaults plus the current page's query string.
    ///
    /// Never fails: broken pieces are logged and skipped.
    pub fn load() -> Self {
        let base = Self::embedded().unwrap_or_else(|e| {
            log::error!("{}", e);
            Self::default()
        });

        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();

        match base.clone().with_query(&search) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                base
            }
        }
    }
}
