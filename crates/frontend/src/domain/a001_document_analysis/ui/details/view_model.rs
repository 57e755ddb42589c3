//! Document Analysis - View Model

use leptos::prelude::*;

/// What the results panel shows after a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Shown as plain text
    pub original_text: String,
    /// Rendered (and sanitized) Markdown
    pub analysis_html: String,
}

#[derive(Clone, Copy)]
pub struct DocumentAnalysisVm {
    pub selected_file_name: RwSignal<Option<String>>,
    pub result: RwSignal<Option<AnalysisResult>>,
    pub drag_active: RwSignal<bool>,
}

impl DocumentAnalysisVm {
    pub fn new() -> Self {
        Self {
            selected_file_name: RwSignal::new(None),
            result: RwSignal::new(None),
            drag_active: RwSignal::new(false),
        }
    }
}

impl Default for DocumentAnalysisVm {
    fn default() -> Self {
        Self::new()
    }
}
