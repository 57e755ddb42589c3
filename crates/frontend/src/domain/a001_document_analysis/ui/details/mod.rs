//! Document Analysis UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: upload API function
//! - view_model.rs: DocumentAnalysisVm with RwSignals
//! - view.rs: UploadPanel (form, picker, drop zone, spinner)
//! - results.rs: ResultsPanel (extracted text and rendered analysis)

pub(crate) mod model;
mod results;
mod view;
mod view_model;

pub use results::ResultsPanel;
pub use view::UploadPanel;
pub use view_model::{AnalysisResult, DocumentAnalysisVm};
