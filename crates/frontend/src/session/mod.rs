//! Session controller: the single owner of upload/chat state.
//!
//! - api.rs: `AnalysisApi` seam and its HTTP implementation
//! - controller.rs: `SessionController` operations

mod api;
mod controller;

pub use api::{AnalysisApi, HttpAnalysisApi};
pub use controller::SessionController;

/// The controller wired to the real endpoints
pub type AppSession = SessionController<HttpAnalysisApi>;
