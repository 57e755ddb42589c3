//! Document Chat UI Module (MVVM Standard)
//!
//! Structure:
//! - model.rs: chat API function
//! - view_model.rs: DocumentChatVm and transcript entries
//! - view.rs: ChatPanel (transcript, question input, send button)

pub(crate) mod model;
mod view;
mod view_model;

pub use view::ChatPanel;
pub use view_model::{DocumentChatVm, EntryBody, TranscriptEntry};
