pub mod a001_document_analysis;
pub mod a002_document_chat;
