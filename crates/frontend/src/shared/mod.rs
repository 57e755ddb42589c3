pub mod alert;
pub mod api_utils;
pub mod icons;
pub mod markdown;
pub mod processing_gate;
pub mod validation;
