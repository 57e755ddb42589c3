//! Wire contracts shared between the document assistant frontend and its server.

pub mod domain;
pub mod shared;
