//! Models for the Stock Analytics Platform
//!
//! Re-exports the domain models and identifier types of the shared crate

pub use shared::models::*;
pub use shared::types::*;
