//! Shared types and calculations for the Stock Analytics platform
//!
//! This crate contains the purchase suggestion calculator and the dashboard
//! views built on it, shared between the backend and the browser (via WASM).

pub mod analysis;
pub mod models;
pub mod purchasing;
pub mod types;
pub mod validation;

pub use analysis::*;
pub use models::*;
pub use purchasing::*;
pub use types::*;
pub use validation::*;
