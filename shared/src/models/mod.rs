//! Domain models for stock analytics

mod product;
mod urgency;
mod version;

pub use product::*;
pub use urgency::*;
pub use version::*;
