//! HTTP request handlers for the Stock Analytics Platform

pub mod analytics;
pub mod health;

pub use analytics::*;
pub use health::*;
