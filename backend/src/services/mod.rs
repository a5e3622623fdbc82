//! Business logic services for the Stock Analytics Platform

pub mod analytics;
pub mod warehouse;

pub use analytics::AnalyticsService;
pub use warehouse::WarehouseService;
