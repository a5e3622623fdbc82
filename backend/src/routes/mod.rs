//! Route definitions for the Stock Analytics Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Per-company analytics over uploaded datasets
        .nest("/companies/:company", company_routes())
        // Stateless calculator
        .route("/suggestions", post(handlers::calculate_suggestions))
}

/// Analytics views of one company's uploads
fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/versions", get(handlers::list_versions))
        .route("/report", get(handlers::get_report))
        .route("/purchase-list", get(handlers::get_purchase_list))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/urgent-contacts", get(handlers::get_urgent_contacts))
        .route("/table", get(handlers::get_table))
}
