//! WebAssembly module for the Stock Analytics Platform
//!
//! Provides client-side computation for:
//! - Purchase suggestions over locally parsed spreadsheet rows
//! - Depletion labels and urgency bands
//! - The stock dashboard, without a round trip to the server

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::purchasing::*;
pub use shared::validation::*;

/// Out-of-range inputs pin to Decimal's bounds, NaN reads as zero
fn to_decimal(value: f64) -> Decimal {
    if value.is_nan() {
        return Decimal::ZERO;
    }
    Decimal::try_from(value).unwrap_or(if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value.is_sign_positive() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

fn to_js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn parse_records(records_json: &str) -> Result<Vec<ProductRecord>, String> {
    serde_json::from_str(records_json).map_err(|e| format!("Invalid records JSON: {}", e))
}

fn parse_policy(policy_json: Option<String>) -> Result<PurchasePolicy, String> {
    let policy = match policy_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => serde_json::from_str::<PurchasePolicy>(json)
            .map_err(|e| format!("Invalid policy JSON: {}", e))?,
        _ => PurchasePolicy::default(),
    };
    policy.validate().map_err(|e| e.to_string())?;
    Ok(policy)
}

/// One suggestion per record, as JSON
fn suggestions_json(records_json: &str, policy_json: Option<String>) -> Result<String, String> {
    let records = parse_records(records_json)?;
    let policy = parse_policy(policy_json)?;
    let suggestions = calculate_purchase_suggestions(&records, &policy);
    serde_json::to_string(&suggestions).map_err(|e| e.to_string())
}

/// Dashboard over the data rows of a parsed sheet, as JSON
fn dashboard_json(records_json: &str, policy_json: Option<String>) -> Result<(String, usize), String> {
    let parsed = parse_records(records_json)?;
    let total = parsed.len();
    let records = clean_records(parsed);
    let dropped = total - records.len();
    let policy = parse_policy(policy_json)?;
    let view = shared::analysis::dashboard(&records, &policy);
    let json = serde_json::to_string(&view).map_err(|e| e.to_string())?;
    Ok((json, dropped))
}

/// Calculate purchase suggestions for a JSON array of product rows.
///
/// `policy_json` may be omitted to use the default policy.
#[wasm_bindgen]
pub fn calculate_suggestions(
    records_json: &str,
    policy_json: Option<String>,
) -> Result<String, JsValue> {
    suggestions_json(records_json, policy_json).map_err(to_js_error)
}

/// Build the stock dashboard for a JSON array of product rows
#[wasm_bindgen]
pub fn build_dashboard(records_json: &str, policy_json: Option<String>) -> Result<String, JsValue> {
    let (json, dropped) = dashboard_json(records_json, policy_json).map_err(to_js_error)?;
    if dropped > 0 {
        web_sys::console::log_1(&format!("Ignored {} non-data rows", dropped).into());
    }
    Ok(json)
}

/// Human-readable time until stock runs out
#[wasm_bindgen]
pub fn depletion_label(current_stock: f64, monthly_consumption: f64) -> String {
    depletion(to_decimal(current_stock), to_decimal(monthly_consumption)).label
}

/// Months of stock left (999 without consumption)
#[wasm_bindgen]
pub fn months_remaining(current_stock: f64, monthly_consumption: f64) -> f64 {
    depletion(to_decimal(current_stock), to_decimal(monthly_consumption))
        .months_remaining
        .to_f64()
        .unwrap_or(0.0)
}

/// Suggested order quantity under the default policy
#[wasm_bindgen]
pub fn suggested_quantity(monthly_consumption: f64, current_stock: f64, moq: f64) -> f64 {
    quantity_to_order(
        to_decimal(monthly_consumption),
        to_decimal(current_stock),
        to_decimal(moq),
        &PurchasePolicy::default(),
    )
    .to_f64()
    .unwrap_or(0.0)
}

/// Urgency band name for a runway in months
#[wasm_bindgen]
pub fn urgency_band(months_remaining: f64) -> String {
    UrgencyBand::from_months(to_decimal(months_remaining)).to_string()
}

/// Display color of the urgency band for a runway in months
#[wasm_bindgen]
pub fn urgency_color(months_remaining: f64) -> String {
    UrgencyBand::from_months(to_decimal(months_remaining))
        .color()
        .to_string()
}

/// Check a company code before requesting its data
#[wasm_bindgen]
pub fn is_valid_company_code(code: &str) -> bool {
    validate_company_code(code).is_ok()
}
