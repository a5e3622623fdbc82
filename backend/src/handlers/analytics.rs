//! HTTP handlers for stock analytics endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    saturating_total, validate_search_term, AnalyticsReport, CoverageFilter, Dashboard,
    GeneralTable, PurchaseList, PurchasePolicy, PurchaseSuggestion, TableQuery, UrgentContacts,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{CompanyCode, ProductRecord, VersionCatalog, VersionSelector};
use crate::services::AnalyticsService;
use crate::AppState;

// ============================================================================
// Request / response types
// ============================================================================

/// Query parameters selecting an upload version
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VersionQuery {
    /// Omitted for the active version
    #[validate(range(min = 1))]
    pub version_id: Option<i64>,
}

/// Query parameters for the general table
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TableParams {
    #[validate(range(min = 1))]
    pub version_id: Option<i64>,
    pub search: Option<String>,
    #[serde(default)]
    pub coverage: CoverageFilter,
}

/// Records to run through the calculator
#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub records: Vec<ProductRecord>,
    /// Replaces the configured policy for this request
    #[serde(default)]
    pub policy: Option<PurchasePolicy>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub total: usize,
    pub total_investment: Decimal,
    pub suggestions: Vec<PurchaseSuggestion>,
}

fn parse_company(code: &str) -> AppResult<CompanyCode> {
    CompanyCode::parse(code)
        .map_err(|msg| AppError::invalid_field("company", msg, "Código de empresa inválido"))
}

fn selector(query: &VersionQuery) -> AppResult<VersionSelector> {
    query.validate()?;
    Ok(VersionSelector::from_query(query.version_id))
}

// ============================================================================
// Handlers
// ============================================================================

/// List the uploads available for a company
pub async fn list_versions(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> AppResult<Json<VersionCatalog>> {
    let company = parse_company(&company)?;
    let service = AnalyticsService::new(state.db, &state.config);
    let catalog = service.versions(&company).await?;
    Ok(Json(catalog))
}

/// Full analytics report
pub async fn get_report(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<AnalyticsReport>> {
    let company = parse_company(&company)?;
    let selector = selector(&query)?;
    let service = AnalyticsService::new(state.db, &state.config);
    let report = service.report(&company, selector).await?;
    Ok(Json(report))
}

/// Products needing a purchase within the planning horizon
pub async fn get_purchase_list(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<PurchaseList>> {
    let company = parse_company(&company)?;
    let selector = selector(&query)?;
    let service = AnalyticsService::new(state.db, &state.config);
    let list = service.purchase_list(&company, selector).await?;
    Ok(Json(list))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<Dashboard>> {
    let company = parse_company(&company)?;
    let selector = selector(&query)?;
    let service = AnalyticsService::new(state.db, &state.config);
    let dashboard = service.dashboard(&company, selector).await?;
    Ok(Json(dashboard))
}

/// Suppliers to contact this month
pub async fn get_urgent_contacts(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(query): Query<VersionQuery>,
) -> AppResult<Json<UrgentContacts>> {
    let company = parse_company(&company)?;
    let selector = selector(&query)?;
    let service = AnalyticsService::new(state.db, &state.config);
    let contacts = service.urgent_contacts(&company, selector).await?;
    Ok(Json(contacts))
}

/// Searchable product table
pub async fn get_table(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(params): Query<TableParams>,
) -> AppResult<Json<GeneralTable>> {
    let company = parse_company(&company)?;
    params.validate()?;
    if let Some(search) = params.search.as_deref() {
        validate_search_term(search)
            .map_err(|msg| AppError::invalid_field("search", msg, "Termo de busca muito longo"))?;
    }

    let selector = VersionSelector::from_query(params.version_id);
    let query = TableQuery {
        search: params.search,
        coverage: params.coverage,
    };

    let service = AnalyticsService::new(state.db, &state.config);
    let table = service.table(&company, selector, &query).await?;
    Ok(Json(table))
}

/// Run the calculator over posted records
pub async fn calculate_suggestions(
    State(state): State<AppState>,
    Json(input): Json<SuggestionsRequest>,
) -> AppResult<Json<SuggestionsResponse>> {
    let service = AnalyticsService::new(state.db, &state.config);
    let suggestions = service.suggestions(&input.records, input.policy.as_ref())?;

    let total_investment = saturating_total(suggestions.iter().map(|s| s.estimated_investment));
    Ok(Json(SuggestionsResponse {
        total: suggestions.len(),
        total_investment,
        suggestions,
    }))
}
