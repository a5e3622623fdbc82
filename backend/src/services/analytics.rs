//! Analytics service: purchase suggestions and dashboard views over the
//! uploaded stock datasets

use shared::{
    build_report, calculate_purchase_suggestions, dashboard, existing_product_suggestions,
    general_table, purchase_list, urgent_contacts, AnalyticsReport, Dashboard, GeneralTable,
    PurchaseList, PurchasePolicy, PurchaseSuggestion, TableQuery, UrgentContacts,
};
use sqlx::PgPool;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{version_catalog, CompanyCode, ProductRecord, VersionCatalog, VersionSelector};
use crate::services::WarehouseService;

/// Composes warehouse reads with the purchase calculator
#[derive(Clone)]
pub struct AnalyticsService {
    warehouse: WarehouseService,
    policy: PurchasePolicy,
    version_limit: i64,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            warehouse: WarehouseService::new(db, config.analytics.category.clone()),
            policy: config.purchasing.clone(),
            version_limit: config.analytics.version_limit,
        }
    }

    /// Uploads available for a company
    pub async fn versions(&self, company: &CompanyCode) -> AppResult<VersionCatalog> {
        let versions = self
            .warehouse
            .get_upload_versions(company, self.version_limit)
            .await?;

        if versions.is_empty() {
            tracing::info!("No analytics versions found for {}", company);
        }

        Ok(version_catalog(company.as_str(), &versions))
    }

    /// Every view of one dataset at once
    pub async fn report(
        &self,
        company: &CompanyCode,
        selector: VersionSelector,
    ) -> AppResult<AnalyticsReport> {
        let records = self.load(company, selector).await?;
        let report = build_report(company.as_str(), selector.version_id(), &records, &self.policy);

        tracing::info!(
            "Report for {}: {} products, {} need action",
            company,
            report.summary.total_products,
            report.purchase_list.needs_action
        );

        Ok(report)
    }

    pub async fn purchase_list(
        &self,
        company: &CompanyCode,
        selector: VersionSelector,
    ) -> AppResult<PurchaseList> {
        let records = self.load(company, selector).await?;
        let suggestions = existing_product_suggestions(&records, &self.policy);
        Ok(purchase_list(&suggestions))
    }

    pub async fn dashboard(
        &self,
        company: &CompanyCode,
        selector: VersionSelector,
    ) -> AppResult<Dashboard> {
        let records = self.load(company, selector).await?;
        Ok(dashboard(&records, &self.policy))
    }

    pub async fn urgent_contacts(
        &self,
        company: &CompanyCode,
        selector: VersionSelector,
    ) -> AppResult<UrgentContacts> {
        let records = self.load(company, selector).await?;
        let suggestions = existing_product_suggestions(&records, &self.policy);
        Ok(urgent_contacts(&suggestions))
    }

    /// Filtered product table with statistics
    pub async fn table(
        &self,
        company: &CompanyCode,
        selector: VersionSelector,
        query: &TableQuery,
    ) -> AppResult<GeneralTable> {
        let records = self.load(company, selector).await?;
        let table = general_table(&records, query, &self.policy);

        tracing::debug!(
            "Table for {}: showing {} of {} products",
            company,
            table.shown,
            table.total
        );

        Ok(table)
    }

    /// Suggestions for caller-supplied records, one per record.
    ///
    /// `policy` overrides the configured policy for this call only.
    pub fn suggestions(
        &self,
        records: &[ProductRecord],
        policy: Option<&PurchasePolicy>,
    ) -> AppResult<Vec<PurchaseSuggestion>> {
        let policy = match policy {
            Some(policy) => {
                policy.validate().map_err(|e| {
                    AppError::invalid_field("policy", &e.to_string(), "Política de compra inválida")
                })?;
                policy
            }
            None => &self.policy,
        };

        Ok(calculate_purchase_suggestions(records, policy))
    }

    async fn load(
        &self,
        company: &CompanyCode,
        selector: VersionSelector,
    ) -> AppResult<Vec<ProductRecord>> {
        let records = self
            .warehouse
            .load_analytics_data(company, selector.version_id())
            .await?;
        require_data(company, selector, records)
    }
}

/// An empty dataset means there is nothing to analyse
fn require_data(
    company: &CompanyCode,
    selector: VersionSelector,
    records: Vec<ProductRecord>,
) -> AppResult<Vec<ProductRecord>> {
    if records.is_empty() {
        return Err(AppError::NoAnalyticsData {
            company: company.to_string(),
            version_id: selector.version_id(),
        });
    }
    Ok(records)
}
