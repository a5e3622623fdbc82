//! Warehouse access: uploaded analytics datasets and their versions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;
use crate::models::{clean_records, CompanyCode, ProductRecord, UploadVersion};

/// Reads analytics uploads from the warehouse database
#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
    category: String,
}

/// Row of `analytics_records`. Every column is nullable in the export.
#[derive(Debug, FromRow)]
struct AnalyticsRow {
    produto: Option<String>,
    estoque: Option<Decimal>,
    media_6_meses: Option<Decimal>,
    moq: Option<Decimal>,
    ultimo_fornecedor: Option<String>,
    estoque_cobertura: Option<Decimal>,
    qtde_tot_compras: Option<Decimal>,
}

impl From<AnalyticsRow> for ProductRecord {
    fn from(row: AnalyticsRow) -> Self {
        ProductRecord {
            name: row.produto.map(|p| p.trim().to_string()).unwrap_or_default(),
            current_stock: row.estoque.unwrap_or_default(),
            monthly_consumption: row.media_6_meses.unwrap_or_default(),
            minimum_order_quantity: row.moq.unwrap_or_default(),
            supplier: row
                .ultimo_fornecedor
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            stock_coverage: row.estoque_cobertura,
            total_purchase_quantity: row.qtde_tot_compras.unwrap_or_default(),
        }
    }
}

/// Row of `upload_versions`
#[derive(Debug, FromRow)]
struct VersionRow {
    version_id: i64,
    description: Option<String>,
    arquivo_origem: Option<String>,
    upload_date: DateTime<Utc>,
    is_active: bool,
}

impl From<VersionRow> for UploadVersion {
    fn from(row: VersionRow) -> Self {
        UploadVersion {
            version_id: row.version_id,
            description: row.description,
            source_file: row.arquivo_origem,
            upload_date: row.upload_date,
            is_active: row.is_active,
        }
    }
}

impl WarehouseService {
    /// Create a new WarehouseService reading uploads of the given category
    pub fn new(db: PgPool, category: impl Into<String>) -> Self {
        Self {
            db,
            category: category.into(),
        }
    }

    /// Load the product rows of one upload.
    ///
    /// `None` selects the most recent active upload of the company. An
    /// unknown version, or a version belonging to another company, yields an
    /// empty dataset.
    pub async fn load_analytics_data(
        &self,
        company: &CompanyCode,
        version_id: Option<i64>,
    ) -> AppResult<Vec<ProductRecord>> {
        let Some(version_id) = self.resolve_version(company, version_id).await? else {
            tracing::debug!("No upload found for {}", company);
            return Ok(Vec::new());
        };

        let rows = sqlx::query_as::<_, AnalyticsRow>(
            r#"
            SELECT produto, estoque, media_6_meses, moq, ultimo_fornecedor,
                   estoque_cobertura, qtde_tot_compras
            FROM analytics_records
            WHERE version_id = $1
            ORDER BY row_index
            "#,
        )
        .bind(version_id)
        .fetch_all(&self.db)
        .await?;

        let fetched = rows.len();
        let records = clean_records(rows.into_iter().map(ProductRecord::from).collect());
        tracing::debug!(
            "Loaded {} of {} rows for {} (version {})",
            records.len(),
            fetched,
            company,
            version_id
        );

        Ok(records)
    }

    /// Most recent uploads of a company, newest first
    pub async fn get_upload_versions(
        &self,
        company: &CompanyCode,
        limit: i64,
    ) -> AppResult<Vec<UploadVersion>> {
        let rows = sqlx::query_as::<_, VersionRow>(
            r#"
            SELECT version_id, description, arquivo_origem, upload_date, is_active
            FROM upload_versions
            WHERE empresa = $1 AND category = $2
            ORDER BY upload_date DESC, version_id DESC
            LIMIT $3
            "#,
        )
        .bind(company.as_str())
        .bind(&self.category)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(UploadVersion::from).collect())
    }

    /// Id of the upload to read, if the company has one
    async fn resolve_version(
        &self,
        company: &CompanyCode,
        version_id: Option<i64>,
    ) -> AppResult<Option<i64>> {
        let resolved = match version_id {
            Some(id) => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT version_id FROM upload_versions
                    WHERE version_id = $1 AND empresa = $2 AND category = $3
                    "#,
                )
                .bind(id)
                .bind(company.as_str())
                .bind(&self.category)
                .fetch_optional(&self.db)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT version_id FROM upload_versions
                    WHERE empresa = $1 AND category = $2 AND is_active
                    ORDER BY upload_date DESC, version_id DESC
                    LIMIT 1
                    "#,
                )
                .bind(company.as_str())
                .bind(&self.category)
                .fetch_optional(&self.db)
                .await?
            }
        };

        Ok(resolved)
    }
}
