//! Upload versions of analytics data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACTIVE_VERSION_LABEL: &str = "Versão Ativa (mais recente)";

/// One uploaded dataset for a company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadVersion {
    pub version_id: i64,
    pub description: Option<String>,
    /// Name of the spreadsheet the data came from
    pub source_file: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub is_active: bool,
}

impl UploadVersion {
    /// Description, or a generic name when the uploader left it blank
    pub fn display_name(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => format!("Versão {}", self.version_id),
        }
    }

    pub fn option_label(&self) -> String {
        let mut label = format!(
            "{} ({})",
            self.display_name(),
            self.upload_date.format("%Y-%m-%d %H:%M")
        );
        if let Some(file) = self.source_file.as_deref().filter(|f| !f.trim().is_empty()) {
            label.push_str(" - ");
            label.push_str(file);
        }
        label
    }
}

/// A selectable entry; `version_id` of `None` means the active version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionOption {
    pub version_id: Option<i64>,
    pub label: String,
}

/// Versions available for a company, ready for a selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionCatalog {
    pub company: String,
    pub options: Vec<VersionOption>,
    pub available: usize,
    pub active: usize,
}

/// Selector entries: the active version first, then each upload in the
/// order given
pub fn version_options(versions: &[UploadVersion]) -> Vec<VersionOption> {
    std::iter::once(VersionOption {
        version_id: None,
        label: ACTIVE_VERSION_LABEL.to_string(),
    })
    .chain(versions.iter().map(|v| VersionOption {
        version_id: Some(v.version_id),
        label: v.option_label(),
    }))
    .collect()
}

pub fn version_catalog(company: &str, versions: &[UploadVersion]) -> VersionCatalog {
    VersionCatalog {
        company: company.to_string(),
        options: version_options(versions),
        available: versions.len(),
        active: versions.iter().filter(|v| v.is_active).count(),
    }
}
