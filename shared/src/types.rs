//! Common types used across the platform

use serde::{Deserialize, Serialize};

use crate::validation::validate_company_code;

/// Code of the company whose stock is analysed, e.g. `MINIPA_INDUSTRIA`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Normalise to upper case and validate
    pub fn parse(code: &str) -> Result<Self, &'static str> {
        let code = code.trim().to_uppercase();
        validate_company_code(&code)?;
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name: `MINIPA_INDUSTRIA` becomes `MINIPA INDUSTRIA`
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl std::fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which upload of a company's data to analyse
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionSelector {
    /// Most recent active upload
    #[default]
    Active,
    Specific(i64),
}

impl VersionSelector {
    pub fn from_query(version_id: Option<i64>) -> Self {
        version_id.map_or(VersionSelector::Active, VersionSelector::Specific)
    }

    pub fn version_id(&self) -> Option<i64> {
        match self {
            VersionSelector::Active => None,
            VersionSelector::Specific(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_code_normalised() {
        let company = CompanyCode::parse(" minipa_industria ").unwrap();
        assert_eq!(company.as_str(), "MINIPA_INDUSTRIA");
        assert_eq!(company.display_name(), "MINIPA INDUSTRIA");
    }

    #[test]
    fn test_company_code_rejects_garbage() {
        assert!(CompanyCode::parse("").is_err());
        assert!(CompanyCode::parse("MINI PA").is_err());
    }

    #[test]
    fn test_version_selector() {
        assert_eq!(VersionSelector::from_query(None), VersionSelector::Active);
        assert_eq!(VersionSelector::from_query(Some(3)).version_id(), Some(3));
    }
}
