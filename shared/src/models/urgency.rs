//! Urgency bands and coverage status

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Replenishment urgency derived from months of runway
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBand {
    /// Runway of one month or less
    Emergency,
    /// More than one and up to three months
    Critical,
    /// More than three and up to six months
    Attention,
    /// More than six months, no action needed
    Healthy,
}

impl UrgencyBand {
    pub const ALL: [UrgencyBand; 4] = [
        UrgencyBand::Emergency,
        UrgencyBand::Critical,
        UrgencyBand::Attention,
        UrgencyBand::Healthy,
    ];

    pub fn from_months(months_remaining: Decimal) -> Self {
        if months_remaining <= Decimal::ONE {
            UrgencyBand::Emergency
        } else if months_remaining <= Decimal::from(3) {
            UrgencyBand::Critical
        } else if months_remaining <= Decimal::from(6) {
            UrgencyBand::Attention
        } else {
            UrgencyBand::Healthy
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            UrgencyBand::Emergency => "≤1 mês",
            UrgencyBand::Critical => "1-3 meses",
            UrgencyBand::Attention => "3-6 meses",
            UrgencyBand::Healthy => ">6 meses",
        }
    }

    /// Chart colour used by dashboards for this band
    pub fn color(&self) -> &'static str {
        match self {
            UrgencyBand::Emergency => "#8B0000",
            UrgencyBand::Critical => "#FF0000",
            UrgencyBand::Attention => "#FFA500",
            UrgencyBand::Healthy => "#008000",
        }
    }
}

impl std::fmt::Display for UrgencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyBand::Emergency => write!(f, "Emergência"),
            UrgencyBand::Critical => write!(f, "Crítico"),
            UrgencyBand::Attention => write!(f, "Atenção"),
            UrgencyBand::Healthy => write!(f, "Saudável"),
        }
    }
}

/// Three-way stock coverage status used by the summary and general table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// One month or less
    Critical,
    /// More than one and up to three months
    Alert,
    /// More than three months
    Healthy,
}

impl CoverageStatus {
    pub fn from_coverage(coverage_months: Decimal) -> Self {
        if coverage_months <= Decimal::ONE {
            CoverageStatus::Critical
        } else if coverage_months <= Decimal::from(3) {
            CoverageStatus::Alert
        } else {
            CoverageStatus::Healthy
        }
    }
}

/// Coverage filter for table queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoverageFilter {
    #[default]
    All,
    Critical,
    Alert,
    Healthy,
}

impl CoverageFilter {
    pub fn matches(&self, coverage_months: Decimal) -> bool {
        let status = CoverageStatus::from_coverage(coverage_months);
        match self {
            CoverageFilter::All => true,
            CoverageFilter::Critical => status == CoverageStatus::Critical,
            CoverageFilter::Alert => status == CoverageStatus::Alert,
            CoverageFilter::Healthy => status == CoverageStatus::Healthy,
        }
    }
}
