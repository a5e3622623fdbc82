//! Dashboard views over a product dataset
//!
//! Every view is a pure function of the records and the purchase policy.
//! Company and version are plain inputs resolved by the caller.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    partition_products, CoverageFilter, CoverageStatus, ProductRecord, UrgencyBand,
};
use crate::purchasing::{
    calculate_purchase_suggestions, one_decimal, ratio, saturating_total, PurchasePolicy,
    PurchaseSuggestion,
};

/// Row limit for the critical, attention, top-to-buy and contact lists
pub const SECTION_LIMIT: usize = 10;

/// Runway above which a product needs no purchase
const ACTION_HORIZON_MONTHS: i64 = 6;

// ============================================================================
// Executive summary
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusCount {
    pub status: CoverageStatus,
    pub count: usize,
    /// Share of existing products, one decimal place
    pub percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionItem {
    UrgentPurchase { products: usize },
    PlanPurchase { products: usize },
    MonitorNewProducts { products: usize },
    UnderControl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_products: usize,
    pub new_products: usize,
    pub existing_products: usize,
    pub critical_products: usize,
    pub status_breakdown: Vec<StatusCount>,
    pub total_stock: Decimal,
    pub total_monthly_consumption: Decimal,
    /// Total stock over total consumption; `None` without consumption
    pub average_duration_months: Option<Decimal>,
    pub actions: Vec<ActionItem>,
}

pub fn executive_summary(records: &[ProductRecord]) -> ExecutiveSummary {
    let partition = partition_products(records);
    let existing = &partition.existing;

    let count_status = |status: CoverageStatus| {
        existing
            .iter()
            .filter(|r| CoverageStatus::from_coverage(r.coverage()) == status)
            .count()
    };
    let critical = count_status(CoverageStatus::Critical);
    let alert = count_status(CoverageStatus::Alert);
    let healthy = count_status(CoverageStatus::Healthy);

    let status_breakdown = if existing.is_empty() {
        Vec::new()
    } else {
        [
            (CoverageStatus::Critical, critical),
            (CoverageStatus::Alert, alert),
            (CoverageStatus::Healthy, healthy),
        ]
        .into_iter()
        .map(|(status, count)| StatusCount {
            status,
            count,
            percent: one_decimal(
                Decimal::from(count as u64) * Decimal::ONE_HUNDRED
                    / Decimal::from(existing.len() as u64),
            ),
        })
        .collect()
    };

    let total_stock = saturating_total(existing.iter().map(|r| r.current_stock));
    let total_monthly_consumption = saturating_total(existing.iter().map(|r| r.monthly_consumption));
    let average_duration_months = (total_monthly_consumption > Decimal::ZERO)
        .then(|| one_decimal(ratio(total_stock, total_monthly_consumption)));

    let mut actions = Vec::new();
    if !existing.is_empty() {
        if critical > 0 {
            actions.push(ActionItem::UrgentPurchase { products: critical });
        }
        if alert > 0 {
            actions.push(ActionItem::PlanPurchase { products: alert });
        }
        if !partition.new.is_empty() {
            actions.push(ActionItem::MonitorNewProducts {
                products: partition.new.len(),
            });
        }
        if critical == 0 && alert == 0 {
            actions.push(ActionItem::UnderControl);
        }
    }

    ExecutiveSummary {
        total_products: records.len(),
        new_products: partition.new.len(),
        existing_products: existing.len(),
        critical_products: critical,
        status_breakdown,
        total_stock,
        total_monthly_consumption,
        average_duration_months,
        actions,
    }
}

// ============================================================================
// Purchase list
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseList {
    pub needs_action: usize,
    pub emergency_count: usize,
    pub critical_count: usize,
    pub attention_count: usize,
    pub emergency: Vec<PurchaseSuggestion>,
    /// First [`SECTION_LIMIT`] critical products
    pub critical: Vec<PurchaseSuggestion>,
    /// First [`SECTION_LIMIT`] attention products
    pub attention: Vec<PurchaseSuggestion>,
    pub total_investment: Decimal,
}

/// Suggestions with consumption and at most six months of runway, most
/// urgent first. Ties keep input order.
pub fn needs_action(suggestions: &[PurchaseSuggestion]) -> Vec<PurchaseSuggestion> {
    let horizon = Decimal::from(ACTION_HORIZON_MONTHS);
    let mut selected: Vec<PurchaseSuggestion> = suggestions
        .iter()
        .filter(|s| s.months_remaining <= horizon && s.monthly_consumption > Decimal::ZERO)
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.months_remaining.cmp(&b.months_remaining));
    selected
}

pub fn purchase_list(suggestions: &[PurchaseSuggestion]) -> PurchaseList {
    let selected = needs_action(suggestions);

    let in_band = |band: UrgencyBand| -> Vec<PurchaseSuggestion> {
        selected.iter().filter(|s| s.urgency == band).cloned().collect()
    };
    let emergency = in_band(UrgencyBand::Emergency);
    let mut critical = in_band(UrgencyBand::Critical);
    let mut attention = in_band(UrgencyBand::Attention);

    let critical_count = critical.len();
    let attention_count = attention.len();
    critical.truncate(SECTION_LIMIT);
    attention.truncate(SECTION_LIMIT);

    PurchaseList {
        needs_action: selected.len(),
        emergency_count: emergency.len(),
        critical_count,
        attention_count,
        total_investment: saturating_total(selected.iter().map(|s| s.estimated_investment)),
        emergency,
        critical,
        attention,
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BandTotal {
    pub band: UrgencyBand,
    pub label: String,
    pub color: String,
    pub products: usize,
    pub quantity: Decimal,
    pub investment: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierBreakdown {
    pub supplier: String,
    pub products: usize,
    pub total_quantity: Decimal,
    pub total_investment: Decimal,
    /// Mean runway, one decimal place
    pub average_months: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentByPeriod {
    pub this_month: Decimal,
    pub next_three_months: Decimal,
    pub long_term: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductOverview {
    pub existing: usize,
    pub new: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub urgency: Vec<BandTotal>,
    pub top_to_buy: Vec<PurchaseSuggestion>,
    pub suppliers: Vec<SupplierBreakdown>,
    pub investment_by_period: InvestmentByPeriod,
    pub overview: ProductOverview,
}

pub fn band_totals(suggestions: &[PurchaseSuggestion]) -> Vec<BandTotal> {
    UrgencyBand::ALL
        .iter()
        .map(|&band| {
            let members = suggestions.iter().filter(|s| s.urgency == band);
            BandTotal {
                band,
                label: band.range_label().to_string(),
                color: band.color().to_string(),
                products: members.clone().count(),
                quantity: saturating_total(members.clone().map(|s| s.quantity_to_order)),
                investment: saturating_total(members.map(|s| s.estimated_investment)),
            }
        })
        .collect()
}

/// Products with three months or less of runway and some consumption,
/// largest purchase first
pub fn top_to_buy(suggestions: &[PurchaseSuggestion]) -> Vec<PurchaseSuggestion> {
    let horizon = Decimal::from(3);
    let mut selected: Vec<PurchaseSuggestion> = suggestions
        .iter()
        .filter(|s| s.months_remaining <= horizon && s.monthly_consumption > Decimal::ZERO)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.quantity_to_order.cmp(&a.quantity_to_order));
    selected.truncate(SECTION_LIMIT);
    selected
}

/// Totals per supplier, highest investment first; ties by supplier name
pub fn supplier_breakdown(suggestions: &[PurchaseSuggestion]) -> Vec<SupplierBreakdown> {
    #[derive(Default)]
    struct Acc {
        products: usize,
        quantity: Decimal,
        investment: Decimal,
        months: Decimal,
    }

    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for s in suggestions {
        let acc = groups.entry(s.supplier.as_str()).or_default();
        acc.products += 1;
        acc.quantity = acc.quantity.saturating_add(s.quantity_to_order);
        acc.investment = acc.investment.saturating_add(s.estimated_investment);
        acc.months = acc.months.saturating_add(s.months_remaining);
    }

    let mut breakdown: Vec<SupplierBreakdown> = groups
        .into_iter()
        .map(|(supplier, acc)| SupplierBreakdown {
            supplier: supplier.to_string(),
            products: acc.products,
            total_quantity: acc.quantity,
            total_investment: acc.investment,
            average_months: one_decimal(ratio(acc.months, Decimal::from(acc.products as u64))),
        })
        .collect();
    breakdown.sort_by(|a, b| b.total_investment.cmp(&a.total_investment));
    breakdown
}

pub fn investment_by_period(suggestions: &[PurchaseSuggestion]) -> InvestmentByPeriod {
    let mut period = InvestmentByPeriod {
        this_month: Decimal::ZERO,
        next_three_months: Decimal::ZERO,
        long_term: Decimal::ZERO,
    };
    for s in suggestions {
        match s.urgency {
            UrgencyBand::Emergency => {
                period.this_month = period.this_month.saturating_add(s.estimated_investment)
            }
            UrgencyBand::Critical => {
                period.next_three_months =
                    period.next_three_months.saturating_add(s.estimated_investment)
            }
            UrgencyBand::Attention | UrgencyBand::Healthy => {
                period.long_term = period.long_term.saturating_add(s.estimated_investment)
            }
        }
    }
    period
}

pub fn dashboard(records: &[ProductRecord], policy: &PurchasePolicy) -> Dashboard {
    let partition = partition_products(records);
    let suggestions = calculate_purchase_suggestions(partition.existing.iter().copied(), policy);

    Dashboard {
        urgency: band_totals(&suggestions),
        top_to_buy: top_to_buy(&suggestions),
        suppliers: supplier_breakdown(&suggestions),
        investment_by_period: investment_by_period(&suggestions),
        overview: ProductOverview {
            existing: partition.existing.len(),
            new: partition.new.len(),
        },
    }
}

// ============================================================================
// Urgent contacts
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrgentContact {
    pub name: String,
    pub supplier: String,
    pub current_stock: Decimal,
    pub months_remaining: Decimal,
    pub depletion_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgentContacts {
    pub total: usize,
    /// First [`SECTION_LIMIT`] products, in input order
    pub contacts: Vec<UrgentContact>,
}

pub fn urgent_contacts(suggestions: &[PurchaseSuggestion]) -> UrgentContacts {
    let critical: Vec<&PurchaseSuggestion> = suggestions
        .iter()
        .filter(|s| s.urgency == UrgencyBand::Emergency)
        .collect();

    UrgentContacts {
        total: critical.len(),
        contacts: critical
            .into_iter()
            .take(SECTION_LIMIT)
            .map(|s| UrgentContact {
                name: s.name.clone(),
                supplier: s.supplier.clone(),
                current_stock: s.current_stock,
                months_remaining: s.months_remaining,
                depletion_label: s.depletion_label.clone(),
            })
            .collect(),
    }
}

// ============================================================================
// General table
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableQuery {
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
    #[serde(default)]
    pub coverage: CoverageFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub supplier_name: String,
    /// Coverage in months, two decimal places
    pub coverage_months: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableStatistics {
    pub total_stock: Decimal,
    pub average_consumption: Option<Decimal>,
    pub average_coverage: Option<Decimal>,
    pub average_moq: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierCount {
    pub supplier: String,
    pub products: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneralTable {
    pub shown: usize,
    pub total: usize,
    pub rows: Vec<TableRow>,
    pub statistics: TableStatistics,
    pub suppliers: Vec<SupplierCount>,
}

fn mean<I: Iterator<Item = Decimal>>(values: I) -> Option<Decimal> {
    let (sum, count) = values.fold((Decimal::ZERO, 0u64), |(sum, n), v| {
        (sum.saturating_add(v), n + 1)
    });
    (count > 0).then(|| sum / Decimal::from(count))
}

pub fn general_table(
    records: &[ProductRecord],
    query: &TableQuery,
    policy: &PurchasePolicy,
) -> GeneralTable {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let filtered: Vec<&ProductRecord> = records
        .iter()
        .filter(|r| match &needle {
            Some(n) => r.name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .filter(|r| query.coverage.matches(r.coverage()))
        .collect();

    let statistics = TableStatistics {
        total_stock: saturating_total(filtered.iter().map(|r| r.current_stock)),
        average_consumption: mean(filtered.iter().map(|r| r.monthly_consumption)),
        average_coverage: mean(filtered.iter().map(|r| r.coverage())),
        average_moq: mean(filtered.iter().map(|r| r.minimum_order_quantity)),
    };

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in &filtered {
        *counts.entry(r.supplier_or(&policy.default_supplier)).or_default() += 1;
    }
    let mut suppliers: Vec<SupplierCount> = counts
        .into_iter()
        .map(|(supplier, products)| SupplierCount {
            supplier: supplier.to_string(),
            products,
        })
        .collect();
    suppliers.sort_by(|a, b| b.products.cmp(&a.products));

    let rows = filtered
        .iter()
        .map(|r| TableRow {
            record: (*r).clone(),
            supplier_name: r.supplier_or(&policy.default_supplier).to_string(),
            coverage_months: r.coverage().round_dp(2),
        })
        .collect::<Vec<_>>();

    GeneralTable {
        shown: rows.len(),
        total: records.len(),
        rows,
        statistics,
        suppliers,
    }
}

// ============================================================================
// Full report
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub company: String,
    /// `None` when the active version was used
    pub version_id: Option<i64>,
    pub summary: ExecutiveSummary,
    pub purchase_list: PurchaseList,
    pub dashboard: Dashboard,
    pub urgent_contacts: UrgentContacts,
}

/// Suggestions for the existing products of a dataset
pub fn existing_product_suggestions(
    records: &[ProductRecord],
    policy: &PurchasePolicy,
) -> Vec<PurchaseSuggestion> {
    let partition = partition_products(records);
    calculate_purchase_suggestions(partition.existing.iter().copied(), policy)
}

pub fn build_report(
    company: &str,
    version_id: Option<i64>,
    records: &[ProductRecord],
    policy: &PurchasePolicy,
) -> AnalyticsReport {
    let suggestions = existing_product_suggestions(records, policy);

    AnalyticsReport {
        company: company.to_string(),
        version_id,
        summary: executive_summary(records),
        purchase_list: purchase_list(&suggestions),
        dashboard: dashboard(records, policy),
        urgent_contacts: urgent_contacts(&suggestions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(name: &str, stock: i64, consumption: i64) -> ProductRecord {
        ProductRecord::new(name, Decimal::from(stock), Decimal::from(consumption))
    }

    fn sample_records() -> Vec<ProductRecord> {
        vec![
            // 0.4 months, emergency
            product("A", 4, 10).with_supplier("China"),
            // 2 months, critical
            product("B", 20, 10).with_supplier("China"),
            // 5 months, attention
            product("C", 50, 10),
            // 12 months, healthy
            product("D", 120, 10).with_supplier("Taiwan"),
            // depleted, emergency
            product("E", 0, 4).with_supplier("Taiwan"),
            // new product
            product("F", 0, 0).with_total_purchase_quantity(Decimal::from(200)),
        ]
    }

    #[test]
    fn test_executive_summary_counts() {
        let summary = executive_summary(&sample_records());

        assert_eq!(summary.total_products, 6);
        assert_eq!(summary.new_products, 1);
        assert_eq!(summary.existing_products, 5);
        assert_eq!(summary.critical_products, 2);
        assert_eq!(summary.status_breakdown[0].count, 2);
        assert_eq!(summary.status_breakdown[0].percent, dec("40.0"));
        assert_eq!(summary.status_breakdown[1].count, 1);
        assert_eq!(summary.status_breakdown[2].count, 2);
        assert_eq!(summary.total_stock, Decimal::from(194));
        assert_eq!(summary.total_monthly_consumption, Decimal::from(44));
        assert_eq!(summary.average_duration_months, Some(dec("4.4")));
        assert_eq!(
            summary.actions,
            vec![
                ActionItem::UrgentPurchase { products: 2 },
                ActionItem::PlanPurchase { products: 1 },
                ActionItem::MonitorNewProducts { products: 1 },
            ]
        );
    }

    #[test]
    fn test_executive_summary_under_control() {
        let summary = executive_summary(&[product("D", 120, 10)]);
        assert_eq!(summary.actions, vec![ActionItem::UnderControl]);
    }

    #[test]
    fn test_executive_summary_empty() {
        let summary = executive_summary(&[]);
        assert!(summary.status_breakdown.is_empty());
        assert!(summary.actions.is_empty());
        assert_eq!(summary.average_duration_months, None);
    }

    #[test]
    fn test_purchase_list_sections() {
        let suggestions = existing_product_suggestions(&sample_records(), &PurchasePolicy::default());
        let list = purchase_list(&suggestions);

        assert_eq!(list.needs_action, 4);
        let emergency: Vec<_> = list.emergency.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(emergency, vec!["E", "A"]);
        assert_eq!(list.critical_count, 1);
        assert_eq!(list.attention_count, 1);
        // E: 24 -> 50, A: 56 -> 100, B: 40 -> 50, C: 10 -> 50
        assert_eq!(list.total_investment, Decimal::from(250 * 15));
    }

    #[test]
    fn test_needs_action_ties_keep_input_order() {
        let records = vec![product("first", 10, 10), product("second", 20, 20)];
        let suggestions = existing_product_suggestions(&records, &PurchasePolicy::default());
        let names: Vec<_> = needs_action(&suggestions).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_purchase_list_truncates_long_sections() {
        let records: Vec<_> = (0..15).map(|i| product(&format!("P{}", i), 20, 10)).collect();
        let suggestions = existing_product_suggestions(&records, &PurchasePolicy::default());
        let list = purchase_list(&suggestions);
        assert_eq!(list.critical_count, 15);
        assert_eq!(list.critical.len(), SECTION_LIMIT);
    }

    #[test]
    fn test_dashboard_bands_and_periods() {
        let board = dashboard(&sample_records(), &PurchasePolicy::default());

        let counts: Vec<_> = board.urgency.iter().map(|b| b.products).collect();
        assert_eq!(counts, vec![2, 1, 1, 1]);
        assert_eq!(board.urgency[0].investment, Decimal::from(150 * 15));
        assert_eq!(board.investment_by_period.this_month, Decimal::from(150 * 15));
        assert_eq!(board.investment_by_period.next_three_months, Decimal::from(50 * 15));
        assert_eq!(board.investment_by_period.long_term, Decimal::from(50 * 15));
        assert_eq!(board.overview, ProductOverview { existing: 5, new: 1 });
    }

    #[test]
    fn test_top_to_buy_orders_by_quantity() {
        let board = dashboard(&sample_records(), &PurchasePolicy::default());
        let names: Vec<_> = board.top_to_buy.iter().map(|s| s.name.as_str()).collect();
        // A 100, E 50, B 50 (ties keep input order)
        assert_eq!(names, vec!["A", "B", "E"]);
    }

    #[test]
    fn test_supplier_breakdown() {
        let board = dashboard(&sample_records(), &PurchasePolicy::default());
        let china = &board.suppliers[0];
        assert_eq!(china.supplier, "China");
        assert_eq!(china.products, 2);
        assert_eq!(china.total_quantity, Decimal::from(150));
        assert_eq!(china.average_months, dec("1.2"));

        let names: Vec<_> = board.suppliers.iter().map(|s| s.supplier.as_str()).collect();
        assert_eq!(names, vec!["China", "Brazil", "Taiwan"]);
    }

    #[test]
    fn test_urgent_contacts() {
        let suggestions = existing_product_suggestions(&sample_records(), &PurchasePolicy::default());
        let contacts = urgent_contacts(&suggestions);
        assert_eq!(contacts.total, 2);
        assert_eq!(contacts.contacts[0].name, "A");
        assert_eq!(contacts.contacts[0].depletion_label, "12 dias");
        assert_eq!(contacts.contacts[1].depletion_label, "JÁ ACABOU");
    }

    #[test]
    fn test_general_table_search_and_filter() {
        let mut records = sample_records();
        records.push(product("a-extra", 1, 10));
        let policy = PurchasePolicy::default();

        let query = TableQuery {
            search: Some(" a".to_string()),
            coverage: CoverageFilter::Critical,
        };
        let table = general_table(&records, &query, &policy);
        let names: Vec<_> = table.rows.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["A", "a-extra"]);
        assert_eq!(table.shown, 2);
        assert_eq!(table.total, 7);
        assert_eq!(table.statistics.total_stock, Decimal::from(5));
        assert_eq!(table.statistics.average_consumption, Some(Decimal::from(10)));
        assert_eq!(
            table.suppliers,
            vec![
                SupplierCount { supplier: "Brazil".into(), products: 1 },
                SupplierCount { supplier: "China".into(), products: 1 },
            ]
        );
    }

    #[test]
    fn test_general_table_empty_selection_has_no_means() {
        let query = TableQuery {
            search: Some("zzz".to_string()),
            coverage: CoverageFilter::All,
        };
        let table = general_table(&sample_records(), &query, &PurchasePolicy::default());
        assert_eq!(table.shown, 0);
        assert_eq!(table.statistics.average_coverage, None);
        assert_eq!(table.statistics.total_stock, Decimal::ZERO);
    }

    #[test]
    fn test_extreme_quantities_saturate_totals() {
        let huge = Decimal::from_str("20000000000000000000000000000").unwrap();
        let records = vec![
            product("A", 0, 0).with_supplier("China"),
            ProductRecord::new("B", Decimal::ZERO, huge).with_supplier("China"),
            ProductRecord::new("C", Decimal::MAX, Decimal::new(1, 20)),
            ProductRecord::new("D", Decimal::MAX, Decimal::ONE),
        ];
        let policy = PurchasePolicy::default();
        let report = build_report("MINIPA", None, &records, &policy);

        assert_eq!(report.summary.total_stock, Decimal::MAX);
        assert_eq!(report.purchase_list.total_investment, Decimal::MAX);
        assert_eq!(report.dashboard.investment_by_period.this_month, Decimal::MAX);
        assert_eq!(report.dashboard.urgency[3].products, 2);

        let table = general_table(&records, &TableQuery::default(), &policy);
        assert_eq!(table.statistics.total_stock, Decimal::MAX);
        assert_eq!(table.rows[2].coverage_months, Decimal::MAX);
    }

    #[test]
    fn test_build_report_is_repeatable() {
        let records = sample_records();
        let policy = PurchasePolicy::default();
        let first = build_report("MINIPA", Some(4), &records, &policy);
        let second = build_report("MINIPA", Some(4), &records, &policy);

        assert_eq!(first.company, "MINIPA");
        assert_eq!(first.version_id, Some(4));
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
