//! Purchase suggestion calculator
//!
//! Turns product stock records into reorder recommendations: how long the
//! stock lasts, how much to buy to reach the target coverage and a rough
//! investment estimate. Everything here is pure and recomputed per call.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ProductRecord, UrgencyBand, NO_CONSUMPTION_MONTHS};

pub const NO_CONSUMPTION_LABEL: &str = "Sem consumo";
pub const DEPLETED_LABEL: &str = "JÁ ACABOU";

/// Business assumptions behind the suggestions.
///
/// The unit cost and default supplier are placeholders with no pricing or
/// master-data source behind them, so they are configuration, not invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PurchasePolicy {
    /// Flat cost per unit used for investment estimates
    pub unit_cost: Decimal,
    /// Supplier assumed when a record has none
    pub default_supplier: String,
    /// Months of consumption the reorder should cover
    pub target_coverage_months: u32,
    /// Purchase lot used when the supplier has no MOQ
    pub rounding_lot: Decimal,
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self {
            unit_cost: Decimal::from(15),
            default_supplier: "Brazil".to_string(),
            target_coverage_months: 6,
            rounding_lot: Decimal::from(50),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("unit cost cannot be negative")]
    NegativeUnitCost,
    #[error("default supplier cannot be blank")]
    BlankDefaultSupplier,
    #[error("target coverage must be at least one month")]
    ZeroTargetCoverage,
    #[error("rounding lot must be positive")]
    NonPositiveRoundingLot,
}

impl PurchasePolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.unit_cost < Decimal::ZERO {
            return Err(PolicyError::NegativeUnitCost);
        }
        if self.default_supplier.trim().is_empty() {
            return Err(PolicyError::BlankDefaultSupplier);
        }
        if self.target_coverage_months == 0 {
            return Err(PolicyError::ZeroTargetCoverage);
        }
        if self.rounding_lot <= Decimal::ZERO {
            return Err(PolicyError::NonPositiveRoundingLot);
        }
        Ok(())
    }
}

/// Stock runway of a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Depletion {
    pub label: String,
    /// 999 when there is no consumption
    pub months_remaining: Decimal,
}

/// Reorder recommendation for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseSuggestion {
    pub name: String,
    pub current_stock: Decimal,
    pub monthly_consumption: Decimal,
    pub minimum_order_quantity: Decimal,
    pub supplier: String,
    pub depletion_label: String,
    pub months_remaining: Decimal,
    pub quantity_to_order: Decimal,
    /// Illustrative only, see [`PurchasePolicy::unit_cost`]
    pub estimated_investment: Decimal,
    pub urgency: UrgencyBand,
}

/// How long `stock` lasts at `monthly_consumption`
pub fn depletion(stock: Decimal, monthly_consumption: Decimal) -> Depletion {
    if monthly_consumption <= Decimal::ZERO {
        return Depletion {
            label: NO_CONSUMPTION_LABEL.to_string(),
            months_remaining: Decimal::from(NO_CONSUMPTION_MONTHS),
        };
    }

    let months_remaining = ratio(stock, monthly_consumption);

    if months_remaining <= Decimal::ZERO {
        Depletion {
            label: DEPLETED_LABEL.to_string(),
            months_remaining: Decimal::ZERO,
        }
    } else if months_remaining < Decimal::new(5, 1) {
        let days = (months_remaining * Decimal::from(30))
            .floor()
            .to_i64()
            .unwrap_or(0);
        Depletion {
            label: format!("{} dias", days),
            months_remaining,
        }
    } else {
        Depletion {
            label: format!("{} meses", one_decimal(months_remaining)),
            months_remaining,
        }
    }
}

/// Units to buy so stock covers the policy's target months
pub fn quantity_to_order(
    monthly_consumption: Decimal,
    current_stock: Decimal,
    moq: Decimal,
    policy: &PurchasePolicy,
) -> Decimal {
    if monthly_consumption <= Decimal::ZERO {
        return if moq > Decimal::ZERO { moq } else { Decimal::ZERO };
    }

    let ideal_stock =
        monthly_consumption.saturating_mul(Decimal::from(policy.target_coverage_months));
    let shortfall = ideal_stock.saturating_sub(current_stock).max(Decimal::ZERO);

    if shortfall <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let unit = if moq > Decimal::ZERO { moq } else { policy.rounding_lot };
    match shortfall.checked_div(unit) {
        Some(multiples) => multiples.ceil().max(Decimal::ONE).saturating_mul(unit),
        // Unit too small to count in multiples
        None => shortfall,
    }
}

/// Build the suggestion for a single record
pub fn suggest(record: &ProductRecord, policy: &PurchasePolicy) -> PurchaseSuggestion {
    let runway = depletion(record.current_stock, record.monthly_consumption);
    let quantity = quantity_to_order(
        record.monthly_consumption,
        record.current_stock,
        record.minimum_order_quantity,
        policy,
    );

    PurchaseSuggestion {
        name: record.name.clone(),
        current_stock: record.current_stock,
        monthly_consumption: record.monthly_consumption,
        minimum_order_quantity: record.minimum_order_quantity,
        supplier: record.supplier_or(&policy.default_supplier).to_string(),
        urgency: UrgencyBand::from_months(runway.months_remaining),
        depletion_label: runway.label,
        months_remaining: runway.months_remaining,
        quantity_to_order: quantity,
        estimated_investment: quantity.saturating_mul(policy.unit_cost),
    }
}

/// One suggestion per record, in input order
pub fn calculate_purchase_suggestions<'a, I>(
    records: I,
    policy: &PurchasePolicy,
) -> Vec<PurchaseSuggestion>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    records.into_iter().map(|r| suggest(r, policy)).collect()
}

/// `numerator / denominator`, saturating at the Decimal bounds when the
/// quotient does not fit
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Sum that saturates at the Decimal bounds
pub fn saturating_total<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Round half to even and always show one decimal place
pub(crate) fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    // Values near the Decimal bounds have no room for a fractional digit
    if rounded.abs() < Decimal::MAX / Decimal::TEN {
        rounded.rescale(1);
    }
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sci(s: &str) -> Decimal {
        Decimal::from_scientific(s).unwrap()
    }

    fn record(stock: i64, consumption: i64, moq: i64) -> ProductRecord {
        ProductRecord::new("P", Decimal::from(stock), Decimal::from(consumption))
            .with_minimum_order_quantity(Decimal::from(moq))
    }

    #[test]
    fn test_depleted_product_without_moq() {
        let s = suggest(&record(0, 10, 0), &PurchasePolicy::default());
        assert_eq!(s.months_remaining, Decimal::ZERO);
        assert_eq!(s.depletion_label, "JÁ ACABOU");
        assert_eq!(s.quantity_to_order, Decimal::from(100));
        assert_eq!(s.estimated_investment, Decimal::from(1500));
        assert_eq!(s.urgency, UrgencyBand::Emergency);
    }

    #[test]
    fn test_shortfall_rounded_up_to_moq() {
        let s = suggest(&record(100, 20, 30), &PurchasePolicy::default());
        assert_eq!(s.months_remaining, Decimal::from(5));
        assert_eq!(s.depletion_label, "5.0 meses");
        assert_eq!(s.quantity_to_order, Decimal::from(30));
        assert_eq!(s.estimated_investment, Decimal::from(450));
        assert_eq!(s.urgency, UrgencyBand::Attention);
    }

    #[test]
    fn test_no_consumption_returns_moq() {
        let s = suggest(&record(50, 0, 25), &PurchasePolicy::default());
        assert_eq!(s.months_remaining, Decimal::from(999));
        assert_eq!(s.depletion_label, "Sem consumo");
        assert_eq!(s.quantity_to_order, Decimal::from(25));
        assert_eq!(s.urgency, UrgencyBand::Healthy);
    }

    #[test]
    fn test_short_runway_reported_in_days() {
        let runway = depletion(Decimal::from(10), Decimal::from(40));
        assert_eq!(runway.months_remaining, dec("0.25"));
        assert_eq!(runway.label, "7 dias");
    }

    #[test]
    fn test_half_month_switches_to_months() {
        let runway = depletion(Decimal::from(5), Decimal::from(10));
        assert_eq!(runway.label, "0.5 meses");
    }

    #[test]
    fn test_months_label_rounds_half_to_even() {
        assert_eq!(depletion(Decimal::from(5), Decimal::from(4)).label, "1.2 meses");
        assert_eq!(depletion(Decimal::from(9), Decimal::from(4)).label, "2.2 meses");
        assert_eq!(depletion(dec("1.35"), Decimal::ONE).label, "1.4 meses");
        assert_eq!(depletion(Decimal::from(7), Decimal::from(3)).label, "2.3 meses");
    }

    #[test]
    fn test_runway_overflow_saturates() {
        let runway = depletion(sci("1e20"), sci("1e-10"));
        assert_eq!(runway.months_remaining, Decimal::MAX);
        assert!(runway.label.ends_with(" meses"));
        assert_eq!(UrgencyBand::from_months(runway.months_remaining), UrgencyBand::Healthy);

        let owed = depletion(sci("-1e20"), sci("1e-10"));
        assert_eq!(owed.label, "JÁ ACABOU");
        assert_eq!(owed.months_remaining, Decimal::ZERO);
    }

    #[test]
    fn test_order_overflow_saturates() {
        let huge = dec("20000000000000000000000000000");
        let s = suggest(&ProductRecord::new("P", Decimal::ZERO, huge), &PurchasePolicy::default());
        assert_eq!(s.quantity_to_order, Decimal::MAX);
        assert_eq!(s.estimated_investment, Decimal::MAX);
        assert_eq!(s.urgency, UrgencyBand::Emergency);

        let tiny_moq = ProductRecord::new("P", Decimal::ZERO, Decimal::from(10))
            .with_minimum_order_quantity(dec("0.0000000000000000000000000001"));
        let q = suggest(&tiny_moq, &PurchasePolicy::default()).quantity_to_order;
        assert_eq!(q, Decimal::from(60));
    }

    #[test]
    fn test_saturating_total() {
        assert_eq!(saturating_total([Decimal::ONE, Decimal::TWO]), Decimal::from(3));
        assert_eq!(saturating_total([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_total(std::iter::empty()), Decimal::ZERO);
    }

    #[test]
    fn test_no_shortfall_orders_nothing() {
        let policy = PurchasePolicy::default();
        assert_eq!(
            quantity_to_order(Decimal::from(10), Decimal::from(60), Decimal::from(25), &policy),
            Decimal::ZERO
        );
        assert_eq!(
            quantity_to_order(Decimal::from(10), Decimal::from(500), Decimal::ZERO, &policy),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_no_consumption_and_no_moq_orders_nothing() {
        let policy = PurchasePolicy::default();
        assert_eq!(
            quantity_to_order(Decimal::ZERO, Decimal::from(5), Decimal::ZERO, &policy),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_policy_controls_target_and_lot() {
        let policy = PurchasePolicy {
            target_coverage_months: 3,
            rounding_lot: Decimal::from(10),
            unit_cost: Decimal::from(2),
            ..PurchasePolicy::default()
        };
        // ideal 30, shortfall 25, rounded to 30
        let s = suggest(&record(5, 10, 0), &policy);
        assert_eq!(s.quantity_to_order, Decimal::from(30));
        assert_eq!(s.estimated_investment, Decimal::from(60));
    }

    #[test]
    fn test_supplier_falls_back_to_policy_default() {
        let policy = PurchasePolicy {
            default_supplier: "Nacional".to_string(),
            ..PurchasePolicy::default()
        };
        assert_eq!(suggest(&record(1, 1, 0), &policy).supplier, "Nacional");
        let imported = record(1, 1, 0).with_supplier("Taiwan");
        assert_eq!(suggest(&imported, &policy).supplier, "Taiwan");
    }

    #[test]
    fn test_policy_validation() {
        assert!(PurchasePolicy::default().validate().is_ok());

        let negative = PurchasePolicy { unit_cost: Decimal::from(-1), ..PurchasePolicy::default() };
        assert_eq!(negative.validate(), Err(PolicyError::NegativeUnitCost));

        let blank = PurchasePolicy { default_supplier: " ".into(), ..PurchasePolicy::default() };
        assert_eq!(blank.validate(), Err(PolicyError::BlankDefaultSupplier));

        let zero = PurchasePolicy { target_coverage_months: 0, ..PurchasePolicy::default() };
        assert_eq!(zero.validate(), Err(PolicyError::ZeroTargetCoverage));

        let lot = PurchasePolicy { rounding_lot: Decimal::ZERO, ..PurchasePolicy::default() };
        assert_eq!(lot.validate(), Err(PolicyError::NonPositiveRoundingLot));
    }

    #[test]
    fn test_one_decimal_pads_whole_numbers() {
        assert_eq!(one_decimal(Decimal::from(5)).to_string(), "5.0");
        assert_eq!(one_decimal(dec("2.349")).to_string(), "2.3");
    }

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..100_000, 0u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
    }

    fn record_strategy() -> impl Strategy<Value = ProductRecord> {
        (quantity_strategy(), quantity_strategy(), 0i64..500).prop_map(|(stock, consumption, moq)| {
            ProductRecord::new("P", stock, consumption).with_minimum_order_quantity(Decimal::from(moq))
        })
    }

    proptest! {
        #[test]
        fn prop_no_consumption_is_sentinel(stock in quantity_strategy()) {
            let runway = depletion(stock, Decimal::ZERO);
            prop_assert_eq!(runway.months_remaining, Decimal::from(999));
            prop_assert_eq!(runway.label, "Sem consumo");
        }

        #[test]
        fn prop_empty_stock_is_depleted(consumption in 1i64..100_000) {
            let runway = depletion(Decimal::ZERO, Decimal::from(consumption));
            prop_assert_eq!(runway.label, "JÁ ACABOU");
        }

        #[test]
        fn prop_quantity_is_multiple_of_moq_or_lot(r in record_strategy()) {
            let policy = PurchasePolicy::default();
            let q = quantity_to_order(r.monthly_consumption, r.current_stock, r.minimum_order_quantity, &policy);
            prop_assert!(q >= Decimal::ZERO);
            let unit = if r.minimum_order_quantity > Decimal::ZERO {
                r.minimum_order_quantity
            } else {
                policy.rounding_lot
            };
            prop_assert_eq!(q % unit, Decimal::ZERO);
        }

        #[test]
        fn prop_order_covers_shortfall(r in record_strategy()) {
            let policy = PurchasePolicy::default();
            prop_assume!(r.monthly_consumption > Decimal::ZERO);
            let q = quantity_to_order(r.monthly_consumption, r.current_stock, r.minimum_order_quantity, &policy);
            let ideal = r.monthly_consumption * Decimal::from(policy.target_coverage_months);
            prop_assert!(r.current_stock + q >= ideal);
        }

        #[test]
        fn prop_suggestions_preserve_order_and_are_idempotent(
            records in prop::collection::vec(record_strategy(), 0..20)
        ) {
            let named: Vec<ProductRecord> = records
                .into_iter()
                .enumerate()
                .map(|(i, mut r)| { r.name = format!("P{}", i); r })
                .collect();
            let policy = PurchasePolicy::default();

            let first = calculate_purchase_suggestions(&named, &policy);
            let second = calculate_purchase_suggestions(&named, &policy);

            prop_assert_eq!(first.len(), named.len());
            prop_assert_eq!(&first, &second);
            for (record, suggestion) in named.iter().zip(first.iter()) {
                prop_assert_eq!(&record.name, &suggestion.name);
            }
        }
    }
}
