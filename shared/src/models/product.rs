//! Product stock records as delivered by the warehouse export or a parsed sheet

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::purchasing::ratio;

/// Runway reported for products without consumption
pub const NO_CONSUMPTION_MONTHS: u32 = 999;

/// Footer text the export tool appends below the data rows
const FILTER_FOOTER: &str = "Filtros aplicados";

/// One product row of an analysis run.
///
/// Numeric fields are read leniently: a missing, null or unparseable value
/// becomes zero instead of failing the whole load.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub current_stock: Decimal,
    /// Trailing six-month average
    pub monthly_consumption: Decimal,
    /// Zero means the supplier imposes no minimum
    pub minimum_order_quantity: Decimal,
    pub supplier: Option<String>,
    /// Coverage in months precomputed by the export, when present
    pub stock_coverage: Option<Decimal>,
    pub total_purchase_quantity: Decimal,
}

// Accepted column names per field, checked in order
const NAME_COLUMNS: &[&str] = &["name", "Produto", "Item", "Modelo"];
const STOCK_COLUMNS: &[&str] = &["current_stock", "Estoque", "Estoque_Total"];
const CONSUMPTION_COLUMNS: &[&str] = &["monthly_consumption", "Média 6 Meses", "Vendas_Medias"];
const MOQ_COLUMNS: &[&str] = &["minimum_order_quantity", "MOQ"];
const SUPPLIER_COLUMNS: &[&str] = &["supplier", "UltimoFornecedor", "UltimoFor"];
const COVERAGE_COLUMNS: &[&str] = &["stock_coverage", "Estoque Cobertura"];
const PURCHASES_COLUMNS: &[&str] = &["total_purchase_quantity", "Qtde Tot Compras"];

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = match Value::deserialize(deserializer)? {
            Value::Object(row) => row,
            other => {
                return Err(de::Error::custom(format!(
                    "expected a product row object, found {}",
                    other
                )))
            }
        };

        let decimal = |names: &[&str]| {
            column(&row, names)
                .and_then(decimal_from_value)
                .unwrap_or(Decimal::ZERO)
        };

        Ok(Self {
            name: column(&row, NAME_COLUMNS)
                .and_then(text_from_value)
                .unwrap_or_default(),
            current_stock: decimal(STOCK_COLUMNS),
            monthly_consumption: decimal(CONSUMPTION_COLUMNS),
            minimum_order_quantity: decimal(MOQ_COLUMNS),
            supplier: column(&row, SUPPLIER_COLUMNS).and_then(text_from_value),
            stock_coverage: column(&row, COVERAGE_COLUMNS).and_then(decimal_from_value),
            total_purchase_quantity: decimal(PURCHASES_COLUMNS),
        })
    }
}

impl ProductRecord {
    pub fn new(name: impl Into<String>, current_stock: Decimal, monthly_consumption: Decimal) -> Self {
        Self {
            name: name.into(),
            current_stock,
            monthly_consumption,
            minimum_order_quantity: Decimal::ZERO,
            supplier: None,
            stock_coverage: None,
            total_purchase_quantity: Decimal::ZERO,
        }
    }

    pub fn with_minimum_order_quantity(mut self, moq: Decimal) -> Self {
        self.minimum_order_quantity = moq;
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_stock_coverage(mut self, coverage: Decimal) -> Self {
        self.stock_coverage = Some(coverage);
        self
    }

    pub fn with_total_purchase_quantity(mut self, quantity: Decimal) -> Self {
        self.total_purchase_quantity = quantity;
        self
    }

    /// Coverage in months: the exported value if any, otherwise stock over
    /// consumption, or the no-consumption sentinel.
    pub fn coverage(&self) -> Decimal {
        if let Some(coverage) = self.stock_coverage {
            return coverage;
        }
        if self.monthly_consumption > Decimal::ZERO {
            ratio(self.current_stock, self.monthly_consumption)
        } else {
            Decimal::from(NO_CONSUMPTION_MONTHS)
        }
    }

    /// Supplier name, falling back to `default` when absent or blank
    pub fn supplier_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.supplier.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => default,
        }
    }

    /// Products with stock on hand or recent consumption
    pub fn is_existing(&self) -> bool {
        self.current_stock > Decimal::ZERO || self.monthly_consumption > Decimal::ZERO
    }

    /// Products being launched: nothing in stock, no consumption yet, but
    /// purchases already planned
    pub fn is_new(&self) -> bool {
        self.current_stock == Decimal::ZERO
            && self.monthly_consumption == Decimal::ZERO
            && self.total_purchase_quantity > Decimal::ZERO
    }

    /// False for blank rows and export footers
    pub fn is_data_row(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty() && !name.eq_ignore_ascii_case("nan") && !name.contains(FILTER_FOOTER)
    }
}

/// Drop blank rows and export footers, keeping the order of the rest
pub fn clean_records(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records.into_iter().filter(ProductRecord::is_data_row).collect()
}

/// Existing and new products of one dataset
#[derive(Debug, Clone)]
pub struct ProductPartition<'a> {
    pub existing: Vec<&'a ProductRecord>,
    pub new: Vec<&'a ProductRecord>,
}

/// Split records into existing and new products. Records with no stock,
/// no consumption and no planned purchases belong to neither.
pub fn partition_products(records: &[ProductRecord]) -> ProductPartition<'_> {
    let existing = records.iter().filter(|r| r.is_existing()).collect();
    let new = records.iter().filter(|r| r.is_new()).collect();
    ProductPartition { existing, new }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
        .or_else(|| clamp_to_range(s))
}

/// Numbers beyond Decimal's range pin to its bounds, underflow reads as zero
fn clamp_to_range(s: &str) -> Option<Decimal> {
    let value = s.parse::<f64>().ok().filter(|v| !v.is_nan())?;
    let clamped = Decimal::try_from(value).unwrap_or(if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value.is_sign_positive() {
        Decimal::MAX
    } else {
        Decimal::MIN
    });
    Some(clamped)
}

/// First non-null value among the column names
fn column<'a>(row: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| row.get(*name).filter(|v| !v.is_null()))
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
