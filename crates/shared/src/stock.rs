use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct StockEntry {
    pub product_id: String,
    #[validate(range(min = 0.0))]
    pub amount: f64,
    #[serde(default)]
    pub best_before_date: Option<Date>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub open: bool,
}

impl StockEntry {
    pub fn new(product_id: impl Into<String>, amount: f64) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
            best_before_date: None,
            location_id: None,
            open: false,
        }
    }

    pub fn best_before(mut self, date: Date) -> Self {
        self.best_before_date = Some(date);
        self
    }

    pub fn in_stock(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}

/// Total amount on hand per product, summed across batches and locations.
pub fn stock_by_product<'a>(
    entries: impl IntoIterator<Item = &'a StockEntry>,
) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for entry in entries.into_iter().filter(|e| e.in_stock()) {
        *totals.entry(entry.product_id.to_owned()).or_insert(0.0) += entry.amount;
    }

    totals
}
