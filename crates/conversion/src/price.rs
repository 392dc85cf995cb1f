use pantry_shared::{Product, UnitConversion};
use serde::Serialize;

use crate::{resolve_factor, to_stock_amount};

/// Price of one stock unit for a purchase line.
///
/// The line's total price is spread over the resulting stock quantity so
/// prices from different batches and stores stay comparable. A non-positive
/// stock amount leaves the total untouched.
pub fn to_stock_unit_price(total_price: f64, stock_amount: f64) -> f64 {
    if stock_amount > 0.0 {
        total_price / stock_amount
    } else {
        total_price
    }
}

/// A purchase expressed in the product's stock unit, ready to persist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockPurchase {
    pub factor: f64,
    pub stock_amount: f64,
    /// Price per stock unit, unrounded
    pub unit_price: Option<f64>,
}

/// Converts a purchase made in `purchase_unit_id` into stock-unit terms.
pub fn normalize_purchase(
    product: &Product,
    purchase_unit_id: &str,
    purchase_amount: f64,
    total_price: Option<f64>,
    conversions: &[UnitConversion],
) -> StockPurchase {
    let factor = resolve_factor(
        &product.id,
        purchase_unit_id,
        &product.stock_unit_id,
        conversions,
    );
    let stock_amount = to_stock_amount(purchase_amount, factor);
    let unit_price = total_price.map(|total| to_stock_unit_price(total, stock_amount));

    tracing::debug!(
        product_id = product.id.as_str(),
        purchase_unit_id,
        factor,
        stock_amount,
        "normalized purchase"
    );

    StockPurchase {
        factor,
        stock_amount,
        unit_price,
    }
}

/// Inverse of the storage normalization: price for one display unit given
/// the factor from that display unit to the stock unit.
pub fn price_per_unit(price_per_stock_unit: f64, factor: f64) -> f64 {
    price_per_stock_unit * factor
}

/// Price for one `display_unit_id` of `product`, using the same lookup chain
/// as purchases.
pub fn display_price(
    product: &Product,
    price_per_stock_unit: f64,
    display_unit_id: &str,
    conversions: &[UnitConversion],
) -> f64 {
    let factor = resolve_factor(
        &product.id,
        display_unit_id,
        &product.stock_unit_id,
        conversions,
    );

    price_per_unit(price_per_stock_unit, factor)
}

/// Rounds for rendering only; stored prices are never rounded.
pub fn round_for_display(value: f64, decimals: u32) -> String {
    let decimals = decimals.min(8) as usize;
    let formatted = format!("{value:.decimals$}");

    if formatted.starts_with('-') && formatted.trim_start_matches(['-', '0', '.']).is_empty() {
        return formatted.trim_start_matches('-').to_owned();
    }

    formatted
}
