use std::path::Path;

use clap::ValueEnum;
use pantry_conversion::{StockPurchase, display_price, normalize_purchase, round_for_display};
use pantry_matching::{
    Matcher, ReconciledLine, Resolution, UntrustedLine, reconcile_lines, resolve_reference,
};
use pantry_shared::CatalogEntry;
use serde::Serialize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::snapshot::HouseholdSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Product,
    Unit,
    Store,
    Location,
}

#[derive(Debug, Serialize)]
pub struct CatalogMatch {
    pub kind: CatalogKind,
    pub query: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub score: Option<f64>,
}

pub fn matcher(config: &Config) -> Matcher {
    Matcher::with_threshold(config.matching.acceptance_threshold)
}

fn best_match<T: CatalogEntry>(
    matcher: &Matcher,
    kind: CatalogKind,
    query: &str,
    catalog: &[T],
) -> CatalogMatch {
    let found = matcher.find_best_match_any(query, catalog, |entry| entry.names());

    CatalogMatch {
        kind,
        query: query.to_owned(),
        id: found.as_ref().map(|m| m.item.id().to_owned()),
        name: found.as_ref().map(|m| m.item.name().to_owned()),
        score: found.map(|m| m.score),
    }
}

/// Best catalog entry for free text, if any clears the acceptance threshold.
#[tracing::instrument(skip(config, snapshot))]
pub fn match_catalog(
    config: &Config,
    snapshot: &HouseholdSnapshot,
    kind: CatalogKind,
    query: &str,
) -> CatalogMatch {
    let matcher = matcher(config);

    match kind {
        CatalogKind::Product => best_match(&matcher, kind, query, &snapshot.products),
        CatalogKind::Unit => best_match(&matcher, kind, query, &snapshot.quantity_units),
        CatalogKind::Store => best_match(&matcher, kind, query, &snapshot.stores),
        CatalogKind::Location => best_match(&matcher, kind, query, &snapshot.locations),
    }
}

/// Reconciles a JSON array of untrusted purchase lines read from `lines_path`.
#[tracing::instrument(
    skip(config, snapshot, lines_path),
    fields(path = %lines_path.as_ref().display())
)]
pub async fn reconcile(
    config: &Config,
    snapshot: &HouseholdSnapshot,
    lines_path: impl AsRef<Path>,
) -> Result<Vec<ReconciledLine>> {
    let path = lines_path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::IoError {
            path: path.display().to_string(),
            source,
        })?;
    let lines: Vec<UntrustedLine> = serde_json::from_str(&raw)?;

    let reconciled = reconcile_lines(&matcher(config), &lines, snapshot.catalogs());

    let unresolved = reconciled
        .iter()
        .filter(|line| !line.product.is_resolved())
        .count();
    tracing::info!(lines = reconciled.len(), unresolved, "reconciled purchase lines");

    Ok(reconciled)
}

/// Treats `value` as an id only when the catalog has it, so names are matched
/// without a rejected-id warning.
fn claimed_id<'v, T: CatalogEntry>(value: &'v str, catalog: &[T]) -> Option<&'v str> {
    catalog
        .iter()
        .any(|entry| entry.id() == value)
        .then_some(value)
}

#[derive(Debug, Serialize)]
pub struct PurchaseView {
    pub product: Resolution,
    pub unit: Resolution,
    pub purchase_amount: f64,
    pub total_price: Option<f64>,
    #[serde(flatten)]
    pub stock: StockPurchase,
    /// Price of one purchase unit, rounded for display
    pub price_per_purchase_unit: Option<String>,
}

/// Normalizes a single purchase into the product's stock unit.
///
/// `product` and `unit` may be ids or names. An unknown unit falls back to the
/// product's stock unit.
#[tracing::instrument(skip(config, snapshot))]
pub fn purchase(
    config: &Config,
    snapshot: &HouseholdSnapshot,
    product: &str,
    amount: f64,
    unit: Option<&str>,
    price: Option<f64>,
) -> Result<PurchaseView> {
    let matcher = matcher(config);

    let product_ref = resolve_reference(
        &matcher,
        claimed_id(product, &snapshot.products),
        Some(product),
        &snapshot.products,
    );
    let resolved = product_ref
        .id
        .as_deref()
        .ok_or_else(|| AppError::UnknownProduct(product.to_owned()))
        .and_then(|id| snapshot.product(id))?;

    let unit_ref = match unit {
        Some(unit) => resolve_reference(
            &matcher,
            claimed_id(unit, &snapshot.quantity_units),
            Some(unit),
            &snapshot.quantity_units,
        ),
        None => Resolution::unresolved(),
    };
    let unit_id = unit_ref
        .id
        .as_deref()
        .unwrap_or(resolved.stock_unit_id.as_str());

    let purchase_amount = if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        1.0
    };
    let total_price = price.filter(|price| price.is_finite() && *price >= 0.0);

    let stock = normalize_purchase(
        resolved,
        unit_id,
        purchase_amount,
        total_price,
        &snapshot.unit_conversions,
    );
    let price_per_purchase_unit = stock.unit_price.map(|unit_price| {
        let price = display_price(resolved, unit_price, unit_id, &snapshot.unit_conversions);
        round_for_display(price, 2)
    });

    Ok(PurchaseView {
        product: product_ref,
        unit: unit_ref,
        purchase_amount,
        total_price,
        stock,
        price_per_purchase_unit,
    })
}
