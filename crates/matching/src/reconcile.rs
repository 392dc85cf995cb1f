use pantry_conversion::{StockPurchase, normalize_purchase};
use pantry_shared::{CatalogEntry, Location, Product, QuantityUnit, Store, UnitConversion};
use serde::{Deserialize, Serialize};

use crate::Matcher;

/// How a catalog reference was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The claimed id exists in the catalog
    Verified,
    /// Derived from the label by fuzzy matching
    Matched { score: f64 },
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub id: Option<String>,
    #[serde(flatten)]
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn unresolved() -> Self {
        Self {
            id: None,
            source: ResolutionSource::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

/// Resolves an untrusted `(id, label)` pair to a catalog id.
///
/// A claimed id is only kept when the catalog contains it. Otherwise it is
/// discarded and the label goes through fuzzy matching. The returned id is
/// always one of the catalog's own ids.
pub fn resolve_reference<T: CatalogEntry>(
    matcher: &Matcher,
    claimed_id: Option<&str>,
    label: Option<&str>,
    catalog: &[T],
) -> Resolution {
    if let Some(claimed_id) = claimed_id.map(str::trim).filter(|id| !id.is_empty()) {
        if let Some(entry) = catalog.iter().find(|entry| entry.id() == claimed_id) {
            return Resolution {
                id: Some(entry.id().to_owned()),
                source: ResolutionSource::Verified,
            };
        }

        tracing::warn!(claimed_id, label, "discarding id missing from catalog");
    }

    let Some(label) = label else {
        return Resolution::unresolved();
    };

    match matcher.find_best_match_any(label, catalog, |entry| entry.names()) {
        Some(found) => Resolution {
            id: Some(found.item.id().to_owned()),
            source: ResolutionSource::Matched { score: found.score },
        },
        None => {
            tracing::debug!(label, "no catalog entry matches label");
            Resolution::unresolved()
        }
    }
}

/// Household catalogs a reconciliation runs against.
#[derive(Debug, Clone, Copy)]
pub struct Catalogs<'a> {
    pub products: &'a [Product],
    pub units: &'a [QuantityUnit],
    pub stores: &'a [Store],
    pub locations: &'a [Location],
    pub conversions: &'a [UnitConversion],
}

/// One purchase line as produced by a model or OCR pass. Every field is
/// untrusted, ids included.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UntrustedLine {
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledLine {
    pub label: String,
    pub product: Resolution,
    pub unit: Resolution,
    pub store: Resolution,
    pub location: Resolution,
    pub purchase_amount: f64,
    pub total_price: Option<f64>,
    /// Present once the product is known
    pub stock: Option<StockPurchase>,
}

/// Turns an untrusted purchase line into catalog-backed references.
///
/// A missing, zero, negative or non-finite amount counts as one unit. Without a
/// resolved unit the amount is taken to be in the product's stock unit.
pub fn reconcile_line(
    matcher: &Matcher,
    line: &UntrustedLine,
    catalogs: Catalogs<'_>,
) -> ReconciledLine {
    let product = resolve_reference(
        matcher,
        line.product_id.as_deref(),
        Some(line.name.as_str()),
        catalogs.products,
    );
    let unit = resolve_reference(
        matcher,
        line.unit_id.as_deref(),
        line.unit.as_deref(),
        catalogs.units,
    );
    let store = resolve_reference(
        matcher,
        line.store_id.as_deref(),
        line.store.as_deref(),
        catalogs.stores,
    );
    let location = resolve_reference(
        matcher,
        line.location_id.as_deref(),
        line.location.as_deref(),
        catalogs.locations,
    );

    let purchase_amount = line
        .amount
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .unwrap_or(1.0);
    let total_price = line.price.filter(|price| price.is_finite() && *price >= 0.0);

    let stock = product
        .id
        .as_deref()
        .and_then(|id| catalogs.products.iter().find(|p| p.id == id))
        .map(|product| {
            let unit_id = unit.id.as_deref().unwrap_or(&product.stock_unit_id);
            normalize_purchase(
                product,
                unit_id,
                purchase_amount,
                total_price,
                catalogs.conversions,
            )
        });

    ReconciledLine {
        label: line.name.to_owned(),
        product,
        unit,
        store,
        location,
        purchase_amount,
        total_price,
        stock,
    }
}

pub fn reconcile_lines(
    matcher: &Matcher,
    lines: &[UntrustedLine],
    catalogs: Catalogs<'_>,
) -> Vec<ReconciledLine> {
    lines
        .iter()
        .map(|line| reconcile_line(matcher, line, catalogs))
        .collect()
}
