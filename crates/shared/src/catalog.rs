use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    pub stock_unit_id: String,
    /// Opts the product out of recipe fulfillment entirely (salt, water, ...)
    #[serde(default)]
    pub exclude_from_recipe_fulfillment: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuantityUnit {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_plural: String,
}

/// Directional conversion: `amount_in_from * factor = amount_in_to`.
///
/// A `None` product marks a household-wide conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct UnitConversion {
    #[serde(default)]
    pub product_id: Option<String>,
    pub from_unit_id: String,
    pub to_unit_id: String,
    #[validate(range(exclusive_min = 0.0))]
    pub factor: f64,
}

impl UnitConversion {
    pub fn global(from_unit_id: impl Into<String>, to_unit_id: impl Into<String>, factor: f64) -> Self {
        Self {
            product_id: None,
            from_unit_id: from_unit_id.into(),
            to_unit_id: to_unit_id.into(),
            factor,
        }
    }

    pub fn for_product(
        product_id: impl Into<String>,
        from_unit_id: impl Into<String>,
        to_unit_id: impl Into<String>,
        factor: f64,
    ) -> Self {
        Self {
            product_id: Some(product_id.into()),
            from_unit_id: from_unit_id.into(),
            to_unit_id: to_unit_id.into(),
            factor,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// Catalog entries addressable by id and matchable by name.
pub trait CatalogEntry {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Every name free text may refer to this entry by.
    fn names(&self) -> Vec<&str> {
        vec![self.name()]
    }
}

impl CatalogEntry for QuantityUnit {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    /// Singular and plural names, skipping an empty plural.
    fn names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        if !self.name_plural.trim().is_empty() {
            names.push(self.name_plural.as_str());
        }

        names
    }
}

macro_rules! catalog_entry {
    ($($ty:ty),+) => {
        $(
            impl CatalogEntry for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

catalog_entry!(Product, Store, Location);
