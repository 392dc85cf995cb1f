use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Product;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Recipe {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    /// Serving count the ingredient amounts are written for
    #[validate(range(exclusive_min = 0.0))]
    pub base_servings: f64,
    #[serde(default)]
    pub produces_product_id: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub kcal_per_serving: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipeIngredient {
    pub recipe_id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    /// Amount per `base_servings` of the owning recipe; negatives count as zero
    pub amount: f64,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub skip_stock_check: bool,
    /// Free text such as "to taste"; its presence makes `amount` meaningless
    #[serde(default)]
    pub variable_amount: Option<String>,
    /// Copy of the product's `exclude_from_recipe_fulfillment`, see [`hydrate_exclusions`]
    #[serde(default)]
    pub product_excluded: bool,
}

impl RecipeIngredient {
    pub fn new(recipe_id: impl Into<String>, product_id: impl Into<String>, amount: f64) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            product_id: Some(product_id.into()),
            amount,
            ..Default::default()
        }
    }

    pub fn unit(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    pub fn skip_stock_check(mut self) -> Self {
        self.skip_stock_check = true;
        self
    }

    pub fn variable(mut self, text: impl Into<String>) -> Self {
        self.variable_amount = Some(text.into());
        self
    }

    pub fn has_variable_amount(&self) -> bool {
        self.variable_amount
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Product this ingredient counts against, or `None` when it is excluded
    /// from every fulfillment and aggregation computation.
    pub fn counted_product(&self) -> Option<&str> {
        if self.skip_stock_check || self.product_excluded || self.has_variable_amount() {
            return None;
        }

        self.product_id.as_deref()
    }

    pub fn is_excluded(&self) -> bool {
        self.counted_product().is_none()
    }

    /// Amount with negative or non-finite input clamped to zero.
    pub fn clamped_amount(&self) -> f64 {
        if self.amount.is_finite() && self.amount > 0.0 {
            self.amount
        } else {
            0.0
        }
    }
}

/// Copies each referenced product's opt-out flag onto its ingredients.
///
/// Ingredients pointing at a product missing from the catalog keep their
/// current flag.
pub fn hydrate_exclusions<'a>(
    ingredients: impl IntoIterator<Item = &'a mut RecipeIngredient>,
    products: &[Product],
) {
    let excluded = products
        .iter()
        .map(|p| (p.id.as_str(), p.exclude_from_recipe_fulfillment))
        .collect::<HashMap<_, _>>();

    for ingredient in ingredients {
        let Some(flag) = ingredient
            .product_id
            .as_deref()
            .and_then(|id| excluded.get(id))
        else {
            continue;
        };

        ingredient.product_excluded = *flag;
    }
}

/// Groups ingredients by recipe id, keeping their original order.
pub fn ingredients_by_recipe(
    ingredients: &[RecipeIngredient],
) -> HashMap<String, Vec<RecipeIngredient>> {
    let mut grouped: HashMap<String, Vec<RecipeIngredient>> = HashMap::new();
    for ingredient in ingredients {
        grouped
            .entry(ingredient.recipe_id.to_owned())
            .or_default()
            .push(ingredient.clone());
    }

    grouped
}
