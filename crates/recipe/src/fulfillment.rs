use std::collections::HashMap;

use pantry_shared::{RecipeIngredient, scale_factor};
use serde::Serialize;

/// Outcome for one ingredient line, in recipe order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngredientFulfillment {
    /// Excluded from fulfillment (skip flag, no product, opted-out product,
    /// or a variable amount)
    Skipped,
    Checked {
        product_id: String,
        needed: f64,
        in_stock: f64,
        /// `needed - in_stock`, never negative
        missing: f64,
        fulfilled: bool,
    },
}

impl IngredientFulfillment {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::Checked {
                fulfilled: false,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeFulfillment {
    pub can_make: bool,
    pub ingredients: Vec<IngredientFulfillment>,
}

impl RecipeFulfillment {
    /// Checked ingredients whose stock does not cover the need.
    pub fn missing_count(&self) -> usize {
        self.ingredients.iter().filter(|i| i.is_missing()).count()
    }
}

/// Decides whether a recipe can be cooked from current stock.
///
/// Amounts are scaled by `desired_servings / base_servings` and compared
/// against the product's total stock as-is: ingredient amounts are expected
/// in the product's stock unit. A recipe without any checked ingredient is
/// always makeable.
pub fn compute_recipe_fulfillment(
    ingredients: &[RecipeIngredient],
    stock_by_product: &HashMap<String, f64>,
    base_servings: f64,
    desired_servings: Option<f64>,
) -> RecipeFulfillment {
    let scale = scale_factor(desired_servings, base_servings);

    let ingredients = ingredients
        .iter()
        .map(|ingredient| {
            let Some(product_id) = ingredient.counted_product() else {
                return IngredientFulfillment::Skipped;
            };

            let needed = ingredient.clamped_amount() * scale;
            let in_stock = stock_by_product.get(product_id).copied().unwrap_or(0.0);

            IngredientFulfillment::Checked {
                product_id: product_id.to_owned(),
                needed,
                in_stock,
                missing: (needed - in_stock).max(0.0),
                fulfilled: in_stock >= needed,
            }
        })
        .collect::<Vec<_>>();

    let can_make = !ingredients.iter().any(IngredientFulfillment::is_missing);

    RecipeFulfillment {
        can_make,
        ingredients,
    }
}
