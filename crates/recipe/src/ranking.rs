use std::cmp::Ordering;
use std::collections::HashMap;

use pantry_shared::{Recipe, RecipeIngredient, StockEntry, stock_by_product};
use serde::Serialize;
use time::Date;

use crate::{compute_due_score, compute_recipe_fulfillment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecipe {
    pub recipe_id: String,
    pub name: String,
    pub can_make: bool,
    pub missing_count: usize,
    pub due_score: f64,
    pub produces_product_id: Option<String>,
}

/// Builds the "cook this first" recipe list.
///
/// Each recipe is checked for fulfillment at `desired_servings` (or its own
/// base servings) and scored for urgency; the list is ordered by due score
/// descending, then by name. Recipes without ingredients are listed with
/// `can_make` set and a zero score.
pub fn rank_recipes(
    recipes: &[Recipe],
    ingredients_by_recipe: &HashMap<String, Vec<RecipeIngredient>>,
    stock_entries: &[StockEntry],
    today: Date,
    desired_servings: Option<f64>,
) -> Vec<RankedRecipe> {
    let stock = stock_by_product(stock_entries);

    let mut ranked = recipes
        .iter()
        .map(|recipe| {
            let ingredients = ingredients_by_recipe
                .get(&recipe.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            let fulfillment = compute_recipe_fulfillment(
                ingredients,
                &stock,
                recipe.base_servings,
                desired_servings,
            );

            RankedRecipe {
                recipe_id: recipe.id.to_owned(),
                name: recipe.name.to_owned(),
                can_make: fulfillment.can_make,
                missing_count: fulfillment.missing_count(),
                due_score: compute_due_score(ingredients, stock_entries, today),
                produces_product_id: recipe.produces_product_id.to_owned(),
            }
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| {
        b.due_score
            .partial_cmp(&a.due_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    tracing::debug!(recipes = ranked.len(), "ranked recipes by due score");

    ranked
}
