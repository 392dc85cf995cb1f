use std::collections::HashMap;

use pantry_shared::{MealPlanEntry, RecipeIngredient, scale_factor};
use serde::Serialize;

/// Remaining deficits at or below this are treated as covered.
const DEFICIT_EPSILON: f64 = 1e-9;

/// Shortfall for one `(product, unit)` line across the planned week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    pub product_id: String,
    pub qu_id: Option<String>,
    /// Always strictly positive
    pub amount: f64,
}

/// Week Ingredient Aggregation
///
/// Sums scaled requirements of every planned recipe occurrence and nets them
/// against current stock:
/// - only `recipe` entries with a recipe id count
/// - requirements are keyed by `(product_id, qu_id)`; the same product in two
///   units stays on two lines and is never converted
/// - a product's total stock is applied to its lines in first-seen order
///   until exhausted
/// - the result is ordered by product id, then first-seen order
///
/// Unknown recipes and excluded ingredients contribute nothing.
pub fn aggregate_week_ingredients(
    entries: &[MealPlanEntry],
    ingredients_by_recipe: &HashMap<String, Vec<RecipeIngredient>>,
    stock_by_product: &HashMap<String, f64>,
    base_servings_by_recipe: &HashMap<String, f64>,
) -> Vec<AggregatedIngredient> {
    let mut lines: Vec<AggregatedIngredient> = Vec::new();
    let mut index: HashMap<(String, Option<String>), usize> = HashMap::new();

    for entry in entries {
        let Some(recipe_id) = entry.planned_recipe() else {
            continue;
        };
        let Some(ingredients) = ingredients_by_recipe.get(recipe_id) else {
            tracing::debug!(recipe_id, "planned recipe has no ingredients");
            continue;
        };

        let scale = match base_servings_by_recipe.get(recipe_id) {
            Some(base) => scale_factor(entry.servings.or(Some(*base)), *base),
            None => 1.0,
        };

        for ingredient in ingredients {
            let Some(product_id) = ingredient.counted_product() else {
                continue;
            };

            let key = (product_id.to_owned(), ingredient.unit_id.to_owned());
            let position = *index.entry(key).or_insert_with(|| {
                lines.push(AggregatedIngredient {
                    product_id: product_id.to_owned(),
                    qu_id: ingredient.unit_id.to_owned(),
                    amount: 0.0,
                });
                lines.len() - 1
            });

            lines[position].amount += ingredient.clamped_amount() * scale;
        }
    }

    let mut remaining_stock: HashMap<String, f64> = HashMap::new();
    for line in lines.iter_mut() {
        let stock = remaining_stock
            .entry(line.product_id.to_owned())
            .or_insert_with(|| {
                stock_by_product
                    .get(&line.product_id)
                    .copied()
                    .filter(|amount| amount.is_finite() && *amount > 0.0)
                    .unwrap_or(0.0)
            });

        let used = stock.min(line.amount);
        *stock -= used;
        line.amount -= used;
    }

    let mut deficits = lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| line.amount > DEFICIT_EPSILON)
        .collect::<Vec<_>>();
    deficits.sort_by(|(a_pos, a), (b_pos, b)| {
        a.product_id
            .cmp(&b.product_id)
            .then_with(|| a_pos.cmp(b_pos))
    });

    deficits.into_iter().map(|(_, line)| line).collect()
}
