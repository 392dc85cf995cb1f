use std::collections::BTreeMap;

use pantry_mealplan::{
    AggregatedIngredient, ShoppingListLine, aggregate_week_ingredients, entries_in_range,
    nutrition_by_day, shopping_list,
};
use pantry_recipe::{
    RankedRecipe, RecipeFulfillment, compute_due_score, compute_recipe_fulfillment, rank_recipes,
};
use pantry_shared::scale_factor;
use serde::Serialize;
use time::{Date, Duration};

use crate::config::Config;
use crate::error::Result;
use crate::snapshot::HouseholdSnapshot;

/// Recipes ranked by how urgently their stock should be used.
#[tracing::instrument(skip(config, snapshot))]
pub fn recipes(
    config: &Config,
    snapshot: &HouseholdSnapshot,
    today: Date,
    servings: Option<f64>,
) -> Vec<RankedRecipe> {
    rank_recipes(
        &snapshot.recipes,
        &snapshot.ingredients_by_recipe(),
        &snapshot.stock,
        today,
        servings.or(config.planning.default_servings),
    )
}

#[derive(Debug, Serialize)]
pub struct FulfillmentView {
    pub recipe_id: String,
    pub name: String,
    pub base_servings: f64,
    /// Servings the amounts below were scaled to
    pub servings: f64,
    pub due_score: f64,
    #[serde(flatten)]
    pub fulfillment: RecipeFulfillment,
}

#[tracing::instrument(skip(config, snapshot))]
pub fn fulfillment(
    config: &Config,
    snapshot: &HouseholdSnapshot,
    recipe_id: &str,
    today: Date,
    servings: Option<f64>,
) -> Result<FulfillmentView> {
    let recipe = snapshot.recipe(recipe_id)?;
    let ingredients = snapshot.ingredients_of(&recipe.id);
    let desired = servings.or(config.planning.default_servings);

    let fulfillment = compute_recipe_fulfillment(
        &ingredients,
        &snapshot.stock_by_product(),
        recipe.base_servings,
        desired,
    );

    Ok(FulfillmentView {
        recipe_id: recipe.id.to_owned(),
        name: recipe.name.to_owned(),
        base_servings: recipe.base_servings,
        servings: recipe.base_servings * scale_factor(desired, recipe.base_servings),
        due_score: compute_due_score(&ingredients, &snapshot.stock, today),
        fulfillment,
    })
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub start: Date,
    pub end: Date,
    pub deficits: Vec<AggregatedIngredient>,
    pub shopping_list: Vec<ShoppingListLine>,
    pub kcal_by_day: BTreeMap<Date, f64>,
}

/// Missing ingredients and planned kcal for `planning.week_days` days from `start`.
#[tracing::instrument(skip(config, snapshot))]
pub fn week(config: &Config, snapshot: &HouseholdSnapshot, start: Date) -> WeekView {
    let days = config.planning.week_days;
    let entries = entries_in_range(&snapshot.meal_plan, start, days);

    let deficits = aggregate_week_ingredients(
        &entries,
        &snapshot.ingredients_by_recipe(),
        &snapshot.stock_by_product(),
        &snapshot.base_servings_by_recipe(),
    );
    let shopping_list = shopping_list(&deficits, &snapshot.products, &snapshot.quantity_units);

    tracing::info!(
        entries = entries.len(),
        deficits = deficits.len(),
        "aggregated week"
    );

    WeekView {
        start,
        end: start.saturating_add(Duration::days(i64::from(days) - 1)),
        kcal_by_day: nutrition_by_day(&entries, &snapshot.kcal_per_serving_by_recipe()),
        deficits,
        shopping_list,
    }
}
