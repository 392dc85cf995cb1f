use std::collections::HashMap;
use std::path::Path;

use pantry_matching::Catalogs;
use pantry_shared::{
    Location, MealPlanEntry, Product, QuantityUnit, Recipe, RecipeIngredient, StockEntry, Store,
    UnitConversion, hydrate_exclusions,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};

/// Everything the household engine reads, as exported from the inventory.
///
/// Every collection is optional in the JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HouseholdSnapshot {
    #[validate(nested)]
    pub products: Vec<Product>,
    #[validate(nested)]
    pub quantity_units: Vec<QuantityUnit>,
    #[validate(nested)]
    pub unit_conversions: Vec<UnitConversion>,
    pub stores: Vec<Store>,
    pub locations: Vec<Location>,
    #[validate(nested)]
    pub stock: Vec<StockEntry>,
    #[validate(nested)]
    pub recipes: Vec<Recipe>,
    #[validate(nested)]
    pub recipe_ingredients: Vec<RecipeIngredient>,
    #[validate(nested)]
    pub meal_plan: Vec<MealPlanEntry>,
}

impl HouseholdSnapshot {
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::IoError {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_json(&raw)
    }

    /// Parses and validates a snapshot, then copies product opt-out flags
    /// onto recipe ingredients.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut snapshot: Self = serde_json::from_str(raw)?;
        snapshot.validate()?;

        hydrate_exclusions(snapshot.recipe_ingredients.iter_mut(), &snapshot.products);

        tracing::debug!(
            products = snapshot.products.len(),
            recipes = snapshot.recipes.len(),
            stock = snapshot.stock.len(),
            meal_plan = snapshot.meal_plan.len(),
            "snapshot loaded"
        );

        Ok(snapshot)
    }

    pub fn recipe(&self, id: &str) -> Result<&Recipe> {
        self.recipes
            .iter()
            .find(|recipe| recipe.id == id)
            .ok_or_else(|| AppError::UnknownRecipe(id.to_owned()))
    }

    pub fn product(&self, id: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| AppError::UnknownProduct(id.to_owned()))
    }

    pub fn ingredients_of(&self, recipe_id: &str) -> Vec<RecipeIngredient> {
        self.recipe_ingredients
            .iter()
            .filter(|ingredient| ingredient.recipe_id == recipe_id)
            .cloned()
            .collect()
    }

    pub fn ingredients_by_recipe(&self) -> HashMap<String, Vec<RecipeIngredient>> {
        pantry_shared::ingredients_by_recipe(&self.recipe_ingredients)
    }

    pub fn stock_by_product(&self) -> HashMap<String, f64> {
        pantry_shared::stock_by_product(&self.stock)
    }

    pub fn base_servings_by_recipe(&self) -> HashMap<String, f64> {
        self.recipes
            .iter()
            .map(|recipe| (recipe.id.to_owned(), recipe.base_servings))
            .collect()
    }

    pub fn kcal_per_serving_by_recipe(&self) -> HashMap<String, f64> {
        self.recipes
            .iter()
            .filter_map(|recipe| Some((recipe.id.to_owned(), recipe.kcal_per_serving?)))
            .collect()
    }

    pub fn catalogs(&self) -> Catalogs<'_> {
        Catalogs {
            products: &self.products,
            units: &self.quantity_units,
            stores: &self.stores,
            locations: &self.locations,
            conversions: &self.unit_conversions,
        }
    }
}
