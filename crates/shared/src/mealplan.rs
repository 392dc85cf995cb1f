use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;
use validator::Validate;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealPlanEntryType {
    #[default]
    Recipe,
    Product,
    Note,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealPlanEntry {
    pub day: Date,
    #[serde(rename = "type", default)]
    pub entry_type: MealPlanEntryType,
    #[serde(default)]
    pub recipe_id: Option<String>,
    /// Desired servings; `None` falls back to the recipe's base servings
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub servings: Option<f64>,
}

impl MealPlanEntry {
    pub fn recipe(day: Date, recipe_id: impl Into<String>, servings: Option<f64>) -> Self {
        Self {
            day,
            entry_type: MealPlanEntryType::Recipe,
            recipe_id: Some(recipe_id.into()),
            servings,
        }
    }

    pub fn note(day: Date) -> Self {
        Self {
            day,
            entry_type: MealPlanEntryType::Note,
            recipe_id: None,
            servings: None,
        }
    }

    /// Recipe id when this entry plans a recipe.
    pub fn planned_recipe(&self) -> Option<&str> {
        match self.entry_type {
            MealPlanEntryType::Recipe => self.recipe_id.as_deref(),
            MealPlanEntryType::Product | MealPlanEntryType::Note => None,
        }
    }
}
