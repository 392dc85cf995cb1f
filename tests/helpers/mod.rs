use std::path::PathBuf;

use pantry::HouseholdSnapshot;
use temp_dir::TempDir;

pub const HOUSEHOLD: &str = r#"{
    "products": [
        {"id": "flour", "name": "Flour", "stock_unit_id": "g"},
        {"id": "egg", "name": "Egg", "stock_unit_id": "pc"},
        {"id": "milk", "name": "Milk", "stock_unit_id": "ml"},
        {"id": "carrot", "name": "Carrot", "stock_unit_id": "pc"},
        {"id": "salt", "name": "Salt", "stock_unit_id": "g",
         "exclude_from_recipe_fulfillment": true}
    ],
    "quantity_units": [
        {"id": "g", "name": "Gram", "name_plural": "Grams"},
        {"id": "kg", "name": "Kilogram", "name_plural": "Kilograms"},
        {"id": "pc", "name": "Piece", "name_plural": "Pieces"},
        {"id": "ml", "name": "Milliliter", "name_plural": "Milliliters"}
    ],
    "unit_conversions": [
        {"from_unit_id": "kg", "to_unit_id": "g", "factor": 1000}
    ],
    "stores": [
        {"id": "store-1", "name": "Corner Market"}
    ],
    "locations": [
        {"id": "loc-1", "name": "Pantry"},
        {"id": "loc-2", "name": "Fridge"}
    ],
    "stock": [
        {"product_id": "flour", "amount": 300, "location_id": "loc-1"},
        {"product_id": "egg", "amount": 2, "best_before_date": "2026-10-20"},
        {"product_id": "milk", "amount": 500, "best_before_date": "2026-10-19", "open": true},
        {"product_id": "carrot", "amount": 2}
    ],
    "recipes": [
        {"id": "pancakes", "name": "Pancakes", "base_servings": 2, "kcal_per_serving": 400},
        {"id": "soup", "name": "Carrot soup", "base_servings": 2, "kcal_per_serving": 180}
    ],
    "recipe_ingredients": [
        {"recipe_id": "pancakes", "product_id": "flour", "amount": 200, "unit_id": "g"},
        {"recipe_id": "pancakes", "product_id": "egg", "amount": 2, "unit_id": "pc"},
        {"recipe_id": "pancakes", "product_id": "milk", "amount": 300, "unit_id": "ml"},
        {"recipe_id": "pancakes", "product_id": "salt", "amount": 2, "unit_id": "g"},
        {"recipe_id": "soup", "product_id": "carrot", "amount": 3, "unit_id": "pc"},
        {"recipe_id": "soup", "product_id": "salt", "amount": 5, "unit_id": "g"}
    ],
    "meal_plan": [
        {"day": "2026-10-19", "type": "recipe", "recipe_id": "pancakes"},
        {"day": "2026-10-20", "type": "recipe", "recipe_id": "soup", "servings": 4},
        {"day": "2026-10-21", "type": "recipe", "recipe_id": "pancakes", "servings": 4},
        {"day": "2026-10-21", "type": "note"},
        {"day": "2026-10-30", "type": "recipe", "recipe_id": "soup"}
    ]
}"#;

pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.child(name);
    std::fs::write(&path, contents)?;

    Ok(path)
}

pub async fn load_household(dir: &TempDir) -> anyhow::Result<HouseholdSnapshot> {
    let path = write_file(dir, "snapshot.json", HOUSEHOLD)?;

    Ok(HouseholdSnapshot::load(path).await?)
}
