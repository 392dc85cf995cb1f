use std::collections::{BTreeMap, HashMap};

use pantry_shared::{MealPlanEntry, Product, QuantityUnit};
use serde::Serialize;
use time::{Date, Duration};

use crate::{AggregatedIngredient, compute_daily_nutrition};

/// Entries planned on `start` and the following `days - 1` days.
pub fn entries_in_range(entries: &[MealPlanEntry], start: Date, days: u16) -> Vec<MealPlanEntry> {
    let end = start.saturating_add(Duration::days(i64::from(days)));

    entries
        .iter()
        .filter(|entry| entry.day >= start && entry.day < end)
        .cloned()
        .collect()
}

/// Planned kcal per day. Days with entries but no known values map to zero.
pub fn nutrition_by_day(
    entries: &[MealPlanEntry],
    kcal_per_serving_by_recipe: &HashMap<String, f64>,
) -> BTreeMap<Date, f64> {
    let mut days: BTreeMap<Date, Vec<MealPlanEntry>> = BTreeMap::new();
    for entry in entries {
        days.entry(entry.day).or_default().push(entry.clone());
    }

    days.into_iter()
        .map(|(day, entries)| {
            (
                day,
                compute_daily_nutrition(&entries, kcal_per_serving_by_recipe),
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListLine {
    pub product_id: String,
    pub product_name: String,
    pub qu_id: Option<String>,
    pub unit_name: Option<String>,
    pub amount: f64,
}

/// Joins display names onto week deficits.
///
/// Unknown products keep their id as name. Lines are sorted by product name,
/// case-insensitively, keeping the aggregator order for equal names.
pub fn shopping_list(
    deficits: &[AggregatedIngredient],
    products: &[Product],
    units: &[QuantityUnit],
) -> Vec<ShoppingListLine> {
    let products = products
        .iter()
        .map(|p| (p.id.as_str(), p))
        .collect::<HashMap<_, _>>();
    let units = units
        .iter()
        .map(|u| (u.id.as_str(), u))
        .collect::<HashMap<_, _>>();

    let mut lines = deficits
        .iter()
        .map(|deficit| {
            let product_name = products
                .get(deficit.product_id.as_str())
                .map(|p| p.name.to_owned())
                .unwrap_or_else(|| deficit.product_id.to_owned());

            let unit_name = deficit
                .qu_id
                .as_deref()
                .and_then(|id| units.get(id))
                .map(|unit| unit_label(unit, deficit.amount));

            ShoppingListLine {
                product_id: deficit.product_id.to_owned(),
                product_name,
                qu_id: deficit.qu_id.to_owned(),
                unit_name,
                amount: deficit.amount,
            }
        })
        .collect::<Vec<_>>();

    lines.sort_by_key(|line| line.product_name.to_lowercase());

    lines
}

fn unit_label(unit: &QuantityUnit, amount: f64) -> String {
    if amount != 1.0 && !unit.name_plural.trim().is_empty() {
        return unit.name_plural.to_owned();
    }

    unit.name.to_owned()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn test_entries_in_range() {
        let entries = vec![
            MealPlanEntry::recipe(date!(2026 - 10 - 18), "a", None),
            MealPlanEntry::recipe(date!(2026 - 10 - 19), "b", None),
            MealPlanEntry::note(date!(2026 - 10 - 25)),
            MealPlanEntry::recipe(date!(2026 - 10 - 26), "c", None),
        ];

        let week = entries_in_range(&entries, date!(2026 - 10 - 19), 7);

        assert_eq!(week.len(), 2);
        assert_eq!(week[0].recipe_id.as_deref(), Some("b"));
        assert_eq!(week[1].day, date!(2026 - 10 - 25));
        assert!(entries_in_range(&entries, date!(2026 - 10 - 19), 0).is_empty());
    }

    #[test]
    fn test_nutrition_by_day() {
        let kcal = HashMap::from([("oats".to_owned(), 300.0)]);
        let entries = vec![
            MealPlanEntry::recipe(date!(2026 - 10 - 20), "oats", Some(2.0)),
            MealPlanEntry::recipe(date!(2026 - 10 - 19), "oats", None),
            MealPlanEntry::recipe(date!(2026 - 10 - 20), "oats", None),
            MealPlanEntry::note(date!(2026 - 10 - 21)),
        ];

        let by_day = nutrition_by_day(&entries, &kcal);

        assert_eq!(
            by_day.into_iter().collect::<Vec<_>>(),
            vec![
                (date!(2026 - 10 - 19), 300.0),
                (date!(2026 - 10 - 20), 900.0),
                (date!(2026 - 10 - 21), 0.0),
            ]
        );
    }

    #[test]
    fn test_kcal_by_day_serializes_with_date_keys() {
        let kcal = HashMap::from([("oats".to_owned(), 300.0)]);
        let entries = vec![MealPlanEntry::recipe(date!(2026 - 10 - 19), "oats", None)];

        let json = serde_json::to_value(nutrition_by_day(&entries, &kcal)).unwrap();

        assert_eq!(json, serde_json::json!({ "2026-10-19": 300.0 }));
    }

    #[test]
    fn test_shopping_list_joins_names() {
        let products = vec![
            Product {
                id: "p1".to_owned(),
                name: "Tomatoes".to_owned(),
                stock_unit_id: "pc".to_owned(),
                exclude_from_recipe_fulfillment: false,
            },
            Product {
                id: "p2".to_owned(),
                name: "basil".to_owned(),
                stock_unit_id: "bunch".to_owned(),
                exclude_from_recipe_fulfillment: false,
            },
        ];
        let units = vec![
            QuantityUnit {
                id: "pc".to_owned(),
                name: "Piece".to_owned(),
                name_plural: "Pieces".to_owned(),
            },
            QuantityUnit {
                id: "bunch".to_owned(),
                name: "Bunch".to_owned(),
                name_plural: String::new(),
            },
        ];
        let deficits = vec![
            AggregatedIngredient {
                product_id: "p1".to_owned(),
                qu_id: Some("pc".to_owned()),
                amount: 4.0,
            },
            AggregatedIngredient {
                product_id: "p2".to_owned(),
                qu_id: Some("bunch".to_owned()),
                amount: 2.0,
            },
            AggregatedIngredient {
                product_id: "p9".to_owned(),
                qu_id: None,
                amount: 1.0,
            },
        ];

        let list = shopping_list(&deficits, &products, &units);

        let names = list
            .iter()
            .map(|line| (line.product_name.as_str(), line.unit_name.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                ("basil", Some("Bunch")),
                ("p9", None),
                ("Tomatoes", Some("Pieces")),
            ]
        );
    }
}
