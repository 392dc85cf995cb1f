use std::collections::HashMap;

use pantry_shared::MealPlanEntry;

/// Total kcal planned across `entries`.
///
/// Each recipe entry adds `kcal_per_serving * servings`, with missing
/// servings counted as one. Other entry types and recipes without a known
/// value add nothing.
pub fn compute_daily_nutrition(
    entries: &[MealPlanEntry],
    kcal_per_serving_by_recipe: &HashMap<String, f64>,
) -> f64 {
    entries
        .iter()
        .filter_map(|entry| {
            let kcal = kcal_per_serving_by_recipe.get(entry.planned_recipe()?)?;
            Some(kcal * entry.servings.unwrap_or(1.0))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use pantry_shared::MealPlanEntryType;
    use time::macros::date;

    use super::*;

    #[test]
    fn test_daily_nutrition() {
        let day = date!(2026 - 10 - 19);
        let kcal = HashMap::from([("oats".to_owned(), 350.0), ("curry".to_owned(), 620.0)]);
        let entries = vec![
            MealPlanEntry::recipe(day, "oats", None),
            MealPlanEntry::recipe(day, "curry", Some(2.0)),
            MealPlanEntry::recipe(day, "mystery", Some(3.0)),
            MealPlanEntry::note(day),
            MealPlanEntry {
                entry_type: MealPlanEntryType::Product,
                ..MealPlanEntry::recipe(day, "oats", Some(5.0))
            },
        ];

        assert_eq!(compute_daily_nutrition(&entries, &kcal), 350.0 + 1240.0);
    }

    #[test]
    fn test_order_independent() {
        let day = date!(2026 - 10 - 19);
        let kcal = HashMap::from([("a".to_owned(), 120.5), ("b".to_owned(), 99.25)]);
        let mut entries = vec![
            MealPlanEntry::recipe(day, "a", Some(1.5)),
            MealPlanEntry::recipe(day, "b", Some(2.0)),
        ];

        let forward = compute_daily_nutrition(&entries, &kcal);
        entries.reverse();
        assert!((compute_daily_nutrition(&entries, &kcal) - forward).abs() < 1e-9);
    }

    #[test]
    fn test_empty_day() {
        assert_eq!(compute_daily_nutrition(&[], &HashMap::new()), 0.0);
    }
}
