use std::collections::HashSet;

use pantry_shared::{RecipeIngredient, StockEntry};
use time::Date;

/// Score of a recipe whose soonest ingredient is due today or overdue.
pub const MAX_DUE_SCORE: f64 = 100.0;

/// Days until the soonest best-before date among the recipe's counted
/// ingredients, or `None` when no matching batch carries a date.
///
/// Batches that are used up (non-positive amount) are ignored.
pub fn soonest_due_in_days(
    ingredients: &[RecipeIngredient],
    stock_entries: &[StockEntry],
    today: Date,
) -> Option<i64> {
    let products = ingredients
        .iter()
        .filter_map(RecipeIngredient::counted_product)
        .collect::<HashSet<_>>();

    stock_entries
        .iter()
        .filter(|entry| entry.in_stock() && products.contains(entry.product_id.as_str()))
        .filter_map(|entry| entry.best_before_date)
        .map(|date| (date - today).whole_days())
        .min()
}

/// Maps days-until-due to an urgency score.
///
/// Due or overdue gives [`MAX_DUE_SCORE`]; later dates decay as
/// `MAX_DUE_SCORE / (1 + days)`, approaching zero.
pub fn due_score_for_days(days: i64) -> f64 {
    if days <= 0 {
        return MAX_DUE_SCORE;
    }

    MAX_DUE_SCORE / (1.0 + days as f64)
}

/// "Cook this first" urgency of a recipe. Zero when none of its counted
/// ingredients has dated stock.
pub fn compute_due_score(
    ingredients: &[RecipeIngredient],
    stock_entries: &[StockEntry],
    today: Date,
) -> f64 {
    soonest_due_in_days(ingredients, stock_entries, today)
        .map(due_score_for_days)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    const TODAY: Date = date!(2026 - 10 - 18);

    #[test]
    fn test_due_score_curve() {
        assert_eq!(due_score_for_days(-10), MAX_DUE_SCORE);
        assert_eq!(due_score_for_days(0), MAX_DUE_SCORE);
        assert_eq!(due_score_for_days(1), 50.0);
        assert_eq!(due_score_for_days(3), 25.0);
        assert!(due_score_for_days(10_000) < 0.1);

        let mut previous = f64::INFINITY;
        for days in -5..60 {
            let score = due_score_for_days(days);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_undated_stock_scores_zero() {
        let ingredients = vec![RecipeIngredient::new("r", "rice", 100.0)];
        let stock = vec![StockEntry::new("rice", 1000.0)];
        assert_eq!(compute_due_score(&ingredients, &stock, TODAY), 0.0);
    }

    #[test]
    fn test_soonest_batch_counts() {
        let ingredients = vec![
            RecipeIngredient::new("r", "milk", 1.0),
            RecipeIngredient::new("r", "egg", 2.0),
        ];
        let stock = vec![
            StockEntry::new("milk", 1.0).best_before(date!(2026 - 10 - 25)),
            StockEntry::new("egg", 6.0).best_before(date!(2026 - 10 - 21)),
            StockEntry::new("egg", 6.0),
            StockEntry::new("cheese", 1.0).best_before(date!(2026 - 10 - 10)),
        ];

        assert_eq!(soonest_due_in_days(&ingredients, &stock, TODAY), Some(3));
        assert_eq!(compute_due_score(&ingredients, &stock, TODAY), 25.0);
    }

    #[test]
    fn test_excluded_ingredients_do_not_score() {
        let ingredients = vec![RecipeIngredient::new("r", "cream", 1.0).skip_stock_check()];
        let stock = vec![StockEntry::new("cream", 1.0).best_before(date!(2026 - 10 - 17))];
        assert_eq!(compute_due_score(&ingredients, &stock, TODAY), 0.0);
    }

    #[test]
    fn test_empty_batches_ignored() {
        let ingredients = vec![RecipeIngredient::new("r", "cream", 1.0)];
        let stock = vec![StockEntry::new("cream", 0.0).best_before(date!(2026 - 10 - 17))];
        assert_eq!(compute_due_score(&ingredients, &stock, TODAY), 0.0);
    }
}
