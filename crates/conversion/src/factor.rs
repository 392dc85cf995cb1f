use pantry_shared::UnitConversion;

/// Factor turning an amount in `from_unit_id` into `to_unit_id`.
///
/// Lookup order:
/// 1. conversion specific to `product_id`
/// 2. household-wide conversion (no product)
/// 3. identity (`1.0`)
///
/// A missing conversion never blocks a computation; it only degrades
/// precision. Rows with a non-positive or non-finite factor are ignored.
pub fn resolve_factor(
    product_id: &str,
    from_unit_id: &str,
    to_unit_id: &str,
    conversions: &[UnitConversion],
) -> f64 {
    if from_unit_id == to_unit_id {
        return 1.0;
    }

    let usable = conversions.iter().filter(|c| {
        c.from_unit_id == from_unit_id
            && c.to_unit_id == to_unit_id
            && c.factor.is_finite()
            && c.factor > 0.0
    });

    let mut global = None;
    for conversion in usable {
        match conversion.product_id.as_deref() {
            Some(id) if id == product_id => return conversion.factor,
            None if global.is_none() => global = Some(conversion.factor),
            _ => {}
        }
    }

    global.unwrap_or_else(|| {
        tracing::debug!(
            product_id,
            from_unit_id,
            to_unit_id,
            "no unit conversion found, using identity"
        );
        1.0
    })
}

pub fn to_stock_amount(amount: f64, factor: f64) -> f64 {
    amount * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversions() -> Vec<UnitConversion> {
        vec![
            UnitConversion::global("kg", "g", 1000.0),
            UnitConversion::global("pack", "pc", 6.0),
            UnitConversion::for_product("eggs", "pack", "pc", 10.0),
        ]
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(resolve_factor("eggs", "pc", "pc", &conversions()), 1.0);
    }

    #[test]
    fn test_product_specific_wins_over_global() {
        assert_eq!(resolve_factor("eggs", "pack", "pc", &conversions()), 10.0);
        assert_eq!(resolve_factor("rolls", "pack", "pc", &conversions()), 6.0);
    }

    #[test]
    fn test_product_specific_wins_regardless_of_order() {
        let mut conversions = conversions();
        conversions.reverse();
        assert_eq!(resolve_factor("eggs", "pack", "pc", &conversions), 10.0);
    }

    #[test]
    fn test_conversions_are_directional() {
        assert_eq!(resolve_factor("flour", "kg", "g", &conversions()), 1000.0);
        assert_eq!(resolve_factor("flour", "g", "kg", &conversions()), 1.0);
    }

    #[test]
    fn test_missing_conversion_is_identity() {
        assert_eq!(resolve_factor("flour", "cup", "g", &conversions()), 1.0);
        assert_eq!(resolve_factor("flour", "kg", "g", &[]), 1.0);
    }

    #[test]
    fn test_corrupt_factor_ignored() {
        let conversions = vec![
            UnitConversion::for_product("flour", "kg", "g", 0.0),
            UnitConversion::global("kg", "g", 1000.0),
        ];
        assert_eq!(resolve_factor("flour", "kg", "g", &conversions), 1000.0);
    }

    #[test]
    fn test_to_stock_amount() {
        assert_eq!(to_stock_amount(2.0, 1000.0), 2000.0);
        assert_eq!(to_stock_amount(1.5, 1.0), 1.5);
    }
}
