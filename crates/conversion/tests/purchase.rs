use pantry_conversion::{display_price, normalize_purchase, round_for_display};
use pantry_shared::{Product, UnitConversion};

fn flour() -> Product {
    Product {
        id: "flour".to_owned(),
        name: "Flour".to_owned(),
        stock_unit_id: "g".to_owned(),
        exclude_from_recipe_fulfillment: false,
    }
}

#[test]
fn test_kg_purchase_stored_in_grams() {
    let conversions = vec![UnitConversion::global("kg", "g", 1000.0)];

    let purchase = normalize_purchase(&flour(), "kg", 2.0, Some(4.0), &conversions);

    assert_eq!(purchase.factor, 1000.0);
    assert_eq!(purchase.stock_amount, 2000.0);
    let unit_price = purchase.unit_price.expect("price given");
    assert!((unit_price - 0.002).abs() < 1e-12, "got {unit_price}");
}

#[test]
fn test_purchase_in_stock_unit_is_unchanged() {
    let purchase = normalize_purchase(&flour(), "g", 750.0, Some(1.5), &[]);

    assert_eq!(purchase.factor, 1.0);
    assert_eq!(purchase.stock_amount, 750.0);
    assert_eq!(purchase.unit_price, Some(0.002));
}

#[test]
fn test_purchase_without_conversion_falls_back_to_identity() {
    let purchase = normalize_purchase(&flour(), "bag", 3.0, None, &[]);

    assert_eq!(purchase.stock_amount, 3.0);
    assert_eq!(purchase.unit_price, None);
}

#[test]
fn test_product_conversion_beats_global() {
    let conversions = vec![
        UnitConversion::global("bag", "g", 500.0),
        UnitConversion::for_product("flour", "bag", "g", 1000.0),
    ];

    let purchase = normalize_purchase(&flour(), "bag", 1.0, Some(2.0), &conversions);

    assert_eq!(purchase.stock_amount, 1000.0);
    assert_eq!(purchase.unit_price, Some(0.002));
}

#[test]
fn test_display_price_inverts_storage_normalization() {
    let conversions = vec![UnitConversion::global("kg", "g", 1000.0)];
    let purchase = normalize_purchase(&flour(), "kg", 2.0, Some(4.0), &conversions);
    let stored = purchase.unit_price.expect("price given");

    let per_kg = display_price(&flour(), stored, "kg", &conversions);
    assert!((per_kg - 2.0).abs() < 1e-9);
    assert_eq!(round_for_display(per_kg, 2), "2.00");

    let per_gram = display_price(&flour(), stored, "g", &conversions);
    assert_eq!(per_gram, stored);
}
