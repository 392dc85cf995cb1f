/// Multiplier applied to per-`base_servings` amounts for one occurrence.
///
/// Never divides by zero: a non-positive or non-finite base, or a missing,
/// negative or non-finite desired count, yields `1.0`.
pub fn scale_factor(desired_servings: Option<f64>, base_servings: f64) -> f64 {
    if !base_servings.is_finite() || base_servings <= 0.0 {
        return 1.0;
    }

    match desired_servings {
        Some(desired) if desired.is_finite() && desired >= 0.0 => desired / base_servings,
        _ => 1.0,
    }
}
