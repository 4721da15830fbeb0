use std::f64::consts::PI;

/// Area-preserving radius for a proportional symbol.
///
/// The attribute value scaled by the dataset's hand-tuned factor is treated
/// as the circle's area. Total for `value >= 0`; negative input yields NaN
/// (callers ensure population values are non-negative).
pub fn symbol_radius(value: f64, scale_factor: f64) -> f64 {
    (value * scale_factor / PI).sqrt()
}

/// Legend label rounded to the nearest 1000.
pub fn legend_label(value: f64) -> i64 {
    (value / 1000.0).round() as i64 * 1000
}

#[cfg(test)]
mod tests {
    use super::{legend_label, symbol_radius};

    #[test]
    fn zero_value_is_zero_radius_for_any_factor() {
        for factor in [0.0, 0.015, 50.0, 1e9] {
            assert_eq!(symbol_radius(0.0, factor), 0.0);
        }
    }

    #[test]
    fn radius_is_monotone_in_value() {
        let factor = 0.015;
        let mut previous = symbol_radius(0.0, factor);
        for value in [1.0, 10.0, 1_000.0, 250_000.0, 9_000_000.0] {
            let radius = symbol_radius(value, factor);
            assert!(radius >= previous, "radius must not shrink as value grows");
            previous = radius;
        }
    }

    #[test]
    fn radius_matches_area_formula() {
        let radius = symbol_radius(30.0, 50.0);
        let expected = (30.0_f64 * 50.0 / std::f64::consts::PI).sqrt();
        assert!((radius - expected).abs() < 1e-12);
    }

    #[test]
    fn negative_value_is_nan_by_contract() {
        assert!(symbol_radius(-1.0, 0.015).is_nan());
    }

    #[test]
    fn legend_label_rounds_to_nearest_thousand() {
        assert_eq!(legend_label(12_499.0), 12_000);
        assert_eq!(legend_label(12_500.0), 13_000);
        assert_eq!(legend_label(980.0), 1_000);
        assert_eq!(legend_label(0.0), 0);
    }
}
