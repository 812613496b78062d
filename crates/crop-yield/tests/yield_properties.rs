//! Property checks for the yield model: determinism, monotonicity, unit
//! equivalence, factor bounds, and the three-point confidence rule.

use crop_yield::estimation::config::{FertilizerCurve, ManagementScale, RainfallCurve};
use crop_yield::estimation::factors::{fertilizer_factor, management_factor, rainfall_factor};
use crop_yield::estimation::{
    AreaUnit, Confidence, EstimationInput, SoilFertility, YieldEstimator, ACRES_PER_HECTARE,
};
use proptest::prelude::*;

const DEFAULT_CROPS: [&str; 5] = ["wheat", "rice", "maize", "cotton", "soybean"];

fn crop_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("wheat".to_string()),
        Just("Rice".to_string()),
        Just(" MAIZE ".to_string()),
        Just("cotton".to_string()),
        Just("soybean".to_string()),
        "[a-z]{3,12}",
    ]
}

fn fertility_strategy() -> impl Strategy<Value = SoilFertility> {
    prop_oneof![
        Just(SoilFertility::Low),
        Just(SoilFertility::Medium),
        Just(SoilFertility::High),
    ]
}

prop_compose! {
    fn acre_input()(
        crop in crop_strategy(),
        area in 0.1f64..500.0,
        soil_fertility in fertility_strategy(),
        rainfall_mm in 0.0f64..3000.0,
        fertilizer_rate_kg_per_acre in 0.0f64..400.0,
        previous_yield_qtl_per_acre in prop_oneof![Just(0.0f64), 1.0f64..60.0],
        management_score in 1u8..=10,
    ) -> EstimationInput {
        EstimationInput {
            crop,
            area,
            area_unit: AreaUnit::Acres,
            soil_fertility,
            rainfall_mm,
            fertilizer_rate_kg_per_acre,
            previous_yield_qtl_per_acre,
            management_score,
        }
    }
}

proptest! {
    #[test]
    fn estimates_are_deterministic(input in acre_input()) {
        let estimator = YieldEstimator::default();
        prop_assert_eq!(estimator.estimate(&input), estimator.estimate(&input));
    }

    #[test]
    fn total_yield_never_decreases_with_area(input in acre_input(), extra in 0.0f64..500.0) {
        let estimator = YieldEstimator::default();
        let mut larger = input.clone();
        larger.area += extra;

        let small = estimator.estimate(&input);
        let large = estimator.estimate(&larger);

        prop_assert_eq!(small.yield_per_acre, large.yield_per_acre);
        prop_assert!(large.total_yield >= small.total_yield);
    }

    #[test]
    fn hectares_match_equivalent_acres(input in acre_input(), hectares in 0.1f64..200.0) {
        let estimator = YieldEstimator::default();
        let mut by_hectare = input.clone();
        by_hectare.area = hectares;
        by_hectare.area_unit = AreaUnit::Hectares;
        let mut by_acre = input;
        by_acre.area = hectares * ACRES_PER_HECTARE;

        let a = estimator.estimate(&by_hectare);
        let b = estimator.estimate(&by_acre);

        prop_assert_eq!(a.yield_per_acre, b.yield_per_acre);
        prop_assert!((a.total_yield - b.total_yield).abs() <= 1.0);
    }

    #[test]
    fn yields_are_non_negative_and_bounded(input in acre_input()) {
        let estimator = YieldEstimator::default();
        let breakdown = estimator.explain(&input);
        let product = breakdown.factors.product();

        prop_assert!(breakdown.result.yield_per_acre >= 0.0);
        prop_assert!(product >= 0.9 * 0.75 * 0.8 * 0.85 - 1e-9);
        prop_assert!(product <= 1.15 * 1.0 * 1.2 * 1.2 + 1e-9);
    }

    #[test]
    fn rainfall_factor_stays_in_bounds(rainfall in 0.0f64..20_000.0) {
        let factor = rainfall_factor(&RainfallCurve::default(), rainfall);
        prop_assert!((0.75..=1.0).contains(&factor));
    }

    #[test]
    fn fertilizer_factor_stays_in_bounds(rate in 0.0f64..10_000.0) {
        let factor = fertilizer_factor(&FertilizerCurve::default(), rate);
        prop_assert!((0.8..=1.2).contains(&factor));
    }

    #[test]
    fn management_factor_stays_in_bounds(score in 1u8..=10) {
        let factor = management_factor(&ManagementScale::default(), score);
        prop_assert!((0.85..=1.2).contains(&factor));
    }

    #[test]
    fn confidence_follows_three_point_rule(input in acre_input()) {
        let estimator = YieldEstimator::default();
        let known = DEFAULT_CROPS.contains(&input.crop.trim().to_lowercase().as_str());
        let score = u8::from(input.previous_yield_qtl_per_acre > 0.0)
            + u8::from(known)
            + u8::from((input.rainfall_mm - 750.0).abs() < 300.0);
        let expected = match score {
            3 => Confidence::High,
            2 => Confidence::Medium,
            _ => Confidence::Low,
        };

        prop_assert_eq!(estimator.estimate(&input).confidence, expected);
    }
}
