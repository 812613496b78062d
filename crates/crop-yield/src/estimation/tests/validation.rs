use super::common::*;
use crate::estimation::{AreaUnit, EstimationResult, YieldEstimator};
use crate::estimation::{InputValidator, InvalidInput};

#[test]
fn accepts_conformant_input_and_trims_crop() {
    let mut input = wheat_input();
    input.crop = "  Wheat  ".to_string();

    let validated = InputValidator.validate(input).expect("input is valid");

    assert_eq!(validated.crop, "Wheat");
}

#[test]
fn rejects_blank_crop() {
    let mut input = wheat_input();
    input.crop = "   ".to_string();

    assert_eq!(
        InputValidator.validate(input),
        Err(InvalidInput::MissingCrop)
    );
}

#[test]
fn rejects_non_positive_area() {
    for area in [0.0, -2.0, f64::NAN] {
        let mut input = wheat_input();
        input.area = area;

        match InputValidator.validate(input) {
            Err(InvalidInput::NonPositiveArea(_)) => {}
            other => panic!("expected area rejection for {area}, got {other:?}"),
        }
    }
}

#[test]
fn rejects_negative_measurements() {
    let mut input = wheat_input();
    input.fertilizer_rate_kg_per_acre = -5.0;

    match InputValidator.validate(input) {
        Err(InvalidInput::Negative { field, value }) => {
            assert_eq!(field, "fertilizerRateKgPerAcre");
            assert_eq!(value, -5.0);
        }
        other => panic!("expected negative measurement rejection, got {other:?}"),
    }
}

#[test]
fn rejects_management_score_outside_scale() {
    for score in [0, 11] {
        let mut input = wheat_input();
        input.management_score = score;

        assert_eq!(
            InputValidator.validate(input),
            Err(InvalidInput::ManagementScoreOutOfRange {
                min: 1,
                max: 10,
                found: score,
            })
        );
    }
}

#[test]
fn rejects_area_beyond_supported_maximum() {
    let mut input = wheat_input();
    input.area = 1e308;
    input.area_unit = AreaUnit::Hectares;

    match InputValidator.validate(input) {
        Err(InvalidInput::ExceedsLimit { field, value, max }) => {
            assert_eq!(field, "areaInAcres");
            assert!(value.is_infinite());
            assert_eq!(max, InputValidator::MAX_AREA_ACRES);
        }
        other => panic!("expected area limit rejection, got {other:?}"),
    }
}

#[test]
fn rejects_previous_yield_beyond_supported_maximum() {
    let mut input = wheat_input();
    input.previous_yield_qtl_per_acre = 1e300;

    assert!(matches!(
        InputValidator.validate(input),
        Err(InvalidInput::ExceedsLimit {
            field: "previousYieldQtlPerAcre",
            ..
        })
    ));
}

#[test]
fn largest_accepted_field_yields_finite_json_totals() {
    let mut input = wheat_input();
    input.area = InputValidator::MAX_AREA_ACRES;
    input.area_unit = AreaUnit::Acres;
    input.previous_yield_qtl_per_acre = InputValidator::MAX_PREVIOUS_YIELD_QTL_PER_ACRE;

    let validated = InputValidator.validate(input).expect("limits are inclusive");
    let result = YieldEstimator::default().estimate(&validated);
    assert!(result.total_yield.is_finite());

    let body = serde_json::to_string(&result).expect("serialize result");
    let decoded: EstimationResult = serde_json::from_str(&body).expect("result reads back");
    assert_eq!(decoded.total_yield, result.total_yield);
}
