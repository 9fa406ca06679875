use crate::numerical::integral::integrate;
use crate::numerical::limit::{LimitResult, estimate_limit};
use crate::numerical::substitution::SubstitutionMode;
use crate::numerical::{
    DISPLAY_DECIMALS, EstimationError, EstimatorSettings, INTEGRATION_STEPS, format_fixed,
};
use crate::symbolic::symbolic_engine_derivatives::EvalError;
use crate::symbolic::symbolic_traits::SymbolicBackend;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::f64::consts::PI;

fn defaults() -> EstimatorSettings {
    EstimatorSettings::default()
}

#[test]
fn test_integral_of_square() {
    let result = integrate(&SymbolicBackend, "x^2", "x", 0.0, 1.0, &defaults()).unwrap();
    assert_abs_diff_eq!(result, 1.0 / 3.0, epsilon = 1e-6);
    // trapezoidal error for x^2 is exactly (b - a)^3 / (6 n^2)
    let n = INTEGRATION_STEPS as f64;
    assert_relative_eq!(result, 1.0 / 3.0 + 1.0 / (6.0 * n * n), epsilon = 1e-12);
}

#[test]
fn test_integral_of_linear_function_is_exact() {
    let result = integrate(&SymbolicBackend, "2*x", "x", 0.0, 1.0, &defaults()).unwrap();
    assert_eq!(format_fixed(result, DISPLAY_DECIMALS), "1.000000");
}

#[test]
fn test_integral_with_equal_bounds_is_zero() {
    let result = integrate(&SymbolicBackend, "exp(x) + x^3", "x", 2.5, 2.5, &defaults()).unwrap();
    assert_eq!(result, 0.0);
    assert_eq!(format_fixed(result, DISPLAY_DECIMALS), "0.000000");
}

#[test]
fn test_reversed_bounds_negate_the_integral() {
    let forward = integrate(&SymbolicBackend, "sin(x)", "x", 0.0, PI, &defaults()).unwrap();
    let backward = integrate(&SymbolicBackend, "sin(x)", "x", PI, 0.0, &defaults()).unwrap();
    assert_abs_diff_eq!(forward, 2.0, epsilon = 1e-5);
    assert_relative_eq!(backward, -forward, epsilon = 1e-10);
    assert_eq!(format_fixed(forward, DISPLAY_DECIMALS), "1.999998");
}

#[test]
fn test_integral_with_other_variable_name() {
    let result = integrate(&SymbolicBackend, "3t^2", "t", 0.0, 2.0, &defaults()).unwrap();
    assert_abs_diff_eq!(result, 8.0, epsilon = 1e-4);
}

#[test]
fn test_integral_aborts_on_failed_sample() {
    let result = integrate(&SymbolicBackend, "ln(x)", "x", -1.0, 1.0, &defaults());
    assert_eq!(
        result,
        Err(EstimationError::Evaluation {
            point: -1.0,
            source: EvalError::Domain("ln"),
        })
    );
    let result = integrate(&SymbolicBackend, "x + y", "x", 0.0, 1.0, &defaults());
    assert!(matches!(
        result,
        Err(EstimationError::Evaluation {
            source: EvalError::UnboundVariable(_),
            ..
        })
    ));
}

#[test]
fn test_integral_with_fewer_steps() {
    let settings = EstimatorSettings {
        integration_steps: 1,
        ..defaults()
    };
    // a single trapezoid: (f(0) + f(2)) / 2 * 2
    let result = integrate(&SymbolicBackend, "x^2", "x", 0.0, 2.0, &settings).unwrap();
    assert_relative_eq!(result, 4.0);
}

#[test]
fn test_legacy_substitution_corrupts_names_containing_the_variable() {
    let identifier = integrate(&SymbolicBackend, "exp(e)", "e", 0.0, 1.0, &defaults()).unwrap();
    assert_abs_diff_eq!(identifier, std::f64::consts::E - 1.0, epsilon = 1e-6);
    let legacy = EstimatorSettings {
        substitution: SubstitutionMode::Legacy,
        ..defaults()
    };
    let result = integrate(&SymbolicBackend, "exp(e)", "e", 0.0, 1.0, &legacy);
    assert!(matches!(result, Err(EstimationError::Evaluation { .. })));
}

#[test]
fn test_limit_of_continuous_functions() {
    let result = estimate_limit(&SymbolicBackend, "sin(x)/x", "x", 0.0, &defaults()).unwrap();
    match result {
        LimitResult::Value(value) => {
            assert_eq!(format_fixed(value, DISPLAY_DECIMALS), "1.000000")
        }
        LimitResult::Indeterminate => panic!("sin(x)/x has a limit at 0"),
    }
    let result = estimate_limit(&SymbolicBackend, "x^2", "x", 0.0, &defaults()).unwrap();
    assert!(matches!(result, LimitResult::Value(v) if (v - 1e-8).abs() < 1e-15));
    let result = estimate_limit(&SymbolicBackend, "cos(x) + 3", "x", 0.0, &defaults()).unwrap();
    assert!(matches!(result, LimitResult::Value(v) if (v - 4.0).abs() < 1e-6));
}

#[test]
fn test_limit_tolerance_equals_offset() {
    // the samples of x^2 around 2 differ by 8e-4, more than the 1e-4 tolerance
    let result = estimate_limit(&SymbolicBackend, "x^2", "x", 2.0, &defaults()).unwrap();
    assert_eq!(result, LimitResult::Indeterminate);
    // a slope below 1/2 keeps the samples within the tolerance
    let result = estimate_limit(&SymbolicBackend, "x/4", "x", 2.0, &defaults()).unwrap();
    assert!(matches!(result, LimitResult::Value(v) if (v - 0.500025).abs() < 1e-12));
}

#[test]
fn test_limit_at_discontinuity_is_indeterminate() {
    let result = estimate_limit(&SymbolicBackend, "1/x", "x", 0.0, &defaults()).unwrap();
    assert_eq!(result, LimitResult::Indeterminate);
    let result = estimate_limit(&SymbolicBackend, "abs(x)/x", "x", 0.0, &defaults()).unwrap();
    assert_eq!(result, LimitResult::Indeterminate);
}

#[test]
fn test_limit_fails_when_a_side_cannot_be_evaluated() {
    let result = estimate_limit(&SymbolicBackend, "sqrt(x)", "x", 0.0, &defaults());
    assert!(matches!(
        result,
        Err(EstimationError::Evaluation {
            source: EvalError::Domain("power"),
            ..
        })
    ));
}

#[test]
fn test_estimators_reject_empty_variable() {
    let result = estimate_limit(&SymbolicBackend, "x", " ", 0.0, &defaults());
    assert!(matches!(result, Err(EstimationError::Substitution(_))));
    let result = integrate(&SymbolicBackend, "x", "", 0.0, 1.0, &defaults());
    assert!(matches!(result, Err(EstimationError::Substitution(_))));
}
