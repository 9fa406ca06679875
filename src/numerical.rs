//! # Numerical estimators
//!
//! Definite integration by the composite trapezoidal rule and a symmetric
//! finite-difference limit heuristic. Both work on the expression *text*: each sample
//! point is spliced into the expression by [`substitution::substitute`] and the resulting
//! string is handed to an [`Evaluator`], so any engine implementing that trait can back
//! the estimators.
//!
//! Example#1
//! ```
//! use RustedCalculus::numerical::{EstimatorSettings, integral::integrate};
//! use RustedCalculus::symbolic::symbolic_traits::SymbolicBackend;
//! let area = integrate(&SymbolicBackend, "x^2", "x", 0.0, 1.0, &EstimatorSettings::default()).unwrap();
//! assert!((area - 1.0 / 3.0).abs() < 1e-6);
//! ```
//! Example#2
//! ```
//! use RustedCalculus::numerical::{EstimatorSettings, limit::{estimate_limit, LimitResult}};
//! use RustedCalculus::symbolic::symbolic_traits::SymbolicBackend;
//! let settings = EstimatorSettings::default();
//! let limit = estimate_limit(&SymbolicBackend, "1/x", "x", 0.0, &settings).unwrap();
//! assert_eq!(limit, LimitResult::Indeterminate);
//! ```

use crate::numerical::substitution::{SubstitutionError, SubstitutionMode, substitute};
use crate::symbolic::symbolic_engine_derivatives::EvalError;
use crate::symbolic::symbolic_traits::Evaluator;
use thiserror::Error;

/// textual substitution of a variable by a numeric literal
pub mod substitution;
/// composite trapezoidal rule
pub mod integral;
/// two-sided finite-difference limit estimate
pub mod limit;
#[cfg(test)]
mod estimator_tests;

/// Number of trapezoids used for a definite integral.
pub const INTEGRATION_STEPS: usize = 1000;
/// Offset from the limit point and tolerance between the two one-sided samples.
pub const LIMIT_EPSILON: f64 = 1e-4;
/// Decimal places of a displayed numeric result.
pub const DISPLAY_DECIMALS: usize = 6;

// enough fractional digits to print any f64 exactly
const EXACT_FRACTION_DIGITS: usize = 1075;

/// Formats a result with a fixed number of decimals.
///
/// An exact tie rounds away from zero (`0.0078125` gives `0.007813` at six places) and
/// negative zero prints as zero; `{:.*}` alone would round ties to even.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }
    let magnitude = value.abs();
    let exact = format!("{:.*}", decimals + EXACT_FRACTION_DIGITS, magnitude);
    let dropped = &exact[exact.len() - EXACT_FRACTION_DIGITS..];
    let is_tie = dropped.starts_with('5') && dropped[1..].bytes().all(|b| b == b'0');
    // the next float up lies strictly above the tie and rounds to the larger neighbour
    let magnitude = if is_tie {
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };
    let text = format!("{:.*}", decimals, magnitude);
    if value < 0.0 { format!("-{}", text) } else { text }
}

/// Tunables of the estimators. The defaults are the values the calculator ships with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSettings {
    pub integration_steps: usize,
    pub limit_epsilon: f64,
    pub substitution: SubstitutionMode,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            integration_steps: INTEGRATION_STEPS,
            limit_epsilon: LIMIT_EPSILON,
            substitution: SubstitutionMode::default(),
        }
    }
}

impl EstimatorSettings {
    pub fn validate(&self) -> Result<(), EstimationError> {
        if self.integration_steps == 0 {
            return Err(EstimationError::InvalidSettings(
                "integration_steps must be at least 1".to_string(),
            ));
        }
        if !(self.limit_epsilon.is_finite() && self.limit_epsilon > 0.0) {
            return Err(EstimationError::InvalidSettings(format!(
                "limit_epsilon must be a positive finite number, got {}",
                self.limit_epsilon
            )));
        }
        Ok(())
    }
}

/// Error types of the estimators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
    #[error("Evaluation failed at {point}: {source}")]
    Evaluation { point: f64, source: EvalError },
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("{name} must be a finite number, got {value}")]
    NonFiniteInput { name: &'static str, value: f64 },
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), EstimationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EstimationError::NonFiniteInput { name, value })
    }
}

/// f(at): substitute the sample point into the expression text and evaluate it
pub(crate) fn sample<E: Evaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    variable: &str,
    at: f64,
    mode: SubstitutionMode,
) -> Result<f64, EstimationError> {
    let substituted = substitute(expression, variable, at, mode)?;
    evaluator
        .evaluate(&substituted)
        .map_err(|source| EstimationError::Evaluation { point: at, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(1.0 / 3.0, DISPLAY_DECIMALS), "0.333333");
        assert_eq!(format_fixed(4.0, DISPLAY_DECIMALS), "4.000000");
        assert_eq!(format_fixed(-0.0, DISPLAY_DECIMALS), "0.000000");
        assert_eq!(format_fixed(-2.5, 2), "-2.50");
        assert_eq!(format_fixed(-1e-9, DISPLAY_DECIMALS), "-0.000000");
        assert_eq!(format_fixed(f64::NAN, DISPLAY_DECIMALS), "NaN");
    }

    #[test]
    fn test_format_fixed_ties_round_up() {
        assert_eq!(format_fixed(0.0078125, DISPLAY_DECIMALS), "0.007813");
        assert_eq!(format_fixed(-0.0078125, DISPLAY_DECIMALS), "-0.007813");
        assert_eq!(format_fixed(0.5, 0), "1");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(0.0078124, DISPLAY_DECIMALS), "0.007812");
        assert_eq!(format_fixed(1.0 / 3.0, 0), "0");
    }

    #[test]
    fn test_settings_validation() {
        assert!(EstimatorSettings::default().validate().is_ok());
        let no_steps = EstimatorSettings {
            integration_steps: 0,
            ..EstimatorSettings::default()
        };
        assert!(matches!(
            no_steps.validate(),
            Err(EstimationError::InvalidSettings(_))
        ));
        let bad_epsilon = EstimatorSettings {
            limit_epsilon: -1e-4,
            ..EstimatorSettings::default()
        };
        assert!(bad_epsilon.validate().is_err());
    }
}
