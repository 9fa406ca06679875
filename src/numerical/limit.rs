use crate::numerical::{EstimationError, EstimatorSettings, ensure_finite, sample};
use crate::symbolic::symbolic_traits::Evaluator;
use log::debug;

/// Outcome of a limit estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitResult {
    /// both one-sided samples agree; the right-hand sample is reported
    Value(f64),
    /// the samples disagree: the limit may not exist or the function jumps at the point
    Indeterminate,
}

/// Estimates the limit of `expression` as `variable` approaches `point`.
///
/// The function is sampled at `point - epsilon` and `point + epsilon`, with
/// `epsilon = settings.limit_epsilon`; the same epsilon is the agreement tolerance. If
/// `|left - right| < epsilon` the right-hand sample is the estimate, otherwise the result
/// is [`LimitResult::Indeterminate`]. Either sample failing to evaluate is an error; no
/// one-sided answer is returned.
pub fn estimate_limit<E: Evaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    variable: &str,
    point: f64,
    settings: &EstimatorSettings,
) -> Result<LimitResult, EstimationError> {
    settings.validate()?;
    ensure_finite("limit point", point)?;
    let epsilon = settings.limit_epsilon;
    let left = sample(evaluator, expression, variable, point - epsilon, settings.substitution)?;
    let right = sample(evaluator, expression, variable, point + epsilon, settings.substitution)?;
    debug!(
        "limit of {} at {}: left {} right {} (epsilon {})",
        expression, point, left, right, epsilon
    );
    if (left - right).abs() < epsilon {
        Ok(LimitResult::Value(right))
    } else {
        Ok(LimitResult::Indeterminate)
    }
}
