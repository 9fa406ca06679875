use crate::numerical::{EstimationError, EstimatorSettings, ensure_finite, sample};
use crate::symbolic::symbolic_traits::Evaluator;
use log::debug;

/// Definite integral of `expression` over `[lower, upper]` by the composite trapezoidal rule.
///
/// The interval is split into `settings.integration_steps` equal steps of width
/// `h = (upper - lower) / steps`; the samples `x_i = lower + i*h`, `i = 0..=steps`, are summed
/// with weight 1/2 at both ends and 1 elsewhere, and the sum is multiplied by `h`.
/// `upper < lower` gives a negative `h` and therefore the negated integral; equal bounds give
/// exactly 0. A sample that cannot be evaluated aborts the whole integration.
///
/// # Examples
/// ```rust, ignore
/// let area = integrate(&SymbolicBackend, "x^2", "x", 0.0, 1.0, &EstimatorSettings::default())?;
/// assert_eq!(format_fixed(area, DISPLAY_DECIMALS), "0.333333");
/// ```
pub fn integrate<E: Evaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    variable: &str,
    lower: f64,
    upper: f64,
    settings: &EstimatorSettings,
) -> Result<f64, EstimationError> {
    settings.validate()?;
    ensure_finite("lower bound", lower)?;
    ensure_finite("upper bound", upper)?;
    let steps = settings.integration_steps;
    let h = (upper - lower) / steps as f64;
    debug!(
        "trapezoidal rule for {} over [{}, {}]: {} steps, h = {}",
        expression, lower, upper, steps, h
    );

    let mut sum = 0.0;
    for i in 0..=steps {
        let x_i = lower + i as f64 * h;
        let weight = if i == 0 || i == steps { 0.5 } else { 1.0 };
        let f_i = sample(evaluator, expression, variable, x_i, settings.substitution)?;
        sum += weight * f_i;
    }
    Ok(sum * h)
}
