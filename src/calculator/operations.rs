use crate::calculator::session::CalculatorForm;
use crate::calculator::{
    CalculationKind, CalculatorMode, INDEFINITE_INTEGRAL_NOTICE, INDETERMINATE_LIMIT_TEXT,
    MSG_EMPTY_EXPRESSION, MSG_EMPTY_LIMIT_POINT, MSG_EMPTY_VARIABLE, MSG_INTEGRAL_FAILED,
    MSG_LIMIT_FAILED, MSG_MISSING_BOUND, latex,
};
use crate::numerical::integral::integrate;
use crate::numerical::limit::{LimitResult, estimate_limit};
use crate::numerical::{EstimationError, EstimatorSettings, format_fixed};
use crate::symbolic::symbolic_traits::{CalculusBackend, Differentiator, Evaluator};
use log::{debug, info};
use thiserror::Error;

/// Error types of a calculation. The `Display` text is the message shown to the user.
#[derive(Error, Debug)]
pub enum CalcError {
    /// missing or malformed input, detected before any evaluation
    #[error("{0}")]
    Input(String),
    /// the estimator failed; `message` is the fixed text for the operation
    #[error("{message}")]
    Evaluation {
        message: &'static str,
        source: EstimationError,
    },
}

impl CalcError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// A number typed into a form field: the trimmed text (kept for display) and its value
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    pub text: String,
    pub value: f64,
}

impl NumericField {
    /// Evaluates the field as a constant expression, so `-1.5`, `pi/2` and `2e-3` are accepted.
    pub fn parse<E: Evaluator + ?Sized>(
        evaluator: &E,
        field: &str,
        text: &str,
    ) -> Result<Self, CalcError> {
        let text = text.trim();
        let value = evaluator
            .evaluate(text)
            .map_err(|err| CalcError::Input(format!("Invalid {}: {}", field, err)))?;
        Ok(NumericField {
            text: text.to_string(),
            value,
        })
    }
}

/// A validated calculation with typed inputs
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationRequest {
    Derivative {
        expression: String,
        variable: String,
    },
    DefiniteIntegral {
        expression: String,
        variable: String,
        lower: NumericField,
        upper: NumericField,
    },
    IndefiniteIntegral {
        expression: String,
        variable: String,
    },
    Limit {
        expression: String,
        variable: String,
        point: NumericField,
    },
}

impl CalculationRequest {
    /// Validates the form of the active mode. The checks run in a fixed order and the first
    /// failing one decides the message: expression, limit point (limit mode), variable,
    /// presence of both bounds (integral mode), then the numeric fields themselves.
    pub fn from_form<E: Evaluator + ?Sized>(
        form: &CalculatorForm,
        evaluator: &E,
    ) -> Result<Self, CalcError> {
        let expression = form.expression.trim();
        if expression.is_empty() {
            return Err(CalcError::Input(MSG_EMPTY_EXPRESSION.to_string()));
        }
        if form.mode == CalculatorMode::Limit && form.limit_point.trim().is_empty() {
            return Err(CalcError::Input(MSG_EMPTY_LIMIT_POINT.to_string()));
        }
        let variable = form.variable.trim();
        if variable.is_empty() {
            return Err(CalcError::Input(MSG_EMPTY_VARIABLE.to_string()));
        }
        let expression = expression.to_string();
        let variable = variable.to_string();
        let request = match form.mode {
            CalculatorMode::Derivative => CalculationRequest::Derivative {
                expression,
                variable,
            },
            CalculatorMode::Integral => {
                match (form.lower.trim().is_empty(), form.upper.trim().is_empty()) {
                    (true, true) => CalculationRequest::IndefiniteIntegral {
                        expression,
                        variable,
                    },
                    (false, false) => CalculationRequest::DefiniteIntegral {
                        expression,
                        variable,
                        lower: NumericField::parse(evaluator, "lower bound", &form.lower)?,
                        upper: NumericField::parse(evaluator, "upper bound", &form.upper)?,
                    },
                    _ => return Err(CalcError::Input(MSG_MISSING_BOUND.to_string())),
                }
            }
            CalculatorMode::Limit => CalculationRequest::Limit {
                expression,
                variable,
                point: NumericField::parse(evaluator, "limit point", &form.limit_point)?,
            },
        };
        Ok(request)
    }
}

/// Result of a successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    pub kind: CalculationKind,
    /// formatted result or notice text
    pub result: String,
    /// LaTeX of the input, as stored in the history
    pub history_input: String,
    /// LaTeX display line: input and result
    pub latex: String,
}

impl CalculationOutcome {
    fn new(kind: CalculationKind, history_input: String, result: String) -> Self {
        let approximate = kind == CalculationKind::IndefiniteIntegralNotice;
        let latex = latex::display_line(&history_input, &result, approximate);
        CalculationOutcome {
            kind,
            result,
            history_input,
            latex,
        }
    }
}

/// Derivative of `expression` as display text.
pub fn differentiate_display<D: Differentiator + ?Sized>(
    differentiator: &D,
    expression: &str,
    variable: &str,
) -> Result<String, CalcError> {
    if expression.trim().is_empty() {
        return Err(CalcError::Input(MSG_EMPTY_EXPRESSION.to_string()));
    }
    if variable.trim().is_empty() {
        return Err(CalcError::Input(MSG_EMPTY_VARIABLE.to_string()));
    }
    differentiator
        .differentiate(expression, variable)
        .map_err(|err| CalcError::Input(err.to_string()))
}

/// Runs a validated request. Stateless: the caller decides what to keep.
pub fn calculate<B: CalculusBackend + ?Sized>(
    backend: &B,
    request: &CalculationRequest,
    settings: &EstimatorSettings,
    decimals: usize,
) -> Result<CalculationOutcome, CalcError> {
    debug!("calculating {:?} with {:?}", request, settings);
    let outcome = match request {
        CalculationRequest::Derivative {
            expression,
            variable,
        } => {
            let derivative = differentiate_display(backend, expression, variable)?;
            CalculationOutcome::new(
                CalculationKind::Derivative,
                latex::derivative_input(variable, expression),
                derivative,
            )
        }
        CalculationRequest::DefiniteIntegral {
            expression,
            variable,
            lower,
            upper,
        } => {
            let value = integrate(backend, expression, variable, lower.value, upper.value, settings)
                .map_err(|source| CalcError::Evaluation {
                    message: MSG_INTEGRAL_FAILED,
                    source,
                })?;
            CalculationOutcome::new(
                CalculationKind::DefiniteIntegral,
                latex::definite_integral_input(&lower.text, &upper.text, expression, variable),
                format_fixed(value, decimals),
            )
        }
        CalculationRequest::IndefiniteIntegral {
            expression,
            variable,
        } => CalculationOutcome::new(
            CalculationKind::IndefiniteIntegralNotice,
            latex::indefinite_integral_input(expression, variable),
            INDEFINITE_INTEGRAL_NOTICE.to_string(),
        ),
        CalculationRequest::Limit {
            expression,
            variable,
            point,
        } => {
            let limit = estimate_limit(backend, expression, variable, point.value, settings)
                .map_err(|source| CalcError::Evaluation {
                    message: MSG_LIMIT_FAILED,
                    source,
                })?;
            let result = match limit {
                LimitResult::Value(value) => format_fixed(value, decimals),
                LimitResult::Indeterminate => INDETERMINATE_LIMIT_TEXT.to_string(),
            };
            CalculationOutcome::new(
                CalculationKind::Limit,
                latex::limit_input(variable, &point.text, expression),
                result,
            )
        }
    };
    info!("{}: {} = {}", outcome.kind, outcome.history_input, outcome.result);
    Ok(outcome)
}
