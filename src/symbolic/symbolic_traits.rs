// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// The calculator talks to a symbolic engine only through these traits.
// The native engine (Expr) implements them in SymbolicBackend below;
// add other engines here as needed

use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_engine_derivatives::EvalError;

/// Evaluates a string expression that contains no free variables to a real number.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// Produces the derivative of a string expression as display text.
pub trait Differentiator {
    fn differentiate(&self, expression: &str, variable: &str) -> Result<String, ParseError>;
}

/// Everything the calculator needs from a symbolic engine.
pub trait CalculusBackend: Evaluator + Differentiator {}

impl<T: Evaluator + Differentiator> CalculusBackend for T {}

///////////////// IMPLEMENTATION OF THE TRAITS FOR THE NATIVE ENGINE /////////////////////////
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolicBackend;

impl Evaluator for SymbolicBackend {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let expr = Expr::parse_expression(expression)?;
        expr.eval_checked()
    }
}

impl Differentiator for SymbolicBackend {
    fn differentiate(&self, expression: &str, variable: &str) -> Result<String, ParseError> {
        let expr = Expr::parse_expression(expression)?;
        let derivative = expr.diff(variable.trim()).simplify();
        Ok(derivative.to_string())
    }
}
