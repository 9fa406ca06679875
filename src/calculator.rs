//! # Calculator
//!
//! The application layer of the calculus calculator: input validation, dispatch of the
//! three operations to the symbolic and numerical engines, result formatting, LaTeX display
//! strings and the in-memory calculation history.
//!
//! The calculation itself is stateless ([`operations::calculate`]); the state of an
//! interactive front end (active tab, form fields, last outcome, history) lives in a
//! [`session::CalculatorSession`] value owned by the front end.
//!
//!# Example
//! ```
//! use RustedCalculus::calculator::CalculatorMode;
//! use RustedCalculus::calculator::session::CalculatorSession;
//! let mut session: CalculatorSession = CalculatorSession::default();
//! session.select_mode(CalculatorMode::Integral);
//! session.form_mut().expression = "2*x".to_string();
//! session.form_mut().lower = "0".to_string();
//! session.form_mut().upper = "1".to_string();
//! let outcome = session.calculate().unwrap();
//! assert_eq!(outcome.result, "1.000000");
//! assert_eq!(session.history().len(), 1);
//! ```

use strum_macros::{Display, EnumIter, EnumString};

/// calculator settings and their TOML file
pub mod config;
/// LaTeX strings shown next to results
pub mod latex;
/// request validation and the stateless calculation
pub mod operations;
/// application state of an interactive front end
pub mod session;
/// text commands of the interactive session
pub mod commands;

pub const MSG_EMPTY_EXPRESSION: &str = "Please enter an expression";
pub const MSG_EMPTY_VARIABLE: &str = "Please enter a variable";
pub const MSG_EMPTY_LIMIT_POINT: &str = "Please enter a limit point";
pub const MSG_MISSING_BOUND: &str = "Please provide both lower and upper bounds";
pub const MSG_INTEGRAL_FAILED: &str =
    "Error calculating definite integral. Check your expression and bounds.";
pub const MSG_LIMIT_FAILED: &str = "Error calculating limit. Check your expression and limit point.";
pub const INDEFINITE_INTEGRAL_NOTICE: &str =
    "Symbolic integration is not supported. Please use definite integrals with bounds.";
pub const INDETERMINATE_LIMIT_TEXT: &str = "Limit may not exist or is discontinuous at this point";

/// Operation tab; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CalculatorMode {
    #[default]
    Derivative,
    Integral,
    Limit,
}

/// Kind of a finished calculation as shown in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CalculationKind {
    #[strum(serialize = "Derivative")]
    Derivative,
    #[strum(serialize = "Definite Integral")]
    DefiniteIntegral,
    #[strum(serialize = "Indefinite Integral")]
    IndefiniteIntegralNotice,
    #[strum(serialize = "Limit")]
    Limit,
}
