//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with analytical differentiation, checked numerical
//! evaluation and string parsing.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `diff(var: &str)` - analytical derivative with respect to one variable
//! - `n_th_derivative1D()` - higher-order derivatives
//!
//! ### Evaluation
//! - `eval_checked()` - evaluates an expression without free variables; division by zero,
//!   unbound variables and results outside a function's real domain are reported as
//!   [`EvalError`] instead of leaking `NaN`/`inf` into the caller
//! - `eval_at()` - binds one variable and evaluates
//!
//! ### Parsing
//! - `parse_expression()` - string to symbolic expression
//!
//! ## Interesting Code Features
//!
//! 1. **General power rule**: `u^v` is differentiated with the rule matching which side
//!    depends on the variable, so `x^x` and `2^x` are handled as well as `x^n`
//! 2. **Named constants**: `pi` and `e` are ordinary variables in the tree and only turn
//!    into numbers when evaluation finds them unbound, so differentiating with respect to
//!    `e` still works

use crate::symbolic::parse_expr::{ParseError, parse_expression_func};
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::{E, FRAC_PI_2, PI};
use thiserror::Error;

/// Error returned by numerical evaluation of an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Undefined symbol '{0}'")]
    UnboundVariable(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Result of {0} is not a finite real number")]
    Domain(&'static str),
}

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements the standard differentiation rules:
    /// - Power rule: d/dx(u^n) = n*u^(n-1)*u'
    /// - Exponential rule: d/dx(a^v) = a^v*ln(a)*v'
    /// - General power rule: d/dx(u^v) = u^v*(v'*ln(u) + v*u'/u)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
    ///
    /// The result is not simplified; call `simplify()` on it for a readable form.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x").simplify(); // 2 * x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
                )),
                Box::new(Expr::Pow(rhs.clone(), Box::new(Expr::Const(2.0)))),
            ),
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.diff(var)),
                    )
                } else if !base.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            Box::new(self.clone()),
                            Box::new(Expr::Ln(base.clone())),
                        )),
                        Box::new(exp.diff(var)),
                    )
                } else {
                    Expr::Mul(
                        Box::new(self.clone()),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(
                                Box::new(exp.diff(var)),
                                Box::new(Expr::Ln(base.clone())),
                            )),
                            Box::new(Expr::Div(
                                Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                                base.clone(),
                            )),
                        )),
                    )
                }
            }
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::cos(expr.clone())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            Expr::ctg(expr) => Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Div(
                    Box::new(expr.diff(var)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::sin(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
            ),
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            Expr::arccos(expr) => Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Div(
                    Box::new(expr.diff(var)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::Sub(
                            Box::new(Expr::Const(1.0)),
                            Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                        )),
                        Box::new(Expr::Const(0.5)),
                    )),
                )),
            ),
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            Expr::arcctg(expr) => Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Div(
                    Box::new(expr.diff(var)),
                    Box::new(Expr::Add(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                )),
            ),
            // |u|' = u' * u / |u|
            Expr::abs(expr) => Expr::Mul(
                Box::new(expr.diff(var)),
                Box::new(Expr::Div(expr.clone(), Box::new(Expr::abs(expr.clone())))),
            ),
        }
    } // end of diff

    /// Computes the n-th derivative, simplifying after every step so the tree stays small.
    pub fn n_th_derivative1D(&self, var_name: &str, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff(var_name).simplify();
        }
        expr
    }

    /// DIRECT EXPRESSION EVALUATION

    /// Evaluates an expression that has no free variables left.
    ///
    /// Unbound `pi` and `e` evaluate to the mathematical constants; any other unbound
    /// variable is an error. Every node is checked: a zero divisor gives
    /// [`EvalError::DivisionByZero`], a `NaN` or infinite intermediate result gives
    /// [`EvalError::Domain`] naming the operation that produced it.
    pub fn eval_checked(&self) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Var(name) => match name.as_str() {
                "pi" => PI,
                "e" => E,
                _ => return Err(EvalError::UnboundVariable(name.clone())),
            },
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval_checked()? + rhs.eval_checked()?,
            Expr::Sub(lhs, rhs) => lhs.eval_checked()? - rhs.eval_checked()?,
            Expr::Mul(lhs, rhs) => lhs.eval_checked()? * rhs.eval_checked()?,
            Expr::Div(lhs, rhs) => {
                let numerator = lhs.eval_checked()?;
                let denominator = rhs.eval_checked()?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                numerator / denominator
            }
            Expr::Pow(base, exp) => base.eval_checked()?.powf(exp.eval_checked()?),
            Expr::Exp(expr) => expr.eval_checked()?.exp(),
            Expr::Ln(expr) => expr.eval_checked()?.ln(),
            Expr::sin(expr) => expr.eval_checked()?.sin(),
            Expr::cos(expr) => expr.eval_checked()?.cos(),
            Expr::tg(expr) => expr.eval_checked()?.tan(),
            Expr::ctg(expr) => 1.0 / expr.eval_checked()?.tan(),
            Expr::arcsin(expr) => expr.eval_checked()?.asin(),
            Expr::arccos(expr) => expr.eval_checked()?.acos(),
            Expr::arctg(expr) => expr.eval_checked()?.atan(),
            Expr::arcctg(expr) => FRAC_PI_2 - expr.eval_checked()?.atan(),
            Expr::abs(expr) => expr.eval_checked()?.abs(),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::Domain(self.operation_name()))
        }
    } // end of eval_checked

    /// Binds `var` to `value` and evaluates.
    pub fn eval_at(&self, var: &str, value: f64) -> Result<f64, EvalError> {
        self.set_variable(var, value).eval_checked()
    }

    /// EXPRESSION PARSING FROM STRINGS

    /// Parses a mathematical expression from string representation.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, var_name
    /// - Constants: 3.14, .5, 1e-6, pi, e
    /// - Operators: +, -, *, /, ^ (right associative), unary minus
    /// - Functions: exp, ln, log, log10, sqrt, sin, cos, tan, cot, their inverses, abs
    /// - Parentheses for grouping, implicit multiplication such as `2x`
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("x^2 + 2*x + 1")?;
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        parse_expression_func(input)
    }
}
