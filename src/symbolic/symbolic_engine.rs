//! # Symbolic Engine Module
//!
//! Core expression tree used by the calculator. Every string the user types is turned
//! into an [`Expr`] by the parser, differentiated and simplified symbolically, printed back
//! as infix text, or evaluated numerically once no free variables remain.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbolic variables like "x", "t"; `pi` and `e` are
//!   variables that evaluate to the mathematical constants when left unbound
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, `tg`, `ctg`, inverse trigonometric functions, `abs`
//!
//! ### Key Methods
//! - `diff(var: &str)` - analytical differentiation (symbolic_engine_derivatives.rs)
//! - `simplify()` - algebraic simplification (symbolic_simplify.rs)
//! - `eval_checked()` - numerical evaluation with domain checks (symbolic_engine_derivatives.rs)
//! - `set_variable()` - substitute a variable with a value on the tree level
//!
//! ## Printing
//!
//! `Display` writes the expression in infix notation with the minimal number of brackets
//! and spaces around binary operators, e.g. `3 * x ^ 2 - sin(x) / (x + 1)`. The printed form
//! can always be parsed back into an equal tree.

#![allow(non_camel_case_types)]

use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "y", "velocity")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function: tan(x) - uses mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function: cot(x) - uses mathematical notation 'ctg'
    ctg(Box<Expr>),
    /// Arcsine function: arcsin(x)
    arcsin(Box<Expr>),
    /// Arccosine function: arccos(x)
    arccos(Box<Expr>),
    /// Arctangent function: arctan(x) - uses mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function: arccot(x) - uses mathematical notation 'arcctg'
    arcctg(Box<Expr>),
    /// Absolute value: abs(x)
    abs(Box<Expr>),
}

// binding strength used by the printer
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_UNARY: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm ln(self).
    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Negation in the engine's canonical form `(-1) * expr`; constants are negated in place
    /// and a double negation cancels.
    pub fn negate(self) -> Expr {
        match self {
            Expr::Const(val) => Expr::Const(-val),
            Expr::Mul(lhs, rhs) if *lhs == Expr::Const(-1.0) => *rhs,
            other => Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(other)),
        }
    }

    /// Argument of a one-argument function node, `None` for everything else.
    pub fn function_argument(&self) -> Option<&Expr> {
        match self {
            Expr::Exp(arg)
            | Expr::Ln(arg)
            | Expr::sin(arg)
            | Expr::cos(arg)
            | Expr::tg(arg)
            | Expr::ctg(arg)
            | Expr::arcsin(arg)
            | Expr::arccos(arg)
            | Expr::arctg(arg)
            | Expr::arcctg(arg)
            | Expr::abs(arg) => Some(arg),
            _ => None,
        }
    }

    /// Name of the node used in printing and in evaluation error messages.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Expr::Var(_) => "variable",
            Expr::Const(_) => "constant",
            Expr::Add(_, _) => "addition",
            Expr::Sub(_, _) => "subtraction",
            Expr::Mul(_, _) => "multiplication",
            Expr::Div(_, _) => "division",
            Expr::Pow(_, _) => "power",
            Expr::Exp(_) => "exp",
            Expr::Ln(_) => "ln",
            Expr::sin(_) => "sin",
            Expr::cos(_) => "cos",
            Expr::tg(_) => "tan",
            Expr::ctg(_) => "cot",
            Expr::arcsin(_) => "arcsin",
            Expr::arccos(_) => "arccos",
            Expr::arctg(_) => "arctan",
            Expr::arcctg(_) => "arccot",
            Expr::abs(_) => "abs",
        }
    }

    /// Rebuilds a one-argument function node of the same kind around a new argument.
    /// Non-function nodes are returned unchanged.
    pub fn with_argument(&self, arg: Expr) -> Expr {
        let arg = arg.boxed();
        match self {
            Expr::Exp(_) => Expr::Exp(arg),
            Expr::Ln(_) => Expr::Ln(arg),
            Expr::sin(_) => Expr::sin(arg),
            Expr::cos(_) => Expr::cos(arg),
            Expr::tg(_) => Expr::tg(arg),
            Expr::ctg(_) => Expr::ctg(arg),
            Expr::arcsin(_) => Expr::arcsin(arg),
            Expr::arccos(_) => Expr::arccos(arg),
            Expr::arctg(_) => Expr::arctg(arg),
            Expr::arcctg(_) => Expr::arcctg(arg),
            Expr::abs(_) => Expr::abs(arg),
            _ => self.clone(),
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    ///
    /// # Returns
    /// New expression with the variable substituted
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.set_variable(var, value)),
                Box::new(rhs.set_variable(var, value)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.set_variable(var, value)),
                Box::new(exp.set_variable(var, value)),
            ),
            func => match func.function_argument() {
                Some(arg) => func.with_argument(arg.set_variable(var, value)),
                None => func.clone(),
            },
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            func => func
                .function_argument()
                .is_some_and(|arg| arg.contains_variable(var_name)),
        }
    }

    /// Extracts all unique variable names from the expression, sorted and deduplicated.
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                vars.extend(lhs.all_arguments_are_variables());
                vars.extend(rhs.all_arguments_are_variables());
            }
            func => {
                if let Some(arg) = func.function_argument() {
                    vars.extend(arg.all_arguments_are_variables());
                }
            }
        }
        vars.sort();
        vars.dedup();
        vars
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => PREC_SUM,
            Expr::Mul(lhs, _) if **lhs == Expr::Const(-1.0) => PREC_UNARY,
            Expr::Mul(_, _) | Expr::Div(_, _) => PREC_PRODUCT,
            Expr::Const(val) if val.is_sign_negative() => PREC_UNARY,
            Expr::Pow(_, _) => PREC_POWER,
            _ => PREC_ATOM,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter, bracketed: bool) -> fmt::Result {
        if bracketed {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Display implementation for pretty printing symbolic expressions with minimal brackets.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => {
                lhs.fmt_operand(f, lhs.precedence() < PREC_SUM)?;
                write!(f, " + ")?;
                rhs.fmt_operand(f, rhs.precedence() < PREC_SUM)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.fmt_operand(f, lhs.precedence() < PREC_SUM)?;
                write!(f, " - ")?;
                rhs.fmt_operand(f, rhs.precedence() <= PREC_SUM || rhs.precedence() == PREC_UNARY)
            }
            Expr::Mul(lhs, rhs) if **lhs == Expr::Const(-1.0) => {
                write!(f, "-")?;
                rhs.fmt_operand(f, rhs.precedence() < PREC_POWER)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.fmt_operand(f, lhs.precedence() < PREC_PRODUCT)?;
                write!(f, " * ")?;
                rhs.fmt_operand(f, rhs.precedence() < PREC_PRODUCT || rhs.precedence() == PREC_UNARY)
            }
            Expr::Div(lhs, rhs) => {
                lhs.fmt_operand(f, lhs.precedence() < PREC_PRODUCT)?;
                write!(f, " / ")?;
                rhs.fmt_operand(f, rhs.precedence() <= PREC_PRODUCT || rhs.precedence() == PREC_UNARY)
            }
            Expr::Pow(base, exp) => {
                base.fmt_operand(f, base.precedence() <= PREC_POWER)?;
                write!(f, " ^ ")?;
                exp.fmt_operand(f, exp.precedence() < PREC_POWER)
            }
            func => match func.function_argument() {
                Some(arg) => write!(f, "{}({})", func.operation_name(), arg),
                None => Ok(()),
            },
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
