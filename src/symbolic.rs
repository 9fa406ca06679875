#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedCalculus::symbolic::parse_expr::parse_expression_func;
/// let parsed_expression = parse_expression_func("x^2.3 * ln(x + y)").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) keeps the expression tree
/// 2) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) + ln(y)";
/// // here you've got symbolic expression
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// // return vec of all arguments
/// let all = parsed_expression.all_arguments_are_variables();
/// assert_eq!(all, vec!["x", "y"]);
/// // differentiate with respect to x and y
/// let df_dx = parsed_expression.diff("x").simplify();
/// let df_dy = parsed_expression.diff("y").simplify();
/// assert_eq!(df_dx.to_string(), "exp(x)");
/// assert_eq!(df_dy.to_string(), "1 / y");
/// // evaluate once every variable is bound
/// let value = parsed_expression.set_variable("y", 1.0).eval_at("x", 0.0).unwrap();
/// assert_eq!(value, 1.0);
/// ```
pub mod symbolic_engine;
/// differentiation, checked evaluation and parsing entry point
pub mod symbolic_engine_derivatives;
/// algebraic simplification
pub mod symbolic_simplify;
/// traits through which the calculator uses a symbolic engine
///# Example#
/// ```
/// use RustedCalculus::symbolic::symbolic_traits::{Differentiator, Evaluator, SymbolicBackend};
/// let backend = SymbolicBackend;
/// assert_eq!(backend.differentiate("x^3", "x").unwrap(), "3 * x ^ 2");
/// assert_eq!(backend.evaluate("(2)^3 - 1").unwrap(), 7.0);
/// ```
pub mod symbolic_traits;
