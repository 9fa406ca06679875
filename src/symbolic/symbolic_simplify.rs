//! # Symbolic Expression Simplification Module
//!
//! Algebraic simplification applied to derivatives before they are shown to the user.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: arithmetic on numerical constants is evaluated; functions of
//!    constants are folded only when the result is a whole number (`sin(0)`, `ln(1)`), so
//!    `sin(1)` or `2 ^ 0.5` stay readable
//! 2. **Algebraic Identities**: `x + 0`, `x * 1`, `0 * x`, `x ^ 1`, `x ^ 0`, `x / 1`, `x - x`
//! 3. **Sign Normalisation**: `x + (-y)` becomes `x - y`, double negation cancels
//! 4. **Coefficients and Powers**: constants move to the left of a product and merge,
//!    `x * x ^ n` becomes `x ^ (n + 1)`
//!
//! A single bottom-up pass (`simplify_`) can expose new opportunities higher in the tree,
//! so `simplify` repeats it until the expression stops changing.

use crate::symbolic::symbolic_engine::Expr;

const MAX_SIMPLIFY_PASSES: usize = 32;

fn is_const(expr: &Expr, value: f64) -> bool {
    matches!(expr, Expr::Const(val) if *val == value)
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// `(-1) * x` or a negative constant, returned as its positive counterpart
fn negated_operand(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Const(val) if *val < 0.0 => Some(Expr::Const(-val)),
        Expr::Mul(lhs, rhs) if is_const(lhs, -1.0) => Some(*rhs.clone()),
        _ => None,
    }
}

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// One bottom-up simplification pass.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b), // (a) + (b) = (a + b)
                    _ if lhs.is_zero() => rhs,                               // 0 + x = x
                    _ if rhs.is_zero() => lhs,                               // x + 0 = x
                    _ if lhs == rhs => Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(lhs)),
                    _ => match negated_operand(&rhs) {
                        // x + (-y) = x - y
                        Some(positive) => Expr::Sub(Box::new(lhs), Box::new(positive)),
                        None => Expr::Add(Box::new(lhs), Box::new(rhs)),
                    },
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b), // (a) - (b) = (a - b)
                    _ if rhs.is_zero() => lhs,                               // x - 0 = x
                    _ if lhs.is_zero() => rhs.negate(),                      // 0 - x = -x
                    _ if lhs == rhs => Expr::Const(0.0),                     // x - x = 0
                    _ => match negated_operand(&rhs) {
                        // x - (-y) = x + y
                        Some(positive) => Expr::Add(Box::new(lhs), Box::new(positive)),
                        None => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                    },
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                Self::simplify_product(lhs, rhs)
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    _ if is_const(&rhs, 1.0) => lhs,                  // x / 1 = x
                    _ if is_const(&rhs, -1.0) => lhs.negate(),        // x / (-1) = -x
                    _ if lhs.is_zero() && !rhs.is_zero() => Expr::Const(0.0), // 0 / x = 0
                    _ if lhs == rhs && !rhs.is_zero() => Expr::Const(1.0),    // x / x = 1
                    // (c * x) / d = (c / d) * x
                    (Expr::Mul(coeff, rest), Expr::Const(d)) if *d != 0.0 => match coeff.as_ref() {
                        Expr::Const(c) => Expr::Mul(Box::new(Expr::Const(c / d)), rest.clone()),
                        _ => Expr::Div(Box::new(lhs.clone()), Box::new(rhs.clone())),
                    },
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) if is_whole(*b) && a.powf(*b).is_finite() => {
                        Expr::Const(a.powf(*b))
                    }
                    _ if exp.is_zero() => Expr::Const(1.0),   // x ^ 0 = 1
                    _ if is_const(&exp, 1.0) => base,         // x ^ 1 = x
                    _ if is_const(&base, 1.0) => Expr::Const(1.0), // 1 ^ x = 1
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            func => match func.function_argument() {
                Some(arg) => {
                    let arg = arg.simplify_();
                    match (func, &arg) {
                        (Expr::Ln(_), Expr::Var(name)) if name == "e" => Expr::Const(1.0),
                        (Expr::Ln(_), Expr::Exp(inner)) => *inner.clone(),
                        _ => {
                            let rebuilt = func.with_argument(arg);
                            if matches!(rebuilt.function_argument(), Some(Expr::Const(_))) {
                                if let Ok(value) = rebuilt.eval_checked() {
                                    if is_whole(value) {
                                        return Expr::Const(value);
                                    }
                                }
                            }
                            rebuilt
                        }
                    }
                }
                None => func.clone(),
            },
        }
    }

    fn simplify_product(lhs: Expr, rhs: Expr) -> Expr {
        match (&lhs, &rhs) {
            (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b), // (a) * (b) = (a * b)
            _ if lhs.is_zero() || rhs.is_zero() => Expr::Const(0.0), // 0 * x = 0
            _ if is_const(&lhs, 1.0) => rhs,                          // 1 * x = x
            _ if is_const(&rhs, 1.0) => lhs,                          // x * 1 = x
            // x * c = c * x
            (_, Expr::Const(_)) => Expr::Mul(Box::new(rhs), Box::new(lhs)),
            // a * (b * x) = (a * b) * x
            (Expr::Const(a), Expr::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_ref() {
                Expr::Const(b) => Expr::Mul(Box::new(Expr::Const(a * b)), inner_rhs.clone()),
                _ => Expr::Mul(Box::new(lhs.clone()), Box::new(rhs.clone())),
            },
            // (c * x) * y = c * (x * y)
            (Expr::Mul(inner_lhs, inner_rhs), _) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                Expr::Mul(
                    inner_lhs.clone(),
                    Box::new(Expr::Mul(inner_rhs.clone(), Box::new(rhs))),
                )
            }
            // x * (c * y) = c * (x * y)
            (_, Expr::Mul(inner_lhs, inner_rhs)) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
                Expr::Mul(
                    inner_lhs.clone(),
                    Box::new(Expr::Mul(Box::new(lhs), inner_rhs.clone())),
                )
            }
            // Power rules: x^a * x^b = x^(a+b)
            (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => Expr::Pow(
                base1.clone(),
                Box::new(Expr::Add(exp1.clone(), exp2.clone())),
            ),
            (_, Expr::Pow(base, exp)) if **base == lhs => Expr::Pow(
                base.clone(),
                Box::new(Expr::Add(exp.clone(), Box::new(Expr::Const(1.0)))),
            ),
            (Expr::Pow(base, exp), _) if **base == rhs => Expr::Pow(
                base.clone(),
                Box::new(Expr::Add(exp.clone(), Box::new(Expr::Const(1.0)))),
            ),
            _ if lhs == rhs => Expr::Pow(Box::new(lhs), Box::new(Expr::Const(2.0))), // x * x = x^2
            _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Simplifies the expression, repeating single passes until nothing changes.
    ///
    /// # Examples
    /// ```
    /// use RustedCalculus::symbolic::symbolic_engine::Expr;
    /// let derivative = Expr::parse_expression("x^2").unwrap().diff("x").simplify();
    /// assert_eq!(derivative.to_string(), "2 * x");
    /// ```
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        for _ in 0..MAX_SIMPLIFY_PASSES {
            let next = current.simplify_();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}
