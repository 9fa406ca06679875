//! LaTeX display strings. Expression, variable and bound texts are inserted as typed.

/// `\frac{d}{dx}(expr)`
pub fn derivative_input(variable: &str, expression: &str) -> String {
    format!("\\frac{{d}}{{d{}}}({})", variable, expression)
}

/// `\int_{a}^{b} expr \, dx`
pub fn definite_integral_input(lower: &str, upper: &str, expression: &str, variable: &str) -> String {
    format!(
        "\\int_{{{}}}^{{{}}} {} \\, d{}",
        lower, upper, expression, variable
    )
}

/// `\int expr \, dx`
pub fn indefinite_integral_input(expression: &str, variable: &str) -> String {
    format!("\\int {} \\, d{}", expression, variable)
}

/// `\lim_{x \to p} expr`
pub fn limit_input(variable: &str, point: &str, expression: &str) -> String {
    format!("\\lim_{{{} \\to {}}} {}", variable, point, expression)
}

/// Full display line `input = result`; `approximate` uses `\approx` instead of `=`.
pub fn display_line(input: &str, result: &str, approximate: bool) -> String {
    let relation = if approximate { "\\approx" } else { "=" };
    format!("{} {} {}", input, relation, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_inputs() {
        assert_eq!(derivative_input("x", "x^2"), r"\frac{d}{dx}(x^2)");
        assert_eq!(
            definite_integral_input("0", "pi", "sin(x)", "x"),
            r"\int_{0}^{pi} sin(x) \, dx"
        );
        assert_eq!(indefinite_integral_input("x^2", "t"), r"\int x^2 \, dt");
        assert_eq!(limit_input("x", "0", "1/x"), r"\lim_{x \to 0} 1/x");
    }

    #[test]
    fn test_display_line() {
        assert_eq!(display_line(r"\int x \, dx", "n/a", true), r"\int x \, dx \approx n/a");
        assert_eq!(display_line(r"\frac{d}{dx}(x)", "1", false), r"\frac{d}{dx}(x) = 1");
    }
}
