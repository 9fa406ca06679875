//! Splices a numeric value into an expression string in place of a variable.
//!
//! Two modes are available. `Identifier` (the default) tokenizes the text and replaces only
//! identifier tokens equal to the variable, so `exp(x)` survives a variable called `e` and
//! number literals such as `2e3` are never touched. `Legacy` replaces every literal
//! occurrence of the variable, substrings of other names included; it matches the
//! plain `str::replace` behaviour and exists for comparison runs.

use regex::{Captures, Regex};
use serde::Deserialize;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

// number literals are matched first so the exponent marker of 1e-5 is not an identifier
const TOKEN_PATTERN: &str = r"(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|[A-Za-z_][A-Za-z0-9_]*";
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"));
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is a valid regex"));

/// How a variable is located in the expression text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    /// whole identifier tokens only
    #[default]
    Identifier,
    /// every literal occurrence, substrings of other names included
    Legacy,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstitutionError {
    #[error("Variable name is empty")]
    EmptyVariable,
    #[error("'{0}' is not a valid variable name")]
    InvalidVariable(String),
}

/// Replaces `variable` in `expression` with `(<value>)`.
///
/// The value is written in the shortest form that reads back as the same f64, wrapped in
/// brackets so a negative sample cannot merge with a neighbouring operator: `x^2` at `-2`
/// becomes `(-2)^2`. Nothing is evaluated.
pub fn substitute(
    expression: &str,
    variable: &str,
    value: f64,
    mode: SubstitutionMode,
) -> Result<String, SubstitutionError> {
    let variable = variable.trim();
    if variable.is_empty() {
        return Err(SubstitutionError::EmptyVariable);
    }
    let replacement = format!("({})", value);
    match mode {
        SubstitutionMode::Legacy => Ok(expression.replace(variable, &replacement)),
        SubstitutionMode::Identifier => {
            if !IDENTIFIER.is_match(variable) {
                return Err(SubstitutionError::InvalidVariable(variable.to_string()));
            }
            let substituted = TOKEN.replace_all(expression, |caps: &Captures| {
                let token = &caps[0];
                if token == variable {
                    replacement.clone()
                } else {
                    token.to_string()
                }
            });
            Ok(substituted.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_token_patterns() {
        let tokens: Vec<&str> = TOKEN.find_iter("2.5e-3*x_1+exp(.5)").map(|m| m.as_str()).collect();
        assert_eq!(tokens, vec!["2.5e-3", "x_1", "exp", ".5"]);
        assert!(IDENTIFIER.is_match("t0"));
        assert!(!IDENTIFIER.is_match("0t"));
    }

    #[test]
    fn test_substitute_every_occurrence() {
        let result = substitute("x^2+x", "x", 3.0, SubstitutionMode::Identifier).unwrap();
        assert_eq!(result, "(3)^2+(3)");
        let result = substitute("x^2+x", "x", 3.0, SubstitutionMode::Legacy).unwrap();
        assert_eq!(result, "(3)^2+(3)");
    }

    #[test]
    fn test_substitute_negative_and_fractional_values() {
        let result = substitute("1/x", "x", -0.0001, SubstitutionMode::Identifier).unwrap();
        assert_eq!(result, "1/(-0.0001)");
        let result = substitute("x*x", "x", 0.25, SubstitutionMode::Identifier).unwrap();
        assert_eq!(result, "(0.25)*(0.25)");
    }

    #[test]
    fn test_identifier_mode_keeps_other_names_intact() {
        let result = substitute("exp(e) + 2e3", "e", 1.0, SubstitutionMode::Identifier).unwrap();
        assert_eq!(result, "exp((1)) + 2e3");
        let result = substitute("x_1 + x + max", "x", 5.0, SubstitutionMode::Identifier).unwrap();
        assert_eq!(result, "x_1 + (5) + max");
        let result = substitute("2t + sin(t)", " t ", 0.5, SubstitutionMode::Identifier).unwrap();
        assert_eq!(result, "2(0.5) + sin((0.5))");
    }

    #[test]
    fn test_legacy_mode_replaces_substrings() {
        let result = substitute("exp(x)", "e", 1.0, SubstitutionMode::Legacy).unwrap();
        assert_eq!(result, "(1)xp(x)");
        // the variable is a literal, not a pattern
        let result = substitute("x+1", "x+", 2.0, SubstitutionMode::Legacy).unwrap();
        assert_eq!(result, "(2)1");
    }

    #[test]
    fn test_substitute_rejects_bad_variables() {
        for mode in SubstitutionMode::iter() {
            assert_eq!(
                substitute("x", "  ", 1.0, mode),
                Err(SubstitutionError::EmptyVariable)
            );
        }
        assert_eq!(
            substitute("x", "2x", 1.0, SubstitutionMode::Identifier),
            Err(SubstitutionError::InvalidVariable("2x".to_string()))
        );
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(SubstitutionMode::from_str("legacy"), Ok(SubstitutionMode::Legacy));
        assert_eq!(SubstitutionMode::Identifier.to_string(), "identifier");
        assert!(SubstitutionMode::from_str("regex").is_err());
    }
}
