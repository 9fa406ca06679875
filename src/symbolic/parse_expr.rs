//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedCalculus::symbolic::parse_expr::parse_expression_func;
//! let parsed_expression = parse_expression_func("x^2 + 2*x + 1").unwrap();
//! assert_eq!(parsed_expression.to_string(), "x ^ 2 + 2 * x + 1");
//! ```
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{cut, map, opt, recognize},
    error::ErrorKind,
    multi::{fold_many0, many0},
    sequence::{delimited, pair, preceded, terminated},
};
use thiserror::Error;
//                  grammar, loosest binding first
//
//   expr     := term  (('+' | '-') term)*
//   term     := unary (('*' | '/') unary | implicit factor)*
//   unary    := ('-' | '+') unary | power
//   power    := atom ('^' exponent)?          right associative
//   exponent := ('-' | '+') exponent | power
//   atom     := number | function '(' expr ')' | identifier | '(' expr ')'
//
// implicit factor: an identifier or '(' glued to the previous factor, so "2x", "3(x+1)"
// and "(2)(3)" multiply the way calculators usually read them.

/// Error returned when a string cannot be turned into an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected input at position {position}: '{fragment}'")]
    Syntax { position: usize, fragment: String },
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq)]
enum SyntaxErrorKind {
    Nom(ErrorKind),
    UnknownFunction(String),
    InvalidNumber(String),
}

/// nom error carrying the remaining input plus what went wrong there
#[derive(Debug, Clone, PartialEq)]
struct SyntaxError<'a> {
    input: &'a str,
    kind: SyntaxErrorKind,
}

impl<'a> nom::error::ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        SyntaxError {
            input,
            kind: SyntaxErrorKind::Nom(kind),
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl SyntaxError<'_> {
    fn into_parse_error(self, full_input: &str) -> ParseError {
        match self.kind {
            SyntaxErrorKind::UnknownFunction(name) => ParseError::UnknownFunction(name),
            SyntaxErrorKind::InvalidNumber(text) => ParseError::InvalidNumber(text),
            SyntaxErrorKind::Nom(_) => syntax_error(full_input, self.input),
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

fn syntax_error(full_input: &str, rest: &str) -> ParseError {
    let consumed = full_input.len().saturating_sub(rest.len());
    let position = full_input[..consumed].chars().count();
    let fragment: String = rest.trim_start().chars().take(12).collect();
    ParseError::Syntax { position, fragment }
}

/// Parses an identifier (letters, digits and '_', not starting with a digit)
fn parse_identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// Parses a number literal: 2, 2.5, 2., .5, 1e-4, 2.5E+3
fn parse_number(input: &str) -> PResult<'_, Expr> {
    let mantissa = alt((
        map(pair(digit1, opt(pair(char('.'), digit0))), |_| ()),
        map(pair(char('.'), digit1), |_| ()),
    ));
    let exponent = opt(pair(one_of("eE"), pair(opt(one_of("+-")), digit1)));
    let (rest, _) = pair(mantissa, exponent).parse(input)?;
    // the literal is everything consumed, taken from the remaining length
    let text = &input[..input.len() - rest.len()];
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok((rest, Expr::Const(value))),
        _ => Err(nom::Err::Failure(SyntaxError {
            input,
            kind: SyntaxErrorKind::InvalidNumber(text.to_string()),
        })),
    }
}

/// maps a function name onto the node it builds; None for names the engine does not know
fn build_function(name: &str, arg: Expr) -> Option<Expr> {
    let arg = arg.boxed();
    let expr = match name {
        "exp" => Expr::Exp(arg),
        "ln" | "log" => Expr::Ln(arg),
        "log10" => Expr::Div(
            Box::new(Expr::Ln(arg)),
            Box::new(Expr::Ln(Box::new(Expr::Const(10.0)))),
        ),
        "sqrt" => Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "asin" | "arcsin" => Expr::arcsin(arg),
        "acos" | "arccos" => Expr::arccos(arg),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg),
        "acot" | "arccot" | "arcctg" => Expr::arcctg(arg),
        "abs" => Expr::abs(arg),
        _ => return None,
    };
    Some(expr)
}

fn parse_brackets(input: &str) -> PResult<'_, Expr> {
    delimited(
        char('('),
        cut(parse_expr),
        cut(preceded(multispace0, char(')'))),
    )
    .parse(input)
}

/// identifier followed by '(' is a function call, a bare identifier is a variable
fn parse_identifier_or_call(input: &str) -> PResult<'_, Expr> {
    let (rest, name) = parse_identifier(input)?;
    let call: PResult<'_, char> = preceded(multispace0, char('(')).parse(rest);
    if call.is_err() {
        return Ok((rest, Expr::Var(name.to_string())));
    }
    let (rest, arg) = preceded(multispace0, parse_brackets).parse(rest)?;
    match build_function(name, arg) {
        Some(expr) => Ok((rest, expr)),
        None => Err(nom::Err::Failure(SyntaxError {
            input,
            kind: SyntaxErrorKind::UnknownFunction(name.to_string()),
        })),
    }
}

fn parse_atom(input: &str) -> PResult<'_, Expr> {
    preceded(
        multispace0,
        alt((parse_number, parse_identifier_or_call, parse_brackets)),
    )
    .parse(input)
}

fn parse_exponent(input: &str) -> PResult<'_, Expr> {
    preceded(
        multispace0,
        alt((
            map(preceded(char('-'), parse_exponent), Expr::negate),
            preceded(char('+'), parse_exponent),
            parse_power,
        )),
    )
    .parse(input)
}

fn parse_power(input: &str) -> PResult<'_, Expr> {
    let (rest, base) = parse_atom(input)?;
    let caret: PResult<'_, char> = preceded(multispace0, char('^')).parse(rest);
    match caret {
        Ok((rest, _)) => {
            let (rest, exponent) = cut(parse_exponent).parse(rest)?;
            Ok((rest, base.pow(exponent)))
        }
        Err(_) => Ok((rest, base)),
    }
}

fn parse_unary(input: &str) -> PResult<'_, Expr> {
    preceded(
        multispace0,
        alt((
            map(preceded(char('-'), parse_unary), Expr::negate),
            preceded(char('+'), parse_unary),
            parse_power,
        )),
    )
    .parse(input)
}

/// factor glued to the previous one without an operator: "2x", "2sin(x)", "(1)(2)"
fn parse_implicit_factor(input: &str) -> PResult<'_, (char, Expr)> {
    match input.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '(' => {
            map(parse_power, |factor| ('*', factor)).parse(input)
        }
        _ => Err(nom::Err::Error(SyntaxError {
            input,
            kind: SyntaxErrorKind::Nom(ErrorKind::Verify),
        })),
    }
}

fn parse_term(input: &str) -> PResult<'_, Expr> {
    let (input, init) = parse_unary(input)?;
    fold_many0(
        alt((
            pair(
                preceded(multispace0, one_of("*/")),
                cut(parse_unary),
            ),
            parse_implicit_factor,
        )),
        move || init.clone(),
        |acc, (op, factor)| match op {
            '*' => acc * factor,
            _ => acc / factor,
        },
    )
    .parse(input)
}

fn parse_expr(input: &str) -> PResult<'_, Expr> {
    let (input, init) = parse_term(input)?;
    fold_many0(
        pair(preceded(multispace0, one_of("+-")), cut(parse_term)),
        move || init.clone(),
        |acc, (op, term)| match op {
            '+' => acc + term,
            _ => acc - term,
        },
    )
    .parse(input)
}

/// Parses a whole string into an expression; the entire input must be consumed.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    match terminated(parse_expr, multispace0).parse(input) {
        Ok(("", expr)) => Ok(expr),
        Ok((rest, _)) => Err(syntax_error(input, rest)),
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            Err(err.into_parse_error(input))
        }
        Err(nom::Err::Incomplete(_)) => Err(syntax_error(input, "")),
    }
}
