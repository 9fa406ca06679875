/*
Line commands of the interactive session and their pretty printed replies.
*/
use crate::calculator::CalculatorMode;
use crate::calculator::session::{CalculationRecord, CalculatorSession};
use crate::symbolic::symbolic_traits::CalculusBackend;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
commands:
  mode <derivative|integral|limit>   switch the operation
  expr <expression>                  set the expression, e.g. expr x^2 + sin(x)
  var <name>                         set the variable (default x)
  lower <value> | upper <value>      integral bounds, leave both empty for an indefinite integral
  point <value>                      limit point
  calc                               calculate
  clear                              reset the fields, the history is kept
  history                            show the calculation history
  show                               show the current fields
  help                               this text
  quit                               leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Mode(CalculatorMode),
    Expression(String),
    Variable(String),
    Lower(String),
    Upper(String),
    Point(String),
    Calculate,
    Clear,
    History,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Empty command, type 'help' for the list of commands")]
    Empty,
    #[error("Unknown command '{0}', type 'help' for the list of commands")]
    Unknown(String),
    #[error("Unknown mode '{0}', expected one of: {1}")]
    UnknownMode(String, String),
}

impl FromStr for SessionCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim().to_string()),
            None => (line, String::new()),
        };
        let command = match name.to_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "mode" => {
                let mode = CalculatorMode::from_str(&argument.to_lowercase()).map_err(|_| {
                    let modes: Vec<String> = CalculatorMode::iter().map(|m| m.to_string()).collect();
                    CommandError::UnknownMode(argument.clone(), modes.join(", "))
                })?;
                SessionCommand::Mode(mode)
            }
            "expr" => SessionCommand::Expression(argument),
            "var" => SessionCommand::Variable(argument),
            "lower" => SessionCommand::Lower(argument),
            "upper" => SessionCommand::Upper(argument),
            "point" => SessionCommand::Point(argument),
            "calc" => SessionCommand::Calculate,
            "clear" => SessionCommand::Clear,
            "history" => SessionCommand::History,
            "show" => SessionCommand::Show,
            "help" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// What the front end should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// nothing to print
    Silent,
    Text(String),
    Quit,
}

#[derive(Tabled)]
struct FormField {
    field: &'static str,
    value: String,
}

/// Renders the calculation history as a table.
pub fn render_history(records: &[CalculationRecord]) -> String {
    if records.is_empty() {
        return "History is empty".to_string();
    }
    let mut table = Table::new(records);
    table.with(Style::modern_rounded());
    table.to_string()
}

fn render_form<B: CalculusBackend>(session: &CalculatorSession<B>) -> String {
    let form = session.form();
    let fields = vec![
        FormField { field: "mode", value: form.mode.to_string() },
        FormField { field: "expression", value: form.expression.clone() },
        FormField { field: "variable", value: form.variable.clone() },
        FormField { field: "lower bound", value: form.lower.clone() },
        FormField { field: "upper bound", value: form.upper.clone() },
        FormField { field: "limit point", value: form.limit_point.clone() },
    ];
    let mut table = Table::new(&fields);
    table.with(Style::modern_rounded());
    table.to_string()
}

/// Applies one command to the session.
pub fn execute<B: CalculusBackend>(session: &mut CalculatorSession<B>, command: SessionCommand) -> Reply {
    match command {
        SessionCommand::Mode(mode) => {
            session.select_mode(mode);
            Reply::Text(format!("mode: {}", mode))
        }
        SessionCommand::Expression(text) => {
            session.form_mut().expression = text;
            Reply::Silent
        }
        SessionCommand::Variable(text) => {
            session.form_mut().variable = text;
            Reply::Silent
        }
        SessionCommand::Lower(text) => {
            session.form_mut().lower = text;
            Reply::Silent
        }
        SessionCommand::Upper(text) => {
            session.form_mut().upper = text;
            Reply::Silent
        }
        SessionCommand::Point(text) => {
            session.form_mut().limit_point = text;
            Reply::Silent
        }
        SessionCommand::Calculate => match session.calculate() {
            Ok(outcome) => Reply::Text(format!("{}\n{}", outcome.result, outcome.latex)),
            Err(err) => Reply::Text(format!("Error: {}", err.user_message())),
        },
        SessionCommand::Clear => {
            session.clear();
            Reply::Text("fields cleared".to_string())
        }
        SessionCommand::History => Reply::Text(render_history(session.history())),
        SessionCommand::Show => Reply::Text(render_form(session)),
        SessionCommand::Help => Reply::Text(HELP_TEXT.to_string()),
        SessionCommand::Quit => Reply::Quit,
    }
}
