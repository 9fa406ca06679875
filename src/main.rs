// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
use RustedCalculus::Utils::logger::init_logger;
use RustedCalculus::calculator::CalculatorMode;
use RustedCalculus::calculator::commands::{HELP_TEXT, Reply, SessionCommand, execute};
use RustedCalculus::calculator::config::{CalculatorConfig, parse_level};
use RustedCalculus::calculator::session::CalculatorSession;
use RustedCalculus::symbolic::symbolic_traits::SymbolicBackend;
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Calculus calculator: symbolic derivatives, definite integrals and limit estimates
#[derive(Parser, Debug)]
#[command(name = "rusted_calculus", version, about)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write the log to this file (overrides the config file)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Symbolic derivative of an expression
    Derivative(DerivativeArgs),
    /// Definite integral (trapezoidal rule); without bounds prints the indefinite-integral notice
    Integral(IntegralArgs),
    /// Numerical limit estimate at a point
    Limit(LimitArgs),
    /// Interactive session reading commands from stdin
    Session,
}

#[derive(Args, Debug)]
struct DerivativeArgs {
    /// Expression, e.g. "x^2 + sin(x)"
    #[arg(allow_hyphen_values = true)]
    expr: String,

    /// Variable (default from the config, normally x)
    #[arg(short = 'v', long)]
    variable: Option<String>,
}

#[derive(Args, Debug)]
struct IntegralArgs {
    /// Expression, e.g. "exp(-x^2)"
    #[arg(allow_hyphen_values = true)]
    expr: String,

    /// Variable (default from the config, normally x)
    #[arg(short = 'v', long)]
    variable: Option<String>,

    /// Lower bound; a constant expression such as -1 or pi/2
    #[arg(long, allow_hyphen_values = true)]
    lower: Option<String>,

    /// Upper bound; a constant expression such as 1 or 2*pi
    #[arg(long, allow_hyphen_values = true)]
    upper: Option<String>,
}

#[derive(Args, Debug)]
struct LimitArgs {
    /// Expression, e.g. "sin(x)/x"
    #[arg(allow_hyphen_values = true)]
    expr: String,

    /// Point the variable approaches
    #[arg(long, allow_hyphen_values = true)]
    point: String,

    /// Variable (default from the config, normally x)
    #[arg(short = 'v', long)]
    variable: Option<String>,
}

fn load_config(cli: &Cli) -> Result<CalculatorConfig, String> {
    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::from_file(path).map_err(|err| err.to_string())?,
        None => CalculatorConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level =
            parse_level(level).ok_or_else(|| format!("Unknown log level '{}'", level))?;
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    Ok(config)
}

fn run_once(session: &mut CalculatorSession) -> ExitCode {
    match session.calculate() {
        Ok(outcome) => {
            println!("{}", outcome.result);
            println!("{}", outcome.latex);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run_session(session: &mut CalculatorSession) -> ExitCode {
    println!("{}", HELP_TEXT);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("[{}]> ", session.mode());
        if let Err(err) = stdout.flush() {
            error!("cannot write to stdout: {}", err);
            return ExitCode::FAILURE;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                error!("cannot read from stdin: {}", err);
                return ExitCode::FAILURE;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<SessionCommand>() {
            Ok(command) => match execute(session, command) {
                Reply::Silent => {}
                Reply::Text(text) => println!("{}", text),
                Reply::Quit => break,
            },
            Err(err) => println!("{}", err),
        }
    }
    info!("session finished with {} calculations", session.history().len());
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logger(config.log_level, config.log_file.as_deref()) {
        eprintln!("Cannot create log file: {}", err);
        return ExitCode::FAILURE;
    }

    let mut session = CalculatorSession::new(config, SymbolicBackend);
    match cli.command {
        Command::Derivative(args) => {
            session.select_mode(CalculatorMode::Derivative);
            let form = session.form_mut();
            form.expression = args.expr;
            if let Some(variable) = args.variable {
                form.variable = variable;
            }
            run_once(&mut session)
        }
        Command::Integral(args) => {
            session.select_mode(CalculatorMode::Integral);
            let form = session.form_mut();
            form.expression = args.expr;
            form.lower = args.lower.unwrap_or_default();
            form.upper = args.upper.unwrap_or_default();
            if let Some(variable) = args.variable {
                form.variable = variable;
            }
            run_once(&mut session)
        }
        Command::Limit(args) => {
            session.select_mode(CalculatorMode::Limit);
            let form = session.form_mut();
            form.expression = args.expr;
            form.limit_point = args.point;
            if let Some(variable) = args.variable {
                form.variable = variable;
            }
            run_once(&mut session)
        }
        Command::Session => run_session(&mut session),
    }
}
