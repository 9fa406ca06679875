//! different utility modules used throughout the project
/// terminal and file logging set up for the calculator
pub mod logger;
