//! Arithmetic pipeline behind the expression buffer
//!
//! Text flows through [`sanitize`] (symbol normalisation and the character
//! allow-list), [`parser`] (tokens and AST), [`evaluator`] (IEEE-754 `f64`
//! evaluation) and finally [`format`] (the text written back into the buffer).

pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;
pub mod sanitize;

pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Everything that can go wrong while turning an expression into a number.
///
/// The engine shows all of these the same way (the error marker) and then
/// resets; the variants exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Nothing left to evaluate
    #[error("Empty expression")]
    EmptyExpression,
    /// A character outside the allow-list
    #[error("Disallowed character: '{0}'")]
    DisallowedCharacter(char),
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Result is infinite or NaN
    #[error("Non-finite result: {0}")]
    NonFinite(f64),
}

impl CalcError {
    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}
