//! Error types for formula evaluation.

use thiserror::Error;

/// Faults raised while parsing or evaluating a formula.
///
/// These never escape a cell: [`Grid::evaluated_value`](crate::engine::Grid::evaluated_value)
/// turns them into the cell's `error` flag plus a displayed message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("malformed reference '{0}'")]
    MalformedReference(String),

    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("procedure '{0}' not found")]
    UnknownProcedure(String),

    #[error("'{0}' is not a number")]
    InvalidNumericArgument(String),

    #[error("cyclic reference to {0}")]
    CyclicReference(String),

    #[error("reference chain deeper than {0} cells")]
    ReferenceDepthExceeded(usize),

    #[error("formula nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

impl FormulaError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        FormulaError::SyntaxError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, FormulaError>;
