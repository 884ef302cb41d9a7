use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("invalid expression JSON: {0}")]
    Syntax(String),

    #[error("{0}")]
    ArityError(String),

    #[error("Unknown expression: {0}")]
    UnknownExpression(String),

    #[error("Invalid literal.")]
    InvalidLiteral,

    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("\"matches\" second argument should be a regular expression string.")]
    PatternNotLiteral,

    #[error("invalid JSON pointer {0:?}")]
    InvalidPointer(String),

    #[error("varname must be a string.")]
    VarnameMustBeString,

    #[error("NOT_FOUND")]
    NotFound,

    #[error("NOT_ARRAY")]
    NotArray,

    #[error("expression result is not a boolean: {0}")]
    NotBoolean(String),
}
