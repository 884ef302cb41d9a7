use thiserror::Error;

/// Failure reported by a condition collaborator, at compile or run time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ConditionError {
    message: String,
}

impl ConditionError {
    pub fn new(message: impl Into<String>) -> Self {
        ConditionError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<json_expression::ExprError> for ConditionError {
    fn from(e: json_expression::ExprError) -> Self {
        ConditionError::new(e.to_string())
    }
}

/// Setup-time validation failure of an action descriptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("unsupported action type: {0}")]
    UnsupportedType(String),

    #[error("{kind}: path required")]
    MissingPath { kind: &'static str },

    #[error("{kind} {path}: empty value")]
    MissingValue { kind: &'static str, path: String },

    #[error("{kind} {path}: invalid JSON value: {reason}")]
    InvalidValue {
        kind: &'static str,
        path: String,
        reason: String,
    },

    #[error("{kind} {path}: value must be an object")]
    NotAnObject { kind: &'static str, path: String },

    #[error("{kind} {path}: regex required")]
    MissingRegex { kind: &'static str, path: String },

    #[error("{kind} {path}: invalid regex: {reason}")]
    InvalidRegex {
        kind: &'static str,
        path: String,
        reason: String,
    },

    #[error("transform_array {path}: at least one replacement required")]
    MissingReplacements { path: String },

    #[error("merge_if_match {path}: target path required")]
    MissingTarget { path: String },

    #[error("when {path}: {source}")]
    InvalidCondition {
        path: String,
        #[source]
        source: ConditionError,
    },
}

/// A condition failed to evaluate; the remaining actions were not run.
///
/// `changed` reports whether actions before `index` already mutated the
/// document. Those mutations are kept.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("action #{index} ({kind} {path}): {source}")]
pub struct ApplyError {
    pub index: usize,
    pub kind: &'static str,
    pub path: String,
    pub changed: bool,
    #[source]
    pub source: ConditionError,
}
