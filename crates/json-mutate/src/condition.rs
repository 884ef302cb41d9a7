//! Conditional gating of actions.
//!
//! The engine only sees compiled predicates through [`Predicate`]; how the
//! source text is parsed is up to the [`ConditionCompiler`]. The default,
//! [`ExpressionCompiler`], reads `json-expression` syntax:
//!
//! ```text
//! ["and", ["==", ["$", "/method"], "POST"], ["starts", ["$", "/path"], "/rpc"]]
//! ```

use crate::error::ConditionError;
use json_expression::Expression;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A compiled condition. Evaluation must not have side effects.
pub trait Predicate: Send + Sync + fmt::Debug {
    fn evaluate(&self, context: &Value) -> Result<bool, ConditionError>;
}

pub trait ConditionCompiler {
    fn compile(&self, source: &str) -> Result<Arc<dyn Predicate>, ConditionError>;
}

/// Compiles `when` sources as JSON expressions.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionCompiler;

impl ConditionCompiler for ExpressionCompiler {
    fn compile(&self, source: &str) -> Result<Arc<dyn Predicate>, ConditionError> {
        let expr = Expression::compile(source)?;
        Ok(Arc::new(ExpressionPredicate(expr)))
    }
}

#[derive(Debug)]
pub struct ExpressionPredicate(Expression);

impl Predicate for ExpressionPredicate {
    fn evaluate(&self, context: &Value) -> Result<bool, ConditionError> {
        Ok(self.0.test(context)?)
    }
}
