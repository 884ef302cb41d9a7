use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::Env;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A value produced while evaluating an expression.
///
/// `Undefined` stands for "nothing there", e.g. a pointer into the context
/// that does not resolve. It has no JSON equivalent.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprValue {
    Undefined,
    Json(Value),
}

impl ExprValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ExprValue::Json(v) => Some(v),
            ExprValue::Undefined => None,
        }
    }
}

impl From<Value> for ExprValue {
    fn from(v: Value) -> Self {
        ExprValue::Json(v)
    }
}

impl From<bool> for ExprValue {
    fn from(b: bool) -> Self {
        ExprValue::Json(Value::Bool(b))
    }
}

/// Operator arity.
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Exactly `n` operands.
    Fixed(usize),
    /// At least two operands.
    Variadic,
    /// Between `min` and `max` operands.
    Range(usize, usize),
}

/// Evaluation function of an operator. Receives the compiled operands.
pub type EvalFn = fn(&[Node], &Env<'_>) -> Result<ExprValue, ExprError>;

pub struct OperatorDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub eval_fn: EvalFn,
}

impl std::fmt::Debug for OperatorDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Map of operator name/alias -> definition.
pub type OperatorMap = HashMap<&'static str, Arc<OperatorDefinition>>;

/// Checks the operand count of an expression against the operator's arity.
pub fn assert_arity(operator: &str, arity: &Arity, operands: usize) -> Result<(), ExprError> {
    match arity {
        Arity::Fixed(n) if operands != *n => Err(ExprError::ArityError(format!(
            "\"{}\" operator expects {} operands.",
            operator, n
        ))),
        Arity::Variadic if operands < 2 => Err(ExprError::ArityError(format!(
            "\"{}\" operator expects at least two operands.",
            operator
        ))),
        Arity::Range(min, _) if operands < *min => Err(ExprError::ArityError(format!(
            "\"{}\" operator expects at least {} operands.",
            operator, min
        ))),
        Arity::Range(_, max) if operands > *max => Err(ExprError::ArityError(format!(
            "\"{}\" operator expects at most {} operands.",
            operator, max
        ))),
        _ => Ok(()),
    }
}

pub fn operators_to_map(operators: Vec<Arc<OperatorDefinition>>) -> OperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        map.insert(op.name, Arc::clone(&op));
        for alias in op.aliases {
            map.insert(*alias, Arc::clone(&op));
        }
    }
    map
}
