//! Array operators.

use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::types::{Arity, ExprValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn in_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let arr = evaluate(&expr[0], env)?;
    let what = evaluate(&expr[1], env)?;
    let items = match &arr {
        ExprValue::Json(Value::Array(items)) => items,
        _ => return Err(ExprError::NotArray),
    };
    let found = match &what {
        ExprValue::Json(v) => items.iter().any(|item| util::deep_equal(item, v)),
        ExprValue::Undefined => false,
    };
    Ok(found.into())
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![Arc::new(OperatorDefinition {
        name: "in",
        aliases: &[],
        arity: Arity::Fixed(2),
        eval_fn: in_eval,
    })]
}
