//! Context access operators.

use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::types::{Arity, ExprValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn resolve(env: &Env<'_>, pointer: &ExprValue) -> Result<ExprValue, ExprError> {
    let pointer = match pointer {
        ExprValue::Json(Value::String(s)) => s.as_str(),
        _ => return Err(ExprError::VarnameMustBeString),
    };
    Ok(util::get_pointer(env.context, pointer)?
        .map(|v| ExprValue::Json(v.clone()))
        .unwrap_or(ExprValue::Undefined))
}

fn get_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let pointer = evaluate(&expr[0], env)?;
    let default = match expr.get(1) {
        Some(node) => Some(evaluate(node, env)?),
        None => None,
    };
    util::throw_on_undef(resolve(env, &pointer)?, default)
}

fn defined_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let pointer = evaluate(&expr[0], env)?;
    Ok((resolve(env, &pointer)? != ExprValue::Undefined).into())
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "$",
            aliases: &["get"],
            arity: Arity::Range(1, 2),
            eval_fn: get_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "$?",
            aliases: &["get?"],
            arity: Arity::Fixed(1),
            eval_fn: defined_eval,
        }),
    ]
}
