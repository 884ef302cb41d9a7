//! Type operators.

use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::types::{Arity, ExprValue, OperatorDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn type_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let val = evaluate(&expr[0], env)?;
    Ok(ExprValue::Json(Value::String(util::js_type(&val).to_string())))
}

fn bool_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let val = evaluate(&expr[0], env)?;
    Ok(util::is_truthy(&val).into())
}

fn len_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let n = match evaluate(&expr[0], env)? {
        ExprValue::Json(Value::String(s)) => s.chars().count(),
        ExprValue::Json(Value::Array(a)) => a.len(),
        ExprValue::Json(Value::Object(o)) => o.len(),
        _ => 0,
    };
    Ok(ExprValue::Json(Value::from(n)))
}

fn und_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    Ok((evaluate(&expr[0], env)? == ExprValue::Undefined).into())
}

fn is_type(expr: &[Node], env: &Env<'_>, name: &str) -> Result<ExprValue, ExprError> {
    let val = evaluate(&expr[0], env)?;
    Ok((util::js_type(&val) == name).into())
}

fn nil_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    is_type(expr, env, "null")
}

fn bool_q_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    is_type(expr, env, "boolean")
}

fn num_q_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    is_type(expr, env, "number")
}

fn str_q_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    is_type(expr, env, "string")
}

fn arr_q_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    is_type(expr, env, "array")
}

fn obj_q_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    is_type(expr, env, "object")
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "type",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: type_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "bool",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: bool_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "len",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: len_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "und?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: und_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "nil?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: nil_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "bool?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: bool_q_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "num?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: num_q_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "str?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: str_q_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "arr?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: arr_q_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "obj?",
            aliases: &[],
            arity: Arity::Fixed(1),
            eval_fn: obj_q_eval,
        }),
    ]
}
