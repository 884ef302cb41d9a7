//! Comparison operators.

use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::types::{Arity, ExprValue, OperatorDefinition};
use crate::util;
use std::cmp::Ordering;
use std::sync::Arc;

fn operands(expr: &[Node], env: &Env<'_>) -> Result<(ExprValue, ExprValue), ExprError> {
    Ok((evaluate(&expr[0], env)?, evaluate(&expr[1], env)?))
}

fn eq_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let (left, right) = operands(expr, env)?;
    Ok(util::equal(&left, &right).into())
}

fn ne_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let (left, right) = operands(expr, env)?;
    Ok((!util::equal(&left, &right)).into())
}

fn gt_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let (left, right) = operands(expr, env)?;
    Ok((util::cmp(&left, &right) == Some(Ordering::Greater)).into())
}

fn ge_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let (left, right) = operands(expr, env)?;
    Ok(matches!(util::cmp(&left, &right), Some(Ordering::Greater | Ordering::Equal)).into())
}

fn lt_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let (left, right) = operands(expr, env)?;
    Ok((util::cmp(&left, &right) == Some(Ordering::Less)).into())
}

fn le_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let (left, right) = operands(expr, env)?;
    Ok(matches!(util::cmp(&left, &right), Some(Ordering::Less | Ordering::Equal)).into())
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "==",
            aliases: &["eq"],
            arity: Arity::Fixed(2),
            eval_fn: eq_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "!=",
            aliases: &["ne"],
            arity: Arity::Fixed(2),
            eval_fn: ne_eval,
        }),
        Arc::new(OperatorDefinition {
            name: ">",
            aliases: &["gt"],
            arity: Arity::Fixed(2),
            eval_fn: gt_eval,
        }),
        Arc::new(OperatorDefinition {
            name: ">=",
            aliases: &["ge"],
            arity: Arity::Fixed(2),
            eval_fn: ge_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "<",
            aliases: &["lt"],
            arity: Arity::Fixed(2),
            eval_fn: lt_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "<=",
            aliases: &["le"],
            arity: Arity::Fixed(2),
            eval_fn: le_eval,
        }),
    ]
}
