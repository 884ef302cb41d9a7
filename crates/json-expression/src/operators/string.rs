//! String operators.

use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::types::{Arity, ExprValue, OperatorDefinition};
use crate::util;
use std::sync::Arc;

fn contains_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let outer = util::str_val(&evaluate(&expr[0], env)?);
    let inner = util::str_val(&evaluate(&expr[1], env)?);
    Ok(outer.contains(inner.as_str()).into())
}

fn starts_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let outer = util::str_val(&evaluate(&expr[0], env)?);
    let inner = util::str_val(&evaluate(&expr[1], env)?);
    Ok(outer.starts_with(inner.as_str()).into())
}

fn ends_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let outer = util::str_val(&evaluate(&expr[0], env)?);
    let inner = util::str_val(&evaluate(&expr[1], env)?);
    Ok(outer.ends_with(inner.as_str()).into())
}

fn matches_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let subject = util::str_val(&evaluate(&expr[0], env)?);
    match &expr[1] {
        Node::Pattern(re) => Ok(re.is_match(&subject).into()),
        _ => Err(ExprError::PatternNotLiteral),
    }
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "contains",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: contains_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "starts",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: starts_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "ends",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: ends_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "matches",
            aliases: &[],
            arity: Arity::Fixed(2),
            eval_fn: matches_eval,
        }),
    ]
}
