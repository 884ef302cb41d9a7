//! Logical operators. `&&` and `||` short-circuit and return the deciding
//! operand, not a coerced boolean.

use crate::compile::Node;
use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::types::{Arity, ExprValue, OperatorDefinition};
use crate::util;
use std::sync::Arc;

fn and_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let mut acc = evaluate(&expr[0], env)?;
    for e in &expr[1..] {
        if !util::is_truthy(&acc) {
            return Ok(acc);
        }
        acc = evaluate(e, env)?;
    }
    Ok(acc)
}

fn or_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let mut acc = evaluate(&expr[0], env)?;
    for e in &expr[1..] {
        if util::is_truthy(&acc) {
            return Ok(acc);
        }
        acc = evaluate(e, env)?;
    }
    Ok(acc)
}

fn not_eval(expr: &[Node], env: &Env<'_>) -> Result<ExprValue, ExprError> {
    let val = evaluate(&expr[0], env)?;
    Ok((!util::is_truthy(&val)).into())
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "&&",
            aliases: &["and"],
            arity: Arity::Variadic,
            eval_fn: and_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "||",
            aliases: &["or"],
            arity: Arity::Variadic,
            eval_fn: or_eval,
        }),
        Arc::new(OperatorDefinition {
            name: "!",
            aliases: &["not"],
            arity: Arity::Fixed(1),
            eval_fn: not_eval,
        }),
    ]
}
