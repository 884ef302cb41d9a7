//! Ahead-of-time validation of expressions.
//!
//! Compiling walks the whole expression once: every operator name is looked
//! up, every arity checked and every `matches` pattern turned into a
//! [`Regex`]. Evaluation of a compiled [`Node`] tree never fails for
//! structural reasons, only for data-dependent ones (missing input, wrong
//! result type).

use crate::error::ExprError;
use crate::evaluate::{evaluate, Env};
use crate::operators::operators_map;
use crate::types::{assert_arity, ExprValue, OperatorDefinition, OperatorMap};
use crate::util;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// A compiled expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    Literal(Value),
    Pattern(Regex),
    Call {
        op: Arc<OperatorDefinition>,
        operands: Vec<Node>,
    },
}

/// Compiles an expression value against an operator map.
///
/// - Non-array values are literals.
/// - `[]` is the empty-array literal and `[x]` wraps the literal `x`.
/// - `[operator, ...operands]` is an operator call.
pub fn compile(expr: &Value, operators: &OperatorMap) -> Result<Node, ExprError> {
    let arr = match expr {
        Value::Array(arr) => arr,
        other => return Ok(Node::Literal(other.clone())),
    };
    match arr.len() {
        0 => return Ok(Node::Literal(Value::Array(vec![]))),
        1 => return Ok(Node::Literal(arr[0].clone())),
        _ => {}
    }

    let op = match &arr[0] {
        Value::String(name) => operators.get(name.as_str()).cloned(),
        _ => None,
    }
    .ok_or_else(|| ExprError::UnknownExpression(expr.to_string()))?;

    let operands = &arr[1..];
    assert_arity(op.name, &op.arity, operands.len())?;

    let compiled = if op.name == "matches" {
        let pattern = match util::as_literal(&operands[1]) {
            Ok(Value::String(s)) => s,
            _ => return Err(ExprError::PatternNotLiteral),
        };
        let regex = Regex::new(pattern).map_err(|e| ExprError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        vec![compile(&operands[0], operators)?, Node::Pattern(regex)]
    } else {
        operands
            .iter()
            .map(|operand| compile(operand, operators))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Node::Call {
        op,
        operands: compiled,
    })
}

/// A compiled, reusable predicate expression.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// Parses JSON source text and compiles it with the built-in operators.
    pub fn compile(source: &str) -> Result<Self, ExprError> {
        let expr: Value =
            serde_json::from_str(source).map_err(|e| ExprError::Syntax(e.to_string()))?;
        let root = compile(&expr, operators_map())?;
        Ok(Expression {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the expression against `context`.
    pub fn evaluate(&self, context: &Value) -> Result<ExprValue, ExprError> {
        evaluate(&self.root, &Env { context })
    }

    /// Evaluates the expression and requires a boolean result.
    pub fn test(&self, context: &Value) -> Result<bool, ExprError> {
        match self.evaluate(context)? {
            ExprValue::Json(Value::Bool(b)) => Ok(b),
            ExprValue::Json(other) => Err(ExprError::NotBoolean(other.to_string())),
            ExprValue::Undefined => Err(ExprError::NotBoolean("undefined".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_forms() {
        let ops = operators_map();
        assert!(matches!(compile(&json!(5), ops), Ok(Node::Literal(v)) if v == json!(5)));
        assert!(matches!(compile(&json!([]), ops), Ok(Node::Literal(v)) if v == json!([])));
        assert!(matches!(
            compile(&json!([["a", "b"]]), ops),
            Ok(Node::Literal(v)) if v == json!(["a", "b"])
        ));
    }

    #[test]
    fn unknown_operator_is_rejected_up_front() {
        let err = Expression::compile(r#"["&&", true, ["nope", 1, 2]]"#).unwrap_err();
        assert!(matches!(err, ExprError::UnknownExpression(_)));
    }

    #[test]
    fn nested_arity_is_checked_up_front() {
        let err = Expression::compile(r#"["!", ["==", 1]]"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"==\" operator expects 2 operands."
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Expression::compile(r#"["matches", "x", "("]"#).unwrap_err();
        assert!(matches!(err, ExprError::InvalidPattern { .. }));
        let err = Expression::compile(r#"["matches", "x", ["$", "/p"]]"#).unwrap_err();
        assert_eq!(err, ExprError::PatternNotLiteral);
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            Expression::compile("[\"==\", 1"),
            Err(ExprError::Syntax(_))
        ));
    }

    #[test]
    fn test_requires_boolean() {
        let expr = Expression::compile(r#"["$", "/n"]"#).unwrap();
        assert_eq!(
            expr.test(&json!({"n": 3})),
            Err(ExprError::NotBoolean("3".to_string()))
        );
    }
}
