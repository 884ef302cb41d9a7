use crate::compile::Node;
use crate::error::ExprError;
use crate::types::ExprValue;
use serde_json::Value;

/// Evaluation environment. `context` is the value `$` pointers read from.
pub struct Env<'a> {
    pub context: &'a Value,
}

/// Evaluates a compiled node.
pub fn evaluate(node: &Node, env: &Env<'_>) -> Result<ExprValue, ExprError> {
    match node {
        Node::Literal(v) => Ok(ExprValue::Json(v.clone())),
        Node::Pattern(re) => Ok(ExprValue::Json(Value::String(re.as_str().to_string()))),
        Node::Call { op, operands } => (op.eval_fn)(operands, env),
    }
}
