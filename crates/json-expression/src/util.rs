//! Value helpers shared by the operators.

use crate::error::ExprError;
use crate::types::ExprValue;
use serde_json::Value;
use std::cmp::Ordering;

/// Returns `value` unless it is undefined, then the default, else `NOT_FOUND`.
pub fn throw_on_undef(value: ExprValue, def: Option<ExprValue>) -> Result<ExprValue, ExprError> {
    if value != ExprValue::Undefined {
        return Ok(value);
    }
    match def {
        Some(d) if d != ExprValue::Undefined => Ok(d),
        _ => Err(ExprError::NotFound),
    }
}

pub fn js_type(value: &ExprValue) -> &'static str {
    match value {
        ExprValue::Undefined => "undefined",
        ExprValue::Json(v) => match v {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        },
    }
}

pub fn str_val(value: &ExprValue) -> String {
    match value {
        ExprValue::Undefined => "undefined".to_string(),
        ExprValue::Json(Value::String(s)) => s.clone(),
        ExprValue::Json(v) => v.to_string(),
    }
}

pub fn is_truthy(value: &ExprValue) -> bool {
    match value {
        ExprValue::Undefined => false,
        ExprValue::Json(v) => match v {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        },
    }
}

/// Structural equality where numbers compare by numeric value (`1 == 1.0`).
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, l)| y.get(k).map_or(false, |r| deep_equal(l, r)))
        }
        _ => a == b,
    }
}

pub fn equal(a: &ExprValue, b: &ExprValue) -> bool {
    match (a, b) {
        (ExprValue::Json(x), ExprValue::Json(y)) => deep_equal(x, y),
        (ExprValue::Undefined, ExprValue::Undefined) => true,
        _ => false,
    }
}

/// Orders two values: numbers numerically, everything else by string form.
pub fn cmp(a: &ExprValue, b: &ExprValue) -> Option<Ordering> {
    match (a, b) {
        (ExprValue::Json(Value::Number(x)), ExprValue::Json(Value::Number(y))) => {
            x.as_f64()?.partial_cmp(&y.as_f64()?)
        }
        _ => Some(str_val(a).cmp(&str_val(b))),
    }
}

pub fn as_literal(value: &Value) -> Result<&Value, ExprError> {
    match value {
        Value::Array(a) if a.len() != 1 => Err(ExprError::InvalidLiteral),
        Value::Array(a) => Ok(&a[0]),
        other => Ok(other),
    }
}

/// Looks up an RFC 6901 JSON Pointer. `""` is the whole document.
pub fn get_pointer<'a>(doc: &'a Value, pointer: &str) -> Result<Option<&'a Value>, ExprError> {
    if pointer.is_empty() {
        return Ok(Some(doc));
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| ExprError::InvalidPointer(pointer.to_string()))?;

    let mut current = doc;
    for raw in rest.split('/') {
        let step = unescape_component(raw);
        let next = match current {
            Value::Object(map) => map.get(step.as_str()),
            Value::Array(arr) => step.parse::<usize>().ok().and_then(|i| arr.get(i)),
            _ => None,
        };
        match next {
            Some(v) => current = v,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, so "~01" decodes to "~1"
    component.replace("~1", "/").replace("~0", "~")
}
