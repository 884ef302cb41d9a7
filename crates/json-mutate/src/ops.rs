//! The five mutation semantics.
//!
//! Each function resolves its path(s) against the current document, mutates
//! in place and reports whether anything changed. A path that resolves to
//! nothing is a silent no-op.

use crate::path::Path;
use crate::target::resolve;
use json_expression::util::deep_equal;
use regex::Regex;
use serde_json::{Map, Value};

/// Overwrites every target with a copy of `value`.
///
/// Reports a change whenever at least one target was written, even if the
/// value written equals the one already there. An array index too large to
/// grow the array to is skipped.
pub fn set(root: &mut Value, path: &Path, value: &Value) -> bool {
    let mut changed = false;
    for target in resolve(root, path) {
        changed |= target.set(root, value.clone());
    }
    changed
}

/// Merges the keys of `source` into every object target.
///
/// Missing or null targets become `{}` first, and that replacement alone
/// counts as a change, so merging `{}` into a missing slot reports `true`.
/// Targets holding any other non-object value are left alone.
pub fn merge(root: &mut Value, path: &Path, source: &Map<String, Value>) -> bool {
    let mut changed = false;
    for target in resolve(root, path) {
        if target.get(root).map_or(true, Value::is_null) {
            changed |= target.set(root, Value::Object(Map::new()));
        }
        let Some(Value::Object(dst)) = target.get_mut(root) else {
            continue;
        };
        for (key, value) in source {
            if !dst.get(key).is_some_and(|current| deep_equal(current, value)) {
                dst.insert(key.clone(), value.clone());
                changed = true;
            }
        }
    }
    changed
}

/// Removes every target.
///
/// Targets are removed last to first so that several indices of one array
/// (as produced by `*`) all refer to the elements they were resolved to.
pub fn delete(root: &mut Value, path: &Path) -> bool {
    let mut changed = false;
    for target in resolve(root, path).iter().rev() {
        changed |= target.delete(root).is_some();
    }
    changed
}

/// Rewrites string elements of every array target that match `regex`.
///
/// A matching element is replaced by one element per template, each
/// expanded against the match (`$0`, `$1`, `${name}`). Other elements keep
/// their position.
pub fn transform_array(root: &mut Value, path: &Path, regex: &Regex, templates: &[String]) -> bool {
    let mut changed = false;
    for target in resolve(root, path) {
        let Some(Value::Array(items)) = target.get_mut(root) else {
            continue;
        };
        changed |= expand_array(items, regex, templates);
    }
    changed
}

fn expand_array(items: &mut Vec<Value>, regex: &Regex, templates: &[String]) -> bool {
    if !items
        .iter()
        .any(|item| item.as_str().is_some_and(|s| regex.is_match(s)))
    {
        return false;
    }

    let original = std::mem::take(items);
    for item in original {
        let captures = match &item {
            Value::String(s) => regex.captures(s),
            _ => None,
        };
        match captures {
            Some(caps) => {
                for template in templates {
                    let mut expanded = String::new();
                    caps.expand(template, &mut expanded);
                    items.push(Value::String(expanded));
                }
            }
            None => items.push(item),
        }
    }
    true
}

/// Merges `value` into `target` when any string in any array at `source`
/// matches `regex`. Without a match the document is not touched.
pub fn merge_if_match(
    root: &mut Value,
    source: &Path,
    regex: &Regex,
    target: &Path,
    value: &Map<String, Value>,
) -> bool {
    let matched = resolve(root, source).iter().any(|src| match src.get(root) {
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| item.as_str().is_some_and(|s| regex.is_match(s))),
        _ => false,
    });
    if !matched {
        return false;
    }
    merge(root, target, value)
}
