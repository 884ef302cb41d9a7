//! Path resolution.
//!
//! [`resolve`] turns a [`Path`] into the concrete locations it addresses in
//! one document. A [`Target`] does not borrow the document: it records the
//! steps from the root to the parent container plus the final slot, and each
//! operation walks those steps again against the root it is given. Targets
//! are therefore only meaningful for the document shape they were resolved
//! against; every action resolves afresh.

use crate::path::{Path, Segment};
use serde_json::Value;
use std::fmt;

/// One concrete step into a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => f.write_str(key),
            Step::Index(index) => write!(f, "{index}"),
        }
    }
}

/// An addressable slot: an object key or array index inside a parent
/// container. The slot itself may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    parent: Vec<Step>,
    slot: Step,
}

impl Target {
    pub fn new(parent: Vec<Step>, slot: Step) -> Self {
        Target { parent, slot }
    }

    pub fn parent(&self) -> &[Step] {
        &self.parent
    }

    pub fn slot(&self) -> &Step {
        &self.slot
    }

    fn container<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.parent.iter().try_fold(root, |current, step| child(current, step))
    }

    fn container_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        self.parent
            .iter()
            .try_fold(root, |current, step| child_mut(current, step))
    }

    /// Current value of the slot, `None` when it does not exist.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        child(self.container(root)?, &self.slot)
    }

    pub fn get_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        child_mut(self.container_mut(root)?, &self.slot)
    }

    /// Writes `value` into the slot. Object keys are created; array slots past
    /// the end grow the array, filling the gap with nulls.
    ///
    /// Returns `false` when the parent container is no longer there, or when
    /// the array cannot be grown to reach the index.
    pub fn set(&self, root: &mut Value, value: Value) -> bool {
        match (self.container_mut(root), &self.slot) {
            (Some(Value::Object(map)), Step::Key(key)) => {
                map.insert(key.clone(), value);
                true
            }
            (Some(Value::Array(items)), Step::Index(index)) => {
                let index = *index;
                if index >= items.len() {
                    let Some(len) = index.checked_add(1) else {
                        return false;
                    };
                    if items.try_reserve_exact(len - items.len()).is_err() {
                        return false;
                    }
                    items.resize(len, Value::Null);
                }
                items[index] = value;
                true
            }
            _ => false,
        }
    }

    /// Removes the slot, returning the removed value. Array elements after the
    /// removed index shift down by one.
    pub fn delete(&self, root: &mut Value) -> Option<Value> {
        match (self.container_mut(root)?, &self.slot) {
            (Value::Object(map), Step::Key(key)) => map.remove(key),
            (Value::Array(items), Step::Index(index)) if *index < items.len() => {
                Some(items.remove(*index))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.parent {
            write!(f, "{step}.")?;
        }
        write!(f, "{}", self.slot)
    }
}

fn child<'a>(current: &'a Value, step: &Step) -> Option<&'a Value> {
    match (current, step) {
        (Value::Object(map), Step::Key(key)) => map.get(key),
        (Value::Array(items), Step::Index(index)) => items.get(*index),
        _ => None,
    }
}

fn child_mut<'a>(current: &'a mut Value, step: &Step) -> Option<&'a mut Value> {
    match (current, step) {
        (Value::Object(map), Step::Key(key)) => map.get_mut(key),
        (Value::Array(items), Step::Index(index)) => items.get_mut(*index),
        _ => None,
    }
}

/// Resolves `path` against `root`.
///
/// - `*` fans out over every array element, or every object key in sorted
///   key order.
/// - A digit-only token indexes arrays; against objects it is a plain key.
/// - A missing key or out-of-range index yields a target only at the last
///   segment; in the middle of the path it ends that branch.
/// - Any segment applied to a scalar ends that branch.
pub fn resolve(root: &Value, path: &Path) -> Vec<Target> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    walk(root, path.segments(), &mut prefix, &mut out);
    out
}

fn walk(current: &Value, segments: &[Segment], prefix: &mut Vec<Step>, out: &mut Vec<Target>) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };

    match (segment, current) {
        (Segment::Wildcard, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                visit(Some(item), Step::Index(index), rest, prefix, out);
            }
        }
        (Segment::Wildcard, Value::Object(map)) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                visit(map.get(key), Step::Key(key.clone()), rest, prefix, out);
            }
        }
        (Segment::Token { key, .. }, Value::Object(map)) => {
            visit(map.get(key), Step::Key(key.clone()), rest, prefix, out);
        }
        (Segment::Token { index: Some(index), .. }, Value::Array(items)) => {
            visit(items.get(*index), Step::Index(*index), rest, prefix, out);
        }
        _ => {}
    }
}

fn visit(
    child: Option<&Value>,
    step: Step,
    rest: &[Segment],
    prefix: &mut Vec<Step>,
    out: &mut Vec<Target>,
) {
    if rest.is_empty() {
        out.push(Target::new(prefix.clone(), step));
        return;
    }
    if let Some(child) = child {
        prefix.push(step);
        walk(child, rest, prefix, out);
        prefix.pop();
    }
}

/// The first existing value `path` addresses, if any.
pub fn lookup<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    resolve(root, path)
        .into_iter()
        .find_map(|target| target.get(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(root: &Value, path: &str) -> Vec<String> {
        resolve(root, &Path::parse(path))
            .iter()
            .map(Target::to_string)
            .collect()
    }

    #[test]
    fn resolves_nested_keys_and_indices() {
        let doc = json!({"params": [["a"], {"k": 1}]});
        assert_eq!(paths(&doc, "params.1.k"), vec!["params.1.k"]);
        assert_eq!(paths(&doc, "params.0.0"), vec!["params.0.0"]);
    }

    #[test]
    fn wildcard_over_array_and_object() {
        let doc = json!({"items": [{"id": 1}, {"id": 2}], "m": {"b": 1, "a": 2}});
        assert_eq!(paths(&doc, "items.*.id"), vec!["items.0.id", "items.1.id"]);
        assert_eq!(paths(&doc, "m.*"), vec!["m.a", "m.b"]);
    }

    #[test]
    fn wildcard_on_scalar_yields_nothing() {
        let doc = json!({"s": "x", "n": 1});
        assert!(paths(&doc, "s.*").is_empty());
        assert!(paths(&doc, "n.*.a").is_empty());
    }

    #[test]
    fn missing_terminal_key_still_targets() {
        let doc = json!({"a": {}});
        assert_eq!(paths(&doc, "a.new"), vec!["a.new"]);
    }

    #[test]
    fn missing_intermediate_key_yields_nothing() {
        let doc = json!({"a": {}});
        assert!(paths(&doc, "a.b.c").is_empty());
        assert!(paths(&doc, "x.y").is_empty());
    }

    #[test]
    fn numeric_token_is_key_on_objects() {
        let doc = json!({"0": "zero", "o": {"5": true}});
        assert_eq!(paths(&doc, "0"), vec!["0"]);
        let target = &resolve(&doc, &Path::parse("o.5"))[0];
        assert_eq!(target.slot(), &Step::Key("5".to_string()));
        assert_eq!(target.get(&doc), Some(&json!(true)));
    }

    #[test]
    fn non_numeric_token_on_array_yields_nothing() {
        let doc = json!({"a": [1, 2]});
        assert!(paths(&doc, "a.x").is_empty());
        assert!(paths(&doc, "a.-1").is_empty());
    }

    #[test]
    fn unreachable_index_is_not_written() {
        let mut doc = json!({"a": [1, 2]});
        let target = &resolve(&doc, &Path::parse("a.18446744073709551615"))[0];
        assert_eq!(target.slot(), &Step::Index(usize::MAX));
        assert!(!target.set(&mut doc, json!(1)));
        assert_eq!(doc, json!({"a": [1, 2]}));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_growth_is_not_written() {
        let mut doc = json!([]);
        let target = Target::new(Vec::new(), Step::Index(1 << 55));
        assert!(!target.set(&mut doc, json!(1)));
        assert_eq!(doc, json!([]));
    }

    #[test]
    fn out_of_range_index() {
        let doc = json!({"a": [1, 2]});
        let targets = resolve(&doc, &Path::parse("a.5"));
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].get(&doc), None);
        // mid-path it cannot be followed
        assert!(paths(&doc, "a.5.x").is_empty());
    }

    #[test]
    fn set_grows_array_with_nulls() {
        let mut doc = json!({"a": [1, 2]});
        let target = resolve(&doc, &Path::parse("a.5")).remove(0);
        assert!(target.set(&mut doc, json!("v")));
        assert_eq!(doc, json!({"a": [1, 2, null, null, null, "v"]}));
    }

    #[test]
    fn delete_out_of_range_reports_absence() {
        let mut doc = json!({"a": [1, 2]});
        let target = resolve(&doc, &Path::parse("a.5")).remove(0);
        assert_eq!(target.delete(&mut doc), None);
        assert_eq!(doc, json!({"a": [1, 2]}));
    }

    #[test]
    fn delete_compacts_arrays() {
        let mut doc = json!([10, 20, 30]);
        let target = resolve(&doc, &Path::parse("1")).remove(0);
        assert_eq!(target.delete(&mut doc), Some(json!(20)));
        assert_eq!(doc, json!([10, 30]));
    }

    #[test]
    fn root_scalar_has_no_targets() {
        assert!(paths(&json!(3), "a").is_empty());
        assert!(paths(&json!(null), "*").is_empty());
    }

    #[test]
    fn lookup_finds_first_existing_value() {
        let doc = json!({"xs": [{"a": 1}, {"b": 2}, {"b": 3}]});
        assert_eq!(lookup(&doc, &Path::parse("xs.*.b")), Some(&json!(2)));
        assert_eq!(lookup(&doc, &Path::parse("xs.*.c")), None);
    }
}
