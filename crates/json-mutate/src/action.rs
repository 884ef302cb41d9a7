//! Action descriptors and their compiled form.
//!
//! An [`ActionSpec`] is what gets authored (by hand, or deserialized from a
//! config file). [`ActionSpec::compile`] validates it and returns a separate
//! [`CompiledAction`] with JSON literals parsed, regexes built and the
//! condition compiled. The descriptor is left untouched and the compiled action is
//! immutable, so one compiled list can serve any number of documents
//! concurrently.

use crate::condition::{ConditionCompiler, ExpressionCompiler, Predicate};
use crate::error::CompileError;
use crate::ops;
use crate::path::Path;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const SET: &str = "set";
pub const MERGE: &str = "merge";
pub const DELETE: &str = "delete";
pub const TRANSFORM_ARRAY: &str = "transform_array";
pub const MERGE_IF_MATCH: &str = "merge_if_match";

/// An authored action.
///
/// `value` holds JSON text. When deserialized, any JSON value is accepted
/// and kept in its encoded form; `when` accepts either a string or an inline
/// JSON expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, deserialize_with = "json_text")]
    pub value: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub replacements: Vec<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "source_text")]
    pub when: Option<String>,
}

fn json_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    // an explicit `null` is a literal too; only an absent field is `None`
    Ok(Some(Value::deserialize(deserializer)?.to_string()))
}

fn source_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl ActionSpec {
    pub fn new(kind: impl Into<String>, path: impl Into<String>) -> Self {
        ActionSpec {
            kind: kind.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn set(path: impl Into<String>, value: impl Into<String>) -> Self {
        ActionSpec::new(SET, path).with_value(value)
    }

    pub fn merge(path: impl Into<String>, value: impl Into<String>) -> Self {
        ActionSpec::new(MERGE, path).with_value(value)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        ActionSpec::new(DELETE, path)
    }

    pub fn transform_array<I, S>(
        path: impl Into<String>,
        regex: impl Into<String>,
        replacements: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ActionSpec {
            regex: Some(regex.into()),
            replacements: replacements.into_iter().map(Into::into).collect(),
            ..ActionSpec::new(TRANSFORM_ARRAY, path)
        }
    }

    pub fn merge_if_match(
        source: impl Into<String>,
        regex: impl Into<String>,
        target: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ActionSpec {
            regex: Some(regex.into()),
            target: Some(target.into()),
            ..ActionSpec::new(MERGE_IF_MATCH, source)
        }
        .with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn when(mut self, source: impl Into<String>) -> Self {
        self.when = Some(source.into());
        self
    }

    /// Compiles with the default JSON-expression condition compiler.
    pub fn compile(&self) -> Result<CompiledAction, CompileError> {
        self.compile_with(&ExpressionCompiler)
    }

    pub fn compile_with(
        &self,
        conditions: &dyn ConditionCompiler,
    ) -> Result<CompiledAction, CompileError> {
        let action = match self.kind.as_str() {
            SET => Action::Set {
                path: self.path(SET)?,
                value: self.literal(SET)?,
            },
            MERGE => Action::Merge {
                path: self.path(MERGE)?,
                value: self.object(MERGE)?,
            },
            DELETE => Action::Delete {
                path: self.path(DELETE)?,
            },
            TRANSFORM_ARRAY => {
                let path = self.path(TRANSFORM_ARRAY)?;
                let regex = self.regex(TRANSFORM_ARRAY)?;
                if self.replacements.is_empty() {
                    return Err(CompileError::MissingReplacements {
                        path: self.path.clone(),
                    });
                }
                Action::TransformArray {
                    path,
                    regex,
                    replacements: self.replacements.clone(),
                }
            }
            MERGE_IF_MATCH => {
                let source = self.path(MERGE_IF_MATCH)?;
                let regex = self.regex(MERGE_IF_MATCH)?;
                let target = match self.target.as_deref() {
                    Some(t) if !t.is_empty() => Path::parse(t),
                    _ => {
                        return Err(CompileError::MissingTarget {
                            path: self.path.clone(),
                        })
                    }
                };
                Action::MergeIfMatch {
                    source,
                    regex,
                    target,
                    value: self.object(MERGE_IF_MATCH)?,
                }
            }
            other => return Err(CompileError::UnsupportedType(other.to_string())),
        };

        let when = match self.when.as_deref().map(str::trim) {
            Some(source) if !source.is_empty() => Some(conditions.compile(source).map_err(
                |source| CompileError::InvalidCondition {
                    path: self.path.clone(),
                    source,
                },
            )?),
            _ => None,
        };

        Ok(CompiledAction { action, when })
    }

    fn path(&self, kind: &'static str) -> Result<Path, CompileError> {
        if self.path.is_empty() {
            return Err(CompileError::MissingPath { kind });
        }
        Ok(Path::parse(&self.path))
    }

    fn literal(&self, kind: &'static str) -> Result<Value, CompileError> {
        let text = match self.value.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                return Err(CompileError::MissingValue {
                    kind,
                    path: self.path.clone(),
                })
            }
        };
        serde_json::from_str(text).map_err(|e| CompileError::InvalidValue {
            kind,
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn object(&self, kind: &'static str) -> Result<Map<String, Value>, CompileError> {
        match self.literal(kind)? {
            Value::Object(map) => Ok(map),
            _ => Err(CompileError::NotAnObject {
                kind,
                path: self.path.clone(),
            }),
        }
    }

    fn regex(&self, kind: &'static str) -> Result<Regex, CompileError> {
        let pattern = match self.regex.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(CompileError::MissingRegex {
                    kind,
                    path: self.path.clone(),
                })
            }
        };
        Regex::new(pattern).map_err(|e| CompileError::InvalidRegex {
            kind,
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

/// Compiles a list of specs, stopping at the first invalid one.
pub fn compile_all(specs: &[ActionSpec]) -> Result<Vec<CompiledAction>, CompileError> {
    specs.iter().map(ActionSpec::compile).collect()
}

/// The validated effect of an action.
#[derive(Debug, Clone)]
pub enum Action {
    Set {
        path: Path,
        value: Value,
    },
    Merge {
        path: Path,
        value: Map<String, Value>,
    },
    Delete {
        path: Path,
    },
    TransformArray {
        path: Path,
        regex: Regex,
        replacements: Vec<String>,
    },
    MergeIfMatch {
        source: Path,
        regex: Regex,
        target: Path,
        value: Map<String, Value>,
    },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Set { .. } => SET,
            Action::Merge { .. } => MERGE,
            Action::Delete { .. } => DELETE,
            Action::TransformArray { .. } => TRANSFORM_ARRAY,
            Action::MergeIfMatch { .. } => MERGE_IF_MATCH,
        }
    }

    /// The path the action resolves first (the source path for
    /// `merge_if_match`).
    pub fn path(&self) -> &Path {
        match self {
            Action::Set { path, .. }
            | Action::Merge { path, .. }
            | Action::Delete { path }
            | Action::TransformArray { path, .. } => path,
            Action::MergeIfMatch { source, .. } => source,
        }
    }

    /// Applies the effect to `root`, ignoring any condition.
    pub fn execute(&self, root: &mut Value) -> bool {
        match self {
            Action::Set { path, value } => ops::set(root, path, value),
            Action::Merge { path, value } => ops::merge(root, path, value),
            Action::Delete { path } => ops::delete(root, path),
            Action::TransformArray {
                path,
                regex,
                replacements,
            } => ops::transform_array(root, path, regex, replacements),
            Action::MergeIfMatch {
                source,
                regex,
                target,
                value,
            } => ops::merge_if_match(root, source, regex, target, value),
        }
    }
}

/// An action ready to run: its effect plus an optional condition.
#[derive(Debug, Clone)]
pub struct CompiledAction {
    action: Action,
    when: Option<Arc<dyn Predicate>>,
}

impl CompiledAction {
    pub fn new(action: Action, when: Option<Arc<dyn Predicate>>) -> Self {
        CompiledAction { action, when }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn kind(&self) -> &'static str {
        self.action.kind()
    }

    pub fn when(&self) -> Option<&dyn Predicate> {
        self.when.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConditionError;

    #[test]
    fn compiles_each_kind() {
        let specs = [
            ActionSpec::set("a.b", "10"),
            ActionSpec::merge("a", r#"{"x": 1}"#),
            ActionSpec::delete("a.c"),
            ActionSpec::transform_array("xs", "^a(.*)", ["$0", "b$1"]),
            ActionSpec::merge_if_match("xs", "a", "opts", r#"{"y": 2}"#),
        ];
        let kinds: Vec<_> = compile_all(&specs)
            .unwrap()
            .iter()
            .map(CompiledAction::kind)
            .collect();
        assert_eq!(kinds, [SET, MERGE, DELETE, TRANSFORM_ARRAY, MERGE_IF_MATCH]);
    }

    #[test]
    fn compile_leaves_spec_untouched() {
        let spec = ActionSpec::set("a", "[1, 2]").when(r#"["==", 1, 1]"#);
        let before = spec.clone();
        let compiled = spec.compile().unwrap();
        assert_eq!(spec, before);
        assert!(compiled.when().is_some());
        assert!(matches!(
            compiled.action(),
            Action::Set { value, .. } if value == &serde_json::json!([1, 2])
        ));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = ActionSpec::new("append", "a").compile().unwrap_err();
        assert_eq!(err, CompileError::UnsupportedType("append".to_string()));
        assert_eq!(err.to_string(), "unsupported action type: append");
    }

    #[test]
    fn rejects_missing_or_invalid_value() {
        assert!(matches!(
            ActionSpec::new(SET, "a").compile(),
            Err(CompileError::MissingValue { kind: SET, .. })
        ));
        assert!(matches!(
            ActionSpec::set("a", "{nope").compile(),
            Err(CompileError::InvalidValue { kind: SET, .. })
        ));
    }

    #[test]
    fn merge_values_must_be_objects() {
        assert_eq!(
            ActionSpec::merge("a", "[1]").compile().unwrap_err(),
            CompileError::NotAnObject {
                kind: MERGE,
                path: "a".to_string()
            }
        );
        assert!(matches!(
            ActionSpec::merge_if_match("xs", "a", "o", "3").compile(),
            Err(CompileError::NotAnObject { kind: MERGE_IF_MATCH, .. })
        ));
    }

    #[test]
    fn regex_checks() {
        assert!(matches!(
            ActionSpec::transform_array("xs", "", ["$0"]).compile(),
            Err(CompileError::MissingRegex { .. })
        ));
        assert!(matches!(
            ActionSpec::transform_array("xs", "(", ["$0"]).compile(),
            Err(CompileError::InvalidRegex { .. })
        ));
        assert!(matches!(
            ActionSpec::transform_array("xs", "a", Vec::<String>::new()).compile(),
            Err(CompileError::MissingReplacements { .. })
        ));
        assert!(matches!(
            ActionSpec::merge_if_match("xs", "(", "o", "{}").compile(),
            Err(CompileError::InvalidRegex { kind: MERGE_IF_MATCH, .. })
        ));
    }

    #[test]
    fn merge_if_match_needs_target() {
        let mut spec = ActionSpec::merge_if_match("xs", "a", "", "{}");
        assert!(matches!(spec.compile(), Err(CompileError::MissingTarget { .. })));
        spec.target = None;
        assert!(matches!(spec.compile(), Err(CompileError::MissingTarget { .. })));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(
            ActionSpec::delete("").compile().unwrap_err(),
            CompileError::MissingPath { kind: DELETE }
        );
    }

    #[test]
    fn invalid_condition() {
        let err = ActionSpec::delete("a")
            .when(r#"["nope", 1, 2]"#)
            .compile()
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidCondition { .. }));
        assert!(err.to_string().starts_with("when a: "), "got: {err}");
    }

    #[test]
    fn blank_condition_means_none() {
        let compiled = ActionSpec::delete("a").when("   ").compile().unwrap();
        assert!(compiled.when().is_none());
    }

    #[test]
    fn custom_condition_compiler() {
        #[derive(Debug)]
        struct Always(bool);
        impl Predicate for Always {
            fn evaluate(&self, _: &Value) -> Result<bool, ConditionError> {
                Ok(self.0)
            }
        }
        struct Flags;
        impl ConditionCompiler for Flags {
            fn compile(&self, source: &str) -> Result<Arc<dyn Predicate>, ConditionError> {
                match source {
                    "yes" => Ok(Arc::new(Always(true))),
                    "no" => Ok(Arc::new(Always(false))),
                    other => Err(ConditionError::new(format!("unknown flag {other}"))),
                }
            }
        }

        let compiled = ActionSpec::delete("a").when("no").compile_with(&Flags).unwrap();
        assert_eq!(compiled.when().unwrap().evaluate(&Value::Null), Ok(false));
        assert!(ActionSpec::delete("a").when("maybe").compile_with(&Flags).is_err());
    }

    #[test]
    fn deserializes_descriptors() {
        let spec: ActionSpec = serde_json::from_str(
            r#"{"type": "merge", "path": "params.1", "value": {"split": "2"},
                "when": ["==", ["$", "/method"], "POST"]}"#,
        )
        .unwrap();
        assert_eq!(spec.kind, MERGE);
        assert_eq!(spec.value.as_deref(), Some(r#"{"split":"2"}"#));
        assert_eq!(spec.when.as_deref(), Some(r#"["==",["$","/method"],"POST"]"#));
        spec.compile().unwrap();

        let spec: ActionSpec = serde_json::from_str(
            r#"{"type": "transform_array", "path": "xs", "regex": "^a", "replacements": ["$0"],
                "when": "[\"$?\", \"/debug\"]"}"#,
        )
        .unwrap();
        assert_eq!(spec.when.as_deref(), Some(r#"["$?", "/debug"]"#));
        assert_eq!(spec.value, None);
    }
}
