//! Request-body stage: decode, mutate, re-encode.
//!
//! [`BodyRewriter`] wraps a compiled action list for use on raw bodies. In
//! lenient mode (the default) bodies that are empty or not JSON pass through
//! untouched; in strict mode they are rejected. A body is only re-encoded
//! when some action changed it.

use crate::action::{compile_all, ActionSpec, CompiledAction};
use crate::apply::apply;
use crate::error::{ApplyError, CompileError};
use crate::path::Path;
use crate::target::lookup;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

/// Placeholder keys look like `json.params.0`; bare `json` is the document.
pub const PLACEHOLDER_PREFIX: &str = "json";

#[derive(Error, Debug)]
pub enum StageError {
    #[error("empty body")]
    EmptyBody,

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error("failed to encode body: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Deserializable stage configuration.
///
/// ```json
/// {
///   "strict": true,
///   "actions": [
///     {"type": "merge", "path": "params.1", "value": {"split": "2"}}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RewriterConfig {
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

impl RewriterConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn build(&self) -> Result<BodyRewriter, CompileError> {
        Ok(BodyRewriter::new(self.strict, compile_all(&self.actions)?))
    }
}

#[derive(Debug, Clone)]
pub struct BodyRewriter {
    strict: bool,
    actions: Vec<CompiledAction>,
}

impl BodyRewriter {
    pub fn new(strict: bool, actions: Vec<CompiledAction>) -> Self {
        BodyRewriter { strict, actions }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn actions(&self) -> &[CompiledAction] {
        &self.actions
    }

    pub fn rewrite<'b>(&self, body: &'b [u8], context: &Value) -> Result<Rewrite<'b>, StageError> {
        if body.is_empty() {
            if self.strict {
                return Err(StageError::EmptyBody);
            }
            return Ok(Rewrite::passthrough(body));
        }

        let mut document: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) if self.strict => return Err(StageError::InvalidJson(e)),
            Err(e) => {
                tracing::debug!(error = %e, "body is not JSON, passing through");
                return Ok(Rewrite::passthrough(body));
            }
        };

        if !apply(&mut document, &self.actions, context)? {
            return Ok(Rewrite {
                body: Cow::Borrowed(body),
                document: Some(document),
                mutated: false,
            });
        }

        let encoded = serde_json::to_vec(&document).map_err(StageError::Encode)?;
        tracing::debug!(before = body.len(), after = encoded.len(), "body rewritten");
        Ok(Rewrite {
            body: Cow::Owned(encoded),
            document: Some(document),
            mutated: true,
        })
    }
}

/// Outcome of [`BodyRewriter::rewrite`].
#[derive(Debug, Clone)]
pub struct Rewrite<'b> {
    body: Cow<'b, [u8]>,
    document: Option<Value>,
    mutated: bool,
}

impl<'b> Rewrite<'b> {
    fn passthrough(body: &'b [u8]) -> Self {
        Rewrite {
            body: Cow::Borrowed(body),
            document: None,
            mutated: false,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Cow<'b, [u8]> {
        self.body
    }

    pub fn is_mutated(&self) -> bool {
        self.mutated
    }

    /// The decoded document, `None` when the body passed through undecoded.
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Resolves a `json.<path>` placeholder against the final document.
    /// Strings come back verbatim, other values JSON-encoded.
    pub fn placeholder(&self, key: &str) -> Option<String> {
        let document = self.document.as_ref()?;
        let value = if key == PLACEHOLDER_PREFIX {
            document
        } else {
            let path = key
                .strip_prefix(PLACEHOLDER_PREFIX)
                .and_then(|rest| rest.strip_prefix('.'))?;
            lookup(document, &Path::parse(path))?
        };
        Some(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rewriter(strict: bool) -> BodyRewriter {
        RewriterConfig {
            strict,
            actions: vec![ActionSpec::set("a", "1")],
        }
        .build()
        .unwrap()
    }

    #[test]
    fn empty_body() {
        assert!(matches!(
            rewriter(true).rewrite(b"", &Value::Null),
            Err(StageError::EmptyBody)
        ));
        let out = rewriter(false).rewrite(b"", &Value::Null).unwrap();
        assert!(!out.is_mutated());
        assert_eq!(out.body(), b"");
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            rewriter(true).rewrite(b"{oops", &Value::Null),
            Err(StageError::InvalidJson(_))
        ));
        let out = rewriter(false).rewrite(b"{oops", &Value::Null).unwrap();
        assert_eq!(out.body(), b"{oops");
        assert!(out.document().is_none());
        assert_eq!(out.placeholder("json"), None);
    }

    #[test]
    fn unchanged_body_keeps_original_bytes() {
        let rw = RewriterConfig {
            strict: false,
            actions: vec![ActionSpec::delete("missing")],
        }
        .build()
        .unwrap();
        let body = br#"{ "a" : 1 }"#;
        let out = rw.rewrite(body, &Value::Null).unwrap();
        assert!(!out.is_mutated());
        assert!(matches!(out.into_body(), Cow::Borrowed(b) if b == body));
    }

    #[test]
    fn changed_body_is_reencoded() {
        let out = rewriter(false).rewrite(br#"{"a": 0, "b": "x"}"#, &Value::Null).unwrap();
        assert!(out.is_mutated());
        let decoded: Value = serde_json::from_slice(out.body()).unwrap();
        assert_eq!(decoded, json!({"a": 1, "b": "x"}));
        assert_eq!(out.placeholder("json.a").as_deref(), Some("1"));
        assert_eq!(out.placeholder("json.b").as_deref(), Some("x"));
        assert_eq!(out.placeholder("json.nope"), None);
        assert_eq!(out.placeholder("other.a"), None);
    }
}
