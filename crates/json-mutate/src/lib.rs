//! Path-addressed, in-place mutation of decoded JSON documents.
//!
//! Actions are authored as [`ActionSpec`]s, compiled once into
//! [`CompiledAction`]s and then applied to any number of documents:
//!
//! ```
//! use json_mutate::{apply, compile_all, ActionSpec};
//! use serde_json::json;
//!
//! let actions = compile_all(&[
//!     ActionSpec::set("items.*.id", "0"),
//!     ActionSpec::delete("debug").when(r#"["==", ["$", "/env"], "prod"]"#),
//! ])
//! .unwrap();
//!
//! let mut doc = json!({"items": [{"id": 1}, {"id": 2}], "debug": true});
//! let changed = apply(&mut doc, &actions, &json!({"env": "prod"})).unwrap();
//!
//! assert!(changed);
//! assert_eq!(doc, json!({"items": [{"id": 0}, {"id": 0}]}));
//! ```
//!
//! Paths are dot-separated: integer tokens index arrays, `*` visits every
//! child, anything else is an object key. A path that does not match just
//! yields no targets; the action is then a no-op.

pub mod action;
pub mod apply;
pub mod cli;
pub mod condition;
pub mod error;
pub mod ops;
pub mod path;
pub mod stage;
pub mod target;

pub use action::{compile_all, Action, ActionSpec, CompiledAction};
pub use apply::apply;
pub use condition::{ConditionCompiler, ExpressionCompiler, Predicate};
pub use error::{ApplyError, CompileError, ConditionError};
pub use path::{Path, Segment};
pub use stage::{BodyRewriter, Rewrite, RewriterConfig, StageError};
pub use target::{lookup, resolve, Step, Target};
pub use json_expression::util::deep_equal;
