//! JSON expression predicates.
//!
//! Expressions are JSON arrays of the form `[operator, ...operands]`. They are
//! compiled once (operator names, arity and regex patterns are checked up
//! front) and then evaluated any number of times against a JSON context.
//!
//! # Example
//!
//! ```
//! use json_expression::Expression;
//! use serde_json::json;
//!
//! let expr = Expression::compile(r#"["==", ["$", "/method"], "POST"]"#).unwrap();
//! assert!(expr.test(&json!({"method": "POST"})).unwrap());
//! assert!(!expr.test(&json!({"method": "GET"})).unwrap());
//! ```

pub mod compile;
pub mod error;
pub mod evaluate;
pub mod operators;
pub mod types;
pub mod util;

pub use compile::{compile, Expression, Node};
pub use error::ExprError;
pub use evaluate::{evaluate, Env};
pub use operators::operators_map;
pub use types::{Arity, ExprValue, OperatorDefinition, OperatorMap};
