//! Operator definitions.

pub mod array;
pub mod comparison;
pub mod input;
pub mod logical;
pub mod string;
pub mod type_ops;

use crate::types::{operators_to_map, OperatorDefinition, OperatorMap};
use std::sync::{Arc, OnceLock};

pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(comparison::operators());
    ops.extend(logical::operators());
    ops.extend(type_ops::operators());
    ops.extend(string::operators());
    ops.extend(array::operators());
    ops.extend(input::operators());
    ops
}

/// The built-in operator map, built on first use.
pub fn operators_map() -> &'static OperatorMap {
    static OPERATORS: OnceLock<OperatorMap> = OnceLock::new();
    OPERATORS.get_or_init(|| operators_to_map(all_operators()))
}
