//! Resolver argument values
//!
//! Arguments arrive from the execution engine as loosely typed literals. They
//! are decoded into typed criteria once, at the resolver boundary.

use serde::Serialize;
use std::collections::BTreeMap;

/// A literal argument value as written in a query document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Bare identifier such as `RED`
    Enum(String),
    List(Vec<ArgValue>),
    Object(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

/// Arguments supplied to one field, keyed by argument name
pub type Arguments = BTreeMap<String, ArgValue>;
