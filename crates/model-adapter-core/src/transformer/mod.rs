//! Value transformers and restorers
//!
//! A transformer derives a model value from a raw source value; a restorer
//! is its inverse and turns the model value back into the raw form. Both are
//! load-bearing: unlike validators, their errors propagate to the caller.
//!
//! # Module Organization
//!
//! - [`built_in`] - Named transformers usable from declarative adapter files
//!
//! # Examples
//!
//! ```
//! use model_adapter_core::Transformer;
//! use serde_json::json;
//!
//! let double = Transformer::new("double", |value, _context| {
//!     Ok(json!(value.as_i64().unwrap_or(0) * 2))
//! });
//! assert_eq!(double.apply(&json!(21), &json!(null)).unwrap(), json!(42));
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod built_in;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature shared by transformers and restorers.
///
/// The first argument is the value being converted (`null` when absent), the
/// second the surrounding document: the source for transformers, the model
/// for restorers.
pub type TransformerFunction = dyn Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync;

/// A named, cheaply clonable value conversion
#[derive(Clone)]
pub struct Transformer {
    name: String,
    function: Arc<TransformerFunction>,
}

impl Transformer {
    /// Create a transformer from a closure
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    /// Create an unnamed transformer from a closure
    pub fn from_fn<F>(function: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::new("custom", function)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the conversion
    pub fn apply(&self, value: &Value, context: &Value) -> anyhow::Result<Value> {
        (self.function)(value, context)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer").field("name", &self.name).finish()
    }
}

impl PartialEq for Transformer {
    fn eq(&self, other: &Self) -> bool {
        // Compare only by name for closures
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_passes_context() {
        let pick = Transformer::new("pick", |_value, context| Ok(context["other"].clone()));
        assert_eq!(
            pick.apply(&Value::Null, &json!({"other": 7})).unwrap(),
            json!(7)
        );
    }

    #[test]
    fn test_errors_are_returned() {
        let failing = Transformer::from_fn(|_, _| anyhow::bail!("cannot convert"));
        let err = failing.apply(&json!(1), &Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert");
        assert_eq!(failing.name(), "custom");
    }

    #[test]
    fn test_equality_by_name() {
        let a = Transformer::new("same", |v, _| Ok(v.clone()));
        let b = Transformer::new("same", |_, _| Ok(Value::Null));
        assert_eq!(a, b);
        assert_eq!(format!("{:?}", a), "Transformer { name: \"same\" }");
    }
}
