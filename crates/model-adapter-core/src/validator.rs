//! Advisory validation of adapted values
//!
//! A validator never blocks a mapping. [`validate`] checks a value against a
//! descriptor's validator and, when the check fails, hands a
//! [`Diagnostic`](crate::diagnostics::Diagnostic) to the sink. The value is
//! assigned either way.
//!
//! Supported validators:
//! - a primitive type name (`"string"`, `"number"`, `"boolean"`, `"object"`,
//!   `"undefined"`), matched against [`type_of`]
//! - a regular expression, matched against [`coerce_to_string`]
//! - a predicate; an error from the predicate counts as invalid
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::adapter::Descriptor;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of predicate validators. `None` means the value is absent.
pub type PredicateFunction = dyn Fn(Option<&Value>) -> anyhow::Result<bool> + Send + Sync;

/// The validator attached to a descriptor
#[derive(Clone)]
pub enum Validator {
    /// Valid iff [`type_of`] the value equals this name
    TypeName(String),
    /// Valid iff the pattern matches the value's string form
    Pattern(Regex),
    /// Valid iff the predicate returns `Ok(true)`
    Predicate {
        name: String,
        function: Arc<PredicateFunction>,
    },
    /// A validator of a kind the engine cannot evaluate; always invalid
    Unsupported(Value),
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Valid,
    Invalid,
    Errored(String),
    Unsupported,
}

impl Validator {
    pub fn type_name(name: impl Into<String>) -> Self {
        Validator::TypeName(name.into())
    }

    /// Compile a regular expression validator
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Validator::Pattern)
            .map_err(|e| Error::Configuration {
                message: format!("invalid validator pattern {:?}: {}", pattern, e),
                source: Some(e.into()),
            })
    }

    pub fn predicate<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(Option<&Value>) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Validator::Predicate {
            name: name.into(),
            function: Arc::new(function),
        }
    }

    /// Named predicates available to declarative adapter files
    pub fn builtin(name: &str) -> Option<Self> {
        let validator = match name {
            "not_null" => Self::predicate("not_null", |value| {
                Ok(matches!(value, Some(v) if !v.is_null()))
            }),
            "non_empty" => Self::predicate("non_empty", |value| {
                Ok(match value {
                    Some(Value::String(s)) => !s.is_empty(),
                    Some(Value::Array(items)) => !items.is_empty(),
                    Some(Value::Object(map)) => !map.is_empty(),
                    Some(Value::Null) | None => false,
                    Some(_) => true,
                })
            }),
            "integer" => Self::predicate("integer", |value| {
                Ok(matches!(value, Some(Value::Number(n)) if n.is_i64() || n.is_u64()))
            }),
            _ => return None,
        };
        Some(validator)
    }

    /// Run the check without reporting anything
    pub fn check(&self, value: Option<&Value>) -> Check {
        match self {
            Validator::TypeName(name) => verdict(type_of(value) == name),
            Validator::Pattern(regex) => verdict(regex.is_match(&coerce_to_string(value))),
            Validator::Predicate { function, .. } => match function(value) {
                Ok(valid) => verdict(valid),
                Err(e) => Check::Errored(e.to_string()),
            },
            Validator::Unsupported(_) => Check::Unsupported,
        }
    }

    /// Short human readable description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Validator::TypeName(name) => format!("type {:?}", name),
            Validator::Pattern(regex) => format!("/{}/", regex.as_str()),
            Validator::Predicate { name, .. } => format!("predicate {}", name),
            Validator::Unsupported(raw) => format!("unsupported {}", raw),
        }
    }
}

fn verdict(valid: bool) -> Check {
    if valid {
        Check::Valid
    } else {
        Check::Invalid
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.describe())
    }
}

impl PartialEq for Validator {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Validator::TypeName(a), Validator::TypeName(b)) => a == b,
            (Validator::Pattern(a), Validator::Pattern(b)) => a.as_str() == b.as_str(),
            (Validator::Predicate { name: a, .. }, Validator::Predicate { name: b, .. }) => a == b,
            (Validator::Unsupported(a), Validator::Unsupported(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Regex> for Validator {
    fn from(regex: Regex) -> Self {
        Validator::Pattern(regex)
    }
}

/// Primitive type name of a value, in the vocabulary type-name validators use.
///
/// Arrays and `null` are both `"object"`; an absent value is `"undefined"`.
pub fn type_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) => "object",
    }
}

/// String form of a value as used for pattern matching
pub fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Check `value` against the descriptor's validator and report failures.
///
/// Returns whether the value passed; callers are free to ignore it.
pub fn validate(value: Option<&Value>, descriptor: &Descriptor, sink: &dyn DiagnosticSink) -> bool {
    let Some(validator) = &descriptor.validator else {
        return true;
    };

    let key = descriptor.key.clone();
    let path = descriptor.path.to_string();

    match validator.check(value) {
        Check::Valid => return true,
        Check::Invalid => {}
        Check::Errored(message) => {
            sink.report(&Diagnostic::ValidatorError {
                key: key.clone(),
                path: path.clone(),
                message,
            });
        }
        Check::Unsupported => {
            if let Validator::Unsupported(raw) = validator {
                sink.report(&Diagnostic::UnsupportedValidator {
                    key: key.clone(),
                    path: path.clone(),
                    validator: raw.clone(),
                });
            }
        }
    }

    sink.report(&Diagnostic::ValidationFailed {
        key,
        path,
        value: value.cloned(),
        validator: validator.describe(),
    });
    false
}
