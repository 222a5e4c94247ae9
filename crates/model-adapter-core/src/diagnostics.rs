//! Diagnostic reporting for advisory validation
//!
//! Validators never block a mapping. When a value does not satisfy its
//! validator, or the validator itself misbehaves, a [`Diagnostic`] is handed
//! to a [`DiagnosticSink`] and the pipeline carries on. The default sink
//! forwards to the `log` facade; tests can inject a [`CollectingSink`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Something an advisory validator wants the caller to know about
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The value did not satisfy the validator
    ValidationFailed {
        /// Model key the descriptor belongs to
        key: String,
        /// Source path of the descriptor
        path: String,
        /// The value that was checked (`None` when absent)
        value: Option<Value>,
        /// Human readable form of the validator
        validator: String,
    },
    /// A predicate validator returned an error
    ValidatorError {
        key: String,
        path: String,
        message: String,
    },
    /// The validator is of a kind the engine does not understand
    UnsupportedValidator {
        key: String,
        path: String,
        validator: Value,
    },
}

impl Diagnostic {
    /// Model key this diagnostic refers to
    pub fn key(&self) -> &str {
        match self {
            Diagnostic::ValidationFailed { key, .. }
            | Diagnostic::ValidatorError { key, .. }
            | Diagnostic::UnsupportedValidator { key, .. } => key,
        }
    }

    /// Source path this diagnostic refers to
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::ValidationFailed { path, .. }
            | Diagnostic::ValidatorError { path, .. }
            | Diagnostic::UnsupportedValidator { path, .. } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ValidationFailed {
                key,
                path,
                value,
                validator,
            } => {
                let value = value
                    .as_ref()
                    .map(Value::to_string)
                    .unwrap_or_else(|| "undefined".to_string());
                write!(
                    f,
                    "validator result is invalid for '{}' at '{}': {} (validator: {})",
                    key, path, value, validator
                )
            }
            Diagnostic::ValidatorError { key, path, message } => {
                write!(f, "validator error for '{}' at '{}': {}", key, path, message)
            }
            Diagnostic::UnsupportedValidator {
                key,
                path,
                validator,
            } => write!(
                f,
                "unknown type of validator for '{}' at '{}': {}",
                key, path, validator
            ),
        }
    }
}

/// Receiver for diagnostics emitted during adapt and restore
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic. Must not panic.
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::ValidatorError { .. } => log::error!("{}", diagnostic),
            _ => log::warn!("{}", diagnostic),
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps every diagnostic in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.diagnostics().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic.clone());
        }
    }
}

/// Shared handle to a sink, as stored by models
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// The sink used when none is configured
pub fn default_sink() -> SharedSink {
    Arc::new(LogSink)
}
