//! Core adapter types
//!
//! An [`Adapter`] is what callers declare for one model key, in any of the
//! shorthand forms. A [`Descriptor`] is the canonical record the mappers
//! work with, produced by [`normalize`](super::normalize).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::path::Path;
use crate::transformer::Transformer;
use crate::validator::Validator;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Where to find a model field in the source
#[derive(Clone)]
pub enum PathSpec {
    /// A dotted path string
    Literal(String),
    /// A path computed on demand, each time the adapter is normalized
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl PathSpec {
    pub fn computed<F>(function: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        PathSpec::Computed(Arc::new(function))
    }

    /// Produce the path string
    pub fn resolve(&self) -> String {
        match self {
            PathSpec::Literal(path) => path.clone(),
            PathSpec::Computed(function) => function(),
        }
    }
}

impl fmt::Debug for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            PathSpec::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        PathSpec::Literal(path.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        PathSpec::Literal(path)
    }
}

/// Value used when the source field is absent or `null`
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    /// Evaluated on every normalization, for defaults that must be fresh
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn producer<F>(function: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultValue::Producer(Arc::new(function))
    }

    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::Producer(function) => function(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

/// The full, explicit adapter form. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct AdapterDescriptor {
    /// Source path; the model key when absent or empty
    pub path: Option<PathSpec>,
    pub default_value: Option<DefaultValue>,
    pub validator: Option<Validator>,
    pub transformer: Option<Transformer>,
    pub restorer: Option<Transformer>,
}

/// What a caller declares for one model key
#[derive(Debug, Clone)]
pub enum Adapter {
    /// Map the key one-to-one onto the same-named source field
    Identity,
    /// Only a path
    Path(PathSpec),
    /// The explicit form
    Descriptor(AdapterDescriptor),
}

impl Adapter {
    pub fn path(path: impl Into<String>) -> Self {
        Adapter::Path(PathSpec::Literal(path.into()))
    }

    pub fn computed<F>(function: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Adapter::Path(PathSpec::computed(function))
    }

    /// Start building an explicit descriptor
    pub fn builder() -> super::AdapterBuilder {
        super::AdapterBuilder::new()
    }

    /// The transformer declared by this adapter, if any
    pub fn transformer(&self) -> Option<&Transformer> {
        match self {
            Adapter::Descriptor(descriptor) => descriptor.transformer.as_ref(),
            _ => None,
        }
    }
}

impl Default for Adapter {
    fn default() -> Self {
        Adapter::Identity
    }
}

impl From<&str> for Adapter {
    fn from(path: &str) -> Self {
        Adapter::path(path)
    }
}

impl From<String> for Adapter {
    fn from(path: String) -> Self {
        Adapter::path(path)
    }
}

impl From<PathSpec> for Adapter {
    fn from(path: PathSpec) -> Self {
        Adapter::Path(path)
    }
}

impl From<AdapterDescriptor> for Adapter {
    fn from(descriptor: AdapterDescriptor) -> Self {
        Adapter::Descriptor(descriptor)
    }
}

/// Model key to adapter; iteration order is processing order
pub type AdapterMap = IndexMap<String, Adapter>;

/// Build an [`AdapterMap`] from anything convertible
pub fn adapter_map<I, K, A>(entries: I) -> AdapterMap
where
    I: IntoIterator<Item = (K, A)>,
    K: Into<String>,
    A: Into<Adapter>,
{
    entries
        .into_iter()
        .map(|(key, adapter)| (key.into(), adapter.into()))
        .collect()
}

/// Canonical, normalized adapter for one model key
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// The model key this descriptor manages
    pub key: String,
    pub path: Path,
    /// Concrete default, producers already evaluated
    pub default_value: Option<Value>,
    pub validator: Option<Validator>,
    pub transformer: Option<Transformer>,
    pub restorer: Option<Transformer>,
}
