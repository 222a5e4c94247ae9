//! Builder for explicit adapter descriptors
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::types::{Adapter, AdapterDescriptor, DefaultValue, PathSpec};
use crate::transformer::Transformer;
use crate::validator::Validator;
use serde_json::Value;

/// Fluent builder producing [`Adapter::Descriptor`]
#[derive(Debug, Clone, Default)]
pub struct AdapterBuilder {
    descriptor: AdapterDescriptor,
}

impl AdapterBuilder {
    /// Create a new builder; without a path the model key is used
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.descriptor.path = Some(PathSpec::Literal(path.into()));
        self
    }

    /// Compute the source path on every normalization
    pub fn computed_path<F>(mut self, function: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.descriptor.path = Some(PathSpec::computed(function));
        self
    }

    /// Set a fixed default value
    pub fn default_value(mut self, value: Value) -> Self {
        self.descriptor.default_value = Some(DefaultValue::Value(value));
        self
    }

    /// Produce a fresh default value on every normalization
    pub fn default_with<F>(mut self, function: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.descriptor.default_value = Some(DefaultValue::producer(function));
        self
    }

    /// Set the advisory validator
    pub fn validator(mut self, validator: impl Into<Validator>) -> Self {
        self.descriptor.validator = Some(validator.into());
        self
    }

    /// Set the transformer
    pub fn transformer(mut self, transformer: Transformer) -> Self {
        self.descriptor.transformer = Some(transformer);
        self
    }

    /// Set the transformer from a closure
    pub fn transform<F>(self, function: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transformer(Transformer::new("transformer", function))
    }

    /// Set the restorer
    pub fn restorer(mut self, restorer: Transformer) -> Self {
        self.descriptor.restorer = Some(restorer);
        self
    }

    /// Set the restorer from a closure
    pub fn restore<F>(self, function: F) -> Self
    where
        F: Fn(&Value, &Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.restorer(Transformer::new("restorer", function))
    }

    /// Build the adapter
    pub fn build(self) -> Adapter {
        Adapter::Descriptor(self.descriptor)
    }
}
