//! The copying model facade
//!
//! A [`Model`] owns an adapter map and the plain field values produced by
//! [`mapper::adapt`](crate::mapper::adapt). In copy mode every own key of
//! each adapted source is also copied one-to-one, and those keys stay managed
//! for later adapts and restores.
//!
//! ```
//! use model_adapter_core::{adapter_map, Model};
//! use serde_json::json;
//!
//! let source = json!({"a": "a", "c": {"cc1": {"ccc": "ccc1"}}});
//! let model = Model::new(adapter_map([("ccc", "c.cc1.ccc")]), Some(&source)).unwrap();
//!
//! assert_eq!(model.get("ccc"), Some(&json!("ccc1")));
//! assert_eq!(model.get("a"), Some(&json!("a")));
//! assert_eq!(model.restore().unwrap(), source);
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::adapter::{merge_adapters, one_to_one_adapters, AdapterMap};
use crate::diagnostics::{default_sink, SharedSink};
use crate::mapper;
use crate::path::{self, Path};
use crate::Result;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A model populated by forward mapping
#[derive(Clone)]
pub struct Model {
    adapters: AdapterMap,
    fields: Map<String, Value>,
    copy: bool,
    sink: SharedSink,
}

/// Builder for [`Model`]
pub struct ModelBuilder {
    adapters: AdapterMap,
    copy: bool,
    sink: SharedSink,
}

impl ModelBuilder {
    /// Copy source keys one-to-one (on by default)
    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    /// Where validation diagnostics go
    pub fn diagnostics(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// Build the model and adapt `source` into it
    pub fn build(self, source: Option<&Value>) -> Result<Model> {
        let mut model = Model {
            adapters: self.adapters,
            fields: Map::new(),
            copy: self.copy,
            sink: self.sink,
        };
        model.adapt(source)?;
        Ok(model)
    }

    /// Build a model around previously adapted field values, without
    /// running any transformer
    pub fn hydrate(self, fields: Map<String, Value>) -> Model {
        let adapters = if self.copy {
            let copied = one_to_one_adapters(&Value::Object(fields.clone()));
            merge_adapters(copied, &self.adapters)
        } else {
            self.adapters
        };

        Model {
            adapters,
            fields,
            copy: self.copy,
            sink: self.sink,
        }
    }
}

impl Model {
    /// Start building a model over `adapters`
    pub fn builder(adapters: AdapterMap) -> ModelBuilder {
        ModelBuilder {
            adapters,
            copy: true,
            sink: default_sink(),
        }
    }

    /// Build a copy-mode model from `source`
    pub fn new(adapters: AdapterMap, source: Option<&Value>) -> Result<Self> {
        Self::builder(adapters).build(source)
    }

    /// Build a model with an explicit copy flag
    pub fn with_copy(adapters: AdapterMap, source: Option<&Value>, copy: bool) -> Result<Self> {
        Self::builder(adapters).copy(copy).build(source)
    }

    /// Rebuild a model from serialized fields so it can be restored
    pub fn hydrate(adapters: AdapterMap, fields: Map<String, Value>, copy: bool) -> Self {
        Self::builder(adapters).copy(copy).hydrate(fields)
    }

    /// Re-run forward mapping against `source`, in place
    pub fn adapt(&mut self, source: Option<&Value>) -> Result<()> {
        if self.copy {
            if let Some(source) = source {
                let copied = one_to_one_adapters(source);
                self.adapters = merge_adapters(copied, &self.adapters);
            }
        }
        mapper::adapt(&mut self.fields, source, &self.adapters, self.sink.as_ref())
    }

    /// Build the source-shaped document this model represents
    pub fn restore(&self) -> Result<Value> {
        mapper::restore(&self.fields, &self.adapters, self.sink.as_ref())
    }

    /// Restore, then resolve `at` in the result
    pub fn restore_at(&self, at: &str) -> Result<Option<Value>> {
        let restored = self.restore()?;
        Ok(path::get(&restored, &Path::parse(at)).cloned())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Assign a field; restored as is unless its adapter has a restorer
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The adapter map as it stands, including keys accumulated by copying
    pub fn adapters(&self) -> &AdapterMap {
        &self.adapters
    }

    pub fn is_copy(&self) -> bool {
        self.copy
    }

    /// Plain snapshot of the fields
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("fields", &self.fields)
            .field("adapters", &self.adapters.keys().collect::<Vec<_>>())
            .field("copy", &self.copy)
            .finish()
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.fields.serialize(serializer)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        model.into_value()
    }
}
