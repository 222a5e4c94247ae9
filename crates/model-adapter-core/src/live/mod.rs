//! Live-binding models
//!
//! A [`LiveModel`] is a plain deep merge of a source over its defaults, in
//! which every adapter with a transformer turns its path into a bound slot.
//! A bound slot keeps the raw value in a [`Register`]: reading it applies the
//! transformer on the fly, writing it stores a new raw value. Restoring
//! writes the raw values back, so the original data is recovered exactly
//! without needing restorers.
//!
//! Transformers receive the current raw view of the model as context: the
//! plain data with every bound slot holding its latest raw value.
//!
//! # Examples
//!
//! ```
//! use model_adapter_core::transformer::built_in;
//! use model_adapter_core::{adapter_map, Adapter, LiveModel};
//! use serde_json::json;
//!
//! let adapters = adapter_map([(
//!     "a",
//!     Adapter::builder().transformer(built_in::epoch_millis_to_iso8601()).build(),
//! )]);
//! let model = LiveModel::new(Some(json!({"a": 1565001521464_i64})), None, adapters);
//!
//! assert_eq!(model.get("a").unwrap(), Some(json!("2019-08-05T10:38:41.464Z")));
//! assert_eq!(model.restore(), json!({"a": 1565001521464_i64}));
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod register;


pub use register::Register;

use crate::adapter::{normalize, Adapter, AdapterMap, Descriptor};
use crate::defaults::{defaults_deep, defaults_deep_all};
use crate::diagnostics::{default_sink, SharedSink};
use crate::mapper;
use crate::path::{self, Path};
use crate::validator::validate;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{ser, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A model whose transformed fields are computed on read
#[derive(Clone)]
pub struct LiveModel {
    source: Option<Value>,
    defaults: Option<Value>,
    adapters: AdapterMap,
    data: Value,
    register: Register,
    bindings: IndexMap<Path, Descriptor>,
    sink: SharedSink,
}

/// Builder for [`LiveModel`]
pub struct LiveModelBuilder {
    source: Option<Value>,
    defaults: Option<Value>,
    adapters: AdapterMap,
    sink: SharedSink,
}

impl LiveModelBuilder {
    pub fn source(mut self, source: Value) -> Self {
        self.source = Some(source);
        self
    }

    /// Values filled in wherever the source is absent or `null`
    pub fn defaults(mut self, defaults: Value) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn adapters(mut self, adapters: AdapterMap) -> Self {
        self.adapters = adapters;
        self
    }

    /// Add one adapter; the key is the property path it binds
    pub fn adapter(mut self, path: impl Into<String>, adapter: impl Into<Adapter>) -> Self {
        self.adapters.insert(path.into(), adapter.into());
        self
    }

    pub fn diagnostics(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> LiveModel {
        let mut model = LiveModel {
            source: self.source,
            defaults: self.defaults,
            adapters: self.adapters,
            data: Value::Object(Map::new()),
            register: Register::new(),
            bindings: IndexMap::new(),
            sink: self.sink,
        };
        model.populate();
        model
    }
}

impl LiveModel {
    pub fn builder() -> LiveModelBuilder {
        LiveModelBuilder {
            source: None,
            defaults: None,
            adapters: AdapterMap::new(),
            sink: default_sink(),
        }
    }

    /// Merge `source` over `defaults` and bind every transformed path
    pub fn new(source: Option<Value>, defaults: Option<Value>, adapters: AdapterMap) -> Self {
        let mut builder = Self::builder().adapters(adapters);
        builder.source = source;
        builder.defaults = defaults;
        builder.build()
    }

    fn populate(&mut self) {
        let mut data = Value::Object(Map::new());
        defaults_deep_all(&mut data, self.source.iter().chain(self.defaults.iter()));

        self.data = data;
        self.register.clear();
        self.bindings.clear();
        self.bind();
    }

    /// Bring the bound slots in line with the adapter map as it stands.
    ///
    /// Newly bound paths take their raw value from the current data. Paths
    /// that lost their transformer become plain again, holding the raw value.
    fn bind(&mut self) {
        let mut wanted: IndexMap<Path, Descriptor> = IndexMap::new();
        for (key, adapter) in &self.adapters {
            let descriptor = normalize(adapter, key);
            if descriptor.transformer.is_some() {
                wanted.insert(descriptor.path.clone(), descriptor);
            }
        }

        let released: Vec<Path> = self
            .bindings
            .keys()
            .filter(|bound| !wanted.contains_key(*bound))
            .cloned()
            .collect();
        for bound in released {
            log::debug!("unbinding '{}'", bound);
            self.bindings.shift_remove(&bound);
            let raw = self.register.remove(&bound);
            mapper::write(&mut self.data, &bound, raw);
        }

        for (at, descriptor) in wanted {
            if !self.register.contains(&at) {
                let raw = path::get(&self.data, &at).cloned();
                validate(raw.as_ref(), &descriptor, self.sink.as_ref());
                self.register.set(at.clone(), raw);
            }
            self.bindings.insert(at, descriptor);
        }

        log::debug!("{} bound path(s)", self.bindings.len());
    }

    fn read_bound(&self, descriptor: &Descriptor, context: &Value) -> Result<Value> {
        let raw = self
            .register
            .get(&descriptor.path)
            .cloned()
            .unwrap_or(Value::Null);
        match &descriptor.transformer {
            Some(transformer) => transformer
                .apply(&raw, context)
                .map_err(|e| Error::transform(descriptor.key.as_str(), e)),
            None => Ok(raw),
        }
    }

    /// Read the value at `at`; bound slots are transformed on every read
    pub fn get(&self, at: &str) -> Result<Option<Value>> {
        let at = Path::parse(at);
        if let Some(descriptor) = self.bindings.get(&at) {
            return self.read_bound(descriptor, &self.restore()).map(Some);
        }

        let overlaps = self
            .bindings
            .keys()
            .any(|bound| bound.starts_with(&at) || at.starts_with(bound));
        if overlaps {
            let snapshot = self.to_value()?;
            return Ok(path::get(&snapshot, &at).cloned());
        }

        Ok(path::get(&self.data, &at).cloned())
    }

    /// Write the value at `at`; bound slots only record the new raw value
    pub fn set(&mut self, at: &str, value: Value) {
        let at = Path::parse(at);
        if self.bindings.contains_key(&at) {
            self.register.set(at, Some(value));
        } else {
            path::set(&mut self.data, &at, value);
        }
    }

    pub fn is_bound(&self, at: &str) -> bool {
        self.bindings.contains_key(&Path::parse(at))
    }

    /// Untransformed value of a bound slot
    pub fn raw(&self, at: &str) -> Option<&Value> {
        self.register.get(&Path::parse(at))
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn adapters(&self) -> &AdapterMap {
        &self.adapters
    }

    /// Plain snapshot with every bound slot transformed
    pub fn to_value(&self) -> Result<Value> {
        let context = self.restore();
        let mut snapshot = self.data.clone();
        for descriptor in self.bindings.values() {
            let value = self.read_bound(descriptor, &context)?;
            path::set(&mut snapshot, &descriptor.path, value);
        }
        Ok(snapshot)
    }

    /// Plain copy of the data with every bound slot holding its raw value
    pub fn restore(&self) -> Value {
        let mut restored = Value::Object(Map::new());
        defaults_deep(&mut restored, &self.data);
        for (at, raw) in self.register.iter() {
            mapper::write(&mut restored, at, raw.cloned());
        }
        restored
    }

    /// Restore, then resolve `at` in the result
    pub fn restore_at(&self, at: &str) -> Option<Value> {
        path::get(&self.restore(), &Path::parse(at)).cloned()
    }

    /// The source as given; `at` resolves a path inside it
    pub fn get_source(&self, at: Option<&str>) -> Option<&Value> {
        let source = self.source.as_ref()?;
        match at {
            Some(at) if !at.is_empty() => path::get(source, &Path::parse(at)),
            _ => Some(source),
        }
    }

    /// Replace the source wholesale: clears every field and the register,
    /// then populates and binds again
    pub fn set_source(&mut self, source: Option<Value>) {
        self.source = source;
        self.populate();
    }

    /// Add, replace (`Some`) or remove (`None`) the adapter at `at`
    pub fn set_adapter(&mut self, at: &str, adapter: Option<Adapter>) {
        match adapter {
            Some(adapter) => {
                self.adapters.insert(at.to_string(), adapter);
            }
            None => {
                self.adapters.shift_remove(at);
            }
        }
        self.bind();
    }
}

impl fmt::Debug for LiveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveModel")
            .field("data", &self.data)
            .field("register", &self.register)
            .field("bound", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for LiveModel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}
