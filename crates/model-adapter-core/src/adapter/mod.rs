//! Adapter declarations and their normalization
//!
//! Callers declare, per model key, where the value comes from and how it is
//! converted. The accepted forms are a bare path, a computed path, the
//! identity marker, or an explicit descriptor built with [`AdapterBuilder`]
//! or read from a declarative [`schema`] document.
//!
//! # Module Organization
//!
//! - [`types`] - Adapter forms and the canonical [`Descriptor`]
//! - [`builder`] - Fluent builder for explicit descriptors
//! - [`normalize`](mod@normalize) - Normalization and adapter map helpers
//! - [`schema`] - Declarative (JSON/YAML) adapter documents
//!
//! # Examples
//!
//! ```
//! use model_adapter_core::{adapter_map, normalize, Adapter};
//! use serde_json::json;
//!
//! let adapters = adapter_map([
//!     ("title", Adapter::from("payload.title")),
//!     ("count", Adapter::builder().default_value(json!(0)).build()),
//! ]);
//!
//! let title = normalize(&adapters["title"], "title");
//! assert_eq!(title.path.as_str(), "payload.title");
//!
//! let count = normalize(&adapters["count"], "count");
//! assert_eq!(count.path.as_str(), "count");
//! assert_eq!(count.default_value, Some(json!(0)));
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

// Adapter forms and descriptors
pub mod types;

// Descriptor builder API
pub mod builder;

// Normalization rules
pub mod normalize;

// Declarative adapter documents
pub mod schema;


pub use builder::AdapterBuilder;
pub use normalize::{merge_adapters, normalize, one_to_one_adapters};
pub use schema::{AdapterEntry, AdapterSchema, DescriptorEntry};
pub use types::{
    adapter_map, Adapter, AdapterDescriptor, AdapterMap, DefaultValue, Descriptor, PathSpec,
};
