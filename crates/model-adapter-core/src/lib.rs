//! Model Adapter Core - bidirectional mapping between source data and models
//!
//! This crate adapts plain nested source documents (typically backend API
//! payloads) into application-shaped models and restores models back into
//! source-shaped documents.
//!
//! # Main Components
//!
//! - **Paths**: dotted addressing into nested JSON with escaped dots and array indices
//! - **Adapters**: per-key declarations (path, default, validator, transformer, restorer)
//! - **Mapping**: forward [`mapper::adapt`] and inverse [`mapper::restore`]
//! - **Models**: the copying [`Model`] and the live-binding [`LiveModel`]
//! - **Diagnostics**: advisory validation results routed to a [`DiagnosticSink`]
//!
//! # Example
//!
//! ```
//! use model_adapter_core::{adapter_map, Adapter, Model, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let adapters = adapter_map([
//!         ("title", Adapter::from("payload.title")),
//!         ("tags", Adapter::builder().path("payload.tags").default_with(|| json!([])).build()),
//!     ]);
//!
//!     let source = json!({"payload": {"title": "Hello", "tags": null}});
//!     let model = Model::with_copy(adapters, Some(&source), false)?;
//!
//!     assert_eq!(model.to_value(), json!({"title": "Hello", "tags": []}));
//!     assert_eq!(model.restore()?, json!({"payload": {"title": "Hello", "tags": []}}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod adapter;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod live;
pub mod mapper;
pub mod model;
pub mod path;
pub mod transformer;
pub mod validator;

// Re-export main types for convenience
pub use adapter::{
    adapter_map, merge_adapters, normalize, one_to_one_adapters, Adapter, AdapterBuilder,
    AdapterDescriptor, AdapterMap, AdapterSchema, DefaultValue, Descriptor, PathSpec,
};
pub use defaults::defaults_deep;
pub use diagnostics::{
    default_sink, CollectingSink, Diagnostic, DiagnosticSink, LogSink, NoopSink, SharedSink,
};
pub use error::{Error, Result};
pub use live::{LiveModel, LiveModelBuilder, Register};
pub use model::{Model, ModelBuilder};
pub use path::Path;
pub use transformer::Transformer;
pub use validator::{validate, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
