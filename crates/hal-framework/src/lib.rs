//! # HAL Framework
//!
//! This crate renders resources as **HAL** (Hypertext Application Language) documents:
//! plain JSON objects augmented with a `_links` map of relations and an optional
//! `_embedded` map of nested documents.
//!
//! ```json
//! { "size": 3,
//!   "_links":    { "self": {"href": "/todos"}, "items": [ {"href": "/todos/todo1"}, ... ] },
//!   "_embedded": { "items": [ {"task": "build an API"}, ... ] } }
//! ```
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Resource Layer** ([`HalResource`]) - Your producers: `data`, `links`, `embedded`
//! 2. **Registration Layer** ([`Registry`]) - Binds resources to URL templates and endpoint names
//! 3. **Assembly Layer** ([`Renderer`]) - Turns a resource plus parameters into a document
//!
//! You write the producers **once**; the framework handles self links, URL encoding,
//! depth-limited recursion into embedded resources, and the single-vs-list shape of
//! every relation.
//!
//! ## Core Abstractions
//!
//! ### [`HalResource`] - The Producers
//!
//! ```rust
//! use hal_framework::{
//!     to_document, Document, Embedded, Embeddeds, HalResource, Link, Links, Params,
//!     ProducerResult, RenderQuery, Registry,
//! };
//! use serde_json::json;
//!
//! struct Todo;
//!
//! impl HalResource for Todo {
//!     fn data(&self, params: &Params) -> ProducerResult<Option<Document>> {
//!         let task = format!("task for {}", params.require("todo")?);
//!         Ok(Some(to_document(&json!({ "task": task }))?))
//!     }
//!
//!     fn links(&self, _params: &Params) -> Option<ProducerResult<Links>> {
//!         Some(Ok(Link::new("collection").href("/todos").into()))
//!     }
//! }
//!
//! struct TodoList;
//!
//! impl HalResource for TodoList {
//!     fn data(&self, _params: &Params) -> ProducerResult<Option<Document>> {
//!         Ok(Some(to_document(&json!({ "size": 2 }))?))
//!     }
//!
//!     fn embedded(&self, _params: &Params) -> Option<ProducerResult<Embeddeds>> {
//!         let items = Embedded::of::<Todo>("items")
//!             .positional(["todo1"])
//!             .positional(["todo2"]);
//!         Some(Ok(items.into()))
//!     }
//! }
//!
//! let mut registry = Registry::default();
//! registry.register(Todo, &["/todos/<todo>"]).unwrap();
//! registry.register(TodoList, &["/todos"]).unwrap();
//!
//! let doc = registry
//!     .handle("todolist", &Params::new(), &RenderQuery::from_query_string("embed=1"))
//!     .unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(doc),
//!     json!({
//!         "size": 2,
//!         "_embedded": { "items": [ {"task": "task for todo1"}, {"task": "task for todo2"} ] }
//!     })
//! );
//! ```
//!
//! ## Concurrency Model
//!
//! - Resources and the registry hold no per-request state
//! - Rendering is a synchronous call chain; no locks, no channels
//! - One `Arc<Registry>` can serve any number of threads or tasks at once
//!
//! ## Error Handling
//!
//! Configuration mistakes and producer failures are both reported as [`HalError`].
//! Producers return [`ProducerResult`], so your own error types convert with `?`.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`MockResource`](mock::MockResource) that
//! records every producer call.

pub mod assembler;
pub mod config;
pub mod embedded;
pub mod error;
pub mod link;
pub mod mock;
pub mod params;
pub mod registry;
pub mod render_params;
pub mod resource;
pub mod template;

/// Media type HAL+JSON responses should be served with.
pub const HAL_JSON_MEDIA_TYPE: &str = "application/hal+json";

// Re-export core types for convenience
pub use assembler::{Renderer, EMBEDDED_KEY, LINKS_KEY};
pub use config::HalConfig;
pub use embedded::{EmbedTarget, Embedded};
pub use error::{HalError, HalResult, ProducerError, ProducerResult};
pub use link::{Link, LinkTarget};
pub use params::{Binding, Params};
pub use registry::{PreRenderHook, Registry, ResourceBuilder, ResourceDefinition};
pub use render_params::{is_truthy, EmbedDepth, RenderParameters, RenderQuery};
pub use resource::{to_document, Document, Embeddeds, HalResource, Links, OneOrMany};
pub use template::{decode_path_separators, UrlTemplate};
