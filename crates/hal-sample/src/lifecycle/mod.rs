//! # Application Lifecycle
//!
//! This module wires the sample application together: it creates the shared
//! [`TodoStore`](crate::model::TodoStore), registers the resources with a
//! [`Registry`](hal_framework::Registry) and exposes the request entry point.
//!
//! ## The TodoApi Pattern
//!
//! Resources are simple; **wiring them together** is where the configuration lives.
//! [`TodoApi`] is the one place that knows every URL template and endpoint name:
//!
//! ```rust
//! use hal_framework::HalConfig;
//! use hal_sample::lifecycle::TodoApi;
//!
//! let api = TodoApi::new(HalConfig::default()).unwrap();
//! let doc = api.handle("todolist", &Default::default(), "embed=1").unwrap();
//! assert_eq!(doc["_embedded"]["items"].as_array().unwrap().len(), 3);
//! ```
//!
//! Once built, the registry is immutable and shared behind an `Arc`, so `TodoApi` can
//! be cloned into as many request tasks as needed.
//!
//! ## Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the entire application.

pub mod todo_api;
pub mod tracing;

pub use todo_api::*;
pub use self::tracing::*;
