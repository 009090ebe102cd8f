//! # HalResource Trait
//!
//! The `HalResource` trait defines the contract that every resource type (Todo, TodoList, …)
//! implements to be rendered by the framework. A resource is a set of up to three
//! producers, all keyed by the same [`Params`]:
//!
//! - [`data`](HalResource::data): the plain fields of the document.
//! - [`links`](HalResource::links): extra relations for `_links`.
//! - [`embedded`](HalResource::embedded): nested resources for `_embedded`.
//!
//! # Provided Methods
//! Every producer has a default. You only implement the capabilities your resource has.
//! `links` and `embedded` return `None` by default, which means "this resource has no such
//! producer"; returning `Some(Ok(..))` with nothing in it means "the producer ran and found
//! nothing". The assembler treats both the same way, but the distinction is visible to
//! callers and to tests.
//!
//! # Example
//!
//! ```rust
//! use hal_framework::{Document, HalResource, Link, Links, Params, ProducerResult};
//! use serde_json::json;
//!
//! struct Todo;
//!
//! impl HalResource for Todo {
//!     fn data(&self, params: &Params) -> ProducerResult<Option<Document>> {
//!         let todo = params.require("todo")?;
//!         Ok(Some(hal_framework::to_document(&json!({ "task": todo }))?))
//!     }
//!
//!     fn links(&self, _params: &Params) -> Option<ProducerResult<Links>> {
//!         Some(Ok(Link::new("collection").href("/todos").into()))
//!     }
//! }
//! ```

use crate::embedded::Embedded;
use crate::error::{HalError, HalResult, ProducerResult};
use crate::link::Link;
use crate::params::Params;
use serde::Serialize;
use serde_json::{Map, Value};

/// A rendered HAL document: data fields plus the reserved `_links` / `_embedded` keys.
pub type Document = Map<String, Value>;

/// What a links producer returns.
pub type Links = OneOrMany<Link>;

/// What an embedded producer returns.
pub type Embeddeds = OneOrMany<Embedded>;

/// A producer result that is either a single item or a sequence of them.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl From<Link> for OneOrMany<Link> {
    fn from(link: Link) -> Self {
        OneOrMany::One(link)
    }
}

impl From<Embedded> for OneOrMany<Embedded> {
    fn from(embedded: Embedded) -> Self {
        OneOrMany::One(embedded)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

impl<T> FromIterator<T> for OneOrMany<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OneOrMany::Many(iter.into_iter().collect())
    }
}

/// Trait that any resource must implement to be rendered as a HAL document.
///
/// Implementations hold no per-request state: the same instance serves every request,
/// possibly from several threads at once, hence the `Send + Sync` bound.
pub trait HalResource: Send + Sync + 'static {
    /// The plain data of the document. `None` renders an empty base document.
    fn data(&self, _params: &Params) -> ProducerResult<Option<Document>> {
        Ok(None)
    }

    /// Additional links. `None` means the resource declares no links producer.
    fn links(&self, _params: &Params) -> Option<ProducerResult<Links>> {
        None
    }

    /// Embedded resources. `None` means the resource declares no embedded producer.
    fn embedded(&self, _params: &Params) -> Option<ProducerResult<Embeddeds>> {
        None
    }
}

/// Serializes a value into a document map. The value must serialize to a JSON object.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> HalResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Err(HalError::NotAnObject("null")),
        Value::Bool(_) => Err(HalError::NotAnObject("a boolean")),
        Value::Number(_) => Err(HalError::NotAnObject("a number")),
        Value::String(_) => Err(HalError::NotAnObject("a string")),
        Value::Array(_) => Err(HalError::NotAnObject("an array")),
    }
}
