//! # Todo Resource
//!
//! A single todo, served at `/todos/<todo>`.
//!
//! ## Structure
//!
//! - [`error`] - [`TodoError`] type for type-safe error handling
//! - [`Todo`] - the [`HalResource`] implementation
//!
//! ## Usage
//!
//! ```rust
//! use hal_framework::{Params, RenderQuery, Registry};
//! use hal_sample::model::TodoStore;
//! use hal_sample::todo_resource::Todo;
//!
//! let mut registry = Registry::default();
//! registry.register(Todo::new(TodoStore::seeded()), &["/todos/<todo>"]).unwrap();
//!
//! let doc = registry
//!     .handle("todo", &Params::from([("todo", "todo1")]), &RenderQuery::default())
//!     .unwrap();
//! assert_eq!(doc["task"], "build an API");
//! ```
//!
//! ## Links
//!
//! Every todo links back to its `collection`.

pub mod error;

pub use error::*;

use crate::model::TodoStore;
use hal_framework::{to_document, Document, HalResource, Link, Links, Params, ProducerResult};
use tracing::debug;

/// Path of the collection every todo links back to.
pub const COLLECTION_PATH: &str = "/todos";

pub struct Todo {
    store: TodoStore,
}

impl Todo {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

impl HalResource for Todo {
    fn data(&self, params: &Params) -> ProducerResult<Option<Document>> {
        let id = params.require("todo")?;
        let entry = self.store.get(id).ok_or_else(|| {
            debug!(todo = id, "Todo not found");
            TodoError::NotFound(id.to_string())
        })?;
        Ok(Some(to_document(&entry)?))
    }

    fn links(&self, _params: &Params) -> Option<ProducerResult<Links>> {
        Some(Ok(Link::new("collection").href(COLLECTION_PATH).into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_reads_the_store() {
        let todo = Todo::new(TodoStore::seeded());
        let doc = todo.data(&Params::from([("todo", "todo2")])).unwrap().unwrap();
        assert_eq!(serde_json::Value::Object(doc), json!({"task": "?????"}));
    }

    #[test]
    fn test_unknown_todo_is_an_error() {
        let todo = Todo::new(TodoStore::seeded());
        let err = todo.data(&Params::from([("todo", "todo9")])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<TodoError>(),
            Some(&TodoError::NotFound("todo9".to_string()))
        );
    }
}
