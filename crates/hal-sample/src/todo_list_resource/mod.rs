//! # TodoList Resource
//!
//! The todo collection, served at `/todos`. Its document carries the number of todos,
//! an `items` link per todo (titled with the todo id) and, when embedding is requested,
//! every todo rendered through the [`Todo`] resource.

use crate::model::TodoStore;
use crate::todo_resource::{Todo, COLLECTION_PATH};
use hal_framework::{
    to_document, Binding, Document, Embedded, Embeddeds, HalResource, Link, LinkTarget, Links,
    Params, ProducerResult,
};
use serde::Serialize;

#[derive(Serialize)]
struct TodoListData {
    size: usize,
}

pub struct TodoList {
    store: TodoStore,
}

impl TodoList {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

impl HalResource for TodoList {
    fn data(&self, _params: &Params) -> ProducerResult<Option<Document>> {
        let data = TodoListData {
            size: self.store.len(),
        };
        Ok(Some(to_document(&data)?))
    }

    fn links(&self, _params: &Params) -> Option<ProducerResult<Links>> {
        let items = Link::new("items").targets(self.store.ids().into_iter().map(|id| {
            LinkTarget::new(format!("{COLLECTION_PATH}/{id}")).attr("title", id)
        }));
        Some(Ok(items.into()))
    }

    fn embedded(&self, _params: &Params) -> Option<ProducerResult<Embeddeds>> {
        let items = Embedded::of::<Todo>("items")
            .bindings(self.store.ids().into_iter().map(|id| Binding::positional([id])));
        Some(Ok(items.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_links_title_each_item() {
        let list = TodoList::new(TodoStore::seeded());
        let links = list.links(&Params::new()).unwrap().unwrap().into_vec();
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].value(),
            Some(json!([
                {"href": "/todos/todo1", "title": "todo1"},
                {"href": "/todos/todo2", "title": "todo2"},
                {"href": "/todos/todo3", "title": "todo3"}
            ]))
        );
    }

    #[test]
    fn test_empty_store_embeds_nothing() {
        let list = TodoList::new(TodoStore::new());
        let embedded = list.embedded(&Params::new()).unwrap().unwrap().into_vec();
        assert!(!embedded[0].has_data());
        let data = list.data(&Params::new()).unwrap().unwrap();
        assert_eq!(data["size"], 0);
    }
}
