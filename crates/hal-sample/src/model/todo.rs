use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// A single todo item as it appears in the `data` part of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoEntry {
    pub task: String,
}

impl TodoEntry {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }
}

/// In-memory todo storage shared by the `Todo` and `TodoList` resources.
///
/// Cloning is cheap and every clone sees the same entries. Ids are handed out
/// sequentially as `todo1`, `todo2`, ... and entries iterate in key order.
#[derive(Debug, Clone)]
pub struct TodoStore {
    todos: Arc<RwLock<BTreeMap<String, TodoEntry>>>,
    next_id: Arc<AtomicU64>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Arc::default(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// A store holding the three classic todos.
    pub fn seeded() -> Self {
        let store = Self::new();
        for task in ["build an API", "?????", "profit!"] {
            store.add(TodoEntry::new(task));
        }
        store
    }

    /// Stores `entry` and returns its id.
    pub fn add(&self, entry: TodoEntry) -> String {
        let id = format!("todo{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.todos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), entry);
        id
    }

    pub fn get(&self, id: &str) -> Option<TodoEntry> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// All ids, in order.
    pub fn ids(&self) -> Vec<String> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.todos.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_store() {
        let store = TodoStore::seeded();
        assert_eq!(store.ids(), ["todo1", "todo2", "todo3"]);
        assert_eq!(store.get("todo3"), Some(TodoEntry::new("profit!")));
        assert_eq!(store.get("todo4"), None);
    }

    #[test]
    fn test_clones_share_entries() {
        let store = TodoStore::new();
        let clone = store.clone();
        let id = clone.add(TodoEntry::new("write docs"));
        assert_eq!(id, "todo1");
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }
}
