use crate::model::TodoStore;
use crate::todo_list_resource::TodoList;
use crate::todo_resource::Todo;
use hal_framework::{
    Document, HalConfig, HalResult, Params, RenderQuery, Registry, HAL_JSON_MEDIA_TYPE,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A rendered response, ready for the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HalResponse {
    pub content_type: &'static str,
    pub body: String,
}

/// The sample application: a todo store plus the registry serving it.
///
/// # Endpoints
///
/// | Endpoint   | Templates                         |
/// |------------|-----------------------------------|
/// | `todolist` | `/todos`                          |
/// | `todo`     | `/todos/<todo>`, `/items/<todo>`  |
///
/// Both endpoints count the requests they serve through a pre-render hook.
#[derive(Clone)]
pub struct TodoApi {
    registry: Arc<Registry>,
    store: TodoStore,
    requests: Arc<AtomicU64>,
}

impl TodoApi {
    /// Creates the API over the three seeded todos.
    pub fn new(config: HalConfig) -> HalResult<Self> {
        Self::with_store(config, TodoStore::seeded())
    }

    pub fn with_store(config: HalConfig, store: TodoStore) -> HalResult<Self> {
        let requests = Arc::new(AtomicU64::new(0));
        let mut registry = Registry::new(config);

        let counter = Arc::clone(&requests);
        registry
            .resource(TodoList::new(store.clone()))
            .url("/todos")
            .pre_render(move |params, _path| {
                let served = counter.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(served, embed = %params.embed, "Serving todo list");
                Ok(())
            })
            .register()?;

        let counter = Arc::clone(&requests);
        registry
            .resource(Todo::new(store.clone()))
            .url("/todos/<todo>")
            .url("/items/<todo>")
            .pre_render(move |_params, path| {
                let served = counter.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(served, todo = path.get("todo"), "Serving todo");
                Ok(())
            })
            .register()?;

        Ok(Self {
            registry: Arc::new(registry),
            store,
            requests,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Requests that made it past routing, including ones whose render failed.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Renders `endpoint` for the given path parameters and raw query string.
    pub fn handle(&self, endpoint: &str, path: &Params, query: &str) -> HalResult<Document> {
        self.registry
            .handle(endpoint, path, &RenderQuery::from_query_string(query))
    }

    /// Like [`handle`](Self::handle), serialized as pretty-printed HAL+JSON.
    pub fn respond(&self, endpoint: &str, path: &Params, query: &str) -> HalResult<HalResponse> {
        let document = self.handle(endpoint, path, query)?;
        let body = serde_json::to_string_pretty(&document)?;
        Ok(HalResponse {
            content_type: HAL_JSON_MEDIA_TYPE,
            body,
        })
    }
}
