//! # HAL Todo Sample
//!
//! A small todo API rendered as HAL+JSON.
//!
//! ## Core Components
//!
//! - **[model](hal_sample::model)**: The todo store and entries.
//! - **[todo_resource](hal_sample::todo_resource)** and
//!   **[todo_list_resource](hal_sample::todo_list_resource)**: The two
//!   [`HalResource`](hal_framework::HalResource) implementations.
//! - **[lifecycle](hal_sample::lifecycle)**: Wires the resources into a
//!   [`Registry`](hal_framework::Registry) and sets up tracing.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=debug cargo run -p hal-sample
//! HAL_MAX_NESTING=8 cargo run -p hal-sample
//! ```
//!
//! The binary renders a handful of requests concurrently and prints each response.

use hal_framework::{HalConfig, Params};
use hal_sample::lifecycle::{setup_tracing, TodoApi};
use hal_sample::model::TodoEntry;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = HalConfig::from_env().map_err(|e| e.to_string())?;
    info!(max_nesting = ?config.max_nesting, "Starting todo API");

    let api = TodoApi::new(config).map_err(|e| e.to_string())?;
    let id = api.store().add(TodoEntry::new("write the docs"));
    info!(todo = %id, "Added todo");

    let requests = [
        ("todolist", Params::new(), "links=true"),
        ("todolist", Params::new(), "embed=1&links=yes"),
        ("todo", Params::from([("todo", "todo1")]), "links=1"),
        ("todo", Params::from([("todo", id.as_str())]), ""),
        ("todo", Params::from([("todo", "todo42")]), ""),
    ];

    let mut handles = Vec::new();
    for (n, (endpoint, path, query)) in requests.into_iter().enumerate() {
        let api = api.clone();
        let span = tracing::info_span!("request", n);
        handles.push(tokio::spawn(
            async move {
                let response = api.respond(endpoint, &path, query);
                (endpoint, query, response)
            }
            .instrument(span),
        ));
    }

    for handle in handles {
        let (endpoint, query, response) = handle.await.map_err(|e| e.to_string())?;
        match response {
            Ok(response) => {
                println!("GET {endpoint}?{query}");
                println!("Content-Type: {}", response.content_type);
                println!("{}\n", response.body);
            }
            Err(e) => error!(endpoint, query, error = %e, "Request failed"),
        }
    }

    info!(requests = api.request_count(), "Application completed successfully");
    Ok(())
}
