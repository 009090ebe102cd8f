//! # Tracing Setup
//!
//! Structured logging for the sample application, driven by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run -p hal-sample     # registrations and requests
//! RUST_LOG=debug cargo run -p hal-sample    # every assembled document
//! RUST_LOG=trace cargo run -p hal-sample    # dropped links and embedding steps
//! ```
//!
//! The request entry point runs inside a `handle` span that records the endpoint, the
//! embed depth and whether links were requested, so nested renders show up under the
//! request that caused them.

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Spans already name the endpoint
        .compact()
        .init();
}
