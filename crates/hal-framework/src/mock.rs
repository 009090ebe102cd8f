//! # Mock Resources & Testing Guide
//!
//! `MockResource` is a scripted [`HalResource`]: each producer either returns what the
//! test told it to, fails with an injected error, or is absent. Every producer call is
//! recorded together with the merged parameters it received, so a test can assert
//! exactly what the assembler asked for.
//!
//! ## When to use a Mock vs a real Resource
//!
//! | Feature | MockResource | Real resource |
//! |---------|--------------|---------------|
//! | **Setup** | One builder chain | A type plus a data source |
//! | **Call recording** | Built in | Manual |
//! | **Error Injection** | Easy (`return_err`) | Requires specific state |
//! | **Use Case** | Testing the assembler and registry | Testing your own producers |
//!
//! ## Example
//!
//! ```rust
//! use hal_framework::mock::{MockProducer, MockResource};
//! use hal_framework::{Params, RenderQuery, Registry};
//! use serde_json::json;
//!
//! let mock = MockResource::new().return_data(json!({"task": "build an API"}));
//! let handle = mock.handle();
//!
//! let mut registry = Registry::default();
//! registry.resource(mock).url("/todos/<todo>").endpoint("todo").register().unwrap();
//!
//! let path = Params::new().with("todo", "a%2Fb");
//! let doc = registry.handle("todo", &path, &RenderQuery::default()).unwrap();
//! assert_eq!(doc["task"], "build an API");
//!
//! // The producer saw the decoded placeholder value.
//! handle.verify_calls(MockProducer::Data, &[Params::new().with("todo", "a/b")]);
//! ```

use crate::error::ProducerResult;
use crate::params::Params;
use crate::resource::{to_document, Document, Embeddeds, HalResource, Links};
use serde_json::Value;
use std::sync::{Arc, Mutex};

type Script<T> = Arc<dyn Fn(&Params) -> ProducerResult<T> + Send + Sync>;

/// Which producer of a [`MockResource`] was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockProducer {
    Data,
    Links,
    Embedded,
}

/// Error returned by producers scripted with [`MockResource::return_err`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockFailure(pub String);

/// A scripted resource that records its producer calls.
#[derive(Clone, Default)]
pub struct MockResource {
    data: Option<Script<Option<Document>>>,
    links: Option<Script<Links>>,
    embedded: Option<Script<Embeddeds>>,
    calls: Arc<Mutex<Vec<(MockProducer, Params)>>>,
}

impl MockResource {
    /// A resource with no producers at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the data producer to return `value`, which must be a JSON object.
    pub fn return_data(self, value: Value) -> Self {
        let document = to_document(&value).expect("mock data must be a JSON object");
        self.with_data(move |_| Ok(Some(document.clone())))
    }

    pub fn with_data<F>(mut self, producer: F) -> Self
    where
        F: Fn(&Params) -> ProducerResult<Option<Document>> + Send + Sync + 'static,
    {
        self.data = Some(Arc::new(producer));
        self
    }

    pub fn with_links<F>(mut self, producer: F) -> Self
    where
        F: Fn(&Params) -> ProducerResult<Links> + Send + Sync + 'static,
    {
        self.links = Some(Arc::new(producer));
        self
    }

    pub fn with_embedded<F>(mut self, producer: F) -> Self
    where
        F: Fn(&Params) -> ProducerResult<Embeddeds> + Send + Sync + 'static,
    {
        self.embedded = Some(Arc::new(producer));
        self
    }

    /// Scripts `producer` to fail with `message`.
    pub fn return_err(self, producer: MockProducer, message: &str) -> Self {
        let message = message.to_string();
        match producer {
            MockProducer::Data => {
                self.with_data(move |_| Err(MockFailure(message.clone()).into()))
            }
            MockProducer::Links => {
                self.with_links(move |_| Err(MockFailure(message.clone()).into()))
            }
            MockProducer::Embedded => {
                self.with_embedded(move |_| Err(MockFailure(message.clone()).into()))
            }
        }
    }

    /// A handle onto the call log that stays usable after the mock is registered.
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            calls: Arc::clone(&self.calls),
        }
    }

    fn record(&self, producer: MockProducer, params: &Params) {
        self.calls
            .lock()
            .unwrap()
            .push((producer, params.clone()));
    }
}

impl HalResource for MockResource {
    fn data(&self, params: &Params) -> ProducerResult<Option<Document>> {
        match &self.data {
            Some(script) => {
                self.record(MockProducer::Data, params);
                script(params)
            }
            None => Ok(None),
        }
    }

    fn links(&self, params: &Params) -> Option<ProducerResult<Links>> {
        let script = self.links.as_ref()?;
        self.record(MockProducer::Links, params);
        Some(script(params))
    }

    fn embedded(&self, params: &Params) -> Option<ProducerResult<Embeddeds>> {
        let script = self.embedded.as_ref()?;
        self.record(MockProducer::Embedded, params);
        Some(script(params))
    }
}

/// Read side of a [`MockResource`]'s call log.
#[derive(Clone)]
pub struct MockHandle {
    calls: Arc<Mutex<Vec<(MockProducer, Params)>>>,
}

impl MockHandle {
    /// Parameters of every call to `producer`, in call order.
    pub fn calls(&self, producer: MockProducer) -> Vec<Params> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(called, _)| *called == producer)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn call_count(&self, producer: MockProducer) -> usize {
        self.calls(producer).len()
    }

    /// Panics unless `producer` was called exactly with `expected`, in order.
    pub fn verify_calls(&self, producer: MockProducer, expected: &[Params]) {
        let actual = self.calls(producer);
        if actual != expected {
            panic!(
                "{producer:?} producer calls mismatch.\n  expected: {expected:?}\n  \
                 actual:   {actual:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unscripted_producers_are_absent_and_unrecorded() {
        let mock = MockResource::new();
        let handle = mock.handle();
        let params = Params::new();
        assert!(mock.data(&params).unwrap().is_none());
        assert!(mock.links(&params).is_none());
        assert!(mock.embedded(&params).is_none());
        assert_eq!(handle.call_count(MockProducer::Data), 0);
    }

    #[test]
    fn test_return_err_fails_the_chosen_producer() {
        let mock = MockResource::new()
            .return_data(json!({"a": 1}))
            .return_err(MockProducer::Links, "links offline");
        let params = Params::new().with("x", "1");
        assert!(mock.data(&params).unwrap().is_some());
        let err = mock.links(&params).unwrap().unwrap_err();
        assert_eq!(err.to_string(), "links offline");

        let handle = mock.handle();
        handle.verify_calls(MockProducer::Links, &[params.clone()]);
        handle.verify_calls(MockProducer::Data, &[params]);
    }

    #[test]
    #[should_panic(expected = "producer calls mismatch")]
    fn test_verify_calls_panics_on_mismatch() {
        let mock = MockResource::new().return_data(json!({}));
        mock.data(&Params::new().with("todo", "a")).unwrap();
        mock.handle()
            .verify_calls(MockProducer::Data, &[Params::new().with("todo", "b")]);
    }
}
