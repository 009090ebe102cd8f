//! # Embedded Resources
//!
//! An [`Embedded`] names a relation in `_embedded` and the resource that fills it, plus one
//! [`Binding`] per nested document. The target is either a resource type
//! ([`Embedded::of`]) or an endpoint name ([`Embedded::endpoint`]); both are looked up in
//! the registry when the document is rendered.
//!
//! ```rust
//! use hal_framework::{Embedded, HalResource};
//!
//! struct Todo;
//! impl HalResource for Todo {}
//!
//! let items = Embedded::of::<Todo>("items")
//!     .positional(["todo1"])
//!     .positional(["todo2"]);
//! assert!(items.has_data());
//! assert!(!Embedded::of::<Todo>("items").has_data());
//! ```
//!
//! Rendering follows the same collapse rule as [`Link`](crate::Link): no bindings renders
//! nothing, one renders a single document, two or more render an array.

use crate::assembler::Renderer;
use crate::error::HalResult;
use crate::params::{Binding, Params};
use crate::render_params::RenderParameters;
use crate::resource::HalResource;
use serde_json::Value;
use std::any::{type_name, TypeId};
use tracing::trace;

/// Which registered resource an [`Embedded`] points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedTarget {
    /// The endpoint registered for a resource type.
    Resource { id: TypeId, name: &'static str },
    /// An endpoint by name.
    Endpoint(String),
}

impl EmbedTarget {
    pub fn of<R: HalResource>() -> Self {
        EmbedTarget::Resource {
            id: TypeId::of::<R>(),
            name: type_name::<R>(),
        }
    }
}

/// A relation name plus the bindings of the nested documents to render under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    rel: String,
    target: EmbedTarget,
    bindings: Vec<Binding>,
    always_as_list: bool,
}

impl Embedded {
    /// Embeds documents of the resource type `R`.
    pub fn of<R: HalResource>(rel: impl Into<String>) -> Self {
        Self::with_target(rel, EmbedTarget::of::<R>())
    }

    /// Embeds documents of the resource registered under `endpoint`.
    pub fn endpoint(rel: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_target(rel, EmbedTarget::Endpoint(endpoint.into()))
    }

    fn with_target(rel: impl Into<String>, target: EmbedTarget) -> Self {
        Self {
            rel: rel.into(),
            target,
            bindings: Vec::new(),
            always_as_list: false,
        }
    }

    /// Adds a nested document addressed by positional parameters.
    pub fn positional<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binding(Binding::positional(values))
    }

    /// Adds a nested document addressed by named parameters.
    pub fn named(self, params: impl Into<Params>) -> Self {
        self.binding(Binding::named(params))
    }

    pub fn binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn bindings<I: IntoIterator<Item = Binding>>(mut self, bindings: I) -> Self {
        self.bindings.extend(bindings);
        self
    }

    pub fn always_as_list(mut self) -> Self {
        self.always_as_list = true;
        self
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn target(&self) -> &EmbedTarget {
        &self.target
    }

    /// True when there is at least one nested document to render.
    pub fn has_data(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Renders every binding against the target resource, one level further down.
    ///
    /// `params` are the parameters of the *embedding* document; the nested documents get
    /// the decremented depth and the same `include_links`.
    pub fn data(
        &self,
        renderer: &Renderer<'_>,
        params: RenderParameters,
    ) -> HalResult<Option<Value>> {
        if !self.has_data() {
            return Ok(None);
        }
        let definition = renderer.registry().resolve_target(&self.target)?;
        let nested = renderer.nested()?;
        let nested_params = RenderParameters::new(params.embed.decremented(), params.include_links);
        trace!(
            rel = %self.rel,
            endpoint = definition.endpoint(),
            count = self.bindings.len(),
            "Embedding"
        );

        let mut documents = Vec::with_capacity(self.bindings.len());
        for binding in &self.bindings {
            let document = nested.render(&definition, binding, nested_params)?;
            documents.push(Value::Object(document));
        }

        if documents.len() == 1 && !self.always_as_list {
            Ok(documents.pop())
        } else {
            Ok(Some(Value::Array(documents)))
        }
    }
}
