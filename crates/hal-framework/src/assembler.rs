//! # Document Assembler
//!
//! This module turns one [`ResourceDefinition`] plus a [`Binding`] into a HAL document.
//!
//! ## Algorithm
//!
//! 1. **Merge parameters**: positional values pair with the template's placeholders in
//!    order, named values are laid on top, and `%2F` in placeholder values is decoded.
//! 2. **Data**: the data producer's map becomes the base document (empty when there is
//!    no data).
//! 3. **Links** (only when `include_links`): `_links.self` is the primary template
//!    resolved against the merged parameters. Links from the links producer are merged
//!    in by relation; empty links are dropped, and a producer link named `self`
//!    replaces the synthesized one.
//! 4. **Embedded** (only while the depth budget allows): each non-empty [`Embedded`] from
//!    the embedded producer is rendered one level down and stored by relation. When
//!    nothing is left, `_embedded` is omitted rather than emitted empty.
//!
//! Producer errors are not recovered; they are wrapped in [`HalError::Producer`] and
//! returned to the caller.
//!
//! ## Recursion
//!
//! Nesting is bounded by the requested depth, however large. Only an unbounded request
//! is held to [`HalConfig::max_nesting`](crate::HalConfig); against a cyclic embedding
//! graph it fails the whole render with [`HalError::NestingLimitExceeded`].
//!
//! [`Embedded`]: crate::Embedded

use crate::error::{HalError, HalResult, ProducerError};
use crate::link::Link;
use crate::params::{Binding, Params};
use crate::registry::{Registry, ResourceDefinition};
use crate::render_params::{EmbedDepth, RenderParameters};
use crate::resource::Document;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// Reserved key holding the links of a document.
pub const LINKS_KEY: &str = "_links";

/// Reserved key holding the embedded documents of a document.
pub const EMBEDDED_KEY: &str = "_embedded";

/// Renders documents against a registry, tracking how deep the current render is nested.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'r> {
    registry: &'r Registry,
    level: u32,
    unbounded: bool,
}

impl<'r> Renderer<'r> {
    /// A renderer for a top-level document requested with the `embed` budget.
    pub fn new(registry: &'r Registry, embed: EmbedDepth) -> Self {
        Self {
            registry,
            level: 0,
            unbounded: embed.is_unbounded(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// How many embedding levels above the document being rendered.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// A renderer one level deeper.
    ///
    /// Fails when the top-level request was unbounded and the new level crosses the
    /// configured nesting limit. Finite requests are bounded by their own budget.
    pub fn nested(&self) -> HalResult<Renderer<'r>> {
        let level = self.level + 1;
        match self.registry.config().max_nesting {
            Some(limit) if self.unbounded && level > limit => {
                warn!(limit, "Nesting limit exceeded");
                Err(HalError::NestingLimitExceeded(limit))
            }
            _ => Ok(Self { level, ..*self }),
        }
    }

    /// Assembles one document.
    pub fn render(
        &self,
        definition: &ResourceDefinition,
        binding: &Binding,
        params: RenderParameters,
    ) -> HalResult<Document> {
        let endpoint = definition.endpoint();
        debug!(
            endpoint,
            level = self.level,
            embed = %params.embed,
            include_links = params.include_links,
            "Rendering"
        );

        let merged = match binding {
            Binding::Positional(values) => {
                definition.template().merge(values, &Params::new())?
            }
            Binding::Named(named) => definition.template().merge(&[], named)?,
        };

        let resource = definition.resource();
        let mut document = resource
            .data(&merged)
            .map_err(|source| producer_failed(endpoint, "data", source))?
            .unwrap_or_default();

        if params.include_links {
            let links = self.links(definition, &merged)?;
            document.insert(LINKS_KEY.to_string(), Value::Object(links));
        }

        if params.embed.allows_embedding() {
            if let Some(embedded) = self.embedded(definition, &merged, params)? {
                document.insert(EMBEDDED_KEY.to_string(), Value::Object(embedded));
            }
        }

        Ok(document)
    }

    fn links(
        &self,
        definition: &ResourceDefinition,
        merged: &Params,
    ) -> HalResult<Map<String, Value>> {
        let endpoint = definition.endpoint();
        let mut links = Map::new();

        let self_href = definition.template().resolve(merged)?;
        if let Some(value) = Link::unencoded("self").href(self_href).value() {
            links.insert("self".to_string(), value);
        }

        let Some(produced) = definition.resource().links(merged) else {
            return Ok(links);
        };
        let produced = produced.map_err(|source| producer_failed(endpoint, "links", source))?;
        for link in produced.into_vec() {
            match link.value() {
                Some(value) => {
                    links.insert(link.rel().to_string(), value);
                }
                None => trace!(endpoint, rel = link.rel(), "Dropping empty link"),
            }
        }
        Ok(links)
    }

    fn embedded(
        &self,
        definition: &ResourceDefinition,
        merged: &Params,
        params: RenderParameters,
    ) -> HalResult<Option<Map<String, Value>>> {
        let endpoint = definition.endpoint();
        let Some(produced) = definition.resource().embedded(merged) else {
            return Ok(None);
        };
        let produced = produced.map_err(|source| producer_failed(endpoint, "embedded", source))?;

        let mut embedded = Map::new();
        for item in produced.into_vec() {
            if !item.has_data() {
                trace!(endpoint, rel = item.rel(), "Dropping empty embedded");
                continue;
            }
            if let Some(value) = item.data(self, params)? {
                embedded.insert(item.rel().to_string(), value);
            }
        }
        Ok((!embedded.is_empty()).then_some(embedded))
    }
}

fn producer_failed(endpoint: &str, producer: &'static str, source: ProducerError) -> HalError {
    warn!(endpoint, producer, error = %source, "Producer failed");
    HalError::Producer {
        endpoint: endpoint.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HalConfig;

    #[test]
    fn test_nested_tracks_level() {
        let registry = Registry::default();
        let top = Renderer::new(&registry, EmbedDepth::levels(2));
        assert_eq!(top.level(), 0);
        let child = top.nested().unwrap();
        assert_eq!(child.level(), 1);
        assert_eq!(child.nested().unwrap().level(), 2);
        assert!(std::ptr::eq(child.registry(), &registry));
    }

    #[test]
    fn test_limit_only_applies_to_unbounded_requests() {
        let registry = Registry::new(HalConfig::default().with_max_nesting(Some(1)));

        let finite = Renderer::new(&registry, EmbedDepth::levels(5));
        let deep = finite.nested().unwrap().nested().unwrap();
        assert_eq!(deep.level(), 2);

        let unbounded = Renderer::new(&registry, EmbedDepth::UNBOUNDED);
        let first = unbounded.nested().unwrap();
        assert!(matches!(
            first.nested(),
            Err(HalError::NestingLimitExceeded(1))
        ));
    }
}
