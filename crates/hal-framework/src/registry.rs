//! # Resource Registry
//!
//! The registry is where resources meet their URL templates. Each registration binds one
//! [`HalResource`] to one or more templates (the first is primary and drives the self
//! link) under an endpoint name, and the result is an immutable [`ResourceDefinition`].
//!
//! Registration happens once at startup. Afterwards the registry is only read, so a
//! single `Registry` (typically behind an `Arc`) serves concurrent requests without any
//! locking.
//!
//! ```rust
//! use hal_framework::{HalResource, Params, RenderQuery, Registry};
//!
//! struct TodoList;
//! impl HalResource for TodoList {}
//!
//! let mut registry = Registry::default();
//! registry.resource(TodoList).url("/todos").register().unwrap();
//!
//! // The endpoint defaults to the lowercased type name.
//! let doc = registry
//!     .handle("todolist", &Params::new(), &RenderQuery::new(None, Some("true")))
//!     .unwrap();
//! assert_eq!(doc["_links"]["self"]["href"], "/todos");
//! ```

use crate::assembler::Renderer;
use crate::config::HalConfig;
use crate::embedded::EmbedTarget;
use crate::error::{HalError, HalResult, ProducerResult};
use crate::params::{Binding, Params};
use crate::render_params::{RenderParameters, RenderQuery};
use crate::resource::{Document, HalResource};
use crate::template::UrlTemplate;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Callback run before a request is rendered, e.g. for authorization checks or metrics.
///
/// It receives the resolved render parameters and the request's path parameters.
/// Returning an error aborts the request.
pub type PreRenderHook =
    Arc<dyn Fn(&RenderParameters, &Params) -> ProducerResult<()> + Send + Sync>;

/// A resource bound to its URL templates and endpoint name.
pub struct ResourceDefinition {
    endpoint: String,
    template: UrlTemplate,
    aliases: Vec<UrlTemplate>,
    resource: Arc<dyn HalResource>,
    type_id: TypeId,
    type_name: &'static str,
    pre_render: Option<PreRenderHook>,
}

impl ResourceDefinition {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The primary template, used for self links.
    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    /// Additional templates the resource is reachable under.
    pub fn aliases(&self) -> &[UrlTemplate] {
        &self.aliases
    }

    pub fn resource(&self) -> &dyn HalResource {
        self.resource.as_ref()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn has_pre_render(&self) -> bool {
        self.pre_render.is_some()
    }
}

impl fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("endpoint", &self.endpoint)
            .field("template", &self.template.as_str())
            .field("aliases", &self.aliases)
            .field("type_name", &self.type_name)
            .field("pre_render", &self.pre_render.is_some())
            .finish()
    }
}

/// Builder returned by [`Registry::resource`].
#[must_use = "call register() to add the resource"]
pub struct ResourceBuilder<'a, R: HalResource> {
    registry: &'a mut Registry,
    resource: R,
    urls: Vec<String>,
    endpoint: Option<String>,
    pre_render: Option<PreRenderHook>,
}

impl<'a, R: HalResource> ResourceBuilder<'a, R> {
    /// Adds a URL template. The first one added is the primary template.
    pub fn url(mut self, template: impl Into<String>) -> Self {
        self.urls.push(template.into());
        self
    }

    /// Overrides the endpoint name derived from the type name.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn pre_render<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RenderParameters, &Params) -> ProducerResult<()> + Send + Sync + 'static,
    {
        self.pre_render = Some(Arc::new(hook));
        self
    }

    /// Parses the templates and adds the definition to the registry.
    pub fn register(self) -> HalResult<Arc<ResourceDefinition>> {
        let type_name = type_name::<R>();
        let endpoint = self.endpoint.unwrap_or_else(|| default_endpoint(type_name));

        let mut templates = self
            .urls
            .iter()
            .map(|raw| UrlTemplate::parse(raw))
            .collect::<HalResult<Vec<_>>>()?;
        if templates.is_empty() {
            return Err(HalError::MissingUrl(endpoint));
        }
        let template = templates.remove(0);

        let definition = ResourceDefinition {
            endpoint,
            template,
            aliases: templates,
            resource: Arc::new(self.resource),
            type_id: TypeId::of::<R>(),
            type_name,
            pre_render: self.pre_render,
        };
        self.registry.insert(definition)
    }
}

/// Lowercased last path segment of a type name: `my_app::TodoList` becomes `todolist`.
fn default_endpoint(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base).to_lowercase()
}

/// Immutable-after-startup set of resource definitions, and the render entry point.
#[derive(Debug, Default)]
pub struct Registry {
    config: HalConfig,
    definitions: HashMap<String, Arc<ResourceDefinition>>,
    by_type: HashMap<TypeId, Vec<String>>,
}

impl Registry {
    pub fn new(config: HalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &HalConfig {
        &self.config
    }

    /// Starts registering `resource`.
    pub fn resource<R: HalResource>(&mut self, resource: R) -> ResourceBuilder<'_, R> {
        ResourceBuilder {
            registry: self,
            resource,
            urls: Vec::new(),
            endpoint: None,
            pre_render: None,
        }
    }

    /// Registers `resource` under the given templates with the default endpoint name.
    pub fn register<R: HalResource>(
        &mut self,
        resource: R,
        urls: &[&str],
    ) -> HalResult<Arc<ResourceDefinition>> {
        urls.iter()
            .fold(self.resource(resource), |builder, url| builder.url(*url))
            .register()
    }

    fn insert(&mut self, definition: ResourceDefinition) -> HalResult<Arc<ResourceDefinition>> {
        if self.definitions.contains_key(&definition.endpoint) {
            return Err(HalError::DuplicateEndpoint(definition.endpoint));
        }
        info!(
            endpoint = %definition.endpoint,
            template = %definition.template,
            aliases = definition.aliases.len(),
            "Registered"
        );
        let definition = Arc::new(definition);
        self.by_type
            .entry(definition.type_id)
            .or_default()
            .push(definition.endpoint.clone());
        self.definitions
            .insert(definition.endpoint.clone(), Arc::clone(&definition));
        Ok(definition)
    }

    pub fn get(&self, endpoint: &str) -> HalResult<Arc<ResourceDefinition>> {
        self.definitions
            .get(endpoint)
            .cloned()
            .ok_or_else(|| HalError::UnknownEndpoint(endpoint.to_string()))
    }

    /// Registered endpoint names, sorted.
    pub fn endpoints(&self) -> Vec<&str> {
        let mut endpoints: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        endpoints.sort_unstable();
        endpoints
    }

    /// Finds the definition an [`Embedded`](crate::Embedded) points at.
    pub fn resolve_target(&self, target: &EmbedTarget) -> HalResult<Arc<ResourceDefinition>> {
        match target {
            EmbedTarget::Endpoint(endpoint) => self.get(endpoint),
            EmbedTarget::Resource { id, name } => match self.by_type.get(id).map(Vec::as_slice) {
                Some([endpoint]) => self.get(endpoint),
                Some(endpoints) if !endpoints.is_empty() => Err(HalError::AmbiguousResource {
                    resource: *name,
                    endpoints: endpoints.to_vec(),
                }),
                _ => Err(HalError::UnregisteredResource(*name)),
            },
        }
    }

    /// Renders one document for `endpoint` (the assembler entry point).
    pub fn render(
        &self,
        endpoint: &str,
        binding: &Binding,
        params: RenderParameters,
    ) -> HalResult<Document> {
        let definition = self.get(endpoint)?;
        Renderer::new(self, params.embed).render(&definition, binding, params)
    }

    /// Request-facing entry point: resolves render parameters from the raw query values,
    /// runs the pre-render hook if one is registered, then renders the document.
    #[instrument(skip(self, path_params, query), fields(embed, include_links))]
    pub fn handle(
        &self,
        endpoint: &str,
        path_params: &Params,
        query: &RenderQuery,
    ) -> HalResult<Document> {
        let definition = self.get(endpoint)?;
        let params = query.parameters();
        tracing::Span::current()
            .record("embed", tracing::field::display(params.embed))
            .record("include_links", params.include_links);

        if let Some(hook) = &definition.pre_render {
            hook(&params, path_params).map_err(|source| {
                warn!(endpoint, error = %source, "Pre-render hook failed");
                HalError::PreRender {
                    endpoint: endpoint.to_string(),
                    source,
                }
            })?;
        }

        let document = Renderer::new(self, params.embed).render(
            &definition,
            &Binding::Named(path_params.clone()),
            params,
        )?;
        debug!(endpoint, fields = document.len(), "Handled");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TodoList;
    impl HalResource for TodoList {}

    mod nested {
        pub struct Todo;
        impl crate::HalResource for Todo {}
    }

    #[test]
    fn test_default_endpoint_is_lowercased_type_name() {
        let mut registry = Registry::default();
        let definition = registry.register(TodoList, &["/todos"]).unwrap();
        assert_eq!(definition.endpoint(), "todolist");
        assert_eq!(default_endpoint("a::b::Wrapper<c::D>"), "wrapper");
    }

    #[test]
    fn test_first_url_is_primary() {
        let mut registry = Registry::default();
        let definition = registry
            .register(nested::Todo, &["/todos/<todo>", "/items/<todo>"])
            .unwrap();
        assert_eq!(definition.template().as_str(), "/todos/<todo>");
        assert_eq!(definition.aliases().len(), 1);
        assert_eq!(definition.aliases()[0].as_str(), "/items/<todo>");
    }

    #[test]
    fn test_definition_records_type_and_hook() {
        let mut registry = Registry::default();
        let plain = registry.register(TodoList, &["/todos"]).unwrap();
        assert!(plain.type_name().ends_with("::TodoList"));
        assert!(!plain.has_pre_render());

        let hooked = registry
            .resource(nested::Todo)
            .url("/todos/<todo>")
            .pre_render(|_, _| Ok(()))
            .register()
            .unwrap();
        assert!(hooked.type_name().ends_with("nested::Todo"));
        assert!(hooked.has_pre_render());
    }

    #[test]
    fn test_registration_errors() {
        let mut registry = Registry::default();
        assert!(matches!(
            registry.resource(TodoList).register(),
            Err(HalError::MissingUrl(endpoint)) if endpoint == "todolist"
        ));
        assert!(matches!(
            registry.register(TodoList, &["/todos/<todo"]),
            Err(HalError::MalformedTemplate { .. })
        ));
        registry.register(TodoList, &["/todos"]).unwrap();
        assert!(matches!(
            registry.register(TodoList, &["/lists"]),
            Err(HalError::DuplicateEndpoint(endpoint)) if endpoint == "todolist"
        ));
    }

    #[test]
    fn test_resolve_target_by_type() {
        let mut registry = Registry::default();
        assert!(matches!(
            registry.resolve_target(&EmbedTarget::of::<nested::Todo>()),
            Err(HalError::UnregisteredResource(_))
        ));

        registry.register(nested::Todo, &["/todos/<todo>"]).unwrap();
        let definition = registry
            .resolve_target(&EmbedTarget::of::<nested::Todo>())
            .unwrap();
        assert_eq!(definition.endpoint(), "todo");

        registry
            .resource(nested::Todo)
            .url("/archive/<todo>")
            .endpoint("archived")
            .register()
            .unwrap();
        assert!(matches!(
            registry.resolve_target(&EmbedTarget::of::<nested::Todo>()),
            Err(HalError::AmbiguousResource { endpoints, .. }) if endpoints.len() == 2
        ));
        assert_eq!(registry.endpoints(), ["archived", "todo"]);
    }

    #[test]
    fn test_unknown_endpoint() {
        let registry = Registry::default();
        assert!(matches!(
            registry.handle("nope", &Params::new(), &RenderQuery::default()),
            Err(HalError::UnknownEndpoint(endpoint)) if endpoint == "nope"
        ));
    }
}
