//! The tool and resource registry.
//!
//! Owns the mapping from operation name to descriptor and handler.
//! Populated once at startup through [`RegistryBuilder`] and consulted
//! per invocation by the router. Registering a name twice replaces the
//! earlier entry: the last registration wins.

use std::collections::HashMap;

use futures::future::{self, BoxFuture};
use futures::FutureExt;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use sandbox_mcp_core::content::Content;
use sandbox_mcp_core::handler::{ResourceError, ToolError};
use sandbox_mcp_core::resource::{Resource, ResourceTemplate};
use sandbox_mcp_core::tool::Tool;
use sandbox_mcp_core::uri_template::UriTemplate;

type ToolHandlerFn =
    Box<dyn Fn(Value) -> BoxFuture<'static, Result<Vec<Content>, ToolError>> + Send + Sync>;
type ResourceResolverFn = Box<dyn Fn() -> Result<String, ResourceError> + Send + Sync>;
type TemplateResolverFn = Box<dyn Fn(String) -> Result<String, ResourceError> + Send + Sync>;

struct ToolEntry {
    tool: Tool,
    handler: ToolHandlerFn,
}

struct ResourceEntry {
    resource: Resource,
    resolver: ResourceResolverFn,
}

struct TemplateEntry {
    template: ResourceTemplate,
    matcher: UriTemplate,
    resolver: TemplateResolverFn,
}

pub struct Registry {
    tools: HashMap<String, ToolEntry>,
    resources: Vec<ResourceEntry>,
    templates: Vec<TemplateEntry>,
}

pub struct RegistryBuilder {
    tools: HashMap<String, ToolEntry>,
    resources: Vec<ResourceEntry>,
    templates: Vec<TemplateEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            resources: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Registers a tool under its declared name.
    ///
    /// The published input schema is derived from `P`, and incoming
    /// arguments are deserialized into `P` before `handler` runs, so
    /// the handler only ever sees arguments of the declared shape.
    pub fn tool<P, F>(mut self, tool: Tool, handler: F) -> Self
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(P) -> Result<Vec<Content>, ToolError> + Send + Sync + 'static,
    {
        let tool = tool.with_input_schema::<P>();
        let name = tool.name.clone();
        let handler: ToolHandlerFn = Box::new(move |arguments: Value| {
            let outcome = serde_json::from_value::<P>(arguments)
                .map_err(|e| ToolError::InvalidParameters(e.to_string()))
                .and_then(&handler);
            future::ready(outcome).boxed()
        });
        self.tools.insert(name, ToolEntry { tool, handler });
        self
    }

    /// Registers a resource with a fixed URI.
    pub fn resource<F>(mut self, resource: Resource, resolver: F) -> Self
    where
        F: Fn() -> Result<String, ResourceError> + Send + Sync + 'static,
    {
        self.resources
            .retain(|entry| entry.resource.name != resource.name);
        self.resources.push(ResourceEntry {
            resource,
            resolver: Box::new(resolver),
        });
        self
    }

    /// Registers a templated resource. The resolver receives the value
    /// extracted for the template's variable.
    pub fn template<F>(
        mut self,
        template: ResourceTemplate,
        matcher: UriTemplate,
        resolver: F,
    ) -> Self
    where
        F: Fn(String) -> Result<String, ResourceError> + Send + Sync + 'static,
    {
        self.templates
            .retain(|entry| entry.template.name != template.name);
        self.templates.push(TemplateEntry {
            template,
            matcher,
            resolver: Box::new(resolver),
        });
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            tools: self.tools,
            resources: self.resources,
            templates: self.templates,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.values().map(|entry| entry.tool.clone()).collect()
    }

    pub fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> BoxFuture<'static, Result<Vec<Content>, ToolError>> {
        match self.tools.get(name) {
            Some(entry) => (entry.handler)(arguments),
            None => future::ready(Err(ToolError::NotFound(name.to_string()))).boxed(),
        }
    }

    pub fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    pub fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates
            .iter()
            .map(|entry| entry.template.clone())
            .collect()
    }

    /// Resolves a URI to its text payload. Fixed URIs are consulted
    /// first, then templates in registration order.
    pub fn read_resource(&self, uri: &str) -> BoxFuture<'static, Result<String, ResourceError>> {
        for entry in &self.resources {
            if entry.resource.uri == uri {
                return future::ready((entry.resolver)()).boxed();
            }
        }
        for entry in &self.templates {
            if let Some(value) = entry.matcher.match_uri(uri) {
                return future::ready((entry.resolver)(value)).boxed();
            }
        }
        future::ready(Err(ResourceError::NotFound(uri.to_string()))).boxed()
    }
}
