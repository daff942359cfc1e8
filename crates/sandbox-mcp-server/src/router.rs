//! The [`Router`] contract and its JSON-RPC dispatch.
//!
//! A router exposes identity, capabilities, and the registry lookup
//! surface; the provided `handle_*` methods turn JSON-RPC requests into
//! responses on top of that surface. [`RouterService`] adapts any
//! router to a tower [`Service`] so the server loop can drive it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower_service::Service;

use sandbox_mcp_core::content::Content;
use sandbox_mcp_core::handler::{ResourceError, ToolError};
use sandbox_mcp_core::protocol::{
    CallToolRequestParams, CallToolResult, Implementation, InitializeResult, JsonRpcRequest,
    JsonRpcResponse, ListResourceTemplatesResult, ListResourcesResult, ListToolsResult,
    ReadResourceRequestParams, ReadResourceResult, ResourcesCapability, ServerCapabilities,
    ToolsCapability, PROTOCOL_VERSION,
};
use sandbox_mcp_core::resource::{Resource, ResourceContents, ResourceTemplate};
use sandbox_mcp_core::tool::Tool;

use crate::errors::{BoxError, RouterError};

pub struct CapabilitiesBuilder {
    tools: Option<ToolsCapability>,
    resources: Option<ResourcesCapability>,
}

impl CapabilitiesBuilder {
    pub fn new() -> Self {
        Self {
            tools: None,
            resources: None,
        }
    }

    pub fn with_tools(mut self, list_changed: bool) -> Self {
        self.tools = Some(ToolsCapability {
            list_changed: Some(list_changed),
        });
        self
    }

    pub fn with_resources(mut self, subscribe: bool, list_changed: bool) -> Self {
        self.resources = Some(ResourcesCapability {
            subscribe: Some(subscribe),
            list_changed: Some(list_changed),
        });
        self
    }

    pub fn build(self) -> ServerCapabilities {
        ServerCapabilities {
            tools: self.tools,
            resources: self.resources,
        }
    }
}

impl Default for CapabilitiesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait Router: Send + Sync + 'static {
    fn name(&self) -> String;
    fn version(&self) -> String;
    fn instructions(&self) -> String;
    fn capabilities(&self) -> ServerCapabilities;
    fn list_tools(&self) -> Vec<Tool>;
    fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> BoxFuture<'static, Result<Vec<Content>, ToolError>>;
    fn list_resources(&self) -> Vec<Resource>;
    fn list_resource_templates(&self) -> Vec<ResourceTemplate>;
    fn read_resource(&self, uri: &str) -> BoxFuture<'static, Result<String, ResourceError>>;

    async fn handle_initialize(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, RouterError> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: self.capabilities(),
            server_info: Implementation {
                name: self.name(),
                version: self.version(),
            },
            instructions: Some(self.instructions()),
        };
        result_response(req.id, result)
    }

    async fn handle_ping(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, RouterError> {
        result_response(req.id, serde_json::json!({}))
    }

    async fn handle_tools_list(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, RouterError> {
        let result = ListToolsResult {
            tools: self.list_tools(),
        };
        result_response(req.id, result)
    }

    async fn handle_tools_call(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, RouterError> {
        let params: CallToolRequestParams = parse_params(req.params)?;
        let arguments = params.arguments.unwrap_or(Value::Null);
        let content = self.call_tool(&params.name, arguments).await?;
        result_response(req.id, CallToolResult { content })
    }

    async fn handle_resources_list(
        &self,
        req: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, RouterError> {
        let result = ListResourcesResult {
            resources: self.list_resources(),
        };
        result_response(req.id, result)
    }

    async fn handle_resource_templates_list(
        &self,
        req: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, RouterError> {
        let result = ListResourceTemplatesResult {
            resource_templates: self.list_resource_templates(),
        };
        result_response(req.id, result)
    }

    async fn handle_resources_read(
        &self,
        req: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, RouterError> {
        let params: ReadResourceRequestParams = parse_params(req.params)?;
        let text = self.read_resource(&params.uri).await?;
        let result = ReadResourceResult {
            contents: vec![ResourceContents::text(text, params.uri)],
        };
        result_response(req.id, result)
    }
}

fn parse_params<P: DeserializeOwned>(params: Option<Value>) -> Result<P, RouterError> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| RouterError::InvalidParams(e.to_string()))
}

fn result_response<R: Serialize>(id: u64, result: R) -> Result<JsonRpcResponse, RouterError> {
    let mut response = JsonRpcResponse::new(id);
    response.result =
        Some(serde_json::to_value(result).map_err(|e| RouterError::Internal(e.to_string()))?);
    Ok(response)
}

/// Adapts a [`Router`] to a tower [`Service`]. Routing failures become
/// error responses on the request's id, never service-level failures.
pub struct RouterService<T>(pub T);

impl<T> Service<JsonRpcRequest> for RouterService<T>
where
    T: Router + Clone,
{
    type Response = JsonRpcResponse;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: JsonRpcRequest) -> Self::Future {
        let this = self.0.clone();

        Box::pin(async move {
            let id = req.id;
            let outcome = match req.method.as_str() {
                "initialize" => this.handle_initialize(req).await,
                "ping" => this.handle_ping(req).await,
                "tools/list" => this.handle_tools_list(req).await,
                "tools/call" => this.handle_tools_call(req).await,
                "resources/list" => this.handle_resources_list(req).await,
                "resources/templates/list" => this.handle_resource_templates_list(req).await,
                "resources/read" => this.handle_resources_read(req).await,
                _ => Err(RouterError::MethodNotFound(req.method)),
            };

            Ok(match outcome {
                Ok(response) => response,
                Err(error) => {
                    let mut response = JsonRpcResponse::new(id);
                    response.error = Some(error.into());
                    response
                }
            })
        })
    }
}
