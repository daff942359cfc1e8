//! The server's router: identity plus delegation to the registry.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use sandbox_mcp_core::content::Content;
use sandbox_mcp_core::handler::{ResourceError, ToolError};
use sandbox_mcp_core::protocol::ServerCapabilities;
use sandbox_mcp_core::resource::{Resource, ResourceTemplate};
use sandbox_mcp_core::tool::Tool;
use sandbox_mcp_server::registry::Registry;
use sandbox_mcp_server::router::{CapabilitiesBuilder, Router};

use crate::resources;
use crate::tools;

/// Name advertised during the `initialize` handshake.
pub const SERVER_NAME: &str = "ai-sandbox-mcp";

const INSTRUCTIONS: &str = "Model Context Protocol server for AI Sandbox";

#[derive(Clone)]
pub struct SandboxRouter {
    registry: Arc<Registry>,
}

/// The single registration site: every tool and resource the server
/// exposes is added here, and both the binary and the tests consume it.
pub fn build_router() -> anyhow::Result<SandboxRouter> {
    let mut builder = Registry::builder();
    builder = tools::calculator::register(builder);
    builder = tools::echo::register(builder);
    builder = resources::greeting::register(builder)?;

    Ok(SandboxRouter {
        registry: Arc::new(builder.build()),
    })
}

impl Router for SandboxRouter {
    fn name(&self) -> String {
        SERVER_NAME.to_string()
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn instructions(&self) -> String {
        INSTRUCTIONS.to_string()
    }

    fn capabilities(&self) -> ServerCapabilities {
        CapabilitiesBuilder::new()
            .with_tools(false)
            .with_resources(false, false)
            .build()
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.registry.list_tools()
    }

    fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> BoxFuture<'static, Result<Vec<Content>, ToolError>> {
        self.registry.call_tool(tool_name, arguments)
    }

    fn list_resources(&self) -> Vec<Resource> {
        self.registry.list_resources()
    }

    fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.registry.list_resource_templates()
    }

    fn read_resource(&self, uri: &str) -> BoxFuture<'static, Result<String, ResourceError>> {
        self.registry.read_resource(uri)
    }
}
