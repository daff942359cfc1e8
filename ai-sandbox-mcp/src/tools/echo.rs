//! The echo tool, useful for exercising the request path.

use schemars::JsonSchema;
use serde::Deserialize;

use sandbox_mcp_core::content::Content;
use sandbox_mcp_core::handler::ToolError;
use sandbox_mcp_core::tool::Tool;
use sandbox_mcp_server::registry::RegistryBuilder;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EchoParams {
    #[schemars(description = "Message to echo back")]
    pub message: String,
}

fn echo(EchoParams { message }: EchoParams) -> Result<Vec<Content>, ToolError> {
    Ok(vec![Content::text(format!("Echo: {}", message))])
}

pub fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder.tool::<EchoParams, _>(
        Tool::new("echo", "Echoes back the input message (useful for testing)")
            .with_title("Echo Tool"),
        echo,
    )
}
