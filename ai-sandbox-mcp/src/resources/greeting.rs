//! Greeting resources: a personalized template and a fixed default.

use sandbox_mcp_core::handler::ResourceError;
use sandbox_mcp_core::resource::{Resource, ResourceTemplate};
use sandbox_mcp_core::uri_template::UriTemplate;
use sandbox_mcp_server::registry::RegistryBuilder;

pub const GREETING_TEMPLATE: &str = "greeting://{name}";
pub const DEFAULT_GREETING_URI: &str = "greeting://default";

fn personalized_greeting(name: String) -> Result<String, ResourceError> {
    Ok(format!(
        "Hello, {}! Welcome to the AI Sandbox MCP Server.",
        name
    ))
}

fn default_greeting() -> Result<String, ResourceError> {
    Ok("Hello! Welcome to the AI Sandbox MCP Server. \
        You can get a personalized greeting by accessing greeting://{your-name}"
        .to_string())
}

pub fn register(builder: RegistryBuilder) -> Result<RegistryBuilder, ResourceError> {
    let matcher = UriTemplate::parse(GREETING_TEMPLATE)?;
    let template = ResourceTemplate::new(matcher.pattern(), "greeting")
        .with_title("Greeting Resource")
        .with_description("Provides a personalized greeting message");

    let default = Resource::new(DEFAULT_GREETING_URI, "default-greeting")?
        .with_title("Default Greeting")
        .with_description("Provides a default greeting message")
        .with_mime_type("text/plain");

    Ok(builder
        .template(template, matcher, personalized_greeting)
        .resource(default, default_greeting))
}

#[cfg(test)]
mod tests {
    use sandbox_mcp_server::registry::Registry;

    use super::*;

    #[test]
    fn personalized_greeting_uses_the_name() {
        assert_eq!(
            personalized_greeting("Alice".to_string()).unwrap(),
            "Hello, Alice! Welcome to the AI Sandbox MCP Server."
        );
    }

    #[test]
    fn default_greeting_explains_the_template() {
        assert_eq!(
            default_greeting().unwrap(),
            "Hello! Welcome to the AI Sandbox MCP Server. You can get a \
             personalized greeting by accessing greeting://{your-name}"
        );
    }

    #[tokio::test]
    async fn registered_template_resolves_any_name() {
        let registry: Registry = register(Registry::builder()).unwrap().build();
        let text = registry.read_resource("greeting://Bob").await.unwrap();
        assert_eq!(text, "Hello, Bob! Welcome to the AI Sandbox MCP Server.");
    }

    #[tokio::test]
    async fn default_uri_resolves_to_the_fixed_greeting() {
        let registry = register(Registry::builder()).unwrap().build();
        let text = registry.read_resource(DEFAULT_GREETING_URI).await.unwrap();
        assert!(text.starts_with("Hello! Welcome to the AI Sandbox MCP Server."));
    }

    #[test]
    fn both_descriptors_are_listed() {
        let registry = register(Registry::builder()).unwrap().build();
        let templates = registry.list_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].uri_template, GREETING_TEMPLATE);

        let resources = registry.list_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].uri, DEFAULT_GREETING_URI);
    }
}
