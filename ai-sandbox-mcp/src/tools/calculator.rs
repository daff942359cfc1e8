//! The four arithmetic tools.
//!
//! Results are rendered with `f64`'s `Display`, so integral values
//! print without a fractional part (`2 + 3 = 5`, not `2.0 + 3.0 = 5.0`).

use schemars::JsonSchema;
use serde::Deserialize;

use sandbox_mcp_core::content::Content;
use sandbox_mcp_core::handler::ToolError;
use sandbox_mcp_core::tool::Tool;
use sandbox_mcp_server::registry::RegistryBuilder;

/// Operands shared by `add`, `subtract`, and `multiply`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Operands {
    #[schemars(description = "First number")]
    pub a: f64,
    #[schemars(description = "Second number")]
    pub b: f64,
}

/// Operands of `divide`, described in dividend/divisor terms.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DivideOperands {
    #[schemars(description = "First number (dividend)")]
    pub a: f64,
    #[schemars(description = "Second number (divisor)")]
    pub b: f64,
}

fn add(Operands { a, b }: Operands) -> Result<Vec<Content>, ToolError> {
    Ok(vec![Content::text(format!("{} + {} = {}", a, b, a + b))])
}

fn subtract(Operands { a, b }: Operands) -> Result<Vec<Content>, ToolError> {
    Ok(vec![Content::text(format!("{} - {} = {}", a, b, a - b))])
}

fn multiply(Operands { a, b }: Operands) -> Result<Vec<Content>, ToolError> {
    Ok(vec![Content::text(format!("{} × {} = {}", a, b, a * b))])
}

fn divide(DivideOperands { a, b }: DivideOperands) -> Result<Vec<Content>, ToolError> {
    if b == 0.0 {
        return Ok(vec![Content::text("Error: Division by zero is not allowed.")]);
    }
    Ok(vec![Content::text(format!("{} ÷ {} = {}", a, b, a / b))])
}

pub fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .tool::<Operands, _>(
            Tool::new("add", "Add two numbers together").with_title("Addition Tool"),
            add,
        )
        .tool::<Operands, _>(
            Tool::new("subtract", "Subtract second number from first number")
                .with_title("Subtraction Tool"),
            subtract,
        )
        .tool::<Operands, _>(
            Tool::new("multiply", "Multiply two numbers").with_title("Multiplication Tool"),
            multiply,
        )
        .tool::<DivideOperands, _>(
            Tool::new("divide", "Divide first number by second number")
                .with_title("Division Tool"),
            divide,
        )
}
