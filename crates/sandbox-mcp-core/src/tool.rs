//! Tool descriptors and input schema generation.

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A named, schema-typed operation exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique name the tool is invoked by.
    pub name: String,
    /// Human-readable title shown in clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    /// JSON Schema describing the expected arguments.
    pub input_schema: Value,
}

impl Tool {
    /// Creates a tool accepting an empty argument object; the schema is
    /// usually replaced via [`Tool::with_input_schema`] or by the
    /// registry at registration time.
    pub fn new<N, D>(name: N, description: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            title: None,
            description: description.into(),
            input_schema: json!({"type": "object"}),
        }
    }

    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Derives the input schema from the parameter type handlers of
    /// this tool consume.
    pub fn with_input_schema<P: JsonSchema>(mut self) -> Self {
        self.input_schema = schema_for_type::<P>();
        self
    }
}

/// Generates a draft-07 JSON schema for a parameter type, with
/// subschemas inlined so the published schema is self-contained.
pub fn schema_for_type<T: JsonSchema>() -> Value {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>();
    serde_json::to_value(schema).expect("a generated schema always serializes")
}
