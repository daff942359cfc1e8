//! Content items carried in tool call responses.

use serde::{Deserialize, Serialize};

/// One unit of response payload, tagged with its type on the wire.
///
/// Every operation in this server produces text, so only the `text`
/// content type is modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text(TextContent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(TextContent { text: text.into() })
    }

    /// The text payload of this item.
    pub fn as_text(&self) -> &str {
        match self {
            Content::Text(TextContent { text }) => text,
        }
    }
}
