//! Core types for the AI Sandbox MCP server.
//!
//! This crate carries the wire-level data model shared by the server
//! machinery and the application: JSON-RPC framing, MCP request and
//! result payloads, content items, tool and resource descriptors, and
//! the error taxonomy handlers report through.

pub mod content;
pub mod handler;
pub mod protocol;
pub mod resource;
pub mod tool;
pub mod uri_template;

pub use content::Content;
pub use handler::{ResourceError, ToolError};
pub use resource::{Resource, ResourceContents, ResourceTemplate};
pub use tool::Tool;
pub use uri_template::UriTemplate;
