//! AI Sandbox MCP server.
//!
//! Exposes a handful of arithmetic tools, an echo tool, and greeting
//! resources over the Model Context Protocol on standard input/output.
//! Everything the server offers is registered in one place,
//! [`build_router`], which the binary and the integration tests share.

pub mod resources;
pub mod router;
pub mod tools;

pub use router::{build_router, SandboxRouter};
