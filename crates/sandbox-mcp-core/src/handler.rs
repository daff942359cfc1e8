//! Errors reported by tool handlers and resource resolvers.

use thiserror::Error;

/// Failure modes of a tool invocation.
///
/// Handlers only ever see arguments that passed schema validation, so
/// `InvalidParameters` is produced by the dispatch layer, not by
/// handler bodies. Domain-level errors a tool can explain to the caller
/// (such as division by zero) are not errors at all: they are returned
/// as ordinary text content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Execution failed: {0}")]
    ExecutionError(String),
    #[error("Tool not found: {0}")]
    NotFound(String),
}

/// Failure modes of a resource read or registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
    #[error("Execution failed: {0}")]
    ExecutionError(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
}
