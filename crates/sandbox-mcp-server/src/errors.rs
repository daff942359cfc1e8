use sandbox_mcp_core::handler::{ResourceError, ToolError};
use sandbox_mcp_core::protocol::{
    ErrorData, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND,
};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced while routing a request to a handler. Each maps to
/// a JSON-RPC error response on the request's id.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RouterError> for ErrorData {
    fn from(error: RouterError) -> Self {
        let code = match &error {
            RouterError::MethodNotFound(_) => METHOD_NOT_FOUND,
            RouterError::ToolNotFound(_)
            | RouterError::ResourceNotFound(_)
            | RouterError::InvalidParams(_) => INVALID_PARAMS,
            RouterError::Internal(_) => INTERNAL_ERROR,
        };
        ErrorData {
            code,
            message: error.to_string(),
            data: None,
        }
    }
}

impl From<ToolError> for RouterError {
    fn from(error: ToolError) -> Self {
        match error {
            ToolError::NotFound(name) => RouterError::ToolNotFound(name),
            ToolError::InvalidParameters(message) => RouterError::InvalidParams(message),
            ToolError::ExecutionError(message) => RouterError::Internal(message),
        }
    }
}

impl From<ResourceError> for RouterError {
    fn from(error: ResourceError) -> Self {
        match error {
            ResourceError::NotFound(uri) => RouterError::ResourceNotFound(uri),
            ResourceError::InvalidUri(message) => RouterError::InvalidParams(message),
            ResourceError::ExecutionError(message) => RouterError::Internal(message),
        }
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
