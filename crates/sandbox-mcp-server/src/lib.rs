//! Serving machinery for the AI Sandbox MCP server: the tool/resource
//! registry, the router that maps JSON-RPC methods onto it, and the
//! read-dispatch-write loop over a line-framed stdio transport.

use futures::StreamExt;
use tower_service::Service;

use sandbox_mcp_core::protocol::{
    ErrorData, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR,
    INVALID_REQUEST, PARSE_ERROR,
};

pub mod errors;
pub mod registry;
pub mod router;
pub mod transport;

pub use errors::{BoxError, RouterError, ServerError, TransportError};
pub use registry::{Registry, RegistryBuilder};
pub use router::{CapabilitiesBuilder, Router, RouterService};
pub use transport::{StdioTransport, Transport};

/// Drives a request-handling service over a transport until the peer
/// closes the inbound stream.
pub struct Server<S> {
    service: S,
}

impl<S> Server<S>
where
    S: Service<JsonRpcRequest, Response = JsonRpcResponse> + Send,
    S::Error: Into<BoxError>,
    S::Future: Send,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn run<T>(self, mut transport: T) -> Result<(), ServerError>
    where
        T: Transport + Unpin,
    {
        let mut service = self.service;

        tracing::info!("server loop started");
        while let Some(inbound) = transport.next().await {
            match inbound {
                Ok(JsonRpcMessage::Request(request)) => {
                    let id = request.id;
                    tracing::debug!(id, method = %request.method, "request received");

                    let response = match service.call(request).await {
                        Ok(response) => response,
                        Err(error) => {
                            let error = error.into();
                            tracing::error!(%error, "request handling failed");
                            let mut response = JsonRpcResponse::new(id);
                            response.error = Some(ErrorData {
                                code: INTERNAL_ERROR,
                                message: error.to_string(),
                                data: None,
                            });
                            response
                        }
                    };

                    transport
                        .write_message(JsonRpcMessage::Response(response))
                        .await
                        .map_err(ServerError::Transport)?;
                }
                Ok(JsonRpcMessage::Notification(notification)) => {
                    tracing::debug!(method = %notification.method, "notification ignored");
                }
                Ok(_) => {
                    // Client-side responses and nil frames have no
                    // meaning on a server; skip them.
                }
                Err(error) => {
                    let code = match &error {
                        TransportError::Json(_) | TransportError::Utf8(_) => PARSE_ERROR,
                        TransportError::InvalidMessage(_) => INVALID_REQUEST,
                        TransportError::Io(_) => INTERNAL_ERROR,
                    };
                    tracing::warn!(%error, "undecodable frame");

                    let reply = JsonRpcMessage::Error(JsonRpcError::new(
                        None,
                        ErrorData {
                            code,
                            message: error.to_string(),
                            data: None,
                        },
                    ));
                    transport
                        .write_message(reply)
                        .await
                        .map_err(ServerError::Transport)?;
                }
            }
        }
        tracing::info!("inbound stream closed, server loop ending");

        Ok(())
    }
}
