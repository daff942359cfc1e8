use async_trait::async_trait;
use futures::Stream;
use sandbox_mcp_core::protocol::JsonRpcMessage;

use crate::errors::TransportError;

pub mod stdio;
pub use stdio::StdioTransport;

/// A transport carrying JSON-RPC messages to and from a peer.
#[async_trait]
pub trait Transport: Stream<Item = Result<JsonRpcMessage, TransportError>> {
    /// Writes one message to the peer.
    async fn write_message(&mut self, message: JsonRpcMessage) -> Result<(), TransportError>;
}
