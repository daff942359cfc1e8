//! Line-delimited JSON-RPC over a byte stream pair.

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use pin_project::pin_project;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use sandbox_mcp_core::protocol::JsonRpcMessage;

use super::Transport;
use crate::errors::TransportError;

/// Frames messages as single newline-terminated JSON lines, the framing
/// used on standard input/output.
#[pin_project]
pub struct StdioTransport<R, W> {
    #[pin]
    reader: BufReader<R>,
    #[pin]
    writer: W,
    // Bytes of a line whose terminator has not arrived yet.
    partial: Vec<u8>,
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead,
    W: AsyncWrite,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            partial: Vec::new(),
        }
    }
}

fn decode_line(line: Vec<u8>) -> Result<JsonRpcMessage, TransportError> {
    let line = String::from_utf8(line)?;
    tracing::debug!(json = %line, "inbound frame");

    let value: Value = serde_json::from_str(&line)?;
    let object = value
        .as_object()
        .ok_or_else(|| TransportError::InvalidMessage("message is not a JSON object".into()))?;
    if object.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Err(TransportError::InvalidMessage(
            "missing or invalid jsonrpc version".into(),
        ));
    }

    Ok(serde_json::from_value(value)?)
}

impl<R, W> Stream for StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    type Item = Result<JsonRpcMessage, TransportError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            let available = match ready!(this.reader.as_mut().poll_fill_buf(cx)) {
                Ok(buffer) => buffer,
                Err(e) => return Poll::Ready(Some(Err(TransportError::Io(e)))),
            };
            if available.is_empty() {
                // EOF; a final unterminated line is still delivered.
                if this.partial.is_empty() {
                    return Poll::Ready(None);
                }
                let line = std::mem::take(this.partial);
                return Poll::Ready(Some(decode_line(line)));
            }
            match available.iter().position(|&byte| byte == b'\n') {
                Some(newline) => {
                    this.partial.extend_from_slice(&available[..newline]);
                    this.reader.as_mut().consume(newline + 1);
                    let line = std::mem::take(this.partial);
                    return Poll::Ready(Some(decode_line(line)));
                }
                None => {
                    let consumed = available.len();
                    this.partial.extend_from_slice(available);
                    this.reader.as_mut().consume(consumed);
                }
            }
        }
    }
}

#[async_trait]
impl<R, W> Transport for StdioTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn write_message(&mut self, message: JsonRpcMessage) -> Result<(), TransportError> {
        let json = serde_json::to_string(&message)?;
        tracing::debug!(json = %json, "outbound frame");

        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use sandbox_mcp_core::protocol::{ErrorData, JsonRpcError, PARSE_ERROR};
    use tokio::io::AsyncWriteExt;

    use super::*;

    fn transport_over(
        input: tokio::io::DuplexStream,
    ) -> StdioTransport<tokio::io::DuplexStream, Vec<u8>> {
        StdioTransport::new(input, Vec::new())
    }

    #[tokio::test]
    async fn reads_a_request_line() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut transport = transport_over(server);

        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
            .await
            .unwrap();
        drop(client);

        let message = transport.next().await.unwrap().unwrap();
        match message {
            JsonRpcMessage::Request(request) => assert_eq!(request.method, "ping"),
            other => panic!("expected request, got {:?}", other),
        }
        assert!(transport.next().await.is_none());
    }

    #[tokio::test]
    async fn reads_a_line_split_across_writes() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut transport = transport_over(server);

        let read = tokio::spawn(async move {
            let message = transport.next().await.unwrap().unwrap();
            matches!(message, JsonRpcMessage::Request(_))
        });

        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,")
            .await
            .unwrap();
        tokio::task::yield_now().await;
        client.write_all(b"\"method\":\"ping\"}\n").await.unwrap();
        drop(client);

        assert!(read.await.unwrap());
    }

    #[tokio::test]
    async fn delivers_final_unterminated_line() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut transport = transport_over(server);

        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}")
            .await
            .unwrap();
        drop(client);

        assert!(matches!(
            transport.next().await.unwrap().unwrap(),
            JsonRpcMessage::Request(_)
        ));
        assert!(transport.next().await.is_none());
    }

    #[tokio::test]
    async fn invalid_json_is_a_json_error() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut transport = transport_over(server);

        client.write_all(b"not json\n").await.unwrap();
        drop(client);

        let error = transport.next().await.unwrap().unwrap_err();
        assert!(matches!(error, TransportError::Json(_)));
    }

    #[tokio::test]
    async fn missing_jsonrpc_version_is_invalid() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut transport = transport_over(server);

        client
            .write_all(b"{\"id\":1,\"method\":\"ping\"}\n")
            .await
            .unwrap();
        drop(client);

        let error = transport.next().await.unwrap().unwrap_err();
        assert!(matches!(error, TransportError::InvalidMessage(_)));
    }

    #[tokio::test]
    async fn non_object_payload_is_invalid() {
        let (mut client, server) = tokio::io::duplex(1024);
        let mut transport = transport_over(server);

        client.write_all(b"[1,2,3]\n").await.unwrap();
        drop(client);

        let error = transport.next().await.unwrap().unwrap_err();
        assert!(matches!(error, TransportError::InvalidMessage(_)));
    }

    #[tokio::test]
    async fn write_message_appends_newline_and_flushes() {
        let (_client, server) = tokio::io::duplex(64);
        let mut transport = StdioTransport::new(server, Vec::new());

        let frame = JsonRpcMessage::Error(JsonRpcError::new(
            None,
            ErrorData {
                code: PARSE_ERROR,
                message: "bad json".to_string(),
                data: None,
            },
        ));
        transport.write_message(frame).await.unwrap();

        let written = String::from_utf8(transport.writer.clone()).unwrap();
        assert!(written.ends_with('\n'));
        let value: Value = serde_json::from_str(written.trim_end()).unwrap();
        assert_eq!(value["error"]["code"], PARSE_ERROR);
    }
}
