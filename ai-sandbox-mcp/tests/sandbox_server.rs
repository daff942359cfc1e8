//! End-to-end tests: JSON-RPC lines in, JSON-RPC lines out, through the
//! full server loop and stdio framing over an in-memory pipe.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::task::JoinHandle;

use ai_sandbox_mcp::build_router;
use sandbox_mcp_core::protocol::{INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};
use sandbox_mcp_server::{RouterService, Server, ServerError, StdioTransport};

struct TestClient {
    server: JoinHandle<Result<(), ServerError>>,
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
}

impl TestClient {
    async fn start() -> Self {
        let (client_io, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let service = RouterService(build_router().expect("registration cannot fail"));
        let server =
            tokio::spawn(Server::new(service).run(StdioTransport::new(server_read, server_write)));

        let (client_read, client_write) = tokio::io::split(client_io);
        Self {
            server,
            reader: BufReader::new(client_read),
            writer: client_write,
        }
    }

    async fn send_raw(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
    }

    async fn recv(&mut self) -> Value {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).await.unwrap();
        assert!(read > 0, "server closed the stream early");
        serde_json::from_str(line.trim_end()).unwrap()
    }

    async fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        let frame = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});
        self.send_raw(&frame.to_string()).await;
        self.recv().await
    }

    async fn finish(mut self) {
        self.writer.shutdown().await.unwrap();
        self.server.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn initialize_reports_server_identity() {
    let mut client = TestClient::start().await;

    let response = client
        .request(
            1,
            "initialize",
            json!({
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.0.0"}
            }),
        )
        .await;

    let result = &response["result"];
    assert_eq!(result["serverInfo"]["name"], "ai-sandbox-mcp");
    assert_eq!(result["serverInfo"]["version"], "0.1.0");
    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());

    client.finish().await;
}

#[tokio::test]
async fn add_returns_formatted_sum() {
    let mut client = TestClient::start().await;

    let response = client
        .request(
            2,
            "tools/call",
            json!({"name": "add", "arguments": {"a": 2, "b": 3}}),
        )
        .await;

    assert_eq!(response["id"], 2);
    assert_eq!(
        response["result"]["content"],
        json!([{"type": "text", "text": "2 + 3 = 5"}])
    );

    client.finish().await;
}

#[tokio::test]
async fn divide_by_zero_is_a_successful_response() {
    let mut client = TestClient::start().await;

    let response = client
        .request(
            3,
            "tools/call",
            json!({"name": "divide", "arguments": {"a": 10, "b": 0}}),
        )
        .await;

    assert!(response.get("error").is_none());
    assert_eq!(
        response["result"]["content"],
        json!([{"type": "text", "text": "Error: Division by zero is not allowed."}])
    );

    client.finish().await;
}

#[tokio::test]
async fn echo_prefixes_the_message() {
    let mut client = TestClient::start().await;

    let response = client
        .request(
            4,
            "tools/call",
            json!({"name": "echo", "arguments": {"message": "hi"}}),
        )
        .await;

    assert_eq!(
        response["result"]["content"],
        json!([{"type": "text", "text": "Echo: hi"}])
    );

    client.finish().await;
}

#[tokio::test]
async fn tools_list_exposes_all_five_tools() {
    let mut client = TestClient::start().await;

    let response = client.request(5, "tools/list", json!({})).await;
    let tools = response["result"]["tools"].as_array().unwrap();
    let mut names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["add", "divide", "echo", "multiply", "subtract"]);

    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
    }

    client.finish().await;
}

#[tokio::test]
async fn greeting_resources_resolve() {
    let mut client = TestClient::start().await;

    let response = client
        .request(6, "resources/read", json!({"uri": "greeting://Alice"}))
        .await;
    let contents = &response["result"]["contents"][0];
    assert_eq!(contents["uri"], "greeting://Alice");
    assert_eq!(
        contents["text"],
        "Hello, Alice! Welcome to the AI Sandbox MCP Server."
    );

    let response = client
        .request(7, "resources/read", json!({"uri": "greeting://default"}))
        .await;
    assert_eq!(
        response["result"]["contents"][0]["text"],
        "Hello! Welcome to the AI Sandbox MCP Server. You can get a \
         personalized greeting by accessing greeting://{your-name}"
    );

    let response = client.request(8, "resources/templates/list", json!({})).await;
    assert_eq!(
        response["result"]["resourceTemplates"][0]["uriTemplate"],
        "greeting://{name}"
    );

    let response = client.request(9, "resources/list", json!({})).await;
    assert_eq!(
        response["result"]["resources"][0]["uri"],
        "greeting://default"
    );

    client.finish().await;
}

#[tokio::test]
async fn unknown_method_is_rejected() {
    let mut client = TestClient::start().await;

    let response = client.request(10, "tools/rename", json!({})).await;
    assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

    client.finish().await;
}

#[tokio::test]
async fn mistyped_arguments_are_rejected_before_the_handler() {
    let mut client = TestClient::start().await;

    let response = client
        .request(
            11,
            "tools/call",
            json!({"name": "add", "arguments": {"a": "two", "b": 3}}),
        )
        .await;
    assert_eq!(response["error"]["code"], INVALID_PARAMS);

    let response = client
        .request(12, "tools/call", json!({"name": "modulo", "arguments": {}}))
        .await;
    assert_eq!(response["error"]["code"], INVALID_PARAMS);

    let response = client
        .request(13, "resources/read", json!({"uri": "unknown://nope"}))
        .await;
    assert_eq!(response["error"]["code"], INVALID_PARAMS);

    client.finish().await;
}

#[tokio::test]
async fn undecodable_line_does_not_kill_the_loop() {
    let mut client = TestClient::start().await;

    client.send_raw("this is not json").await;
    let reply = client.recv().await;
    assert_eq!(reply["error"]["code"], PARSE_ERROR);
    assert_eq!(reply["id"], Value::Null);

    let response = client
        .request(
            14,
            "tools/call",
            json!({"name": "add", "arguments": {"a": 1, "b": 1}}),
        )
        .await;
    assert_eq!(
        response["result"]["content"][0]["text"],
        "1 + 1 = 2"
    );

    client.finish().await;
}

#[tokio::test]
async fn notifications_are_ignored() {
    let mut client = TestClient::start().await;

    client
        .send_raw(&json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
        .await;
    let response = client.request(15, "ping", json!({})).await;
    assert_eq!(response["id"], 15);
    assert_eq!(response["result"], json!({}));

    client.finish().await;
}
