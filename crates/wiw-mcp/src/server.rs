//! The stdio serve loop and MCP method handling.

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use wiw_api::WhenIWorkClient;
use wiw_tools::ToolRegistry;
use wiw_types::ToolOutput;

use crate::error::McpError;
use crate::jsonrpc::{self, JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "wheniwork-mcp";

/// Serves the tool catalogue to one MCP client.
///
/// Requests are handled one at a time in arrival order. The client logs in
/// lazily on the first `tools/call`.
pub struct McpServer {
    registry: ToolRegistry,
    client: WhenIWorkClient,
}

impl McpServer {
    pub fn new(client: WhenIWorkClient) -> Self {
        Self {
            registry: ToolRegistry::new(),
            client,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn client(&self) -> &WhenIWorkClient {
        &self.client
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn run_stdio(&self) -> Result<(), McpError> {
        tracing::info!("Serving {} tools on stdio", self.registry.len());
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Read newline-delimited frames from `reader` and write one response
    /// frame per request to `writer`. Returns on EOF. A frame that is not
    /// UTF-8 is answered with a parse error; only I/O failures end the loop.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim_end()).await,
                Err(e) => {
                    tracing::warn!("Rejected frame that is not UTF-8: {e}");
                    Some(JsonRpcResponse::failure(
                        Value::Null,
                        JsonRpcError::parse_error(e),
                    ))
                }
            };
            if let Some(response) = response {
                let frame = serde_json::to_string(&response)?;
                writer.write_all(frame.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        tracing::debug!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw frame. `None` means nothing is written back.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match jsonrpc::decode(line) {
            Ok(request) => self.handle_request(request).await,
            Err(response) => {
                tracing::warn!("Rejected malformed frame: {line}");
                Some(response)
            }
        }
    }

    /// Handle one decoded request. Notifications never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            tracing::debug!("Ignoring notification {}", request.method);
            return None;
        };
        tracing::debug!("Handling {}", request.method);

        let outcome = match request.method.as_str() {
            "initialize" => Ok(initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.tools_call(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn tools_call(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.unwrap_or(Value::Null);
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::invalid_params("tools/call requires a string 'name'"))?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let output = self.call_tool(name, arguments).await;
        serde_json::to_value(&output)
            .map_err(|e| JsonRpcError::new(jsonrpc::INTERNAL_ERROR, e.to_string()))
    }

    /// Run one tool through the registry. Every failure becomes
    /// `Error: <message>` text.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolOutput {
        match self.registry.dispatch(&self.client, name, arguments).await {
            Ok(value) => ToolOutput::from_value(&value),
            Err(e) => {
                tracing::debug!("Tool {name} failed: {e}");
                ToolOutput::error(e)
            }
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiw_api::Credentials;

    // Nothing listens on the discard port; these tests must not reach it.
    fn offline_server() -> McpServer {
        McpServer::new(
            WhenIWorkClient::new(
                Credentials::new("k")
                    .with_token("t")
                    .with_base_url("http://127.0.0.1:9"),
            )
            .unwrap(),
        )
    }

    async fn roundtrip(server: &McpServer, frame: Value) -> Value {
        let response = server.handle_line(&frame.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let server = offline_server();
        let resp = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        )
        .await;
        assert_eq!(resp["id"], 1);
        assert_eq!(resp["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(resp["result"]["serverInfo"]["name"], SERVER_NAME);
        assert!(resp["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn ping_returns_empty_object() {
        let server = offline_server();
        let resp = roundtrip(&server, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
        assert_eq!(resp["id"], "p");
        assert_eq!(resp["result"], json!({}));
    }

    #[tokio::test]
    async fn tools_list_returns_catalogue() {
        let server = offline_server();
        let resp = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
        let tools = resp["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 38);
        assert_eq!(tools[0]["name"], "list_users");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");
        assert!(tools[0]["description"].is_string());
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = offline_server();
        let frame = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(server.handle_line(&frame.to_string()).await.is_none());
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let server = offline_server();
        let resp = roundtrip(&server, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;
        assert_eq!(resp["error"]["code"], jsonrpc::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn tools_call_without_name_is_invalid_params() {
        let server = offline_server();
        let resp = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"arguments": {}}}),
        )
        .await;
        assert_eq!(resp["error"]["code"], jsonrpc::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_tool_is_in_band_error_text() {
        let server = offline_server();
        let resp = roundtrip(
            &server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "nonexistent_tool", "arguments": {}}}),
        )
        .await;
        assert!(resp.get("error").is_none());
        assert_eq!(
            resp["result"],
            json!({"content": [{"type": "text", "text": "Error: Unknown tool: nonexistent_tool"}]})
        );
    }

    #[tokio::test]
    async fn garbage_frame_is_parse_error() {
        let server = offline_server();
        let response = server.handle_line("{oops").await.unwrap();
        assert_eq!(response.error.unwrap().code, jsonrpc::PARSE_ERROR);
    }

    #[tokio::test]
    async fn serve_answers_each_request_on_its_own_line() {
        let server = offline_server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let frames: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["id"], 1);
        assert_eq!(frames[1]["id"], 2);
    }

    #[tokio::test]
    async fn serve_survives_a_frame_that_is_not_utf8() {
        let server = offline_server();
        let mut input = Vec::new();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        input.extend_from_slice(b"\n\xff\xfe garbage\n");
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.extend_from_slice(b"\n");

        let mut output = Vec::new();
        server.serve(input.as_slice(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let frames: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0]["id"], 1);
        assert_eq!(frames[1]["id"], Value::Null);
        assert_eq!(frames[1]["error"]["code"], jsonrpc::PARSE_ERROR);
        assert_eq!(frames[2]["id"], 2);
        assert_eq!(frames[2]["result"], json!({}));
    }

    #[tokio::test]
    async fn serve_handles_crlf_and_a_final_frame_without_newline() {
        let server = offline_server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\r\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let ids: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["id"].clone())
            .collect();
        assert_eq!(ids, [json!(1), json!(2)]);
    }
}
