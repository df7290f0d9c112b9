use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::news::NewsClient;
use super::protocol::{
    JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};
use super::tools::{execute_news_search, get_all_functions, parse_search_arguments, NEWS_SEARCH_TOOL};

pub const SERVER_NAME: &str = "MCP News Server";

/// Newline-delimited JSON-RPC server exposing the news search tool.
pub struct McpServer {
    client: NewsClient,
}

impl McpServer {
    pub fn new(client: NewsClient) -> Self {
        Self { client }
    }

    /// Reads requests until the input closes. Each response is written as a
    /// single line and flushed.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!("Input closed, shutting down");
        Ok(())
    }

    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Received {}", request.method);

        let Some(id) = request.id.clone() else {
            // Notifications never get a reply.
            debug!("Notification {}", request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": get_all_functions() })),
            "tools/call" => self.call_tool(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let mut params = params.unwrap_or(Value::Null);
        let name = params.get("name").and_then(Value::as_str).map(str::to_string);
        let arguments = params.get_mut("arguments").map(Value::take);

        match name.as_deref() {
            Some(NEWS_SEARCH_TOOL) => {}
            Some(other) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", other));
            }
            None => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name");
            }
        }

        let filter = match parse_search_arguments(arguments) {
            Ok(filter) => filter,
            Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e),
        };

        let result = execute_news_search(&self.client, &filter).await;
        if result.is_error {
            warn!("{} failed: {:?}", NEWS_SEARCH_TOOL, result.content.first().map(|c| &c.text));
        }

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}
