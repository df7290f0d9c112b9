use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use crate::news::Article;
use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
use super::tools::McpToolResult;

#[derive(Debug, thiserror::Error)]
pub enum McpClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Rpc(JsonRpcError),

    #[error("Tool failed: {0}")]
    Tool(String),

    #[error("Server closed the connection")]
    Closed,
}

/// Minimal client for a newline-delimited JSON-RPC tool server.
pub struct McpClient<R, W> {
    lines: Lines<R>,
    writer: W,
    next_id: u64,
}

impl<R, W> McpClient<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            writer,
            next_id: 1,
        }
    }

    async fn send(&mut self, message: &JsonRpcRequest) -> Result<(), McpClientError> {
        let mut out = serde_json::to_string(message)?;
        out.push('\n');
        self.writer.write_all(out.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub async fn request(&mut self, method: &str, params: Option<Value>) -> Result<Value, McpClientError> {
        let id = self.next_id;
        self.next_id += 1;
        self.send(&JsonRpcRequest::new(id, method, params)).await?;

        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response: JsonRpcResponse = match serde_json::from_str(&line) {
                Ok(response) => response,
                Err(e) => {
                    debug!("Skipping unrecognized message: {}", e);
                    continue;
                }
            };
            if response.id != Value::from(id) {
                continue;
            }
            if let Some(error) = response.error {
                return Err(McpClientError::Rpc(error));
            }
            return Ok(response.result.unwrap_or(Value::Null));
        }

        Err(McpClientError::Closed)
    }

    pub async fn notify(&mut self, method: &str, params: Option<Value>) -> Result<(), McpClientError> {
        self.send(&JsonRpcRequest::notification(method, params)).await
    }

    /// Performs the initialize handshake and returns the server's info block.
    pub async fn initialize(&mut self) -> Result<Value, McpClientError> {
        let result = self
            .request(
                "initialize",
                Some(json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": "news-client",
                        "version": env!("CARGO_PKG_VERSION"),
                    }
                })),
            )
            .await?;
        self.notify("notifications/initialized", None).await?;
        Ok(result)
    }

    pub async fn list_tools(&mut self) -> Result<Vec<String>, McpClientError> {
        let result = self.request("tools/list", None).await?;
        Ok(result["tools"]
            .as_array()
            .map(|tools| {
                tools
                    .iter()
                    .filter_map(|tool| tool["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<McpToolResult, McpClientError> {
        let result = self
            .request("tools/call", Some(json!({ "name": name, "arguments": arguments })))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Calls the search tool and decodes its article list.
    pub async fn search(&mut self, name: &str, arguments: Value) -> Result<Vec<Article>, McpClientError> {
        let result = self.call_tool(name, arguments).await?;
        let text = result
            .content
            .into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        if result.is_error {
            return Err(McpClientError::Tool(text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}
