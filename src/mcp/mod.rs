//! Tool-invocation front end: JSON-RPC 2.0 over newline-delimited stdio.

pub mod client;
pub mod protocol;
pub mod server;
pub mod tools;

pub use client::{McpClient, McpClientError};
pub use server::McpServer;
pub use tools::{McpFunction, McpToolResult, NEWS_SEARCH_TOOL};
