// Tool definitions exposed over MCP

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::news::{NewsClient, SearchFilter};

pub const NEWS_SEARCH_TOOL: &str = "news.search";

#[derive(Debug, Clone, Serialize)]
pub struct McpFunction {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl McpToolResult {
    pub fn success(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text,
            }],
            is_error: false,
        }
    }

    pub fn error(text: String) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text,
            }],
            is_error: true,
        }
    }
}

pub fn get_news_search_function() -> McpFunction {
    McpFunction {
        name: NEWS_SEARCH_TOOL.to_string(),
        description: "Search for news articles using NewsAPI.org with advanced filters.

Returns a JSON array of articles with id, title, content, source, domain, author, published_at, url, language and description.
Requires NEWS_API_KEY to be set for the server.

Examples:
- `{\"q\": \"artificial intelligence\"}`
- `{\"topic\": [\"robots\", \"startups\"], \"language\": \"en\", \"page_size\": 5}`
"
        .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "q": {
                    "type": "string",
                    "description": "Free-text search or keywords"
                },
                "topic": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "List of topics/keywords"
                },
                "language": {
                    "type": "string",
                    "description": "Content language (e.g., en, es)"
                },
                "source": {
                    "type": "string",
                    "description": "Specific news source ID"
                },
                "author": {
                    "type": "string",
                    "description": "Author name"
                },
                "start_date": {
                    "type": "string",
                    "format": "date-time",
                    "description": "Start of time range"
                },
                "end_date": {
                    "type": "string",
                    "format": "date-time",
                    "description": "End of time range"
                },
                "page_size": {
                    "type": "integer",
                    "minimum": 1,
                    "default": 10,
                    "description": "Number of results per page"
                },
                "page": {
                    "type": "integer",
                    "minimum": 1,
                    "default": 1,
                    "description": "Page number"
                }
            }
        }),
    }
}

pub fn get_all_functions() -> Vec<McpFunction> {
    vec![get_news_search_function()]
}

/// Reads tool arguments, which may be flat or wrapped as `{"params": {...}}`.
pub fn parse_search_arguments(arguments: Option<Value>) -> Result<SearchFilter, String> {
    let arguments = match arguments {
        None | Some(Value::Null) => json!({}),
        Some(Value::Object(mut map)) => match map.remove("params") {
            Some(inner @ Value::Object(_)) if map.is_empty() => inner,
            Some(other) => {
                map.insert("params".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        Some(other) => {
            return Err(format!("Arguments must be an object, got: {}", other));
        }
    };

    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))
}

pub async fn execute_news_search(client: &NewsClient, filter: &SearchFilter) -> McpToolResult {
    match client.search(filter).await {
        Ok(articles) => match serde_json::to_string(&articles) {
            Ok(text) => McpToolResult::success(text),
            Err(e) => McpToolResult::error(format!("Failed to encode articles: {}", e)),
        },
        Err(e) => McpToolResult::error(e.to_string()),
    }
}
