use std::process::Stdio;

use clap::Parser;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use mcp_news_server::{
    logging::init_logging,
    mcp::{McpClient, NEWS_SEARCH_TOOL},
};

/// Interactive client for the MCP news server.
#[derive(Parser, Debug)]
#[command(name = "news-client", version)]
struct Args {
    /// Command that starts the stdio server
    #[arg(long, default_value = "mcp-news-stdio")]
    server: String,

    /// Extra arguments passed to the server command
    #[arg(long = "server-arg")]
    server_args: Vec<String>,

    /// Number of results to request
    #[arg(long, default_value_t = 5)]
    page_size: u32,

    /// Search query; prompted for when omitted
    #[arg(short, long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let mut child = Command::new(&args.server)
        .args(&args.server_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()?;

    let child_stdin = child.stdin.take().ok_or("server stdin unavailable")?;
    let child_stdout = child.stdout.take().ok_or("server stdout unavailable")?;
    let mut client = McpClient::new(BufReader::new(child_stdout), child_stdin);

    client.initialize().await?;
    println!("Connected to MCP News Server!");

    let tools = client.list_tools().await?;
    println!("Available tools: {:?}", tools);

    let query = match args.query {
        Some(query) => query,
        None => prompt("Enter a news search query: ").await?,
    };

    let articles = client
        .search(
            NEWS_SEARCH_TOOL,
            json!({ "q": query.trim(), "page_size": args.page_size }),
        )
        .await?;

    println!("\nTop News Results:");
    if articles.is_empty() {
        println!("\nNo articles found.");
    }
    for (idx, article) in articles.iter().enumerate() {
        println!("\n{}. {}", idx + 1, article.title);
        println!("   Source: {}", article.source);
        println!("   Published: {}", article.published_at.to_rfc3339());
        println!("   URL: {}", article.url);
        if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
            println!("   Description: {}", description);
        }
    }

    drop(client);
    child.wait().await?;
    Ok(())
}

async fn prompt(message: &str) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim().to_string())
}
