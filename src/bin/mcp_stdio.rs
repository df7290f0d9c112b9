use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};
use mcp_news_server::{
    config::NewsApiConfig,
    logging::init_logging,
    mcp::McpServer,
    news::NewsClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = NewsApiConfig::from_env();
    if config.api_key.is_none() {
        warn!("NEWS_API_KEY is not set; news.search will report a configuration error");
    }

    info!("MCP News Server ready on stdio");
    let server = McpServer::new(NewsClient::new(config)?);
    server.serve(BufReader::new(stdin()), stdout()).await?;

    Ok(())
}
