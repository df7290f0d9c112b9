use tokio::net::TcpListener;
use tracing::{info, warn};
use mcp_news_server::{
    config::Config,
    api::routes::create_router,
    logging::init_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration
    let config = Config::load()?;
    if config.news_api.api_key.is_none() {
        warn!("NEWS_API_KEY is not set; searches will fail until it is configured");
    }
    info!("Using news provider at {}", config.news_api.endpoint);

    let app_state = AppState::new(config)?;
    let server_addr = app_state.config.server_addr;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;

    info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
