pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod news;

use std::sync::Arc;
use config::Config;
use error::Result;
use news::NewsClient;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub news: NewsClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let news = NewsClient::new(config.news_api.clone())?;
        Ok(Self {
            config: Arc::new(config),
            news,
        })
    }
}
