use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Settings for the upstream news provider.
#[derive(Clone, Debug)]
pub struct NewsApiConfig {
    /// `None` when `NEWS_API_KEY` is unset or empty. Searches fail with a
    /// configuration error in that case, the process still starts.
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl NewsApiConfig {
    pub fn from_env() -> Self {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("NEWS_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let endpoint = lookup("NEWS_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string());

        NewsApiConfig { api_key, endpoint }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub news_api: NewsApiConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let news_api = NewsApiConfig::from_lookup(&lookup);

        // Load server configuration with defaults
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            news_api,
        })
    }
}
