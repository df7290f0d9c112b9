use reqwest::{header, Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::NewsApiConfig;
use crate::error::{AppError, Result};
use super::filter::SearchFilter;
use super::models::{Article, ProviderResponse};
use super::normalize::{decode_record, normalize_article};
use super::query::build_provider_query;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues one provider request per search and normalizes the results.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct NewsClient {
    http: Client,
    config: NewsApiConfig,
}

impl NewsClient {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("mcp-news-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Article>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::ConfigError("NewsAPI key not configured.".to_string()))?;

        let params = build_provider_query(filter, api_key);
        debug!(
            "Querying {} with parameters {:?}",
            self.config.endpoint,
            params.keys().filter(|k| *k != "apiKey").collect::<Vec<_>>()
        );

        let start_time = Instant::now();
        let response = self
            .http
            .get(&self.config.endpoint)
            .header(header::ACCEPT, "application/json")
            .query(params.as_slice())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The provider usually still sends its JSON error envelope.
            let message = serde_json::from_str::<ProviderResponse>(&body)
                .ok()
                .and_then(|payload| payload.message)
                .unwrap_or_else(|| format!("HTTP {}", status));
            warn!("Provider returned HTTP {}: {}", status, message);
            return Err(AppError::ProviderError(message));
        }

        let payload: ProviderResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::ProviderError(format!("Malformed response: {}", e)))?;

        if payload.status.as_deref() != Some("ok") {
            let message = payload
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!(
                "Provider reported status {:?} ({:?}): {}",
                payload.status, payload.code, message
            );
            return Err(AppError::ProviderError(message));
        }

        let language = filter.language();
        let articles: Vec<Article> = payload
            .articles
            .unwrap_or_default()
            .into_iter()
            .map(|raw| normalize_article(decode_record(raw), language))
            .collect();

        info!(
            "Provider returned {} articles ({} total) in {:?}",
            articles.len(),
            payload.total_results.unwrap_or_default(),
            start_time.elapsed()
        );

        Ok(articles)
    }
}
