use serde::Deserialize;
use chrono::{DateTime, FixedOffset};

use crate::error::{AppError, Result};
use crate::news::filter::{non_blank, optional_timestamp, parse_timestamp, string_or_list, DEFAULT_PAGE};
use crate::news::SearchFilter;

pub const DEFAULT_HTTP_PAGE_SIZE: u32 = 20;

/// Filter accepted by `/articles`, either as a query string or a JSON body.
///
/// `domain` is accepted for compatibility but the provider cannot filter on
/// it, so it never reaches the outbound query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticlesRequest {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, alias = "topics", deserialize_with = "string_or_list")]
    pub topic: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub end_date: Option<DateTime<FixedOffset>>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_HTTP_PAGE_SIZE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

impl Default for ArticlesRequest {
    fn default() -> Self {
        ArticlesRequest {
            q: None,
            topic: Vec::new(),
            language: None,
            source: None,
            domain: None,
            author: None,
            start_date: None,
            end_date: None,
            page_size: DEFAULT_HTTP_PAGE_SIZE,
            page: DEFAULT_PAGE,
        }
    }
}

impl ArticlesRequest {
    /// Builds a request from decoded query-string pairs. `topic` may repeat;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self> {
        let mut req = ArticlesRequest::default();

        for (key, value) in pairs {
            match key.as_str() {
                "q" => req.q = Some(value),
                "topic" | "topics" => req.topic.push(value),
                "language" => req.language = Some(value),
                "source" => req.source = Some(value),
                "domain" => req.domain = Some(value),
                "author" => req.author = Some(value),
                "start_date" => req.start_date = parse_optional_timestamp(&key, &value)?,
                "end_date" => req.end_date = parse_optional_timestamp(&key, &value)?,
                "page_size" => req.page_size = parse_number(&key, &value)?,
                "page" => req.page = parse_number(&key, &value)?,
                _ => {}
            }
        }

        Ok(req)
    }

    pub fn into_filter(self) -> SearchFilter {
        if let Some(domain) = non_blank(self.domain.as_deref()) {
            tracing::debug!("Ignoring unsupported domain filter: {}", domain);
        }

        SearchFilter {
            q: self.q,
            topic: self.topic,
            language: self.language,
            source: self.source,
            author: self.author,
            start_date: self.start_date,
            end_date: self.end_date,
            page_size: self.page_size,
            page: self.page,
        }
    }
}

fn parse_optional_timestamp(key: &str, value: &str) -> Result<Option<DateTime<FixedOffset>>> {
    match non_blank(Some(value)) {
        None => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .map_err(|e| AppError::InvalidRequest(format!("{}: {}", key, e))),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| AppError::InvalidRequest(format!("{}: {}", key, e)))
}
