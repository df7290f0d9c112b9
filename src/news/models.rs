use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level body returned by the provider's search endpoint.
#[derive(Debug, Deserialize)]
pub struct ProviderResponse {
    pub status: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    /// Kept raw so that each record is decoded on its own.
    pub articles: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSource {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

/// One provider article. A field of the wrong type reads as absent, so the
/// rest of the record survives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<ProviderSource>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_source<'de, D>(deserializer: D) -> Result<Option<ProviderSource>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// A normalized article as returned by the tool server.
///
/// `domain` is always null: the provider does not report it. `language`
/// echoes the requested filter language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub source: String,
    pub domain: Option<String>,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub language: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Opinion,
    Video,
    Tweet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub views: u64,
    pub shares: u64,
    pub likes: u64,
}

/// The HTTP API's article shape.
///
/// Carries fields that no current provider can fill. They are always present
/// in the output with a null or empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedArticle {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub source: String,
    pub domain: Option<String>,
    pub source_type: Option<String>,
    pub topic: Option<Vec<String>>,
    pub location: Option<String>,
    pub language: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub credibility_score: Option<f64>,
    pub content_type: Option<ContentType>,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub engagement: Option<Engagement>,
    pub custom_tags: Vec<String>,
}

impl From<Article> for ExtendedArticle {
    fn from(article: Article) -> Self {
        ExtendedArticle {
            id: article.id,
            title: article.title,
            content: article.content,
            source: article.source,
            domain: article.domain,
            source_type: None,
            topic: None,
            location: None,
            language: article.language,
            sentiment: None,
            credibility_score: None,
            // The provider cannot tell opinion, video or tweet content apart.
            content_type: Some(ContentType::Article),
            author: article.author,
            published_at: article.published_at,
            engagement: None,
            custom_tags: Vec::new(),
        }
    }
}
