use chrono::{DateTime, Utc};
use tracing::warn;

use super::filter::{non_blank, parse_timestamp};
use super::models::{Article, ProviderRecord};

/// Decodes one raw provider record. Mistyped fields are dropped one by one;
/// only a record that is not an object degrades to an empty record.
pub fn decode_record(value: serde_json::Value) -> ProviderRecord {
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Undecodable provider record, using defaults: {}", e);
        ProviderRecord::default()
    })
}

/// Missing or unparseable timestamps fall back to the Unix epoch.
pub fn parse_published_at(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = non_blank(raw) else {
        return DateTime::<Utc>::UNIX_EPOCH;
    };

    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };

    match parse_timestamp(&normalized) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            warn!("Unparseable publishedAt, defaulting to epoch: {}", e);
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}

/// Maps a provider record onto the local article schema. Never fails.
pub fn normalize_article(raw: ProviderRecord, requested_language: Option<&str>) -> Article {
    let url = raw.url.unwrap_or_default();
    let source = raw
        .source
        .and_then(|source| source.name)
        .unwrap_or_default();

    Article {
        id: url.clone(),
        title: raw.title.unwrap_or_default(),
        content: raw.content,
        source,
        domain: None,
        author: raw.author,
        published_at: parse_published_at(raw.published_at.as_deref()),
        url,
        language: non_blank(requested_language).map(str::to_string),
        description: raw.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::models::{ContentType, ExtendedArticle};
    use serde_json::json;

    fn sample_record() -> serde_json::Value {
        json!({
            "source": { "id": "test-news", "name": "Test News" },
            "author": "John Doe",
            "title": "Test Article 1",
            "description": "This is a test article",
            "url": "https://example.com/article1",
            "urlToImage": "https://example.com/image1.jpg",
            "publishedAt": "2023-01-01T12:00:00Z",
            "content": "This is the content of the test article..."
        })
    }

    #[test]
    fn test_normalize_full_record() {
        let article = normalize_article(decode_record(sample_record()), Some("en"));

        assert_eq!(article.id, "https://example.com/article1");
        assert_eq!(article.url, "https://example.com/article1");
        assert_eq!(article.title, "Test Article 1");
        assert_eq!(article.source, "Test News");
        assert_eq!(article.author.as_deref(), Some("John Doe"));
        assert_eq!(article.description.as_deref(), Some("This is a test article"));
        assert_eq!(article.language.as_deref(), Some("en"));
        assert_eq!(article.domain, None);
        assert_eq!(article.published_at.to_rfc3339(), "2023-01-01T12:00:00+00:00");
    }

    #[test]
    fn test_missing_published_at_defaults_to_epoch() {
        let article = normalize_article(decode_record(json!({ "title": "No date" })), None);
        assert_eq!(article.published_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(article.published_at.timestamp(), 0);
    }

    #[test]
    fn test_z_suffix_matches_explicit_offset() {
        let zulu = parse_published_at(Some("2024-01-01T12:00:00Z"));
        let offset = parse_published_at(Some("2024-01-01T12:00:00+00:00"));
        assert_eq!(zulu, offset);
        assert_eq!(zulu.timestamp(), 1_704_110_400);
    }

    #[test]
    fn test_garbage_published_at_defaults_to_epoch() {
        assert_eq!(parse_published_at(Some("last tuesday")), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_empty_record_degrades_to_defaults() {
        let article = normalize_article(decode_record(json!({})), None);
        assert_eq!(article.id, "");
        assert_eq!(article.url, "");
        assert_eq!(article.title, "");
        assert_eq!(article.source, "");
        assert_eq!(article.language, None);
        assert_eq!(article.content, None);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let record = json!({
            "source": { "id": null, "name": null },
            "author": null,
            "title": null,
            "url": null,
            "publishedAt": null
        });
        let article = normalize_article(decode_record(record), None);
        assert_eq!(article.source, "");
        assert_eq!(article.author, None);
        assert_eq!(article.published_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_mistyped_record_does_not_fail() {
        let article = normalize_article(decode_record(json!({ "title": 42 })), None);
        assert_eq!(article.title, "");
    }

    #[test]
    fn test_mistyped_field_keeps_rest_of_record() {
        let record = json!({
            "title": "Good",
            "url": "https://x/a",
            "source": { "name": "S" },
            "author": ["A", "B"],
            "publishedAt": 1704110400
        });
        let article = normalize_article(decode_record(record), None);
        assert_eq!(article.id, "https://x/a");
        assert_eq!(article.url, "https://x/a");
        assert_eq!(article.title, "Good");
        assert_eq!(article.source, "S");
        assert_eq!(article.author, None);
        assert_eq!(article.published_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_mistyped_source_keeps_rest_of_record() {
        let record = json!({ "title": "Good", "source": "S", "url": "https://x/b" });
        let article = normalize_article(decode_record(record), None);
        assert_eq!(article.source, "");
        assert_eq!(article.title, "Good");
        assert_eq!(article.id, "https://x/b");
    }

    #[test]
    fn test_language_echo_is_trimmed() {
        let padded = normalize_article(decode_record(sample_record()), Some("  de "));
        assert_eq!(padded.language.as_deref(), Some("de"));
        let blank = normalize_article(decode_record(sample_record()), Some("   "));
        assert_eq!(blank.language, None);
    }

    #[test]
    fn test_non_object_record_degrades_to_defaults() {
        let article = normalize_article(decode_record(json!("not a record")), None);
        assert_eq!(article.id, "");
        assert_eq!(article.title, "");
    }

    #[test]
    fn test_unavailable_fields_always_serialized() {
        let article = normalize_article(decode_record(sample_record()), None);
        let value = serde_json::to_value(&article).unwrap();
        let object = value.as_object().unwrap();
        assert!(object["domain"].is_null());
        assert!(object["language"].is_null());
        assert_eq!(object.len(), 10);

        let extended = serde_json::to_value(ExtendedArticle::from(article)).unwrap();
        let object = extended.as_object().unwrap();
        for key in [
            "domain",
            "source_type",
            "topic",
            "location",
            "sentiment",
            "credibility_score",
            "engagement",
        ] {
            assert!(object[key].is_null(), "{} should be null", key);
        }
        assert_eq!(object["custom_tags"], json!([]));
        assert_eq!(object["content_type"], json!("article"));
        assert_eq!(object.len(), 16);
    }

    #[test]
    fn test_extended_keeps_article_fields() {
        let article = normalize_article(decode_record(sample_record()), Some("fr"));
        let extended = ExtendedArticle::from(article.clone());
        assert_eq!(extended.id, article.id);
        assert_eq!(extended.language.as_deref(), Some("fr"));
        assert_eq!(extended.content_type, Some(ContentType::Article));
        assert!(extended.custom_tags.is_empty());
    }
}
