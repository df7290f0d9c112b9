use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_PAGE: u32 = 1;

/// Caller-supplied search constraints.
///
/// Every field except paging is optional. A filter with neither `q` nor
/// `topic` is still valid: the provider simply receives no `q` parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, alias = "topics", deserialize_with = "string_or_list")]
    pub topic: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
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

impl Default for SearchFilter {
    fn default() -> Self {
        SearchFilter {
            q: None,
            topic: Vec::new(),
            language: None,
            source: None,
            author: None,
            start_date: None,
            end_date: None,
            page_size: DEFAULT_PAGE_SIZE,
            page: DEFAULT_PAGE,
        }
    }
}

impl SearchFilter {
    /// The requested language, if one was given and is not blank.
    pub fn language(&self) -> Option<&str> {
        non_blank(self.language.as_deref())
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with `Z` or an explicit offset), a naive date-time which
/// is read as UTC, or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, String> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(format!("'{}' is not a valid ISO-8601 timestamp", value))
}

pub(crate) fn optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match non_blank(raw.as_deref()) {
        None => Ok(None),
        Some(value) => parse_timestamp(value).map(Some).map_err(de::Error::custom),
    }
}

/// Topics may arrive as a single string or as a list of strings.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(topic)) => vec![topic],
        Some(OneOrMany::Many(topics)) => topics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_empty_object() {
        let filter: SearchFilter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(filter, SearchFilter::default());
        assert_eq!(filter.page_size, 10);
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_topics_alias_and_single_string() {
        let filter: SearchFilter =
            serde_json::from_value(json!({ "topics": ["robots", "startups"] })).unwrap();
        assert_eq!(filter.topic, vec!["robots", "startups"]);

        let filter: SearchFilter = serde_json::from_value(json!({ "topic": "tech" })).unwrap();
        assert_eq!(filter.topic, vec!["tech"]);
    }

    #[test]
    fn test_timestamp_fields() {
        let filter: SearchFilter = serde_json::from_value(json!({
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2024-01-02",
        }))
        .unwrap();
        assert_eq!(
            filter.start_date.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(
            filter.end_date.unwrap().to_rfc3339(),
            "2024-01-02T00:00:00+00:00"
        );
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let result = serde_json::from_value::<SearchFilter>(json!({ "start_date": "yesterday" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_timestamp_keeps_offset() {
        let ts = parse_timestamp("2024-03-10T08:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-10T08:30:00+02:00");

        let naive = parse_timestamp("2024-03-10T08:30:00").unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-03-10T08:30:00+00:00");
    }

    #[test]
    fn test_blank_language_is_none() {
        let filter = SearchFilter {
            language: Some("  ".into()),
            ..SearchFilter::default()
        };
        assert_eq!(filter.language(), None);
    }
}
