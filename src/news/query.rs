use super::filter::{non_blank, SearchFilter};

/// Flat, ordered query parameters for the provider's search endpoint.
///
/// Every value is non-empty; keys with nothing to send are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderParams(Vec<(&'static str, String)>);

impl ProviderParams {
    fn push(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(value) = non_blank(value) {
            self.0.push((key, value.to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(k, _)| *k)
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// Query text first, then topics in order, then the author. The provider has
/// no author filter, so the name is folded into the free-text term.
pub fn compose_query_text(filter: &SearchFilter) -> String {
    let mut terms: Vec<&str> = Vec::new();
    terms.extend(non_blank(filter.q.as_deref()));
    terms.extend(filter.topic.iter().filter_map(|t| non_blank(Some(t.as_str()))));
    terms.extend(non_blank(filter.author.as_deref()));
    terms.join(" ")
}

pub fn build_provider_query(filter: &SearchFilter, api_key: &str) -> ProviderParams {
    let mut params = ProviderParams::default();
    params.0.push(("apiKey", api_key.to_string()));

    let query = compose_query_text(filter);
    params.push("q", Some(query.as_str()));
    params.push("language", filter.language.as_deref());
    params.push("sources", filter.source.as_deref());

    let from = filter.start_date.map(|ts| ts.to_rfc3339());
    let to = filter.end_date.map(|ts| ts.to_rfc3339());
    params.push("from", from.as_deref());
    params.push("to", to.as_deref());

    params.0.push(("pageSize", filter.page_size.to_string()));
    params.0.push(("page", filter.page.to_string()));
    params
}
