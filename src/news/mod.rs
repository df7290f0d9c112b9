//! Translation between the local search model and the provider's API.

pub mod client;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod query;

pub use client::NewsClient;
pub use filter::SearchFilter;
pub use models::{Article, ExtendedArticle};
pub use normalize::normalize_article;
pub use query::{build_provider_query, ProviderParams};
