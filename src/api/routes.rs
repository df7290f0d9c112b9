use axum::{
    routing::get,
    Router,
    extract::{rejection::JsonRejection, Json, Query, State},
};
use tower_http::cors::{CorsLayer, Any};
use tracing::{info, warn};

use crate::error::Result;
use crate::api::models::ArticlesRequest;
use crate::news::ExtendedArticle;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/articles", get(list_articles_handler).post(search_articles_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn list_articles_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ExtendedArticle>>> {
    let req = ArticlesRequest::from_pairs(pairs)?;
    process_articles_request(&state, req).await.map(Json)
}

async fn search_articles_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ArticlesRequest>, JsonRejection>,
) -> Result<Json<Vec<ExtendedArticle>>> {
    let Json(req) = payload?;
    process_articles_request(&state, req).await.map(Json)
}

async fn process_articles_request(
    state: &AppState,
    req: ArticlesRequest,
) -> Result<Vec<ExtendedArticle>> {
    let start_time = std::time::Instant::now();
    let filter = req.into_filter();

    match state.news.search(&filter).await {
        Ok(articles) => {
            info!(
                "Served {} articles (page {}, size {}) in {:?}",
                articles.len(),
                filter.page,
                filter.page_size,
                start_time.elapsed()
            );
            Ok(articles.into_iter().map(ExtendedArticle::from).collect())
        }
        Err(err) => {
            warn!("Article search failed after {:?}: {}", start_time.elapsed(), err);
            Err(err)
        }
    }
}
