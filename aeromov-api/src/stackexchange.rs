use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use aeromov_shared::models::stackexchange::SearchStats;

pub fn routes() -> Router<AppState> {
    Router::new().route("/search/stats", get(search_stats))
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    tag: Option<String>,
}

/// GET /search/stats?tag=
///
/// Proxy statistics over the Stack Exchange search API for one tag.
async fn search_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<SearchStats>, AppError> {
    let tag = query
        .tag
        .unwrap_or_else(|| state.stackexchange.default_tag().to_string());
    Ok(Json(state.stackexchange.stats(&tag).await?))
}
