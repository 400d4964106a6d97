use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use clerk_core::{search_all, SearchHit};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// `GET /search?q=...`: task hits first, then note hits.
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let Query(params) = params?;
    let hits = state
        .with_connection(move |conn| Ok(search_all(conn, &params.q)?))
        .await?;
    Ok(Json(hits))
}
