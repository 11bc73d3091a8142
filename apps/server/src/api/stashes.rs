use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use loothound_stash_api::StashSummary;

use crate::{
    api::query_data,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::StashQuery,
};

async fn list_stashes(
    Query(query): Query<StashQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<StashSummary>>> {
    let stashes = state.queries.stashes(query.league.as_deref()).await;
    if stashes.is_idle() {
        return Err(ApiError::BadRequest(
            "Query parameter 'league' is required".to_string(),
        ));
    }
    Ok(Json(query_data(stashes, StatusCode::BAD_GATEWAY)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stashes", get(list_stashes))
}
