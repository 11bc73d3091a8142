use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use loothound_core::profiles::Profile;

use crate::{api::query_data, error::ApiResult, main_lib::AppState, models::ProfileInput};

async fn list_profiles(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Profile>>> {
    let profiles = state.queries.profiles().await;
    Ok(Json(query_data(
        profiles,
        StatusCode::INTERNAL_SERVER_ERROR,
    )?))
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfileInput>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let created = state.profile_service.create_profile(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_profile(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfileInput>,
) -> ApiResult<Json<Profile>> {
    let updated = state
        .profile_service
        .update_profile(payload.into_update(id))
        .await?;
    Ok(Json(updated))
}

async fn delete_profile(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.profile_service.delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/{id}", put(update_profile).delete(delete_profile))
}
