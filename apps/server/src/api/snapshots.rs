use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use loothound_core::{
    errors::{DatabaseError, Error as CoreError},
    items::Item,
    snapshots::{Snapshot, SnapshotOutcome, SnapshotStats},
};

use crate::{
    api::query_data,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// 404 unless the profile is in the current profile list. Snapshot history
/// cached for a deleted profile is never served.
async fn ensure_profile(state: &AppState, profile_id: i64) -> ApiResult<()> {
    let profiles = query_data(
        state.queries.profiles().await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )?;
    if profiles.iter().any(|p| p.id == profile_id) {
        return Ok(());
    }
    Err(CoreError::Database(DatabaseError::NotFound(format!("Profile {}", profile_id))).into())
}

async fn list_snapshots(
    Path(profile_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Snapshot>>> {
    ensure_profile(&state, profile_id).await?;
    let snapshots = state.queries.snapshots(Some(profile_id)).await;
    Ok(Json(query_data(
        snapshots,
        StatusCode::INTERNAL_SERVER_ERROR,
    )?))
}

async fn take_snapshot(
    Path(profile_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SnapshotOutcome>)> {
    // Detached from the request: a timed-out client must not cancel a
    // snapshot halfway through attaching its tabs.
    let service = Arc::clone(&state.snapshot_service);
    let outcome = tokio::spawn(async move { service.take_snapshot(Some(profile_id)).await })
        .await
        .map_err(|e| ApiError::Anyhow(anyhow::Error::new(e)))??;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Items of the profile's newest snapshot; empty when there is none yet.
/// A failed snapshot list surfaces as an error rather than an empty list.
async fn latest_items(
    Path(profile_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Item>>> {
    ensure_profile(&state, profile_id).await?;
    let items = state
        .queries
        .latest_snapshot_items(Some(profile_id), None)
        .await;
    if items.is_idle() {
        return Ok(Json(Vec::new()));
    }
    Ok(Json(query_data(items, StatusCode::INTERNAL_SERVER_ERROR)?))
}

async fn snapshot_stats(
    Path(profile_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SnapshotStats>> {
    ensure_profile(&state, profile_id).await?;
    let stats = state.queries.snapshot_stats(Some(profile_id)).await;
    Ok(Json(query_data(stats, StatusCode::INTERNAL_SERVER_ERROR)?))
}

async fn snapshot_items(
    Path(snapshot_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = state.queries.snapshot_items(Some(snapshot_id), None).await;
    Ok(Json(query_data(items, StatusCode::INTERNAL_SERVER_ERROR)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/profiles/{id}/snapshots",
            get(list_snapshots).post(take_snapshot),
        )
        .route("/profiles/{id}/items", get(latest_items))
        .route("/profiles/{id}/stats", get(snapshot_stats))
        .route("/snapshots/{id}/items", get(snapshot_items))
}
