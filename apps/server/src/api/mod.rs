use std::sync::Arc;

use axum::{http::StatusCode, Router};
use loothound_core::query::{QueryState, QueryStatus};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

mod health;
mod profiles;
mod snapshots;
mod stashes;

/// Unwraps a cached read for a handler.
///
/// A failed refetch that still holds an earlier value serves that value.
/// Errors without data map to `error_status`; disabled reads are the
/// caller's job since their meaning differs per route.
pub(crate) fn query_data<T>(state: QueryState<T>, error_status: StatusCode) -> ApiResult<T> {
    if let Some(data) = state.data {
        return Ok(data);
    }
    match state.status {
        QueryStatus::Idle => Err(ApiError::BadRequest("Query is disabled".to_string())),
        _ => Err(ApiError::Query {
            status: error_status,
            message: state
                .error
                .unwrap_or_else(|| "Query returned no data".to_string()),
        }),
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .merge(health::router())
        .merge(profiles::router())
        .merge(snapshots::router())
        .merge(stashes::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
