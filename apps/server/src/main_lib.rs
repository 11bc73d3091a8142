use std::sync::Arc;

use crate::{config::Config, domain_events::TracingDomainEventSink};
use loothound_core::{
    events::DomainEventSink,
    profiles::{ProfileService, ProfileServiceTrait},
    query::{LootQueries, QueryCache, SharedQueryCache},
    snapshots::{SnapshotService, SnapshotServiceTrait},
};
use loothound_stash_api::{PoeStashClient, StashProvider};
use loothound_storage_sqlite::{db, ProfileRepository, SnapshotRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub profile_service: Arc<dyn ProfileServiceTrait>,
    pub snapshot_service: Arc<dyn SnapshotServiceTrait>,
    pub queries: Arc<LootQueries>,
    /// Process-wide query cache; lives as long as the server.
    pub query_cache: SharedQueryCache,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("LH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the state with the HTTP stash client from `config`.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let client = PoeStashClient::new(config.stash_api.clone())?;
    build_state_with_provider(config, Arc::new(client)).await
}

pub async fn build_state_with_provider(
    config: &Config,
    stash_provider: Arc<dyn StashProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let profile_repository = Arc::new(ProfileRepository::new(pool.clone(), writer.clone()));
    let snapshot_repository = Arc::new(SnapshotRepository::new(
        pool.clone(),
        writer,
        config.pricing_revision,
    ));

    let query_cache = QueryCache::shared();
    let domain_event_sink: Arc<dyn DomainEventSink> = Arc::new(TracingDomainEventSink::new());

    let profile_service = Arc::new(
        ProfileService::new(profile_repository.clone(), query_cache.clone())
            .with_event_sink(domain_event_sink.clone()),
    );
    let snapshot_service = Arc::new(
        SnapshotService::new(
            profile_repository.clone(),
            snapshot_repository.clone(),
            stash_provider.clone(),
            query_cache.clone(),
        )
        .with_event_sink(domain_event_sink),
    );
    let queries = Arc::new(LootQueries::new(
        query_cache.clone(),
        profile_repository,
        snapshot_repository,
        stash_provider.clone(),
    ));
    tracing::info!("Stash provider: {}", stash_provider.id());

    Ok(Arc::new(AppState {
        profile_service,
        snapshot_service,
        queries,
        query_cache,
        db_path,
    }))
}
