use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use loothound_core::constants::DEFAULT_PRICING_REVISION;
use loothound_stash_api::StashApiConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Stamped on every new snapshot
    pub pricing_revision: i64,
    pub stash_api: StashApiConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("LH_LISTEN_ADDR", "0.0.0.0:8088")
            .parse()
            .context("Invalid LH_LISTEN_ADDR")?;
        let db_path = env_or("LH_DB_PATH", "./db/loothound.db");
        let cors_allow = env_or("LH_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("LH_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let pricing_revision: i64 = match std::env::var("LH_PRICING_REVISION") {
            Ok(value) => value
                .trim()
                .parse()
                .context("LH_PRICING_REVISION must be an integer")?,
            Err(_) => DEFAULT_PRICING_REVISION,
        };

        let mut stash_api = StashApiConfig::default()
            .with_access_token(env_or("LH_POE_ACCESS_TOKEN", ""))
            .with_realm(std::env::var("LH_POE_REALM").ok());
        if let Ok(base_url) = std::env::var("LH_POE_API_URL") {
            stash_api = stash_api.with_base_url(base_url);
        }
        if let Ok(user_agent) = std::env::var("LH_USER_AGENT") {
            stash_api.user_agent = user_agent;
        }

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            pricing_revision,
            stash_api,
        })
    }
}
