//! LootHound Stash API Crate
//!
//! This crate fetches raw stash tab payloads from the game data provider.
//! It owns the provider wire shapes and knows nothing about profiles,
//! snapshots or persistence; `loothound-core` turns these payloads into
//! normalized items.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Snapshot (core) | --> |  StashProvider   |  (trait)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  PoeStashClient  |  (HTTP)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    StashTab      |  (raw payload)
//!                          +------------------+
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;

pub use client::PoeStashClient;
pub use config::StashApiConfig;
pub use errors::StashApiError;
pub use models::{MapMetadata, StashItem, StashMetadata, StashSummary, StashTab};
pub use provider::StashProvider;
