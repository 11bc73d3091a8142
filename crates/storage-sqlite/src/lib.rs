//! SQLite storage implementation for LootHound.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `loothound-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for profiles and snapshots
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! Writes are serialized through a single writer task ([`WriteHandle`]); reads
//! use pooled connections.
//!
//! ```text
//!     core (domain)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod profiles;
pub mod snapshots;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use profiles::ProfileRepository;
pub use snapshots::SnapshotRepository;

// Re-export from loothound-core for convenience
pub use loothound_core::errors::{DatabaseError, Error, Result};
