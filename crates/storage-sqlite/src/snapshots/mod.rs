//! SQLite storage implementation for snapshots and their items.

mod model;
mod repository;

pub use model::{NewSnapshotDB, NewSnapshotItemDB, SnapshotDB, SnapshotItemDB};
pub use repository::SnapshotRepository;
