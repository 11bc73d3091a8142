//! SQLite storage implementation for profiles.

mod model;
mod repository;

pub use model::{NewProfileDB, ProfileDB};
pub use repository::ProfileRepository;
