//! Stash module - stash tab shapes and their normalization into items.

mod normalizer;
mod stash_model;

pub use normalizer::{normalize, normalize_all};
pub use stash_model::{GenericStash, MapStash, MapStashChild, StashContainer};
