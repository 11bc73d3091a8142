//! Items module - the normalized item shape shared by snapshots and stashes.

mod items_model;

pub use items_model::Item;
