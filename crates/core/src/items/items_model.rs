//! Normalized item model.

use serde::{Deserialize, Serialize};

/// An item as stored in a snapshot.
///
/// Produced by the stash normalizer from any stash tab shape. Items carry no
/// database identity of their own; they belong to exactly one snapshot once
/// attached, and `stash_id` records the tab they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Provider item id, when the provider sent one
    pub provider_id: Option<String>,
    pub verified: bool,
    pub w: u8,
    pub h: u8,
    pub icon: String,
    pub name: String,
    pub type_line: String,
    pub base_type: String,
    pub identified: bool,
    pub ilvl: Option<u32>,
    /// Rarity classifier (0 = normal, 1 = magic, 2 = rare, 3 = unique, ...)
    pub frame_type: u8,
    pub stack_size: Option<u32>,
    pub stash_id: String,
}

impl Item {
    /// Display label: the item name when set, otherwise its type line.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.type_line
        } else {
            &self.name
        }
    }

    /// Stack size, treating unstackable items as a stack of one.
    pub fn quantity(&self) -> u32 {
        self.stack_size.unwrap_or(1)
    }
}
