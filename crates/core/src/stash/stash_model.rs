//! Stash container variants.
//!
//! The provider returns every tab with the same loose JSON shape. Here each
//! tab is classified once into a closed set of variants so that code
//! handling one shape cannot reach fields that only exist on another.

use loothound_stash_api::{MapMetadata, StashItem, StashTab};
use serde::{Deserialize, Serialize};

/// A stash tab classified by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StashContainer {
    /// Any tab that lists its items directly (normal, quad, currency, ...)
    Generic(GenericStash),
    /// Map stash: children each describe a single map slot
    Map(MapStash),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericStash {
    pub id: String,
    pub name: String,
    pub stash_type: String,
    pub items: Vec<StashItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStash {
    pub id: String,
    pub name: String,
    pub children: Vec<MapStashChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStashChild {
    pub id: String,
    pub map: Option<MapMetadata>,
}

impl StashContainer {
    pub fn id(&self) -> &str {
        match self {
            StashContainer::Generic(stash) => &stash.id,
            StashContainer::Map(stash) => &stash.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StashContainer::Generic(stash) => &stash.name,
            StashContainer::Map(stash) => &stash.name,
        }
    }
}

impl From<StashTab> for StashContainer {
    fn from(tab: StashTab) -> Self {
        if tab.is_map_stash() {
            let children = tab
                .children
                .unwrap_or_default()
                .into_iter()
                .map(|child| MapStashChild {
                    id: child.id,
                    map: child.metadata.map,
                })
                .collect();
            StashContainer::Map(MapStash {
                id: tab.id,
                name: tab.name,
                children,
            })
        } else {
            StashContainer::Generic(GenericStash {
                id: tab.id,
                name: tab.name,
                stash_type: tab.stash_type,
                items: tab.items.unwrap_or_default(),
            })
        }
    }
}
