//! Raw stash payloads as returned by the provider.
//!
//! These structs mirror the provider JSON. Fields that a payload may omit
//! are `Option`s so a single bad entry never fails the whole stash decode;
//! deciding what is usable is left to the normalizer in core.

use serde::{Deserialize, Serialize};

/// Stash type tag used by the provider for map stash tabs.
pub const MAP_STASH_TYPE: &str = "MapStash";

/// A single stash tab, possibly with child tabs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashTab {
    pub id: String,
    /// Parent tab id, set on child tabs (e.g. map stash sections)
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Provider discriminant, e.g. "NormalStash", "QuadStash", "MapStash"
    #[serde(rename = "type")]
    pub stash_type: String,
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub metadata: StashMetadata,
    #[serde(default)]
    pub children: Option<Vec<StashTab>>,
    #[serde(default)]
    pub items: Option<Vec<StashItem>>,
}

impl StashTab {
    pub fn is_map_stash(&self) -> bool {
        self.stash_type == MAP_STASH_TYPE
    }
}

/// Tab metadata. Only child tabs of a map stash carry `map`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashMetadata {
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub folder: Option<bool>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub map: Option<MapMetadata>,
}

/// Map slot metadata. `name` and `image` are optional here so one incomplete
/// slot is dropped by the normalizer instead of failing the tab decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub tier: Option<u32>,
    #[serde(default)]
    pub series: Option<u32>,
}

/// An item as listed inside a stash tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub w: Option<u8>,
    #[serde(default)]
    pub h: Option<u8>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub identified: Option<bool>,
    #[serde(default)]
    pub ilvl: Option<u32>,
    #[serde(default)]
    pub frame_type: Option<u8>,
    #[serde(default)]
    pub stack_size: Option<u32>,
}

/// Lightweight entry from the stash list endpoint (no items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub stash_type: String,
    #[serde(default)]
    pub index: Option<u32>,
}

impl From<&StashTab> for StashSummary {
    fn from(tab: &StashTab) -> Self {
        Self {
            id: tab.id.clone(),
            name: tab.name.clone(),
            stash_type: tab.stash_type.clone(),
            index: tab.index,
        }
    }
}

/// Envelope of `GET /stash/{league}/{stash_id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct StashResponse {
    pub stash: StashTab,
}

/// Envelope of `GET /stash/{league}`.
#[derive(Debug, Deserialize)]
pub(crate) struct StashListResponse {
    #[serde(default)]
    pub stashes: Vec<StashTab>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_normal_stash() {
        let json = r#"{
            "id": "a1b2c3",
            "name": "Currency",
            "type": "CurrencyStash",
            "index": 0,
            "metadata": { "public": false, "colour": "7c5436" },
            "items": [
                {
                    "id": "item-1",
                    "verified": false,
                    "w": 1,
                    "h": 1,
                    "icon": "https://web.poecdn.com/chaos.png",
                    "name": "",
                    "typeLine": "Chaos Orb",
                    "baseType": "Chaos Orb",
                    "identified": true,
                    "ilvl": 0,
                    "frameType": 5,
                    "stackSize": 37
                }
            ]
        }"#;

        let tab: StashTab = serde_json::from_str(json).unwrap();
        assert_eq!(tab.id, "a1b2c3");
        assert_eq!(tab.stash_type, "CurrencyStash");
        assert!(!tab.is_map_stash());
        let items = tab.items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].type_line.as_deref(), Some("Chaos Orb"));
        assert_eq!(items[0].frame_type, Some(5));
        assert_eq!(items[0].stack_size, Some(37));
    }

    #[test]
    fn test_deserialize_map_stash_children() {
        let json = r#"{
            "id": "maps",
            "name": "Maps",
            "type": "MapStash",
            "children": [
                {
                    "id": "maps-1",
                    "parent": "maps",
                    "type": "MapStash",
                    "metadata": {
                        "map": {
                            "section": "1",
                            "name": "Strand Map",
                            "image": "https://web.poecdn.com/strand.png",
                            "tier": 1
                        }
                    }
                },
                {
                    "id": "maps-2",
                    "parent": "maps",
                    "type": "MapStash",
                    "metadata": {}
                }
            ]
        }"#;

        let tab: StashTab = serde_json::from_str(json).unwrap();
        assert!(tab.is_map_stash());
        assert!(tab.items.is_none());
        let children = tab.children.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[0].metadata.map.as_ref().and_then(|m| m.name.as_deref()),
            Some("Strand Map")
        );
        assert!(children[1].metadata.map.is_none());
    }

    #[test]
    fn test_incomplete_map_slot_does_not_fail_tab_decode() {
        let json = r#"{
            "id": "maps",
            "name": "Maps",
            "type": "MapStash",
            "children": [
                { "id": "m1", "type": "MapStash",
                  "metadata": { "map": { "name": "Strand Map", "image": "strand.png" } } },
                { "id": "m2", "type": "MapStash",
                  "metadata": { "map": { "name": "Dunes Map" } } },
                { "id": "m3", "type": "MapStash",
                  "metadata": { "map": { "name": "Cemetery Map", "image": "cemetery.png" } } }
            ]
        }"#;

        let tab: StashTab = serde_json::from_str(json).unwrap();
        let children = tab.children.unwrap();
        assert_eq!(children.len(), 3);
        let middle = children[1].metadata.map.as_ref().unwrap();
        assert_eq!(middle.name.as_deref(), Some("Dunes Map"));
        assert!(middle.image.is_none());
        assert_eq!(
            children[2].metadata.map.as_ref().and_then(|m| m.image.as_deref()),
            Some("cemetery.png")
        );
    }

    #[test]
    fn test_item_with_missing_fields_still_decodes() {
        let json = r#"{ "typeLine": "Scroll of Wisdom" }"#;
        let item: StashItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.type_line.as_deref(), Some("Scroll of Wisdom"));
        assert!(item.w.is_none());
        assert!(item.icon.is_none());
    }
}
