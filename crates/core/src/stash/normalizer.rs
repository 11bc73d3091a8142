//! Stash normalization.
//!
//! Turns one classified stash tab into zero or more [`Item`]s. Normalization
//! is total: entries that cannot be turned into an item are skipped and
//! logged, never fabricated and never reported as errors.

use log::debug;
use loothound_stash_api::StashItem;

use super::stash_model::{GenericStash, MapStash, MapStashChild, StashContainer};
use crate::constants::{MAP_ITEM_FRAME_TYPE, MAP_ITEM_HEIGHT, MAP_ITEM_WIDTH};
use crate::items::Item;

/// Why a raw entry was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MalformedData {
    MissingField(&'static str),
    MissingMapMetadata,
}

/// Normalizes a single stash tab.
pub fn normalize(container: &StashContainer) -> Vec<Item> {
    match container {
        StashContainer::Generic(stash) => normalize_generic(stash),
        StashContainer::Map(stash) => normalize_map(stash),
    }
}

/// Normalizes several tabs into one flat list, preserving tab order.
pub fn normalize_all(containers: &[StashContainer]) -> Vec<Item> {
    containers.iter().flat_map(normalize).collect()
}

fn normalize_generic(stash: &GenericStash) -> Vec<Item> {
    stash
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match item_from_raw(raw, &stash.id) {
            Ok(item) => Some(item),
            Err(reason) => {
                debug!(
                    "Skipping item #{} in stash {}: {:?}",
                    index, stash.id, reason
                );
                None
            }
        })
        .collect()
}

fn normalize_map(stash: &MapStash) -> Vec<Item> {
    stash
        .children
        .iter()
        .filter_map(|child| match item_from_map_child(child, &stash.id) {
            Ok(item) => Some(item),
            Err(reason) => {
                debug!(
                    "Skipping map slot {} in stash {}: {:?}",
                    child.id, stash.id, reason
                );
                None
            }
        })
        .collect()
}

fn item_from_raw(raw: &StashItem, stash_id: &str) -> Result<Item, MalformedData> {
    Ok(Item {
        provider_id: raw.id.clone(),
        verified: raw.verified.unwrap_or(false),
        w: raw.w.ok_or(MalformedData::MissingField("w"))?,
        h: raw.h.ok_or(MalformedData::MissingField("h"))?,
        icon: raw
            .icon
            .clone()
            .ok_or(MalformedData::MissingField("icon"))?,
        name: raw.name.clone().unwrap_or_default(),
        type_line: raw
            .type_line
            .clone()
            .ok_or(MalformedData::MissingField("typeLine"))?,
        base_type: raw
            .base_type
            .clone()
            .ok_or(MalformedData::MissingField("baseType"))?,
        identified: raw.identified.unwrap_or(false),
        ilvl: raw.ilvl,
        frame_type: raw
            .frame_type
            .ok_or(MalformedData::MissingField("frameType"))?,
        stack_size: raw.stack_size,
        stash_id: stash_id.to_string(),
    })
}

fn item_from_map_child(child: &MapStashChild, stash_id: &str) -> Result<Item, MalformedData> {
    let map = child.map.as_ref().ok_or(MalformedData::MissingMapMetadata)?;
    let name = map
        .name
        .clone()
        .ok_or(MalformedData::MissingField("name"))?;
    let icon = map
        .image
        .clone()
        .ok_or(MalformedData::MissingField("image"))?;
    Ok(Item {
        provider_id: None,
        verified: false,
        w: MAP_ITEM_WIDTH,
        h: MAP_ITEM_HEIGHT,
        icon,
        type_line: name.clone(),
        base_type: name.clone(),
        name,
        identified: true,
        ilvl: None,
        frame_type: MAP_ITEM_FRAME_TYPE,
        stack_size: None,
        stash_id: stash_id.to_string(),
    })
}
