/// Width of a synthesized map item.
pub const MAP_ITEM_WIDTH: u8 = 1;

/// Height of a synthesized map item.
pub const MAP_ITEM_HEIGHT: u8 = 1;

/// Frame classifier given to synthesized map items (normal rarity).
pub const MAP_ITEM_FRAME_TYPE: u8 = 0;

/// Pricing revision stamped on new snapshots when none is configured.
pub const DEFAULT_PRICING_REVISION: i64 = 1;
