//! Layout constants shared by the codec, merge engine and auto-trash manager.

/// Number of consecutive slot indices that form one row.
pub const SLOTS_PER_ROW: u32 = 10;

/// Highest slot index an entity may expose.
pub const MAX_SLOT_COUNT: u32 = 1000;

/// Filter index carrying the minimum in the one-slot-per-combinator layout.
pub const MIN_FILTER_INDEX: u32 = 1;

/// Filter index carrying the maximum in the one-slot-per-combinator layout.
pub const MAX_FILTER_INDEX: u32 = 11;

/// Highest filter index used by the packed ten-slots-per-combinator layout.
pub const PACKED_MAX_FILTER_INDEX: u32 = 20;

/// Auto-trash start offset past the last full row when no buffer was found.
pub const AUTO_TRASH_DEFAULT_GAP: u32 = 21;

/// Entity name of the device that carries encoded requests.
pub const DEFAULT_COMBINATOR_NAME: &str = "constant-combinator";
