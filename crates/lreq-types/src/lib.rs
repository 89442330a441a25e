pub mod layout;
pub mod limits;
pub mod quantity;
pub mod slot;

pub use layout::{Combinator, CombinatorLayout, ControlBehavior, Filter, Position, SignalId, SignalKind};
pub use quantity::Quantity;
pub use slot::SlotRequest;

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::limits::SLOTS_PER_ROW;

/// A request slot index.
///
/// Slot indices are 1-based (slot 0 does not exist). Every ten consecutive
/// indices form a row: slots 1-10 are row 1, 11-20 row 2, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct SlotIndex(NonZeroU32);

impl SlotIndex {
    /// The first slot.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a slot index from a raw u32.
    ///
    /// Returns `None` if `n` is 0.
    #[inline]
    pub const fn new(n: u32) -> Option<Self> {
        match NonZeroU32::new(n) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// 1-based row containing this slot: `ceil(i / 10)`.
    #[inline]
    pub const fn row(self) -> u32 {
        self.get().div_ceil(SLOTS_PER_ROW)
    }

    /// 1-based column within the row: `(i - 1) mod 10 + 1`.
    #[inline]
    pub const fn column(self) -> u32 {
        (self.get() - 1) % SLOTS_PER_ROW + 1
    }

    /// Whether this is the first slot of its row.
    #[inline]
    pub const fn is_row_start(self) -> bool {
        self.column() == 1
    }

    /// The following slot index, saturating at `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The index `n` slots after this one, saturating at `u32::MAX`.
    #[inline]
    #[must_use]
    pub const fn offset(self, n: u32) -> Self {
        Self(self.0.saturating_add(n))
    }

    /// Iterate `first..=last`. Empty when `last < first`.
    pub fn range(first: u32, last: u32) -> impl DoubleEndedIterator<Item = Self> {
        (first.max(1)..=last).filter_map(Self::new)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for SlotIndex {
    type Error = InvalidSlotIndex;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidSlotIndex)
    }
}

impl From<SlotIndex> for u32 {
    fn from(value: SlotIndex) -> Self {
        value.get()
    }
}

/// Error returned when attempting to create a `SlotIndex` from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSlotIndex;

impl fmt::Display for InvalidSlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("slot index cannot be zero")
    }
}

impl std::error::Error for InvalidSlotIndex {}

/// The last index of the last row touched by `count` slots:
/// `ceil(count / 10) * 10`. Zero for an empty table.
#[inline]
pub const fn row_boundary(count: u32) -> u32 {
    count.div_ceil(SLOTS_PER_ROW) * SLOTS_PER_ROW
}

/// The last index of the last *complete* row within `count` slots:
/// `floor(count / 10) * 10`.
#[inline]
pub const fn full_row_floor(count: u32) -> u32 {
    count / SLOTS_PER_ROW * SLOTS_PER_ROW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index_zero_rejected() {
        assert!(SlotIndex::new(0).is_none());
        assert_eq!(SlotIndex::try_from(0), Err(InvalidSlotIndex));
        assert_eq!(SlotIndex::ONE.get(), 1);
    }

    #[test]
    fn test_row_and_column() {
        let cases: &[(u32, u32, u32)] = &[
            (1, 1, 1),
            (10, 1, 10),
            (11, 2, 1),
            (20, 2, 10),
            (21, 3, 1),
            (35, 4, 5),
        ];
        for &(i, row, col) in cases {
            let idx = SlotIndex::new(i).unwrap();
            assert_eq!(idx.row(), row, "row({i})");
            assert_eq!(idx.column(), col, "column({i})");
        }
        assert!(SlotIndex::new(21).unwrap().is_row_start());
        assert!(!SlotIndex::new(22).unwrap().is_row_start());
    }

    #[test]
    fn test_row_boundary() {
        assert_eq!(row_boundary(0), 0);
        assert_eq!(row_boundary(3), 10);
        assert_eq!(row_boundary(10), 10);
        assert_eq!(row_boundary(11), 20);
        assert_eq!(full_row_floor(0), 0);
        assert_eq!(full_row_floor(9), 0);
        assert_eq!(full_row_floor(19), 10);
    }

    #[test]
    fn test_range() {
        let raw: Vec<u32> = SlotIndex::range(0, 3).map(SlotIndex::get).collect();
        assert_eq!(raw, vec![1, 2, 3]);
        assert_eq!(SlotIndex::range(5, 4).count(), 0);
        let rev: Vec<u32> = SlotIndex::range(1, 3).rev().map(SlotIndex::get).collect();
        assert_eq!(rev, vec![3, 2, 1]);
    }

    #[test]
    fn test_serde_as_plain_number() {
        let idx = SlotIndex::new(12).unwrap();
        assert_eq!(serde_json::to_string(&idx).unwrap(), "12");
        assert!(serde_json::from_str::<SlotIndex>("0").is_err());
    }
}
