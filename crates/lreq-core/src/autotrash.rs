//! The auto-trash region: pure-trash requests (`min == max == 0`) kept at
//! the tail of the table, behind a buffer of blank rows.
//!
//! The region is never stored. [`locate`] rediscovers it on every command by
//! scanning down from the last slot until the first regular request.

use std::collections::{BTreeMap, HashSet};

use lreq_error::Result;
use lreq_slots::SlotAccessor;
use lreq_types::limits::{AUTO_TRASH_DEFAULT_GAP, MAX_SLOT_COUNT, SLOTS_PER_ROW};
use lreq_types::{SlotIndex, SlotRequest, full_row_floor};
use tracing::{debug, warn};

/// Where the auto-trash region sits in a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTrashInfo {
    /// First slot of the region.
    pub start_index: SlotIndex,
    /// First slot past the region; new entries go here once gaps run out.
    pub append_index: SlotIndex,
    /// Empty slots inside the region, ascending.
    pub gaps: Vec<SlotIndex>,
    /// Occupied slots inside the region.
    pub occupied: BTreeMap<SlotIndex, SlotRequest>,
}

/// Per-row state accumulated while scanning downwards.
#[derive(Debug, Clone, Copy)]
struct RowScan {
    has_trash: bool,
    all_blank: bool,
}

impl RowScan {
    const FRESH: Self = Self {
        has_trash: false,
        all_blank: true,
    };

    const fn is_blank(self) -> bool {
        self.all_blank && !self.has_trash
    }
}

/// Find the auto-trash region of `table`.
pub fn locate<S: SlotAccessor + ?Sized>(table: &S) -> AutoTrashInfo {
    let count = table.slot_count();
    let mut start: Option<u32> = None;
    let mut lowest_trash: Option<u32> = None;
    let mut row = RowScan::FRESH;
    let mut next_row_blank = false;

    for index in SlotIndex::range(1, count).rev() {
        match table.get_slot(index) {
            Some(request) if !request.is_trash() => break,
            Some(_) => {
                row.has_trash = true;
                row.all_blank = false;
                lowest_trash = Some(index.get());
            }
            None => {}
        }
        if index.is_row_start() {
            let first = index.get();
            if row.is_blank() {
                let buffer = if next_row_blank { 2 } else { 1 };
                start = Some(first.saturating_add(buffer * SLOTS_PER_ROW));
            }
            next_row_blank = row.is_blank();
            row = RowScan::FRESH;
        }
    }

    let start = start
        .or(lowest_trash)
        .unwrap_or_else(|| full_row_floor(count).saturating_add(AUTO_TRASH_DEFAULT_GAP));
    let append = if start > count {
        start
    } else {
        count.saturating_add(1)
    };

    let mut gaps = Vec::new();
    let mut occupied = BTreeMap::new();
    for index in SlotIndex::range(start, count) {
        match table.get_slot(index) {
            Some(request) => {
                occupied.insert(index, request);
            }
            None => gaps.push(index),
        }
    }

    let info = AutoTrashInfo {
        // `start` is at least one row past a real index or past the default gap.
        start_index: SlotIndex::new(start).unwrap_or(SlotIndex::ONE),
        append_index: SlotIndex::new(append).unwrap_or(SlotIndex::ONE),
        gaps,
        occupied,
    };
    debug!(
        entity = %table.kind(),
        slot_count = count,
        start = %info.start_index,
        append = %info.append_index,
        gaps = info.gaps.len(),
        occupied = info.occupied.len(),
        "located auto-trash region"
    );
    info
}

/// Add a trash request for every catalog item not yet requested anywhere.
///
/// Gaps inside the region are filled first, lowest index first; the rest
/// go after the region. Empty item names are skipped. Stops with a warning
/// once the slot ceiling is reached. Returns the number of requests written.
pub fn fill_auto_trash<S, I>(table: &mut S, catalog: I) -> Result<usize>
where
    S: SlotAccessor + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let info = locate(table);
    let mut requested: HashSet<String> = table
        .occupied()
        .into_iter()
        .map(|(_, request)| request.item().to_owned())
        .collect();
    let mut gaps = info.gaps.into_iter();
    let mut cursor = info.append_index.get();
    let mut written = 0_usize;

    for item in catalog {
        let item = item.as_ref();
        if item.is_empty() || requested.contains(item) {
            continue;
        }
        let index = match gaps.next() {
            Some(index) => index,
            None => {
                let Some(index) = SlotIndex::new(cursor).filter(|i| i.get() <= MAX_SLOT_COUNT)
                else {
                    warn!(
                        entity = %table.kind(),
                        item,
                        max = MAX_SLOT_COUNT,
                        "auto-trash region full; remaining items skipped"
                    );
                    break;
                };
                cursor = cursor.saturating_add(1);
                index
            }
        };
        table.set_slot(index, Some(SlotRequest::trash(item)))?;
        requested.insert(item.to_owned());
        written += 1;
    }

    debug!(entity = %table.kind(), written, "filled auto-trash region");
    Ok(written)
}

/// Remove every request in the auto-trash region. Returns how many were cleared.
pub fn clear_auto_trash<S: SlotAccessor + ?Sized>(table: &mut S) -> Result<usize> {
    let info = locate(table);
    for index in info.occupied.keys() {
        table.set_slot(*index, None)?;
    }
    debug!(
        entity = %table.kind(),
        cleared = info.occupied.len(),
        "cleared auto-trash region"
    );
    Ok(info.occupied.len())
}

#[cfg(test)]
mod tests {
    use lreq_slots::{MemorySlots, VehicleSlots};
    use lreq_types::Quantity;

    use super::*;

    fn regular(item: &str) -> SlotRequest {
        SlotRequest::new(item, Quantity::new(1), Quantity::new(5))
    }

    fn table(slot_count: u32, entries: &[(u32, SlotRequest)]) -> VehicleSlots<MemorySlots> {
        let mut memory = MemorySlots::with_slot_count(slot_count);
        for (slot, request) in entries {
            memory.insert(*slot, request.clone()).unwrap();
        }
        VehicleSlots::new(memory)
    }

    fn raw(indices: &[SlotIndex]) -> Vec<u32> {
        indices.iter().map(|i| i.get()).collect()
    }

    #[test]
    fn test_single_regular_slot_reserves_two_rows() {
        let slots = table(1, &[(1, regular("coal"))]);
        let info = locate(&slots);
        assert_eq!(info.start_index.get(), 21);
        assert_eq!(info.append_index.get(), 21);
        assert!(info.gaps.is_empty());
        assert!(info.occupied.is_empty());
    }

    #[test]
    fn test_empty_table_starts_at_21() {
        let info = locate(&table(0, &[]));
        assert_eq!(info.start_index.get(), 21);
        assert_eq!(info.append_index.get(), 21);
    }

    #[test]
    fn test_full_regular_rows_default_past_two_blank_rows() {
        let entries: Vec<(u32, SlotRequest)> =
            (1..=10).map(|i| (i, regular(&format!("item-{i}")))).collect();
        let info = locate(&table(10, &entries));
        assert_eq!(info.start_index.get(), 31);
    }

    #[test]
    fn test_fill_then_refill_reuses_freed_gap() {
        let mut slots = table(1, &[(1, regular("coal"))]);
        let catalog = ["coal", "wood", "stone", "sand"];
        assert_eq!(fill_auto_trash(&mut slots, catalog).unwrap(), 3);
        assert_eq!(slots.get_slot(SlotIndex::new(21).unwrap()), Some(SlotRequest::trash("wood")));
        assert_eq!(slots.get_slot(SlotIndex::new(23).unwrap()), Some(SlotRequest::trash("sand")));
        assert_eq!(slots.slot_count(), 23);

        slots.set_slot(SlotIndex::new(22).unwrap(), None).unwrap();
        let info = locate(&slots);
        assert_eq!(info.start_index.get(), 21);
        assert_eq!(raw(&info.gaps), vec![22]);
        assert_eq!(info.append_index.get(), 24);

        assert_eq!(fill_auto_trash(&mut slots, catalog).unwrap(), 1);
        assert_eq!(slots.get_slot(SlotIndex::new(22).unwrap()), Some(SlotRequest::trash("stone")));
        assert_eq!(slots.slot_count(), 23);
    }

    #[test]
    fn test_fill_is_idempotent() {
        let mut slots = table(3, &[(1, regular("coal"))]);
        fill_auto_trash(&mut slots, ["wood", "stone"]).unwrap();
        assert_eq!(fill_auto_trash(&mut slots, ["wood", "stone"]).unwrap(), 0);
    }

    #[test]
    fn test_fill_skips_duplicate_catalog_items() {
        let mut slots = table(0, &[]);
        assert_eq!(fill_auto_trash(&mut slots, ["wood", "wood"]).unwrap(), 1);
    }

    #[test]
    fn test_fill_skips_empty_item_names() {
        let mut slots = table(0, &[]);
        assert_eq!(fill_auto_trash(&mut slots, ["", "wood"]).unwrap(), 1);
        assert_eq!(slots.get_slot(SlotIndex::new(21).unwrap()), Some(SlotRequest::trash("wood")));
    }

    #[test]
    fn test_blank_rows_beyond_two_become_gaps() {
        // Regular requests in row 1, rows 2-5 blank, trash in row 6.
        let mut entries: Vec<(u32, SlotRequest)> =
            (1..=10).map(|i| (i, regular(&format!("item-{i}")))).collect();
        entries.extend((51..=60).map(|i| (i, SlotRequest::trash(format!("t{i}")))));
        let info = locate(&table(60, &entries));
        assert_eq!(info.start_index.get(), 31);
        assert_eq!(info.append_index.get(), 61);
        assert_eq!(raw(&info.gaps), (31..=50).collect::<Vec<u32>>());
        assert_eq!(info.occupied.len(), 10);
    }

    #[test]
    fn test_region_grows_past_new_regular_rows() {
        // Regular slots up to row 3, trash in row 6.
        let mut entries: Vec<(u32, SlotRequest)> = vec![(25, regular("coal"))];
        entries.extend((51..=53).map(|i| (i, SlotRequest::trash(format!("t{i}")))));
        let info = locate(&table(53, &entries));
        // Rows 4 and 5 are blank; the region starts after both.
        assert_eq!(info.start_index.get(), 51);
        assert_eq!(info.append_index.get(), 54);
        assert_eq!(info.occupied.len(), 3);
    }

    #[test]
    fn test_trash_directly_after_regular_starts_at_lowest_trash() {
        let entries = vec![
            (1, regular("coal")),
            (2, SlotRequest::trash("wood")),
            (3, SlotRequest::trash("stone")),
        ];
        let info = locate(&table(3, &entries));
        assert_eq!(info.start_index.get(), 2);
        assert_eq!(info.append_index.get(), 4);
        assert_eq!(info.occupied.len(), 2);
    }

    #[test]
    fn test_clear_leaves_regular_requests() {
        let mut slots = table(1, &[(1, regular("coal"))]);
        fill_auto_trash(&mut slots, ["wood", "stone"]).unwrap();
        assert_eq!(clear_auto_trash(&mut slots).unwrap(), 2);
        assert_eq!(slots.occupied(), vec![(SlotIndex::ONE, regular("coal"))]);
    }

    #[test]
    fn test_fill_stops_at_slot_ceiling() {
        let mut slots = table(MAX_SLOT_COUNT - 22, &[(MAX_SLOT_COUNT - 22, regular("coal"))]);
        let catalog: Vec<String> = (0..50).map(|i| format!("item-{i}")).collect();
        let written = fill_auto_trash(&mut slots, &catalog).unwrap();
        assert!(written > 0);
        assert!(slots.slot_count() <= MAX_SLOT_COUNT);
        assert!(written < catalog.len());
    }
}
