use std::collections::BTreeMap;

use lreq_error::{RequestError, Result};
use lreq_types::limits::MAX_SLOT_COUNT;
use lreq_types::{SlotIndex, SlotRequest};
use serde::{Deserialize, Serialize};

use crate::traits::{CharacterHost, VehicleHost};

/// An in-memory request table for tests and the CLI.
///
/// Serves as the storage behind either host shape, so the same table can be
/// edited as a character or as a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MemorySlotsRepr", into = "MemorySlotsRepr")]
pub struct MemorySlots {
    slots: BTreeMap<SlotIndex, SlotRequest>,
    slot_count: u32,
}

#[derive(Serialize, Deserialize)]
struct MemorySlotsRepr {
    #[serde(default)]
    slot_count: u32,
    #[serde(default)]
    slots: Vec<IndexedRequest>,
}

#[derive(Serialize, Deserialize)]
struct IndexedRequest {
    index: SlotIndex,
    request: SlotRequest,
}

impl From<MemorySlotsRepr> for MemorySlots {
    fn from(repr: MemorySlotsRepr) -> Self {
        let slots: BTreeMap<SlotIndex, SlotRequest> = repr
            .slots
            .into_iter()
            .map(|entry| (entry.index, entry.request))
            .collect();
        let highest = slots.keys().next_back().map_or(0, |index| index.get());
        Self {
            slot_count: repr.slot_count.max(highest),
            slots,
        }
    }
}

impl From<MemorySlots> for MemorySlotsRepr {
    fn from(table: MemorySlots) -> Self {
        Self {
            slot_count: table.slot_count,
            slots: table
                .slots
                .into_iter()
                .map(|(index, request)| IndexedRequest { index, request })
                .collect(),
        }
    }
}

impl MemorySlots {
    /// Create an empty table with zero slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table exposing `slot_count` slots.
    pub fn with_slot_count(slot_count: u32) -> Self {
        Self {
            slots: BTreeMap::new(),
            slot_count,
        }
    }

    pub const fn slot_count(&self) -> u32 {
        self.slot_count
    }

    pub fn get(&self, slot: u32) -> Option<&SlotRequest> {
        SlotIndex::new(slot).and_then(|index| self.slots.get(&index))
    }

    /// Occupied entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &SlotRequest)> {
        self.slots.iter().map(|(index, request)| (*index, request))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write `request` at `slot`, growing `slot_count` if needed.
    pub fn insert(&mut self, slot: u32, request: SlotRequest) -> Result<()> {
        let index = checked_index(slot)?;
        self.slot_count = self.slot_count.max(slot);
        self.slots.insert(index, request);
        Ok(())
    }

    /// Clear `slot`. Leaves `slot_count` unchanged.
    pub fn remove(&mut self, slot: u32) -> Result<Option<SlotRequest>> {
        let index = checked_index(slot)?;
        Ok(self.slots.remove(&index))
    }
}

fn checked_index(slot: u32) -> Result<SlotIndex> {
    if slot > MAX_SLOT_COUNT {
        return Err(RequestError::SlotOutOfRange {
            index: slot,
            max: MAX_SLOT_COUNT,
        });
    }
    SlotIndex::new(slot).ok_or(RequestError::SlotOutOfRange {
        index: slot,
        max: MAX_SLOT_COUNT,
    })
}

impl CharacterHost for MemorySlots {
    fn request_slot_count(&self) -> u32 {
        self.slot_count
    }

    fn personal_logistic_slot(&self, slot: u32) -> Option<SlotRequest> {
        self.get(slot).cloned()
    }

    fn set_personal_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()> {
        self.insert(slot, request)
    }

    fn clear_personal_logistic_slot(&mut self, slot: u32) -> Result<()> {
        self.remove(slot).map(|_| ())
    }
}

impl VehicleHost for MemorySlots {
    fn request_slot_count(&self) -> u32 {
        self.slot_count
    }

    fn vehicle_logistic_slot(&self, slot: u32) -> Option<SlotRequest> {
        self.get(slot).cloned()
    }

    fn set_vehicle_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()> {
        self.insert(slot, request)
    }

    fn clear_vehicle_logistic_slot(&mut self, slot: u32) -> Result<()> {
        self.remove(slot).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use lreq_types::Quantity;

    use super::*;

    fn req(item: &str, min: u32, max: u32) -> SlotRequest {
        SlotRequest::new(item, Quantity::new(min), Quantity::new(max))
    }

    #[test]
    fn test_insert_grows_slot_count() {
        let mut table = MemorySlots::with_slot_count(3);
        table.insert(12, req("coal", 1, 2)).unwrap();
        assert_eq!(table.slot_count(), 12);
        table.insert(2, req("wood", 1, 2)).unwrap();
        assert_eq!(table.slot_count(), 12);
    }

    #[test]
    fn test_remove_keeps_slot_count() {
        let mut table = MemorySlots::new();
        table.insert(5, req("coal", 1, 2)).unwrap();
        assert_eq!(table.remove(5).unwrap(), Some(req("coal", 1, 2)));
        assert_eq!(table.slot_count(), 5);
        assert!(table.is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut table = MemorySlots::new();
        assert!(matches!(
            table.insert(0, req("coal", 1, 2)),
            Err(RequestError::SlotOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            table.insert(MAX_SLOT_COUNT + 1, req("coal", 1, 2)),
            Err(RequestError::SlotOutOfRange { .. })
        ));
        assert_eq!(table.slot_count(), 0);
    }

    #[test]
    fn test_json_roundtrip_and_count_repair() {
        let json = r#"{
            "slot_count": 2,
            "slots": [ { "index": 7, "request": { "item": "coal", "min": 1, "max": 5 } } ]
        }"#;
        let table: MemorySlots = serde_json::from_str(json).unwrap();
        assert_eq!(table.slot_count(), 7);
        assert_eq!(table.get(7), Some(&req("coal", 1, 5)));

        let back: MemorySlots =
            serde_json::from_str(&serde_json::to_string(&table).unwrap()).unwrap();
        assert_eq!(back, table);
    }
}
