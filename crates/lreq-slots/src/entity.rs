//! Adapters that present each host entity shape as a [`SlotAccessor`].
//!
//! Characters and vehicles name their slot methods differently. The command
//! layer resolves one adapter per command and never switches on entity type
//! again.

use lreq_error::{RequestError, Result};
use lreq_types::limits::MAX_SLOT_COUNT;
use lreq_types::{SlotIndex, SlotRequest};
use tracing::trace;

use crate::traits::{CharacterHost, EntityKind, SlotAccessor, VehicleHost};

fn check_range(index: SlotIndex) -> Result<u32> {
    let raw = index.get();
    if raw > MAX_SLOT_COUNT {
        return Err(RequestError::SlotOutOfRange {
            index: raw,
            max: MAX_SLOT_COUNT,
        });
    }
    Ok(raw)
}

/// Personal logistic slots of a character.
#[derive(Debug)]
pub struct CharacterSlots<H> {
    host: H,
}

impl<H: CharacterHost> CharacterSlots<H> {
    pub const fn new(host: H) -> Self {
        Self { host }
    }

    pub fn into_inner(self) -> H {
        self.host
    }
}

impl<H: CharacterHost> SlotAccessor for CharacterSlots<H> {
    fn kind(&self) -> EntityKind {
        EntityKind::Character
    }

    fn slot_count(&self) -> u32 {
        self.host.request_slot_count()
    }

    fn get_slot(&self, index: SlotIndex) -> Option<SlotRequest> {
        self.host.personal_logistic_slot(index.get())
    }

    fn set_slot(&mut self, index: SlotIndex, request: Option<SlotRequest>) -> Result<()> {
        let slot = check_range(index)?;
        trace!(slot, cleared = request.is_none(), "character slot write");
        match request {
            Some(request) => self.host.set_personal_logistic_slot(slot, request),
            None => self.host.clear_personal_logistic_slot(slot),
        }
    }
}

/// Logistic slots of a vehicle.
#[derive(Debug)]
pub struct VehicleSlots<H> {
    host: H,
}

impl<H: VehicleHost> VehicleSlots<H> {
    pub const fn new(host: H) -> Self {
        Self { host }
    }

    pub fn into_inner(self) -> H {
        self.host
    }
}

impl<H: VehicleHost> SlotAccessor for VehicleSlots<H> {
    fn kind(&self) -> EntityKind {
        EntityKind::Vehicle
    }

    fn slot_count(&self) -> u32 {
        self.host.request_slot_count()
    }

    fn get_slot(&self, index: SlotIndex) -> Option<SlotRequest> {
        self.host.vehicle_logistic_slot(index.get())
    }

    fn set_slot(&mut self, index: SlotIndex, request: Option<SlotRequest>) -> Result<()> {
        let slot = check_range(index)?;
        trace!(slot, cleared = request.is_none(), "vehicle slot write");
        match request {
            Some(request) => self.host.set_vehicle_logistic_slot(slot, request),
            None => self.host.clear_vehicle_logistic_slot(slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use lreq_types::Quantity;

    use super::*;
    use crate::memory::MemorySlots;

    fn idx(n: u32) -> SlotIndex {
        SlotIndex::new(n).unwrap()
    }

    fn req(item: &str, min: u32, max: u32) -> SlotRequest {
        SlotRequest::new(item, Quantity::new(min), Quantity::new(max))
    }

    /// A vehicle host that records which method names were called.
    #[derive(Default)]
    struct RecordingVehicle {
        table: MemorySlots,
        calls: Vec<&'static str>,
    }

    impl VehicleHost for RecordingVehicle {
        fn request_slot_count(&self) -> u32 {
            self.table.slot_count()
        }

        fn vehicle_logistic_slot(&self, slot: u32) -> Option<SlotRequest> {
            self.table.get(slot).cloned()
        }

        fn set_vehicle_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()> {
            self.calls.push("set_vehicle_logistic_slot");
            self.table.insert(slot, request)
        }

        fn clear_vehicle_logistic_slot(&mut self, slot: u32) -> Result<()> {
            self.calls.push("clear_vehicle_logistic_slot");
            self.table.remove(slot).map(|_| ())
        }
    }

    #[test]
    fn test_character_adapter_reads_and_writes() {
        let mut table = MemorySlots::new();
        let mut slots = CharacterSlots::new(&mut table);
        assert_eq!(slots.kind(), EntityKind::Character);
        slots.set_slot(idx(3), Some(req("coal", 1, 9))).unwrap();
        assert_eq!(slots.slot_count(), 3);
        assert_eq!(slots.get_slot(idx(3)), Some(req("coal", 1, 9)));
        slots.set_slot(idx(3), None).unwrap();
        assert_eq!(slots.get_slot(idx(3)), None);
        assert_eq!(table.slot_count(), 3);
    }

    #[test]
    fn test_vehicle_adapter_routes_to_vehicle_methods() {
        let mut slots = VehicleSlots::new(RecordingVehicle::default());
        assert_eq!(slots.kind(), EntityKind::Vehicle);
        slots.set_slot(idx(1), Some(req("wood", 0, 0))).unwrap();
        slots.set_slot(idx(1), None).unwrap();
        let host = slots.into_inner();
        assert_eq!(
            host.calls,
            vec!["set_vehicle_logistic_slot", "clear_vehicle_logistic_slot"]
        );
    }

    #[test]
    fn test_out_of_range_write_rejected() {
        let mut slots = CharacterSlots::new(MemorySlots::new());
        let err = slots
            .set_slot(idx(MAX_SLOT_COUNT + 1), Some(req("coal", 1, 1)))
            .unwrap_err();
        assert!(matches!(err, RequestError::SlotOutOfRange { .. }));
    }

    #[test]
    fn test_occupied_and_clear_all() {
        let mut slots = CharacterSlots::new(MemorySlots::with_slot_count(12));
        slots.set_slot(idx(2), Some(req("a", 1, 1))).unwrap();
        slots.set_slot(idx(11), Some(req("b", 1, 1))).unwrap();
        let occupied: Vec<u32> = slots.occupied().iter().map(|(i, _)| i.get()).collect();
        assert_eq!(occupied, vec![2, 11]);
        assert_eq!(slots.clear_all().unwrap(), 2);
        assert!(slots.occupied().is_empty());
        assert_eq!(slots.slot_count(), 12);
    }
}
