use std::fmt;

use lreq_error::Result;
use lreq_types::{SlotIndex, SlotRequest};

/// The kind of entity whose request slots are being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A player character (personal logistic slots).
    Character,
    /// A vehicle with its own logistic slots.
    Vehicle,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Character => "character",
            Self::Vehicle => "vehicle",
        })
    }
}

/// Indexed access to an entity's logistic request slots.
///
/// This is the only seam between the request engine and the host. Indices
/// are 1-based and contiguous in `[1, slot_count]`. Writing past
/// `slot_count` grows the table to that index; clearing never shrinks it.
pub trait SlotAccessor {
    /// Which kind of entity backs this accessor.
    fn kind(&self) -> EntityKind;

    /// Number of slots the entity currently exposes.
    fn slot_count(&self) -> u32;

    /// Read one slot. `None` means unrequested.
    fn get_slot(&self, index: SlotIndex) -> Option<SlotRequest>;

    /// Overwrite one slot. `None` clears it.
    fn set_slot(&mut self, index: SlotIndex, request: Option<SlotRequest>) -> Result<()>;

    /// Every occupied slot in ascending index order.
    fn occupied(&self) -> Vec<(SlotIndex, SlotRequest)> {
        SlotIndex::range(1, self.slot_count())
            .filter_map(|index| self.get_slot(index).map(|request| (index, request)))
            .collect()
    }

    /// Clear every slot in `[1, slot_count]`, returning how many were occupied.
    fn clear_all(&mut self) -> Result<usize> {
        let occupied = self.occupied();
        for (index, _) in &occupied {
            self.set_slot(*index, None)?;
        }
        Ok(occupied.len())
    }
}

impl<T: SlotAccessor + ?Sized> SlotAccessor for &mut T {
    fn kind(&self) -> EntityKind {
        (**self).kind()
    }

    fn slot_count(&self) -> u32 {
        (**self).slot_count()
    }

    fn get_slot(&self, index: SlotIndex) -> Option<SlotRequest> {
        (**self).get_slot(index)
    }

    fn set_slot(&mut self, index: SlotIndex, request: Option<SlotRequest>) -> Result<()> {
        (**self).set_slot(index, request)
    }
}

/// Host API of a character: personal logistic slots.
pub trait CharacterHost {
    fn request_slot_count(&self) -> u32;

    fn personal_logistic_slot(&self, slot: u32) -> Option<SlotRequest>;

    fn set_personal_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()>;

    fn clear_personal_logistic_slot(&mut self, slot: u32) -> Result<()>;
}

/// Host API of a vehicle: vehicle logistic slots.
pub trait VehicleHost {
    fn request_slot_count(&self) -> u32;

    fn vehicle_logistic_slot(&self, slot: u32) -> Option<SlotRequest>;

    fn set_vehicle_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()>;

    fn clear_vehicle_logistic_slot(&mut self, slot: u32) -> Result<()>;
}

impl<H: CharacterHost + ?Sized> CharacterHost for &mut H {
    fn request_slot_count(&self) -> u32 {
        (**self).request_slot_count()
    }

    fn personal_logistic_slot(&self, slot: u32) -> Option<SlotRequest> {
        (**self).personal_logistic_slot(slot)
    }

    fn set_personal_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()> {
        (**self).set_personal_logistic_slot(slot, request)
    }

    fn clear_personal_logistic_slot(&mut self, slot: u32) -> Result<()> {
        (**self).clear_personal_logistic_slot(slot)
    }
}

impl<H: VehicleHost + ?Sized> VehicleHost for &mut H {
    fn request_slot_count(&self) -> u32 {
        (**self).request_slot_count()
    }

    fn vehicle_logistic_slot(&self, slot: u32) -> Option<SlotRequest> {
        (**self).vehicle_logistic_slot(slot)
    }

    fn set_vehicle_logistic_slot(&mut self, slot: u32, request: SlotRequest) -> Result<()> {
        (**self).set_vehicle_logistic_slot(slot, request)
    }

    fn clear_vehicle_logistic_slot(&mut self, slot: u32) -> Result<()> {
        (**self).clear_vehicle_logistic_slot(slot)
    }
}
