pub mod entity;
pub mod memory;
pub mod traits;

pub use entity::{CharacterSlots, VehicleSlots};
pub use memory::MemorySlots;
pub use traits::{CharacterHost, EntityKind, SlotAccessor, VehicleHost};
