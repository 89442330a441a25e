//! Public API for logistics request templates.
//!
//! Re-exports the pieces a host needs to run player commands: the command
//! surface, the slot accessor seam, and the codec configuration.

pub mod command;
pub mod session;

pub use command::{Command, Cursor, Outcome};
pub use lreq_core::{AutoTrashInfo, MergeMode, MergeReport, locate};
pub use lreq_error::{ErrorCode, RequestError, Result};
pub use lreq_slots::{
    CharacterHost, CharacterSlots, EntityKind, MemorySlots, SlotAccessor, VehicleHost, VehicleSlots,
};
pub use lreq_template::{LayoutFormat, TemplateCodec, TemplateConfig};
pub use lreq_types::{CombinatorLayout, Quantity, SlotIndex, SlotRequest};
pub use session::{PlayerSession, execute};
