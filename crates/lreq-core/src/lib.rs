//! Slot-level algorithms over a [`lreq_slots::SlotAccessor`].
//!
//! - [`merge`]: combine a decoded template with the current requests
//!   (replace, append, increment, decrement, set).
//! - [`autotrash`]: maintain the trailing auto-trash region.
//!
//! Every operation reads the table once to build its lookups and then
//! writes; there is no rollback.

pub mod autotrash;
pub mod merge;

pub use autotrash::{AutoTrashInfo, clear_auto_trash, fill_auto_trash, locate};
pub use merge::{MergeMode, MergeReport, merge};
