//! Conversion between request slots and combinator layouts.
//!
//! Two layouts exist. The canonical one stores one slot per combinator
//! (minimum at filter index 1, maximum at index 11). The legacy packed one
//! stores a whole row of ten slots per combinator (minimums at 1-10,
//! maximums at 11-20). Both share the quantity encoding in
//! [`lreq_types::quantity`]; [`TemplateConfig::format`] selects which one a
//! [`TemplateCodec`] speaks.

pub mod codec;
pub mod config;
pub mod packed;
pub mod template;
pub mod validate;

pub use codec::{OneSlotPerCombinator, TemplateCodec, TemplateStrategy};
pub use config::{LayoutFormat, TemplateConfig};
pub use packed::PackedRows;
pub use template::Template;
