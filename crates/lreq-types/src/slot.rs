//! A single personal logistics request.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;

/// One request: an item with a minimum and maximum bound.
///
/// `min <= max` holds for every value of this type. Constructors and
/// deserialization swap reversed bounds instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSlotRequest")]
pub struct SlotRequest {
    item: String,
    min: Quantity,
    max: Quantity,
}

#[derive(Deserialize)]
struct RawSlotRequest {
    item: String,
    #[serde(default)]
    min: Quantity,
    #[serde(default = "infinite")]
    max: Quantity,
}

const fn infinite() -> Quantity {
    Quantity::INFINITE
}

impl From<RawSlotRequest> for SlotRequest {
    fn from(raw: RawSlotRequest) -> Self {
        Self::new(raw.item, raw.min, raw.max)
    }
}

impl SlotRequest {
    /// Create a request, swapping the bounds if they arrive reversed.
    pub fn new(item: impl Into<String>, min: Quantity, max: Quantity) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self {
            item: item.into(),
            min,
            max,
        }
    }

    /// An auto-trash request (`min == max == 0`).
    pub fn trash(item: impl Into<String>) -> Self {
        Self::new(item, Quantity::ZERO, Quantity::ZERO)
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub const fn min(&self) -> Quantity {
        self.min
    }

    pub const fn max(&self) -> Quantity {
        self.max
    }

    /// Whether this is a pure auto-trash request.
    pub const fn is_trash(&self) -> bool {
        self.min.is_zero() && self.max.is_zero()
    }

    /// Replace both bounds, keeping the item.
    #[must_use]
    pub fn with_bounds(&self, min: Quantity, max: Quantity) -> Self {
        Self::new(self.item.clone(), min, max)
    }
}

impl fmt::Display for SlotRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}..{}]", self.item, self.min, self.max)
    }
}
