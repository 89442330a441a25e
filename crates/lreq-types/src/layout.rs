//! Combinator layouts: the shareable template artifact.
//!
//! The JSON shape mirrors blueprint entities:
//!
//! ```text
//! { "entities": [
//!     { "entity_number": 1, "name": "constant-combinator",
//!       "position": { "x": 1.0, "y": 1.0 },
//!       "control_behavior": { "filters": [
//!           { "signal": { "type": "item", "name": "iron-plate" }, "count": 10, "index": 1 },
//!           { "signal": { "type": "item", "name": "iron-plate" }, "count": 20, "index": 11 } ] } } ] }
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Kind of signal a filter carries. Only `Item` signals encode requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Item,
    Fluid,
    Virtual,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalId {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub name: String,
}

/// One filter slot of a combinator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub signal: SignalId,
    pub count: i32,
    pub index: u32,
}

impl Filter {
    /// An item-signal filter.
    pub fn item(name: impl Into<String>, count: i32, index: u32) -> Self {
        Self {
            signal: SignalId {
                kind: SignalKind::Item,
                name: name.into(),
            },
            count,
            index,
        }
    }

    pub const fn is_item(&self) -> bool {
        matches!(self.signal.kind, SignalKind::Item)
    }
}

/// Grid position of a device. `y` is the row, `x` the column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Row-major order: ascending row, then ascending column.
    pub fn row_major_cmp(&self, other: &Self) -> Ordering {
        self.y
            .total_cmp(&other.y)
            .then_with(|| self.x.total_cmp(&other.x))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBehavior {
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// A device in a layout. Anything whose `name` is not the configured
/// combinator kind makes the whole layout unimportable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combinator {
    pub entity_number: u32,
    pub name: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_behavior: Option<ControlBehavior>,
}

impl Combinator {
    /// A device with no filters.
    pub fn empty(entity_number: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            entity_number,
            name: name.into(),
            position,
            control_behavior: None,
        }
    }

    pub fn with_filters(
        entity_number: u32,
        name: impl Into<String>,
        position: Position,
        filters: Vec<Filter>,
    ) -> Self {
        Self {
            entity_number,
            name: name.into(),
            position,
            control_behavior: Some(ControlBehavior { filters }),
        }
    }

    /// Filters of this device; empty when it has no control behavior.
    pub fn filters(&self) -> &[Filter] {
        self.control_behavior
            .as_ref()
            .map_or(&[], |behavior| behavior.filters.as_slice())
    }

    /// The filter at `index`, if present.
    pub fn filter_at(&self, index: u32) -> Option<&Filter> {
        self.filters().iter().find(|filter| filter.index == index)
    }
}

/// An ordered list of devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinatorLayout {
    #[serde(default)]
    pub entities: Vec<Combinator>,
}

impl CombinatorLayout {
    pub fn new(entities: Vec<Combinator>) -> Self {
        Self { entities }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Devices sorted row-major by position. Stable for equal positions.
    pub fn sorted_by_position(&self) -> Vec<&Combinator> {
        let mut sorted: Vec<&Combinator> = self.entities.iter().collect();
        sorted.sort_by(|a, b| a.position.row_major_cmp(&b.position));
        sorted
    }
}
