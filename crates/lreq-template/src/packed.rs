//! Legacy packed layout: one combinator per row of ten slots.
//!
//! Filter `k` (1-10) carries the minimum of the row's `k`-th slot and
//! filter `k + 10` its maximum. Combinators are ordered by grid position and
//! the `n`-th one covers slots `10n + 1 ..= 10n + 10`.

use std::collections::BTreeMap;

use lreq_error::Result;
use lreq_types::limits::SLOTS_PER_ROW;
use lreq_types::quantity::{decode, encode};
use lreq_types::{Combinator, CombinatorLayout, Filter, Quantity, SlotIndex, SlotRequest};
use tracing::warn;

use crate::codec::{TemplateStrategy, grid_position, placeholder_layout};
use crate::config::LayoutFormat;
use crate::template::Template;
use crate::validate::validate_packed;

#[derive(Debug, Clone, Copy, Default)]
pub struct PackedRows;

impl TemplateStrategy for PackedRows {
    fn format(&self) -> LayoutFormat {
        LayoutFormat::Packed
    }

    fn encode(
        &self,
        entries: &[(SlotIndex, SlotRequest)],
        combinator_name: &str,
    ) -> CombinatorLayout {
        let mut rows: BTreeMap<u32, Vec<Filter>> = BTreeMap::new();
        for (index, request) in entries {
            let column = index.column();
            let filters = rows.entry(index.row()).or_default();
            filters.push(Filter::item(request.item(), encode(request.min()), column));
            filters.push(Filter::item(
                request.item(),
                encode(request.max()),
                column + SLOTS_PER_ROW,
            ));
        }
        let Some(&last_row) = rows.keys().next_back() else {
            return placeholder_layout(combinator_name);
        };

        // Rows without requests still get a device so later rows keep
        // their position on import.
        let devices = (1..=last_row)
            .map(|row| {
                let position = grid_position(1, row);
                match rows.remove(&row) {
                    Some(filters) => Combinator::with_filters(row, combinator_name, position, filters),
                    None => Combinator::empty(row, combinator_name, position),
                }
            })
            .collect();
        CombinatorLayout::new(devices)
    }

    fn validate(&self, layout: &CombinatorLayout, combinator_name: &str) -> Result<()> {
        validate_packed(layout, combinator_name)
    }

    fn decode(&self, layout: &CombinatorLayout) -> Template {
        let mut entries = Vec::new();
        for (base, device) in (0_u32..)
            .map(|n| n.saturating_mul(SLOTS_PER_ROW))
            .zip(layout.sorted_by_position())
        {
            for column in 1..=SLOTS_PER_ROW {
                let min = device.filter_at(column);
                let max = device.filter_at(column + SLOTS_PER_ROW);
                let request = match (min, max) {
                    (None, None) => continue,
                    (Some(min), Some(max)) if min.signal.name != max.signal.name => {
                        warn!(
                            entity_number = device.entity_number,
                            column,
                            min_item = %min.signal.name,
                            max_item = %max.signal.name,
                            "packed slot names two items; skipped"
                        );
                        continue;
                    }
                    (Some(min), Some(max)) => {
                        SlotRequest::new(min.signal.name.clone(), decode(min.count), decode(max.count))
                    }
                    (Some(min), None) => {
                        SlotRequest::new(min.signal.name.clone(), decode(min.count), Quantity::INFINITE)
                    }
                    (None, Some(max)) => {
                        SlotRequest::new(max.signal.name.clone(), Quantity::ZERO, decode(max.count))
                    }
                };
                if let Some(index) = SlotIndex::new(base.saturating_add(column)) {
                    entries.push((index, request));
                }
            }
        }
        Template::new(entries)
    }
}
