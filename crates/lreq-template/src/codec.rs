use std::fmt;

use lreq_error::Result;
use lreq_slots::SlotAccessor;
use lreq_types::limits::{MAX_FILTER_INDEX, MIN_FILTER_INDEX};
use lreq_types::quantity::{decode, encode};
use lreq_types::{Combinator, CombinatorLayout, Filter, Position, SlotIndex, SlotRequest};
use tracing::debug;

use crate::config::{LayoutFormat, TemplateConfig};
use crate::packed::PackedRows;
use crate::template::Template;
use crate::validate::{canonical_pair, validate_canonical};

/// One way of laying requests out on combinators.
pub trait TemplateStrategy: fmt::Debug + Send + Sync {
    /// The format flag that selects this strategy.
    fn format(&self) -> LayoutFormat;

    /// Encode occupied slots (ascending index order) into a fresh layout.
    fn encode(&self, entries: &[(SlotIndex, SlotRequest)], combinator_name: &str)
    -> CombinatorLayout;

    /// Check that `layout` is trustworthy enough to decode.
    fn validate(&self, layout: &CombinatorLayout, combinator_name: &str) -> Result<()>;

    /// Decode a layout that already passed [`TemplateStrategy::validate`].
    fn decode(&self, layout: &CombinatorLayout) -> Template;
}

/// Grid position of the device encoding `index`: column across, row down.
pub(crate) fn grid_position(column: u32, row: u32) -> Position {
    Position::new(f64::from(column), f64::from(row))
}

/// Placeholder emitted when there is nothing to encode, so an empty
/// template is still a non-degenerate, importable layout.
pub(crate) fn placeholder_layout(combinator_name: &str) -> CombinatorLayout {
    CombinatorLayout::new(vec![Combinator::empty(
        1,
        combinator_name,
        grid_position(1, 1),
    )])
}

/// The canonical layout: one combinator per occupied slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneSlotPerCombinator;

impl TemplateStrategy for OneSlotPerCombinator {
    fn format(&self) -> LayoutFormat {
        LayoutFormat::Canonical
    }

    fn encode(
        &self,
        entries: &[(SlotIndex, SlotRequest)],
        combinator_name: &str,
    ) -> CombinatorLayout {
        if entries.is_empty() {
            return placeholder_layout(combinator_name);
        }
        let devices = entries
            .iter()
            .zip(1_u32..)
            .map(|((index, request), entity_number)| {
                Combinator::with_filters(
                    entity_number,
                    combinator_name,
                    grid_position(index.column(), index.row()),
                    vec![
                        Filter::item(request.item(), encode(request.min()), MIN_FILTER_INDEX),
                        Filter::item(request.item(), encode(request.max()), MAX_FILTER_INDEX),
                    ],
                )
            })
            .collect();
        CombinatorLayout::new(devices)
    }

    fn validate(&self, layout: &CombinatorLayout, combinator_name: &str) -> Result<()> {
        validate_canonical(layout, combinator_name)
    }

    fn decode(&self, layout: &CombinatorLayout) -> Template {
        // Devices are numbered in row-major order regardless of how the
        // raw list is ordered; filterless devices carry nothing.
        let requests = layout
            .sorted_by_position()
            .into_iter()
            .filter_map(canonical_pair)
            .map(|(min, max)| {
                SlotRequest::new(min.signal.name.clone(), decode(min.count), decode(max.count))
            });
        Template::from_requests(requests)
    }
}

/// Converts between an entity's request slots and a combinator layout.
#[derive(Debug, Clone, Default)]
pub struct TemplateCodec {
    config: TemplateConfig,
}

impl TemplateCodec {
    pub const fn new(config: TemplateConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// The strategy selected by the configured format.
    pub fn strategy(&self) -> &'static dyn TemplateStrategy {
        match self.config.format {
            LayoutFormat::Canonical => &OneSlotPerCombinator,
            LayoutFormat::Packed => &PackedRows,
        }
    }

    /// Encode every occupied slot of `table`.
    pub fn slots_to_layout<S: SlotAccessor + ?Sized>(&self, table: &S) -> CombinatorLayout {
        let entries = table.occupied();
        let layout = self
            .strategy()
            .encode(&entries, &self.config.combinator_name);
        debug!(
            format = %self.config.format,
            slots = entries.len(),
            devices = layout.len(),
            "encoded request slots"
        );
        layout
    }

    pub fn validate(&self, layout: &CombinatorLayout) -> Result<()> {
        self.strategy()
            .validate(layout, &self.config.combinator_name)
    }

    pub fn is_valid(&self, layout: &CombinatorLayout) -> bool {
        self.validate(layout).is_ok()
    }

    /// Validate and decode `layout`. An invalid layout yields
    /// `InvalidTemplate` and no partial result.
    pub fn layout_to_slots(&self, layout: &CombinatorLayout) -> Result<Template> {
        self.validate(layout)?;
        let template = self.strategy().decode(layout);
        debug!(
            format = %self.config.format,
            devices = layout.len(),
            entries = template.len(),
            "decoded template"
        );
        Ok(template)
    }
}
