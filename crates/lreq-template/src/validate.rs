//! Structural checks on untrusted layouts.
//!
//! A layout must pass one of these before any of its contents are decoded.
//! A failure rejects the whole layout; nothing is partially accepted.

use lreq_error::{RequestError, Result};
use lreq_types::limits::{MAX_FILTER_INDEX, MIN_FILTER_INDEX};
use lreq_types::{Combinator, CombinatorLayout, Filter};
use tracing::warn;

fn reject(device: Option<&Combinator>, rule: &'static str, reason: String) -> RequestError {
    warn!(
        rule,
        entity_number = device.map(|d| d.entity_number),
        reason = %reason,
        "template rejected"
    );
    RequestError::invalid_template(reason)
}

fn check_devices(layout: &CombinatorLayout, combinator_name: &str) -> Result<()> {
    if layout.is_empty() {
        return Err(reject(None, "non_empty", "layout has no devices".to_owned()));
    }
    if let Some(device) = layout
        .entities
        .iter()
        .find(|device| device.name != combinator_name)
    {
        return Err(reject(
            Some(device),
            "combinator_only",
            format!(
                "device {} is `{}`, expected `{combinator_name}`",
                device.entity_number, device.name
            ),
        ));
    }
    Ok(())
}

/// Split a device's filters into its (minimum, maximum) pair.
///
/// Order in the raw list is irrelevant. Returns `None` for a device with no
/// filters at all.
fn min_max_pair(device: &Combinator) -> Result<Option<(&Filter, &Filter)>> {
    let filters = device.filters();
    if filters.is_empty() {
        return Ok(None);
    }
    if filters.len() != 2 {
        return Err(reject(
            Some(device),
            "exactly_two_filters",
            format!(
                "device {} has {} filters, expected 2",
                device.entity_number,
                filters.len()
            ),
        ));
    }
    let (a, b) = (&filters[0], &filters[1]);
    let (min, max) = if a.index <= b.index { (a, b) } else { (b, a) };
    if min.index != MIN_FILTER_INDEX || max.index != MAX_FILTER_INDEX {
        return Err(reject(
            Some(device),
            "filter_indices",
            format!(
                "device {} has filters at {} and {}, expected {MIN_FILTER_INDEX} and {MAX_FILTER_INDEX}",
                device.entity_number, min.index, max.index
            ),
        ));
    }
    if !min.is_item() || !max.is_item() {
        return Err(reject(
            Some(device),
            "item_signals",
            format!("device {} carries a non-item signal", device.entity_number),
        ));
    }
    if min.signal.name.is_empty() {
        return Err(reject(
            Some(device),
            "item_name",
            format!("device {} names an empty item", device.entity_number),
        ));
    }
    if min.signal.name != max.signal.name {
        return Err(reject(
            Some(device),
            "same_item",
            format!(
                "device {} names `{}` and `{}`",
                device.entity_number, min.signal.name, max.signal.name
            ),
        ));
    }
    Ok(Some((min, max)))
}

/// Validate a one-slot-per-combinator layout.
///
/// Every device must be a combinator. A device with filters must have
/// exactly two item filters, at indices 1 and 11, naming the same item.
pub fn validate_canonical(layout: &CombinatorLayout, combinator_name: &str) -> Result<()> {
    check_devices(layout, combinator_name)?;
    for device in &layout.entities {
        min_max_pair(device)?;
    }
    Ok(())
}

/// Validate a packed layout.
///
/// Looser than [`validate_canonical`]: only requires every filter to carry
/// a named item signal. Any number of filters at any index is tolerated.
pub fn validate_packed(layout: &CombinatorLayout, combinator_name: &str) -> Result<()> {
    check_devices(layout, combinator_name)?;
    for device in &layout.entities {
        if let Some(filter) = device.filters().iter().find(|filter| !filter.is_item()) {
            return Err(reject(
                Some(device),
                "item_signals",
                format!(
                    "device {} filter {} carries a non-item signal",
                    device.entity_number, filter.index
                ),
            ));
        }
        if let Some(filter) = device.filters().iter().find(|filter| filter.signal.name.is_empty()) {
            return Err(reject(
                Some(device),
                "item_name",
                format!(
                    "device {} filter {} names an empty item",
                    device.entity_number, filter.index
                ),
            ));
        }
    }
    Ok(())
}

/// The (minimum, maximum) filters of a device that passed
/// [`validate_canonical`]. `None` for a device without filters.
pub(crate) fn canonical_pair(device: &Combinator) -> Option<(&Filter, &Filter)> {
    min_max_pair(device).ok().flatten()
}
