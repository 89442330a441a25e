use std::collections::{HashMap, HashSet};
use std::fmt;

use lreq_error::{RequestError, Result};
use lreq_slots::SlotAccessor;
use lreq_template::Template;
use lreq_types::limits::MAX_SLOT_COUNT;
use lreq_types::{Quantity, SlotIndex, SlotRequest, row_boundary};
use tracing::debug;

/// How a template is combined with the entity's current requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// Clear everything, then write the template from slot 1.
    Replace,
    /// Write the template after the last used row, leaving existing slots alone.
    Append,
    /// Add template bounds to matching requests; place new items after the last row.
    Increment,
    /// Subtract template bounds from matching requests; ignore absent items.
    Decrement,
    /// Overwrite matching requests in place; place new items after the last row.
    Set,
}

impl MergeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Append => "append",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Slots that received a request.
    pub written: usize,
    /// Slots that were emptied.
    pub cleared: usize,
}

/// Combine `template` with the requests in `table` according to `mode`.
pub fn merge<S: SlotAccessor + ?Sized>(
    table: &mut S,
    template: &Template,
    mode: MergeMode,
) -> Result<MergeReport> {
    let report = match mode {
        MergeMode::Replace => replace(table, template),
        MergeMode::Append => append(table, template),
        MergeMode::Increment => upsert(table, template, |existing, entry| {
            existing.with_bounds(
                existing.min().saturating_add(entry.min()),
                existing.max().saturating_add(entry.max()),
            )
        }),
        MergeMode::Decrement => decrement(table, template),
        MergeMode::Set => upsert(table, template, |existing, entry| {
            existing.with_bounds(entry.min(), entry.max())
        }),
    }?;
    debug!(
        mode = %mode,
        entity = %table.kind(),
        entries = template.len(),
        written = report.written,
        cleared = report.cleared,
        "merged template"
    );
    Ok(report)
}

fn slot_at(raw: u32) -> Result<SlotIndex> {
    SlotIndex::new(raw).ok_or_else(|| RequestError::internal("computed slot index 0"))
}

/// Reject a merge whose highest write would land past the slot ceiling.
/// Runs before the first write so a refused merge changes nothing.
fn ensure_fits(highest: u32) -> Result<()> {
    if highest > MAX_SLOT_COUNT {
        return Err(RequestError::SlotOutOfRange {
            index: highest,
            max: MAX_SLOT_COUNT,
        });
    }
    Ok(())
}

fn last_template_index(template: &Template) -> u32 {
    template.iter().last().map_or(0, |(index, _)| index.get())
}

fn replace<S: SlotAccessor + ?Sized>(table: &mut S, template: &Template) -> Result<MergeReport> {
    ensure_fits(last_template_index(template))?;
    let cleared = table.clear_all()?;
    for (index, request) in template.iter() {
        table.set_slot(index, Some(request.clone()))?;
    }
    Ok(MergeReport {
        written: template.len(),
        cleared,
    })
}

fn append<S: SlotAccessor + ?Sized>(table: &mut S, template: &Template) -> Result<MergeReport> {
    let offset = row_boundary(table.slot_count());
    if !template.is_empty() {
        ensure_fits(offset.saturating_add(last_template_index(template)))?;
    }
    for (index, request) in template.iter() {
        table.set_slot(index.offset(offset), Some(request.clone()))?;
    }
    Ok(MergeReport {
        written: template.len(),
        cleared: 0,
    })
}

/// Item -> (slot, request) for every occupied slot. The lowest slot wins
/// when an item is requested twice.
fn requested_items<S: SlotAccessor + ?Sized>(table: &S) -> HashMap<String, (SlotIndex, SlotRequest)> {
    let mut lookup = HashMap::new();
    for (index, request) in table.occupied() {
        lookup
            .entry(request.item().to_owned())
            .or_insert((index, request));
    }
    lookup
}

/// Shared by increment and set: combine matches in place, place new items
/// one after another starting at the first slot past the last used row.
fn upsert<S, F>(table: &mut S, template: &Template, combine: F) -> Result<MergeReport>
where
    S: SlotAccessor + ?Sized,
    F: Fn(&SlotRequest, &SlotRequest) -> SlotRequest,
{
    let mut lookup = requested_items(table);
    let mut next_free = row_boundary(table.slot_count()).saturating_add(1);

    let mut seen = HashSet::new();
    let new_items = template
        .requests()
        .filter(|entry| !lookup.contains_key(entry.item()) && seen.insert(entry.item()))
        .count();
    if new_items > 0 {
        let new_items = u32::try_from(new_items).unwrap_or(u32::MAX);
        ensure_fits(next_free.saturating_add(new_items - 1))?;
    }

    for entry in template.requests() {
        let (index, request) = match lookup.get(entry.item()) {
            Some((index, existing)) => (*index, combine(existing, entry)),
            None => {
                let index = slot_at(next_free)?;
                next_free = next_free.saturating_add(1);
                (index, entry.clone())
            }
        };
        table.set_slot(index, Some(request.clone()))?;
        lookup.insert(request.item().to_owned(), (index, request));
    }
    Ok(MergeReport {
        written: template.len(),
        cleared: 0,
    })
}

/// Reduce `existing` by `entry`. `None` removes the request.
fn decremented(existing: &SlotRequest, entry: &SlotRequest) -> Option<SlotRequest> {
    if existing.min().is_zero() && entry.max() >= existing.max() {
        return None;
    }
    let min = existing.min().saturating_sub(entry.min());
    let max = if existing.max().is_infinite() {
        Quantity::INFINITE
    } else {
        existing.max().saturating_sub(entry.max())
    };
    Some(existing.with_bounds(min, max.max(min)))
}

fn decrement<S: SlotAccessor + ?Sized>(table: &mut S, template: &Template) -> Result<MergeReport> {
    let mut lookup = requested_items(table);
    let mut report = MergeReport::default();
    for entry in template.requests() {
        let Some((index, existing)) = lookup.remove(entry.item()) else {
            continue;
        };
        match decremented(&existing, entry) {
            Some(request) => {
                table.set_slot(index, Some(request.clone()))?;
                lookup.insert(request.item().to_owned(), (index, request));
                report.written += 1;
            }
            None => {
                table.set_slot(index, None)?;
                report.cleared += 1;
            }
        }
    }
    Ok(report)
}
