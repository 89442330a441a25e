use lreq_types::{SlotIndex, SlotRequest};

/// A decoded template: requests keyed by their template-relative index.
///
/// Indices are ascending and unique. The canonical layout always yields
/// `1, 2, 3, ...`; the packed layout may leave holes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    entries: Vec<(SlotIndex, SlotRequest)>,
}

impl Template {
    /// Build from indexed entries, sorting by index. Later duplicates win.
    pub fn new(mut entries: Vec<(SlotIndex, SlotRequest)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        entries.reverse();
        entries.dedup_by_key(|(index, _)| *index);
        entries.reverse();
        Self { entries }
    }

    /// Number requests `1, 2, 3, ...` in the given order.
    pub fn from_requests(requests: impl IntoIterator<Item = SlotRequest>) -> Self {
        let entries = requests
            .into_iter()
            .zip(SlotIndex::range(1, u32::MAX))
            .map(|(request, index)| (index, request))
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &SlotRequest)> {
        self.entries.iter().map(|(index, request)| (*index, request))
    }

    /// Requests in template order, without indices.
    pub fn requests(&self) -> impl Iterator<Item = &SlotRequest> {
        self.entries.iter().map(|(_, request)| request)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
