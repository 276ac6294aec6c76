use crate::layout::model::SlotCount;

/// Ordered mapping of captured-frame indices onto layout slots.
///
/// Selection order determines slot order: the first selected frame fills slot
/// 0, the next slot 1, and so on. Indices are unique; removing one compacts
/// the remaining selections without reordering them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionMapping {
    slot_count: SlotCount,
    selected: Vec<usize>,
}

/// Outcome of a toggle, for callers that want to react (scroll, highlight).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The index was appended to the next open slot.
    Selected,
    /// The index was already selected and has been removed.
    Deselected,
    /// Selection is full, or the index is not a valid pool index; unchanged.
    Rejected,
}

impl SelectionMapping {
    /// Empty selection for a slot geometry.
    pub fn new(slot_count: SlotCount) -> Self {
        Self {
            slot_count,
            selected: Vec::with_capacity(slot_count.slots()),
        }
    }

    /// Current slot geometry.
    pub fn slot_count(&self) -> SlotCount {
        self.slot_count
    }

    /// Selected frame indices in slot order.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// True when every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.selected.len() == self.slot_count.slots()
    }

    /// Frame index occupying `slot`, if any.
    pub fn frame_for_slot(&self, slot: usize) -> Option<usize> {
        self.selected.get(slot).copied()
    }

    /// Toggle a frame in or out of the selection.
    ///
    /// `pool_len` bounds valid frame indices; toggling an out-of-range index
    /// is rejected rather than clamped. Adding beyond the slot count is a
    /// no-op.
    pub fn toggle(&mut self, frame_index: usize, pool_len: usize) -> ToggleOutcome {
        if frame_index >= pool_len {
            return ToggleOutcome::Rejected;
        }
        if let Some(pos) = self.selected.iter().position(|&i| i == frame_index) {
            // Slots above shift down; relative order of the rest is preserved.
            self.selected.remove(pos);
            return ToggleOutcome::Deselected;
        }
        if self.selected.len() >= self.slot_count.slots() {
            return ToggleOutcome::Rejected;
        }
        self.selected.push(frame_index);
        ToggleOutcome::Selected
    }

    /// Switch slot geometry, clearing the selection.
    ///
    /// A 4↔8 switch invalidates the prior mapping because slot geometry
    /// differs; the selection is cleared even when the count is re-set to its
    /// current value, matching the observed booth behavior.
    pub fn set_slot_count(&mut self, slot_count: SlotCount) {
        self.slot_count = slot_count;
        self.selected.clear();
    }

    /// Drop any selections referencing frames at or past `pool_len`.
    ///
    /// Used after "undo last" so a removed frame cannot remain mapped to a
    /// slot.
    pub fn retain_valid(&mut self, pool_len: usize) {
        self.selected.retain(|&i| i < pool_len);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/selection.rs"]
mod tests;
