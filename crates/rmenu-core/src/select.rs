//! Multi-select membership, independent of the filtered view's lifetime.

use ahash::AHashSet;

/// Sparse set of toggled candidate ids.
///
/// Membership is keyed by id, so toggles survive re-filtering. The slot
/// vector preserves the order confirmed output is emitted in: removal
/// blanks a slot, insertion reuses the first blank slot or appends. A
/// hash set backs membership checks so `contains` stays O(1).
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    slots: Vec<Option<u32>>,
    members: AHashSet<u32>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.members.contains(&id)
    }

    /// Toggle membership; returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.members.remove(&id) {
            for slot in &mut self.slots {
                if *slot == Some(id) {
                    *slot = None;
                    break;
                }
            }
            return false;
        }
        self.members.insert(id);
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(free) => *free = Some(id),
            None => self.slots.push(Some(id)),
        }
        true
    }

    /// Drop every selection. Called when the pool is refreshed and ids
    /// are reassigned.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.members.clear();
    }

    /// Selected ids in slot order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
