//! Pending searchable-flag changes.

use std::collections::HashMap;

use dsf_model::PendingChange;

/// Ordered set of pending changes, at most one per disease.
///
/// Entries keep the position of their first insertion. Recording a new value
/// for a queued disease replaces the value in place, so a "changed items"
/// listing never reorders. Entries leave the queue only through
/// [`ChangeQueue::clear`].
#[derive(Debug, Clone, Default)]
pub struct ChangeQueue {
    entries: Vec<PendingChange>,
    positions: HashMap<String, usize>,
}

impl ChangeQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the desired value for one disease (last writer wins).
    pub fn record(&mut self, disease_id: &str, is_searchable: bool) {
        match self.positions.get(disease_id) {
            Some(&index) => self.entries[index].is_searchable = is_searchable,
            None => {
                self.positions
                    .insert(disease_id.to_string(), self.entries.len());
                self.entries
                    .push(PendingChange::new(disease_id, is_searchable));
            }
        }
    }

    /// Apply [`record`](Self::record) to every entry, in order.
    pub fn record_many<I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = PendingChange>,
    {
        for change in changes {
            self.record(&change.disease_id, change.is_searchable);
        }
    }

    /// The current change set, in queue order.
    ///
    /// This is both the source of the pending counter and the exact batch
    /// payload sent on save.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PendingChange> {
        self.entries.clone()
    }

    /// Borrow the entries without cloning.
    #[must_use]
    pub fn as_slice(&self) -> &[PendingChange] {
        &self.entries
    }

    /// Desired value queued for a disease, if any.
    #[must_use]
    pub fn get(&self, disease_id: &str) -> Option<bool> {
        self.positions
            .get(disease_id)
            .map(|&index| self.entries[index].is_searchable)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Only called after a confirmed save or an explicit discard.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    /// Iterate entries in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingChange> {
        self.entries.iter()
    }
}
