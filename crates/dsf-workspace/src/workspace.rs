//! Reconciliation state for the searchability workspace.
//!
//! [`Workspace`] owns the loaded disease records, the [`ChangeQueue`] and the
//! table view. It performs no I/O: network requests are split into a `begin_*`
//! call that hands out a ticket and a `finish_*` call that applies the result.
//! [`WorkspaceController`](crate::WorkspaceController) drives both halves
//! against a backend.

use std::collections::{HashMap, HashSet};

use dsf_client::ApiError;
use dsf_model::{DiseaseRecord, MessageAck, PendingChange};

use crate::error::{Result, WorkspaceError};
use crate::queue::ChangeQueue;
use crate::view::{TablePage, TableView};

/// Request lifecycle of the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// A disease list request is in flight.
    #[default]
    Loading,
    /// Idle; records reflect the last successful load plus local edits.
    Ready,
    /// A batch save is in flight.
    Saving,
    /// The last load failed. Records and queue are the last known ones.
    Error,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Saving => "saving",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissable message about the outcome of the last operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Handle for one in-flight disease list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of applying a disease list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was the latest one issued and replaced the records.
    Applied(LoadSummary),
    /// A newer load was issued after this one; the response was dropped.
    Stale,
}

/// What a successful load did to the workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of records now loaded.
    pub records: usize,
    /// Pending values re-applied onto the fresh records.
    pub overlaid: usize,
    /// Pending entries whose value now equals the server value.
    pub redundant: Vec<String>,
    /// Pending entries whose disease is no longer in the list.
    pub orphaned: Vec<String>,
}

/// The batch handed to the backend by [`Workspace::begin_save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    changes: Vec<PendingChange>,
}

impl SaveTicket {
    /// Exact payload to persist.
    #[must_use]
    pub fn changes(&self) -> &[PendingChange] {
        &self.changes
    }
}

/// Records, pending changes and view state of the searchability page.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    diseases: Vec<DiseaseRecord>,
    positions: HashMap<String, usize>,
    /// Flags as last reported by the server.
    baseline: HashMap<String, bool>,
    queue: ChangeQueue,
    view: TableView,
    phase: Phase,
    notice: Option<Notice>,
    latest_load: u64,
}

impl Workspace {
    /// Create an empty workspace waiting for its first load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty workspace with a custom table view.
    pub fn with_view(view: TableView) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a save is in flight.
    #[inline]
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.phase == Phase::Saving
    }

    /// Loaded records in server order, with local edits applied.
    #[must_use]
    pub fn diseases(&self) -> &[DiseaseRecord] {
        &self.diseases
    }

    #[must_use]
    pub fn disease(&self, id: &str) -> Option<&DiseaseRecord> {
        self.positions.get(id).map(|&index| &self.diseases[index])
    }

    #[must_use]
    pub fn queue(&self) -> &ChangeQueue {
        &self.queue
    }

    /// Number of queued changes.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether a row's flag differs from the last loaded server value.
    #[must_use]
    pub fn is_modified(&self, id: &str) -> bool {
        match (self.disease(id), self.baseline.get(id)) {
            (Some(record), Some(&server)) => record.is_searchable != server,
            _ => false,
        }
    }

    /// Whether the save action is enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        !self.queue.is_empty() && matches!(self.phase, Phase::Ready | Phase::Error)
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Dismiss the current notice. Dismissing after a failed load returns to Ready.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if self.phase == Phase::Error {
            self.phase = Phase::Ready;
        }
    }

    #[must_use]
    pub fn view(&self) -> &TableView {
        &self.view
    }

    /// Mutable access to filter and paging. View changes never touch records.
    pub fn view_mut(&mut self) -> &mut TableView {
        &mut self.view
    }

    /// The visible table page.
    pub fn page(&self) -> TablePage<'_> {
        self.view.page(&self.diseases)
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Start a load and return its ticket.
    ///
    /// Any earlier ticket that has not finished yet becomes stale.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        self.ensure_not_saving()?;
        self.latest_load += 1;
        self.phase = Phase::Loading;
        tracing::debug!(generation = self.latest_load, "load started");
        Ok(LoadTicket {
            generation: self.latest_load,
        })
    }

    /// Apply the response of a load.
    ///
    /// Stale responses are ignored. On failure the records and the queue keep
    /// their last known values and the workspace enters [`Phase::Error`].
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        response: std::result::Result<Vec<DiseaseRecord>, ApiError>,
    ) -> Result<LoadOutcome> {
        if ticket.generation != self.latest_load {
            tracing::warn!(
                generation = ticket.generation,
                latest = self.latest_load,
                "discarding stale disease list"
            );
            return Ok(LoadOutcome::Stale);
        }

        let records = match response {
            Ok(records) => records,
            Err(err) => return Err(self.fail_load(err.into())),
        };
        let positions = match index_records(&records) {
            Ok(positions) => positions,
            Err(err) => return Err(self.fail_load(err)),
        };

        let summary = self.replace_records(records, positions);
        self.phase = Phase::Ready;
        if self.notice.as_ref().is_some_and(Notice::is_error) {
            self.notice = None;
        }

        tracing::info!(
            records = summary.records,
            pending = self.queue.len(),
            "disease list loaded"
        );
        if !summary.redundant.is_empty() || !summary.orphaned.is_empty() {
            tracing::warn!(
                redundant = ?summary.redundant,
                orphaned = ?summary.orphaned,
                "pending changes no longer differ from the server"
            );
        }

        Ok(LoadOutcome::Applied(summary))
    }

    fn fail_load(&mut self, err: WorkspaceError) -> WorkspaceError {
        tracing::error!("failed to load diseases: {err}");
        self.phase = Phase::Error;
        self.notice = Some(Notice::error(err.user_message()));
        err
    }

    fn replace_records(
        &mut self,
        mut records: Vec<DiseaseRecord>,
        positions: HashMap<String, usize>,
    ) -> LoadSummary {
        let mut summary = LoadSummary {
            records: records.len(),
            ..LoadSummary::default()
        };

        self.baseline = records
            .iter()
            .map(|record| (record.id.clone(), record.is_searchable))
            .collect();

        for change in self.queue.iter() {
            match positions.get(&change.disease_id) {
                Some(&index) => {
                    let record = &mut records[index];
                    if record.is_searchable == change.is_searchable {
                        summary.redundant.push(change.disease_id.clone());
                    } else {
                        record.is_searchable = change.is_searchable;
                        summary.overlaid += 1;
                    }
                }
                None => summary.orphaned.push(change.disease_id.clone()),
            }
        }

        self.diseases = records;
        self.positions = positions;
        summary
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Flip one disease's flag locally and queue the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        self.ensure_not_saving()?;
        let index = *self
            .positions
            .get(id)
            .ok_or_else(|| WorkspaceError::UnknownDisease(id.to_string()))?;

        let record = &mut self.diseases[index];
        record.is_searchable = !record.is_searchable;
        let value = record.is_searchable;
        self.queue.record(id, value);
        tracing::debug!(disease = id, is_searchable = value, "toggled");
        Ok(value)
    }

    /// Set the flag on every disease of a NANDO group and queue those records.
    ///
    /// Returns the number of affected records. An empty group is not an error.
    pub fn group_toggle(&mut self, group: &str, target: bool) -> Result<usize> {
        self.ensure_not_saving()?;
        let mut changes = Vec::new();
        for record in self.diseases.iter_mut().filter(|r| r.in_group(group)) {
            record.is_searchable = target;
            changes.push(PendingChange::new(record.id.clone(), target));
        }

        let affected = changes.len();
        self.queue.record_many(changes);
        tracing::debug!(group, target, affected, "group toggled");
        Ok(affected)
    }

    /// Drop every queued change and restore the server flags.
    ///
    /// Returns the number of discarded entries.
    pub fn discard_changes(&mut self) -> Result<usize> {
        self.ensure_not_saving()?;
        let discarded = self.queue.len();
        for change in self.queue.iter() {
            if let (Some(&index), Some(&server)) = (
                self.positions.get(&change.disease_id),
                self.baseline.get(&change.disease_id),
            ) {
                self.diseases[index].is_searchable = server;
            }
        }
        self.queue.clear();
        if discarded > 0 {
            tracing::info!(discarded, "discarded pending changes");
        }
        Ok(discarded)
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Start a save.
    ///
    /// Returns `None` when nothing is queued. Refused while another request
    /// is running.
    pub fn begin_save(&mut self) -> Result<Option<SaveTicket>> {
        if matches!(self.phase, Phase::Saving | Phase::Loading) {
            return Err(WorkspaceError::Busy);
        }
        if self.queue.is_empty() {
            tracing::debug!("nothing to save");
            return Ok(None);
        }

        self.phase = Phase::Saving;
        Ok(Some(SaveTicket {
            changes: self.queue.snapshot(),
        }))
    }

    /// Apply the outcome of a save. Returns the number of persisted changes.
    ///
    /// Success clears the queue and adopts the saved values as the server
    /// baseline. Failure keeps the queue as it was so the save can be retried.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        response: std::result::Result<MessageAck, ApiError>,
    ) -> Result<usize> {
        self.phase = Phase::Ready;
        match response {
            Ok(ack) => {
                let saved = ticket.changes.len();
                for change in ticket.changes {
                    if self.baseline.contains_key(&change.disease_id) {
                        self.baseline.insert(change.disease_id, change.is_searchable);
                    }
                }
                self.queue.clear();
                tracing::info!(saved, "saved searchable changes");
                let message = if ack.message.is_empty() {
                    format!("Saved {saved} changes.")
                } else {
                    ack.message
                };
                self.notice = Some(Notice::success(message));
                Ok(saved)
            }
            Err(err) => {
                tracing::error!(pending = self.queue.len(), "failed to save changes: {err}");
                let err = WorkspaceError::from(err);
                self.notice = Some(Notice::error(err.user_message()));
                Err(err)
            }
        }
    }

    fn ensure_not_saving(&self) -> Result<()> {
        if self.is_saving() {
            return Err(WorkspaceError::Busy);
        }
        Ok(())
    }
}

fn index_records(records: &[DiseaseRecord]) -> Result<HashMap<String, usize>> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut positions = HashMap::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if !seen.insert(record.id.as_str()) {
            return Err(WorkspaceError::DuplicateDisease(record.id.clone()));
        }
        positions.insert(record.id.clone(), index);
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(records: Vec<DiseaseRecord>) -> Workspace {
        let mut ws = Workspace::new();
        let ticket = ws.begin_load().unwrap();
        ws.finish_load(ticket, Ok(records)).unwrap();
        ws
    }

    fn sample() -> Vec<DiseaseRecord> {
        vec![
            DiseaseRecord::new("d1", "Fabry").with_nando_id("NANDO:1200002"),
            DiseaseRecord::new("d2", "Gaucher")
                .with_nando_id("NANDO:12")
                .with_searchable(true),
            DiseaseRecord::new("d3", "Pompe").with_nando_id("NANDO:21000"),
        ]
    }

    #[test]
    fn test_new_workspace_is_loading() {
        let ws = Workspace::new();
        assert_eq!(ws.phase(), Phase::Loading);
        assert!(ws.diseases().is_empty());
        assert!(!ws.can_save());
    }

    #[test]
    fn test_load_enters_ready() {
        let ws = loaded(sample());
        assert_eq!(ws.phase(), Phase::Ready);
        assert_eq!(ws.diseases().len(), 3);
        assert_eq!(ws.disease("d2").map(|d| d.name.as_str()), Some("Gaucher"));
    }

    #[test]
    fn test_toggle_unknown_disease() {
        let mut ws = loaded(sample());
        let err = ws.toggle("nope").unwrap_err();
        assert!(matches!(err, WorkspaceError::UnknownDisease(id) if id == "nope"));
        assert_eq!(ws.pending_count(), 0);
    }

    #[test]
    fn test_toggle_marks_row_modified() {
        let mut ws = loaded(sample());
        assert!(ws.toggle("d1").unwrap());
        assert!(ws.is_modified("d1"));
        assert!(!ws.toggle("d1").unwrap());
        assert!(!ws.is_modified("d1"));
        // Flipping back still leaves the entry queued.
        assert_eq!(ws.pending_count(), 1);
    }

    #[test]
    fn test_group_toggle_counts_matches() {
        let mut ws = loaded(sample());
        assert_eq!(ws.group_toggle("1", true).unwrap(), 2);
        assert_eq!(ws.group_toggle("99", true).unwrap(), 0);
        assert_eq!(ws.pending_count(), 2);
    }

    #[test]
    fn test_duplicate_ids_fail_the_load() {
        let mut ws = loaded(sample());
        let ticket = ws.begin_load().unwrap();
        let dupes = vec![DiseaseRecord::new("x", "a"), DiseaseRecord::new("x", "b")];

        let err = ws.finish_load(ticket, Ok(dupes)).unwrap_err();
        assert!(matches!(err, WorkspaceError::DuplicateDisease(id) if id == "x"));
        assert_eq!(ws.phase(), Phase::Error);
        assert_eq!(ws.diseases().len(), 3);
    }

    #[test]
    fn test_failed_load_keeps_state_and_dismiss_returns_to_ready() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap();
        let ticket = ws.begin_load().unwrap();

        let err = ws
            .finish_load(ticket, Err(ApiError::Network("refused".into())))
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Api(ApiError::Network(_))));
        assert_eq!(ws.phase(), Phase::Error);
        assert!(ws.notice().is_some_and(Notice::is_error));
        assert_eq!(ws.diseases().len(), 3);
        assert_eq!(ws.queue().get("d1"), Some(true));
        assert!(ws.can_save());

        ws.dismiss_notice();
        assert_eq!(ws.phase(), Phase::Ready);
        assert!(ws.notice().is_none());
    }

    #[test]
    fn test_reload_overlays_pending_values() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap(); // d1 -> true
        ws.toggle("d2").unwrap(); // d2 -> false
        ws.toggle("d3").unwrap(); // d3 -> true

        // Server now reports d2 already false and no longer lists d3.
        let fresh = vec![
            DiseaseRecord::new("d1", "Fabry").with_nando_id("NANDO:1200002"),
            DiseaseRecord::new("d2", "Gaucher").with_nando_id("NANDO:12"),
        ];
        let ticket = ws.begin_load().unwrap();
        let outcome = ws.finish_load(ticket, Ok(fresh)).unwrap();

        let LoadOutcome::Applied(summary) = outcome else {
            panic!("expected applied load");
        };
        assert_eq!(summary.records, 2);
        assert_eq!(summary.overlaid, 1);
        assert_eq!(summary.redundant, vec!["d2".to_string()]);
        assert_eq!(summary.orphaned, vec!["d3".to_string()]);

        assert_eq!(ws.pending_count(), 3);
        assert!(ws.disease("d1").unwrap().is_searchable);
        assert!(ws.is_modified("d1"));
    }

    #[test]
    fn test_discard_restores_server_values() {
        let mut ws = loaded(sample());
        ws.group_toggle("1", false).unwrap();
        assert!(!ws.disease("d2").unwrap().is_searchable);

        assert_eq!(ws.discard_changes().unwrap(), 2);
        assert_eq!(ws.pending_count(), 0);
        assert!(ws.disease("d2").unwrap().is_searchable);
        assert!(!ws.is_modified("d2"));
    }

    #[test]
    fn test_begin_save_with_empty_queue_is_noop() {
        let mut ws = loaded(sample());
        assert!(ws.begin_save().unwrap().is_none());
        assert_eq!(ws.phase(), Phase::Ready);
    }

    #[test]
    fn test_save_refused_while_loading() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap();
        let _ticket = ws.begin_load().unwrap();
        assert!(matches!(ws.begin_save(), Err(WorkspaceError::Busy)));
    }

    #[test]
    fn test_load_refused_while_saving() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap();
        let _ticket = ws.begin_save().unwrap().unwrap();
        assert!(matches!(ws.begin_load(), Err(WorkspaceError::Busy)));
        assert!(matches!(ws.begin_save(), Err(WorkspaceError::Busy)));
        assert!(matches!(ws.discard_changes(), Err(WorkspaceError::Busy)));
    }

    #[test]
    fn test_save_success_updates_baseline() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap();
        let ticket = ws.begin_save().unwrap().unwrap();
        assert_eq!(ticket.changes(), &[PendingChange::new("d1", true)]);

        let saved = ws
            .finish_save(ticket, Ok(MessageAck::default()))
            .unwrap();
        assert_eq!(saved, 1);
        assert!(!ws.is_modified("d1"));
        assert_eq!(
            ws.notice().map(|n| n.message.as_str()),
            Some("Saved 1 changes.")
        );
    }

    #[test]
    fn test_save_failure_sets_error_notice_in_ready() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap();
        let ticket = ws.begin_save().unwrap().unwrap();

        let result = ws.finish_save(
            ticket,
            Err(ApiError::Status {
                status: 500,
                detail: "db down".into(),
            }),
        );
        assert!(result.is_err());
        assert_eq!(ws.phase(), Phase::Ready);
        assert!(ws.notice().is_some_and(Notice::is_error));
        assert!(ws.can_save());
    }

    #[test]
    fn test_view_changes_leave_records_alone() {
        let mut ws = loaded(sample());
        ws.toggle("d1").unwrap();
        ws.view_mut().set_filter("pompe");
        assert_eq!(ws.page().total_rows, 1);
        ws.view_mut().clear_filter();
        assert_eq!(ws.page().total_rows, 3);
        assert_eq!(ws.queue().snapshot(), vec![PendingChange::new("d1", true)]);
    }
}
