//! Drives a [`Workspace`] against a [`SearchableBackend`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dsf_client::UploadFile;
use dsf_model::MessageAck;

use crate::backend::SearchableBackend;
use crate::error::{Result, WorkspaceError};
use crate::workspace::{LoadOutcome, Notice, Workspace};

/// File name of a searchable-set export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("searchable_diseases_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Outcome of [`WorkspaceController::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The queue was empty; no request was sent.
    NothingToSave,
    /// The batch was persisted.
    Saved(usize),
}

/// Owns the workspace and the backend it reconciles with.
///
/// Every operation runs to completion before the next one starts, so the
/// workspace has a single writer.
#[derive(Debug)]
pub struct WorkspaceController<B> {
    backend: B,
    workspace: Workspace,
}

impl<B: SearchableBackend> WorkspaceController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_workspace(backend, Workspace::new())
    }

    pub fn with_workspace(backend: B, workspace: Workspace) -> Self {
        Self { backend, workspace }
    }

    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Direct access for view changes and notice handling.
    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch the disease list. Pending changes survive the reload.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let ticket = self.workspace.begin_load()?;
        let response = self.backend.list_diseases().await;
        self.workspace.finish_load(ticket, response)
    }

    pub fn toggle(&mut self, disease_id: &str) -> Result<bool> {
        self.workspace.toggle(disease_id)
    }

    pub fn group_toggle(&mut self, group: &str, target: bool) -> Result<usize> {
        self.workspace.group_toggle(group, target)
    }

    /// Persist the whole queue as one batch.
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        let Some(ticket) = self.workspace.begin_save()? else {
            return Ok(SaveOutcome::NothingToSave);
        };
        let response = self.backend.batch_update_searchable(ticket.changes()).await;
        let saved = self.workspace.finish_save(ticket, response)?;
        Ok(SaveOutcome::Saved(saved))
    }

    /// Empty the queue and reload from the server.
    pub async fn discard_changes(&mut self) -> Result<usize> {
        let discarded = self.workspace.discard_changes()?;
        self.load().await?;
        Ok(discarded)
    }

    /// Download the searchable set into `dir` and return the written path.
    ///
    /// The queue is not touched.
    pub async fn export_to(&mut self, dir: &Path, today: NaiveDate) -> Result<PathBuf> {
        let bytes = match self.backend.export_searchable().await {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.report(err.into())),
        };

        let path = dir.join(export_file_name(today));
        if let Err(source) = std::fs::write(&path, &bytes) {
            let err = WorkspaceError::Io { path, source };
            return Err(self.report(err));
        }

        tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
        self.workspace
            .set_notice(Notice::success(format!("Exported to {}", path.display())));
        Ok(path)
    }

    /// Upload a settings file, then reload.
    ///
    /// A failed reload does not undo the import; it leaves the workspace in
    /// the error phase with the load error as the notice.
    pub async fn import(&mut self, file: UploadFile) -> Result<MessageAck> {
        if self.workspace.is_saving() {
            return Err(WorkspaceError::Busy);
        }

        let file_name = file.file_name.clone();
        let ack = match self.backend.import_searchable(file).await {
            Ok(ack) => ack,
            Err(err) => return Err(self.report(err.into())),
        };
        tracing::info!("Imported {}: {}", file_name, ack.message);

        match self.load().await {
            Ok(_) => {
                let message = if ack.message.is_empty() {
                    format!("Imported {file_name}.")
                } else {
                    ack.message.clone()
                };
                self.workspace.set_notice(Notice::success(message));
            }
            Err(err) => tracing::warn!("Reload after import failed: {err}"),
        }
        Ok(ack)
    }

    fn report(&mut self, err: WorkspaceError) -> WorkspaceError {
        tracing::error!("{err}");
        self.workspace.set_notice(Notice::error(err.user_message()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "searchable_diseases_2024-03-07.xlsx");
    }
}
