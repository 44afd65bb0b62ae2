//! Reflection journal view state.

use log::info;

use crate::backend::{CareBackend, JournalEntry, NewJournalEntry};
use crate::error::ErrorCode;

pub const LOAD_FAILED: &str = "Failed to fetch past entries. Is the backend running?";
pub const SAVE_FAILED: &str = "Failed to save your entry.";

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft was blank; no request was made
    Skipped,
    Saved,
    Failed,
}

/// Journal entries plus the compose box.
#[derive(Debug, Clone)]
pub struct JournalView {
    entries: Vec<JournalEntry>,
    pub draft: String,
    is_loading: bool,
    is_saving: bool,
    error: Option<String>,
}

impl Default for JournalView {
    fn default() -> Self {
        Self::new()
    }
}

impl JournalView {
    /// Fresh view. Starts in the loading state until [`load`](Self::load)
    /// completes.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            draft: String::new(),
            is_loading: true,
            is_saving: false,
            error: None,
        }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_saving && !self.draft.trim().is_empty()
    }

    /// Fetch past entries. The server's order is kept as-is.
    pub async fn load<B: CareBackend>(&mut self, backend: &B) {
        self.is_loading = true;
        match backend.list_journal().await {
            Ok(entries) => {
                info!("[Journal] Loaded {} entries", entries.len());
                self.entries = entries;
            }
            Err(err) => {
                info!("[Journal] Load failed: {}", err.message());
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Save the draft and put the stored entry at the top of the list.
    pub async fn submit<B: CareBackend>(&mut self, backend: &B) -> SubmitOutcome {
        if self.draft.trim().is_empty() {
            return SubmitOutcome::Skipped;
        }

        self.is_saving = true;
        self.error = None;

        let outcome = match backend
            .create_journal_entry(NewJournalEntry {
                content: self.draft.clone(),
            })
            .await
        {
            Ok(saved) => {
                self.entries.insert(0, saved);
                self.draft.clear();
                SubmitOutcome::Saved
            }
            Err(err) => {
                info!("[Journal] Save failed: {}", err.message());
                self.error = Some(SAVE_FAILED.to_string());
                SubmitOutcome::Failed
            }
        };

        self.is_saving = false;
        outcome
    }
}
