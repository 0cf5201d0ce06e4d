use std::collections::HashSet;

use filepick_domain::{derive_current_files, derive_valid_files, FileId, ValidFile, ValidatedEntry};

/// Derived state published after every channel write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSnapshot {
    pub current: Vec<ValidatedEntry>,
    pub valid: Vec<ValidFile>,
}

/// Single owner of the initial, uploaded and removed channels.
#[derive(Debug, Default)]
pub struct StateAggregator {
    initial: Vec<ValidatedEntry>,
    uploaded: Option<Vec<ValidatedEntry>>,
    removed: HashSet<FileId>,
    updated: bool,
}

impl StateAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_initial(&mut self, entries: Vec<ValidatedEntry>) -> AggregateSnapshot {
        self.initial = entries;
        self.publish()
    }

    /// Replaces the upload channel. Any batch, even an empty one, hides
    /// the initial entries from then on.
    pub fn apply_upload_batch(&mut self, entries: Vec<ValidatedEntry>) -> AggregateSnapshot {
        self.uploaded = Some(entries);
        self.publish()
    }

    pub fn remove_entry(&mut self, id: FileId) -> AggregateSnapshot {
        self.removed.insert(id);
        self.publish()
    }

    /// Whether any channel has been written since construction.
    pub fn has_real_update(&self) -> bool {
        self.updated
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        let current =
            derive_current_files(&self.initial, self.uploaded.as_deref(), &self.removed);
        let valid = derive_valid_files(&current);
        AggregateSnapshot { current, valid }
    }

    fn publish(&mut self) -> AggregateSnapshot {
        self.updated = true;
        self.snapshot()
    }
}
