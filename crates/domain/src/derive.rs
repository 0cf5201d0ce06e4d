use std::collections::HashSet;

use crate::{FileId, ValidFile, ValidatedEntry};

/// Current file set: the applied upload batch if any, else the initial
/// entries, minus every removed identity. Base order is kept.
pub fn derive_current_files(
    initial: &[ValidatedEntry],
    uploaded: Option<&[ValidatedEntry]>,
    removed: &HashSet<FileId>,
) -> Vec<ValidatedEntry> {
    let base = uploaded.unwrap_or(initial);
    base.iter()
        .filter(|entry| entry.id().map_or(true, |id| !removed.contains(&id)))
        .cloned()
        .collect()
}

pub fn derive_valid_files(current: &[ValidatedEntry]) -> Vec<ValidFile> {
    current
        .iter()
        .filter_map(ValidatedEntry::as_valid_file)
        .collect()
}
