use std::collections::VecDeque;

use filepick_domain::ValidFile;

/// Queues valid-file sets for the host, dropping any set equal to the
/// one queued before it.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    last_emitted: Option<Vec<ValidFile>>,
    pending: VecDeque<Vec<ValidFile>>,
    closed: bool,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `valid` was queued for delivery.
    pub fn observe(&mut self, valid: &[ValidFile]) -> bool {
        if self.closed || self.last_emitted.as_deref() == Some(valid) {
            return false;
        }
        self.last_emitted = Some(valid.to_vec());
        self.pending.push_back(valid.to_vec());
        true
    }

    pub fn next_emission(&mut self) -> Option<Vec<ValidFile>> {
        self.pending.pop_front()
    }

    /// Drops queued emissions and refuses new ones.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending.clear();
    }
}
