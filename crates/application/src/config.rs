use filepick_domain::{DomainError, MimePattern};

/// How an oversized file interacts with the asynchronous read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeCheckMode {
    /// The size failure and the read/decode run side by side; whichever
    /// resolves first decides the entry. A read and decode that complete
    /// without suspending admit an oversized file.
    #[default]
    Racing,
    /// Oversized files are rejected before any I/O starts.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    pub max_file_size: Option<u64>,
    pub size_check: SizeCheckMode,
    pub accept: MimePattern,
}

impl ValidationConfig {
    pub fn with_max_file_size(mut self, limit: u64) -> Self {
        self.max_file_size = Some(limit);
        self
    }

    pub fn with_size_check(mut self, mode: SizeCheckMode) -> Self {
        self.size_check = mode;
        self
    }

    pub fn with_accept(mut self, pattern: &str) -> Result<Self, DomainError> {
        self.accept = pattern.parse()?;
        Ok(self)
    }

    pub fn exceeds_limit(&self, size: u64) -> bool {
        self.max_file_size.is_some_and(|limit| size > limit)
    }
}
