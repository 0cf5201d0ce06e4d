use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::DomainError;

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one selected file. Allocated once per [`RawFile`], so two
/// handles over identical bytes never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    fn next() -> Self {
        Self(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

#[derive(Debug)]
pub struct RawFile {
    id: FileId,
    name: String,
    size: u64,
    mime_type: String,
    source: BlobSource,
}

impl RawFile {
    pub fn new(
        name: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
        source: BlobSource,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyFileName);
        }
        Ok(Self {
            id: FileId::next(),
            name,
            size,
            mime_type: mime_type.into(),
            source,
        })
    }

    /// In-memory blob whose declared size is the buffer length.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, DomainError> {
        let bytes: Arc<[u8]> = bytes.into();
        Self::new(name, bytes.len() as u64, mime_type, BlobSource::Memory(bytes))
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn source(&self) -> &BlobSource {
        &self.source
    }
}

impl PartialEq for RawFile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RawFile {}
