use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{FileId, RawFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidFile,
    InvalidImage,
    InvalidSize,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidFile => "INVALID_FILE",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::InvalidSize => "INVALID_SIZE",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Image metadata attached to a successful entry. Fields stay empty for
/// pre-validated entries supplied without decoded dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<ImageDimensions> for ImageInfo {
    fn from(value: ImageDimensions) -> Self {
        Self {
            width: Some(value.width),
            height: Some(value.height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedEntry {
    Success {
        file: Arc<RawFile>,
        image_info: ImageInfo,
    },
    Failure {
        file_name: String,
        error_kind: ErrorKind,
    },
}

impl ValidatedEntry {
    pub fn success(file: Arc<RawFile>, image_info: ImageInfo) -> Self {
        Self::Success { file, image_info }
    }

    pub fn failure(file_name: impl Into<String>, error_kind: ErrorKind) -> Self {
        Self::Failure {
            file_name: file_name.into(),
            error_kind,
        }
    }

    /// Removable identity. Failures keep no file and cannot be removed.
    pub fn id(&self) -> Option<FileId> {
        match self {
            Self::Success { file, .. } => Some(file.id()),
            Self::Failure { .. } => None,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Success { file, .. } => file.name(),
            Self::Failure { file_name, .. } => file_name,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_kind, .. } => Some(*error_kind),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn as_valid_file(&self) -> Option<ValidFile> {
        match self {
            Self::Success { file, image_info } => Some(ValidFile {
                file: Arc::clone(file),
                image_info: *image_info,
            }),
            Self::Failure { .. } => None,
        }
    }
}

/// A successfully validated file as handed to the host listener.
#[derive(Debug, Clone)]
pub struct ValidFile {
    pub file: Arc<RawFile>,
    pub image_info: ImageInfo,
}

impl PartialEq for ValidFile {
    fn eq(&self, other: &Self) -> bool {
        self.file.id() == other.file.id() && self.image_info == other.image_info
    }
}

impl Eq for ValidFile {}
