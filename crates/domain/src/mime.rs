use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

use crate::DomainError;

/// Accept pattern in the `type/subtype` form, where either half may be `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimePattern {
    top_level: String,
    subtype: String,
}

impl MimePattern {
    pub fn images() -> Self {
        Self {
            top_level: "image".to_string(),
            subtype: "*".to_string(),
        }
    }

    pub fn matches(&self, mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let Some((top_level, subtype)) = essence.split_once('/') else {
            return false;
        };

        (self.top_level == "*" || self.top_level == top_level)
            && (self.subtype == "*" || self.subtype == subtype)
    }
}

impl Default for MimePattern {
    fn default() -> Self {
        Self::images()
    }
}

impl FromStr for MimePattern {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let Some((top_level, subtype)) = normalized.split_once('/') else {
            return Err(DomainError::InvalidMimePattern(value.to_string()));
        };
        if top_level.is_empty() || subtype.is_empty() || subtype.contains('/') {
            return Err(DomainError::InvalidMimePattern(value.to_string()));
        }
        if top_level == "*" && subtype != "*" {
            return Err(DomainError::InvalidMimePattern(value.to_string()));
        }

        Ok(Self {
            top_level: top_level.to_string(),
            subtype: subtype.to_string(),
        })
    }
}

impl Display for MimePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.top_level, self.subtype)
    }
}

/// Declared MIME type for a path, by extension.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return "application/octet-stream";
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
