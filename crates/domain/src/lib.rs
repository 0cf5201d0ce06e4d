mod derive;
mod entry;
mod error;
mod file;
mod mime;

pub use derive::{derive_current_files, derive_valid_files};
pub use entry::{ErrorKind, ImageDimensions, ImageInfo, ValidFile, ValidatedEntry};
pub use error::DomainError;
pub use file::{BlobSource, FileId, RawFile};
pub use mime::{guess_mime_type, MimePattern};
