use async_trait::async_trait;
use filepick_domain::{ImageDimensions, RawFile, ValidFile};

use crate::PortError;

/// Reads the full contents of a selected blob.
#[async_trait(?Send)]
pub trait FileReader {
    async fn read(&self, file: &RawFile) -> Result<Vec<u8>, PortError>;
}

#[async_trait(?Send)]
pub trait ImageDecoder {
    async fn decode(&self, bytes: Vec<u8>) -> Result<ImageDimensions, PortError>;
}

/// Host callback receiving every distinct set of valid files.
pub trait ValidFilesListener {
    fn valid_files_changed(&self, files: &[ValidFile]);
}

impl<F> ValidFilesListener for F
where
    F: Fn(&[ValidFile]),
{
    fn valid_files_changed(&self, files: &[ValidFile]) {
        self(files)
    }
}
