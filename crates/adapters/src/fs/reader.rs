use async_trait::async_trait;
use filepick_application::{FileReader, PortError};
use filepick_domain::{BlobSource, RawFile};

#[derive(Debug, Default)]
pub struct TokioFileReader;

#[async_trait(?Send)]
impl FileReader for TokioFileReader {
    async fn read(&self, file: &RawFile) -> Result<Vec<u8>, PortError> {
        match file.source() {
            BlobSource::Path(path) => Ok(tokio::fs::read(path).await?),
            BlobSource::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}
