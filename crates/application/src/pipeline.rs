use std::rc::Rc;
use std::sync::Arc;

use filepick_domain::{ErrorKind, RawFile, ValidatedEntry};
use futures::future::{self, join_all};
use tracing::{debug, warn};

use crate::{FileReader, ImageDecoder, SizeCheckMode, ValidationConfig};

/// Turns selected files into validated entries through the reader and
/// decoder ports.
#[derive(Clone)]
pub struct ValidationPipeline {
    reader: Rc<dyn FileReader>,
    decoder: Rc<dyn ImageDecoder>,
    config: ValidationConfig,
}

impl ValidationPipeline {
    pub fn new(
        reader: Rc<dyn FileReader>,
        decoder: Rc<dyn ImageDecoder>,
        config: ValidationConfig,
    ) -> Self {
        Self {
            reader,
            decoder,
            config,
        }
    }

    /// Validates every file concurrently and resolves once all of them
    /// have, with one entry per file in input order.
    pub async fn validate_batch(&self, files: Vec<Arc<RawFile>>) -> Vec<ValidatedEntry> {
        let batch_len = files.len();
        let entries = join_all(files.into_iter().map(|file| self.validate_file(file))).await;
        debug!(
            batch_len,
            valid = entries.iter().filter(|entry| entry.is_success()).count(),
            "validated batch"
        );
        entries
    }

    pub async fn validate_file(&self, file: Arc<RawFile>) -> ValidatedEntry {
        if !self.config.exceeds_limit(file.size()) {
            return self.read_and_decode(file).await;
        }

        let file_name = file.name().to_string();
        match self.config.size_check {
            SizeCheckMode::Strict => {
                debug!(file = %file_name, size = file.size(), "rejected oversized file");
                ValidatedEntry::failure(file_name, ErrorKind::InvalidSize)
            }
            SizeCheckMode::Racing => {
                let size_failure = async move {
                    tokio::task::yield_now().await;
                    ValidatedEntry::failure(file_name, ErrorKind::InvalidSize)
                };
                let read = self.read_and_decode(file);
                let (entry, _) = future::select(Box::pin(read), Box::pin(size_failure))
                    .await
                    .factor_first();
                entry
            }
        }
    }

    async fn read_and_decode(&self, file: Arc<RawFile>) -> ValidatedEntry {
        let bytes = match self.reader.read(&file).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(file = %file.name(), %error, "failed to read file");
                return ValidatedEntry::failure(file.name(), ErrorKind::InvalidFile);
            }
        };

        if !self.config.accept.matches(file.mime_type()) {
            debug!(file = %file.name(), mime = %file.mime_type(), "mime type not accepted");
            return ValidatedEntry::failure(file.name(), ErrorKind::InvalidImage);
        }

        match self.decoder.decode(bytes).await {
            Ok(dimensions) => ValidatedEntry::success(file, dimensions.into()),
            Err(error) => {
                warn!(file = %file.name(), %error, "failed to decode image");
                ValidatedEntry::failure(file.name(), ErrorKind::InvalidImage)
            }
        }
    }
}
