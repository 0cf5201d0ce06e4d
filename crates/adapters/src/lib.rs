pub mod fs;
pub mod listener;
pub mod presenters;

pub use fs::{collect_selection, raw_file_from_path, TokioFileReader};
pub use listener::ChannelListener;
pub use presenters::{present_entry_row, present_report_json, present_valid_files};

use std::io::Cursor;

use async_trait::async_trait;
use filepick_application::{ImageDecoder, PortError};
use filepick_domain::{DomainError, ImageDimensions};
use image::ImageReader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("no such file or directory: {0}")]
    NotFound(String),
}

/// Fully decodes images with the `image` crate on the blocking pool.
#[derive(Debug, Default)]
pub struct ImageCrateDecoder;

#[async_trait(?Send)]
impl ImageDecoder for ImageCrateDecoder {
    async fn decode(&self, bytes: Vec<u8>) -> Result<ImageDimensions, PortError> {
        tokio::task::spawn_blocking(move || decode_dimensions(bytes))
            .await
            .map_err(|error| PortError::Task(error.to_string()))?
    }
}

fn decode_dimensions(bytes: Vec<u8>) -> Result<ImageDimensions, PortError> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|error| PortError::Decode(error.to_string()))?
        .decode()
        .map_err(|error| PortError::Decode(error.to_string()))?;

    Ok(ImageDimensions {
        width: image.width(),
        height: image.height(),
    })
}
