use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use filepick_domain::{BlobSource, ImageDimensions, RawFile};
use tokio::sync::oneshot;

use crate::{FileReader, ImageDecoder, PortError};

pub(crate) fn file(name: &str, mime_type: &str, bytes: Vec<u8>) -> Arc<RawFile> {
    Arc::new(RawFile::from_bytes(name, mime_type, bytes).expect("file"))
}

pub(crate) fn png(name: &str, size: usize) -> Arc<RawFile> {
    file(name, "image/png", vec![0_u8; size])
}

pub(crate) fn raw_png(name: &str, size: usize) -> RawFile {
    RawFile::from_bytes(name, "image/png", vec![0_u8; size]).expect("file")
}

#[derive(Default)]
pub(crate) struct FakeReader {
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    reads: Cell<usize>,
}

impl FakeReader {
    pub(crate) fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub(crate) fn delayed(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Holds reads of `name` until the returned sender fires or drops.
    pub(crate) fn gate(&self, name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(name.to_string(), rx);
        tx
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }
}

#[async_trait(?Send)]
impl FileReader for FakeReader {
    async fn read(&self, file: &RawFile) -> Result<Vec<u8>, PortError> {
        self.reads.set(self.reads.get() + 1);

        if let Some(delay) = self.delays.get(file.name()).copied() {
            tokio::time::sleep(delay).await;
        }
        let gate = self.gates.borrow_mut().remove(file.name());
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing.contains(file.name()) {
            return Err(PortError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("cannot read {}", file.name()),
            )));
        }
        match file.source() {
            BlobSource::Memory(bytes) => Ok(bytes.to_vec()),
            BlobSource::Path(path) => Err(PortError::Io(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("fake reader has no disk: {}", path.display()),
            ))),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeDecoder {
    decodes: Cell<usize>,
}

impl FakeDecoder {
    pub(crate) fn decodes(&self) -> usize {
        self.decodes.get()
    }
}

#[async_trait(?Send)]
impl ImageDecoder for FakeDecoder {
    async fn decode(&self, bytes: Vec<u8>) -> Result<ImageDimensions, PortError> {
        self.decodes.set(self.decodes.get() + 1);
        if bytes == b"corrupt" {
            return Err(PortError::Decode("corrupt image data".to_string()));
        }
        Ok(ImageDimensions {
            width: 640,
            height: 480,
        })
    }
}
