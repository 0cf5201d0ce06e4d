use filepick_application::ValidFilesListener;
use filepick_domain::ValidFile;
use tokio::sync::mpsc;
use tracing::debug;

/// Forwards every emission into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<Vec<ValidFile>>,
}

impl ChannelListener {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Vec<ValidFile>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ValidFilesListener for ChannelListener {
    fn valid_files_changed(&self, files: &[ValidFile]) {
        if self.sender.send(files.to_vec()).is_err() {
            debug!("valid files receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use filepick_domain::{ImageInfo, RawFile};

    use super::*;

    #[test]
    fn emissions_arrive_in_order() {
        let (listener, mut receiver) = ChannelListener::channel();
        let file = Arc::new(RawFile::from_bytes("a.png", "image/png", vec![0_u8]).expect("file"));
        let valid = ValidFile {
            file,
            image_info: ImageInfo::default(),
        };

        listener.valid_files_changed(&[valid.clone()]);
        listener.valid_files_changed(&[]);

        assert_eq!(receiver.try_recv().expect("first"), vec![valid]);
        assert!(receiver.try_recv().expect("second").is_empty());
        assert!(receiver.try_recv().is_err());
    }
}
