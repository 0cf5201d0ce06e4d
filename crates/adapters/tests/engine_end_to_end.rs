use std::rc::Rc;
use std::time::Duration;

use filepick_adapters::{collect_selection, ChannelListener, ImageCrateDecoder, TokioFileReader};
use filepick_application::{FilePickEngine, ValidationConfig, ValidationPipeline};
use filepick_domain::{ErrorKind, FileId, RawFile};
use futures::channel::mpsc;
use image::{ImageBuffer, Rgb};
use tempfile::TempDir;
use tokio::task::LocalSet;

fn write_fixtures(dir: &TempDir) {
    let pixels = ImageBuffer::from_pixel(16, 9, Rgb([10_u8, 20_u8, 30_u8]));
    pixels.save(dir.path().join("a_photo.png")).expect("save png");
    std::fs::write(dir.path().join("b_broken.png"), b"not really a png").expect("write");
    std::fs::write(dir.path().join("c_notes.txt"), b"hello").expect("write");
}

#[tokio::test]
async fn folder_selection_flows_through_real_adapters() {
    let dir = TempDir::new().expect("tempdir");
    write_fixtures(&dir);

    LocalSet::new()
        .run_until(async {
            let pipeline = ValidationPipeline::new(
                Rc::new(TokioFileReader),
                Rc::new(ImageCrateDecoder),
                ValidationConfig::default(),
            );
            let (listener, mut emissions) = ChannelListener::channel();
            let engine = FilePickEngine::new(pipeline, Box::new(listener));
            let (selections, selection_rx) = mpsc::unbounded::<Vec<RawFile>>();
            let (_removals, removal_rx) = mpsc::unbounded::<FileId>();
            let task = engine.start(selection_rx, removal_rx).expect("start");
            tokio::task::spawn_local(task);

            let batch = collect_selection(dir.path()).expect("selection");
            selections.unbounded_send(batch).expect("send");

            let valid = tokio::time::timeout(Duration::from_secs(10), emissions.recv())
                .await
                .expect("emission in time")
                .expect("listener alive");
            assert_eq!(valid.len(), 1);
            assert_eq!(valid[0].file.name(), "a_photo.png");
            assert_eq!(valid[0].image_info.width, Some(16));
            assert_eq!(valid[0].image_info.height, Some(9));

            let current = engine.current_files();
            let kinds: Vec<Option<ErrorKind>> =
                current.iter().map(|entry| entry.error_kind()).collect();
            assert_eq!(
                kinds,
                vec![None, Some(ErrorKind::InvalidImage), Some(ErrorKind::InvalidImage)]
            );

            engine.stop();
        })
        .await;
}
