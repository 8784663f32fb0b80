//! Shared fixtures for unit tests.

use crate::context::Context;
use crate::notify::RecordingNotifier;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use minup_config::Config;
use minup_convert::{DroppedFile, FixedClock};
use minup_journal::JournalFiler;
use minup_journal::store::MemoryStore;
use minup_storage::Uploader;
use minup_storage::backend::MockBackend;
use std::io::Cursor;
use std::sync::Arc;

pub(crate) struct Harness {
    pub ctx: Context,
    pub local: Arc<MockBackend>,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_local(MockBackend::default())
    }

    pub fn with_local(local: MockBackend) -> Self {
        let config = Config::default();
        let local = Arc::new(local);
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let uploader = Uploader::new(local.clone(), config.upload_folder.clone(), "w1");
        let ctx = Context::new(uploader, JournalFiler::new(store.clone()), config)
            .with_notifier(notifier.clone())
            .with_clock(Arc::new(FixedClock(1234)));
        Self { ctx, local, store, notifier }
    }
}

/// A 4x3 PNG called `name`.
pub(crate) fn png(name: &str) -> DroppedFile {
    let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 3, Rgb([200, 100, 50])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    DroppedFile::new(name, "image/png", out.into_inner())
}
