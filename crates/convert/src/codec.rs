use crate::error::{ErrorKind, Result};
use crate::file::DroppedFile;
use async_trait::async_trait;
use exn::ResultExt;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use tracing::instrument;

/// An encoded WebP image together with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedAsset {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Turns a dropped image into a WebP [`ConvertedAsset`].
///
/// `quality` is in `0.1..=1.0`. Implementations are free to ignore it when
/// the underlying encoder has no lossy mode.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(&self, file: &DroppedFile, quality: f32) -> Result<ConvertedAsset>;
}

/// [`Converter`] backed by the `image` crate.
///
/// Decoding and encoding are CPU-bound, so both run on the blocking thread
/// pool. The `image` WebP encoder is lossless only; `quality` is recorded
/// on the span but does not change the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpConverter;

impl WebpConverter {
    fn encode(name: &str, data: &[u8]) -> Result<ConvertedAsset> {
        let img = image::load_from_memory(data).or_raise(|| ErrorKind::Decode(name.to_string()))?;
        let (width, height) = img.dimensions();
        // The WebP encoder only accepts 8-bit buffers.
        let img = match img.color().has_alpha() {
            true => DynamicImage::ImageRgba8(img.to_rgba8()),
            false => DynamicImage::ImageRgb8(img.to_rgb8()),
        };
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::WebP).or_raise(|| ErrorKind::Encode(name.to_string()))?;
        Ok(ConvertedAsset {
            data: out.into_inner(),
            width,
            height,
        })
    }
}

#[async_trait]
impl Converter for WebpConverter {
    #[instrument(skip_all, fields(name = %file.name, bytes = file.data.len(), quality = f64::from(quality)))]
    async fn convert(&self, file: &DroppedFile, quality: f32) -> Result<ConvertedAsset> {
        let name = file.name.clone();
        let data = file.data.clone();
        let asset = tokio::task::spawn_blocking(move || Self::encode(&name, &data))
            .await
            .or_raise(|| ErrorKind::Task)??;
        tracing::debug!(width = asset.width, height = asset.height, bytes = asset.data.len(), "Converted to WebP");
        Ok(asset)
    }
}
