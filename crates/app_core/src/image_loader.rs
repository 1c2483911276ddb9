//! Image loading and decoding

use crate::preload::PreloadTicket;
use crate::AppError;
use image::{GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// Decoded image, RGBA8
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// xxh3 of the encoded file bytes
    pub hash: u64,
}

/// Shared handle passed between the loader, the preload slot and the renderer
pub type ImageHandle = Arc<LoadedImage>;

impl LoadedImage {
    #[cfg(test)]
    pub(crate) fn placeholder(path: &str) -> Self {
        Self {
            path: path.to_string(),
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 255],
            hash: xxh3_64(path.as_bytes()),
        }
    }
}

/// Blocking image decode, used for fallback loads and by background fetches
pub trait ImageSource: Send + Sync {
    fn load(&self, path: &str) -> Result<ImageHandle, AppError>;
}

/// Starts an off-thread load whose result comes back as a preload delivery
pub trait PreloadFetcher: Send {
    fn fetch(&mut self, ticket: PreloadTicket, path: String);
}

/// Decodes files with the `image` crate
#[derive(Debug, Clone, Default)]
pub struct ImageLoader {
    /// Downscale bound; `None` keeps the original size
    max_size: Option<(u32, u32)>,
}

impl ImageLoader {
    pub fn new(max_size: Option<(u32, u32)>) -> Self {
        Self { max_size }
    }

    fn decode(&self, path: &str) -> Result<LoadedImage, AppError> {
        tracing::debug!("Loading image: {}", path);

        let data = std::fs::read(Path::new(path))?;
        let hash = xxh3_64(&data);

        let reader = ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .map_err(|e| AppError::ImageDecode(format!("{}: {}", path, e)))?;

        let img = reader
            .decode()
            .map_err(|e| AppError::ImageDecode(format!("{}: {}", path, e)))?;

        let img = match self.max_size {
            Some((max_w, max_h)) => {
                let (w, h) = img.dimensions();
                if w > max_w || h > max_h {
                    img.thumbnail(max_w, max_h)
                } else {
                    img
                }
            }
            None => img,
        };

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(LoadedImage {
            path: path.to_string(),
            width,
            height,
            data: rgba.into_raw(),
            hash,
        })
    }
}

impl ImageSource for ImageLoader {
    fn load(&self, path: &str) -> Result<ImageHandle, AppError> {
        self.decode(path).map(Arc::new)
    }
}
