//! Background image loading.
//!
//! Image shapes only reference their bitmap. The cache decodes each source
//! once on a worker thread; the frame loop calls [`ImageCache::poll`] to pick
//! up finished loads without blocking, and the scene walker skips any image
//! that is not [`ImageState::Ready`].

use base64::{Engine, engine::general_purpose::STANDARD};
use sketchboard_core::Document;
use sketchboard_core::shapes::ImageSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use thiserror::Error;

/// Image loading errors.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid data URI: {0}")]
    DataUri(String),
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded bitmap ready for painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl DecodedImage {
    /// Decode an encoded bitmap (PNG, JPEG, WebP).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            rgba_data: rgba.into_raw(),
            width,
            height,
        })
    }
}

/// Load state of one image source.
#[derive(Debug, Clone)]
pub enum ImageState {
    Pending,
    Ready(Arc<DecodedImage>),
    /// The load failed; the shape stays unpainted.
    Failed(String),
}

/// Read and decode an image source.
///
/// `data:` URIs must carry a base64 payload. Anything else is a file path,
/// resolved against `base_dir` when relative.
pub fn load_source(source: &str, base_dir: Option<&Path>) -> Result<DecodedImage, ImageError> {
    let bytes = match source.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| ImageError::DataUri("missing ','".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(ImageError::DataUri("only base64 payloads are supported".to_string()));
            }
            STANDARD.decode(payload.trim())?
        }
        None => {
            let path = match base_dir {
                Some(dir) => dir.join(source),
                None => PathBuf::from(source),
            };
            std::fs::read(path)?
        }
    };
    DecodedImage::from_bytes(&bytes)
}

type LoadResult = (String, Result<DecodedImage, ImageError>);

/// Cache of decoded images keyed by source reference.
#[derive(Debug)]
pub struct ImageCache {
    entries: HashMap<String, ImageState>,
    base_dir: Option<PathBuf>,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCache {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            entries: HashMap::new(),
            base_dir: None,
            tx,
            rx,
        }
    }

    /// Resolve relative file paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Start loading `source` unless it was requested before.
    ///
    /// Returns true if a new load was started.
    pub fn request(&mut self, source: &ImageSource) -> bool {
        let key = source.as_str();
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), ImageState::Pending);

        let key = key.to_string();
        let base_dir = self.base_dir.clone();
        let tx = self.tx.clone();
        log::debug!("Loading image {}", preview(&key));
        thread::spawn(move || {
            let result = load_source(&key, base_dir.as_deref());
            // The cache may be gone by now; nothing to report to.
            let _ = tx.send((key, result));
        });
        true
    }

    /// Request every image referenced by the document.
    pub fn request_all(&mut self, document: &Document) -> usize {
        document
            .shapes()
            .iter()
            .filter_map(|shape| shape.as_image())
            .filter(|source| self.request(source))
            .count()
    }

    /// Collect finished loads (non-blocking). Returns how many completed.
    pub fn poll(&mut self) -> usize {
        let mut completed = 0;
        while let Ok((key, result)) = self.rx.try_recv() {
            let state = match result {
                Ok(image) => {
                    log::debug!("Loaded image {} ({}x{})", preview(&key), image.width, image.height);
                    ImageState::Ready(Arc::new(image))
                }
                Err(e) => {
                    log::warn!("Failed to load image {}: {}", preview(&key), e);
                    ImageState::Failed(e.to_string())
                }
            };
            self.entries.insert(key, state);
            completed += 1;
        }
        completed
    }

    pub fn state(&self, source: &ImageSource) -> Option<&ImageState> {
        self.entries.get(source.as_str())
    }

    /// The decoded bitmap, once ready.
    pub fn get(&self, source: &ImageSource) -> Option<&DecodedImage> {
        match self.entries.get(source.as_str()) {
            Some(ImageState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|state| matches!(state, ImageState::Pending))
            .count()
    }
}

/// Data URIs can be huge; keep log lines short.
fn preview(source: &str) -> &str {
    match source.char_indices().nth(48) {
        Some((i, _)) => &source[..i],
        None => source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn wait_for(cache: &mut ImageCache) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while cache.pending_count() > 0 && Instant::now() < deadline {
            cache.poll();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_decode_bytes() {
        let image = DecodedImage::from_bytes(&png_bytes()).unwrap();
        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(image.rgba_data.len(), 2 * 3 * 4);
        assert_eq!(&image.rgba_data[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_load_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes()));
        let image = load_source(&uri, None).unwrap();
        assert_eq!(image.width, 2);

        let err = load_source("data:text/plain,hello", None).unwrap_err();
        assert!(matches!(err, ImageError::DataUri(_)));
    }

    #[test]
    fn test_load_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dot.png"), png_bytes()).unwrap();
        let image = load_source("dot.png", Some(dir.path())).unwrap();
        assert_eq!(image.height, 3);
        assert!(matches!(load_source("missing.png", Some(dir.path())), Err(ImageError::Io(_))));
    }

    #[test]
    fn test_cache_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), png_bytes()).unwrap();
        let mut cache = ImageCache::new().with_base_dir(dir.path());
        let source = ImageSource::new("a.png");

        assert!(cache.request(&source));
        assert!(!cache.request(&source));
        assert!(matches!(cache.state(&source), Some(ImageState::Pending)));
        assert!(cache.get(&source).is_none());

        wait_for(&mut cache);
        assert_eq!(cache.get(&source).map(|i| i.width), Some(2));
        assert!(!cache.request(&source));
    }

    #[test]
    fn test_cache_failed_load() {
        let mut cache = ImageCache::new();
        let source = ImageSource::new("/nonexistent/image.png");
        cache.request(&source);
        wait_for(&mut cache);
        assert!(matches!(cache.state(&source), Some(ImageState::Failed(_))));
        assert!(cache.get(&source).is_none());
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(100);
        assert_eq!(preview(&long).len(), 48);
        assert_eq!(preview("short"), "short");
    }
}
