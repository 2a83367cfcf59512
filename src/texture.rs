//! RGBA textures shared between sprites
//!
//! A texture is identified by its [`TextureId`], not by its pixel content. Two
//! textures decoded from the same file are two different textures.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TextureError;

/// Process-unique texture identity (never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TextureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A 2D grid of RGBA8 pixels, row-major
#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wrap a raw RGBA8 buffer (`width * height * 4` bytes)
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TextureError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            id: TextureId::next(),
            width,
            height,
            pixels,
        })
    }

    /// Texture filled with a single colour
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Result<Self, TextureError> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Texture whose pixel at (x, y) is `f(x, y)`
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 4],
    ) -> Result<Self, TextureError> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::from_rgba(width, height, pixels)
    }

    /// Decode an image file into a texture
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        log::debug!("Loading image from: {:?}", path);

        let reader = image::ImageReader::open(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let img = reader
            .with_guessed_format()
            .map_err(|source| TextureError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .decode()
            .map_err(|source| TextureError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("Loaded image {}x{} from {:?}", width, height, path);

        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Convenience: move into a shared handle
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at (x, y), `None` outside the texture
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (x as usize + y as usize * self.width as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_differs_for_equal_content() {
        let a = Texture::solid(4, 4, [255, 0, 0, 255]).unwrap();
        let b = Texture::solid(4, 4, [255, 0, 0, 255]).unwrap();
        assert_eq!(a.pixels(), b.pixels());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_from_rgba_rejects_bad_buffer() {
        let err = Texture::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            TextureError::BufferSize {
                expected: 16,
                actual: 15,
                ..
            }
        ));
        assert!(matches!(
            Texture::from_rgba(0, 2, Vec::new()),
            Err(TextureError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn test_pixel_lookup() {
        let tex = Texture::from_fn(3, 2, |x, y| [x as u8, y as u8, 0, (x + y * 3) as u8]).unwrap();
        assert_eq!(tex.pixel(2, 1), Some([2, 1, 0, 5]));
        assert_eq!(tex.pixel(3, 0), None);
        assert_eq!(tex.pixel(0, 2), None);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Texture::from_file("does/not/exist.png").unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }

    #[test]
    fn test_from_file_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.png");
        let mut img = image::RgbaImage::new(5, 3);
        img.put_pixel(1, 2, image::Rgba([10, 20, 30, 128]));
        img.save(&path).unwrap();

        let tex = Texture::from_file(&path).unwrap();
        assert_eq!(tex.size(), (5, 3));
        assert_eq!(tex.pixel(1, 2), Some([10, 20, 30, 128]));
        assert_eq!(tex.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
