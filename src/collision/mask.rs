//! Per-texture alpha masks
//!
//! The pixel-perfect test needs the opacity of arbitrary texels. Reading them
//! back out of a texture every query is wasteful, so the first query against a
//! texture extracts its alpha channel into a flat byte array and keeps it.
//! Masks are keyed by texture identity and never change once built.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::error::TextureError;
use crate::texture::{Texture, TextureId};

/// Alpha channel of one texture, row-major (`index = x + y * width`)
#[derive(Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Box<[u8]>,
}

impl AlphaMask {
    /// Extract the alpha channel of every pixel
    pub fn from_texture(texture: &Texture) -> Self {
        // Texture buffers are validated on construction
        Self::extract(texture.width(), texture.height(), texture.pixels())
    }

    /// Extract alpha from a raw RGBA8 buffer of `width * height` pixels
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::BufferSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self::extract(width, height, rgba))
    }

    fn extract(width: u32, height: u32, rgba: &[u8]) -> Self {
        Self {
            width,
            height,
            alpha: rgba.chunks_exact(4).map(|px| px[3]).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.alpha
    }

    /// Alpha at (x, y); anything outside the texture reads as fully transparent
    #[inline]
    pub fn pixel_alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[x as usize + y as usize * self.width as usize]
    }

    /// Same as [`pixel_alpha`](Self::pixel_alpha) for signed texel coordinates
    #[inline]
    pub fn pixel_alpha_signed(&self, x: i64, y: i64) -> u8 {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.pixel_alpha(x, y),
            _ => 0,
        }
    }
}

struct Entry {
    texture: Weak<Texture>,
    mask: Arc<AlphaMask>,
}

/// Lazily populated texture → alpha mask table
///
/// Lookup-or-create runs under a lock, so a cache can be shared between
/// threads and still builds at most one mask per texture.
#[derive(Default)]
pub struct AlphaMaskCache {
    entries: Mutex<HashMap<TextureId, Entry>>,
}

impl std::fmt::Debug for AlphaMaskCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaMaskCache")
            .field("len", &self.len())
            .finish()
    }
}

impl AlphaMaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TextureId, Entry>> {
        // A panic while holding the lock can't leave a half-built entry behind
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mask for `texture`, building and storing it on first use
    pub fn get_mask(&self, texture: &Arc<Texture>) -> Arc<AlphaMask> {
        let mut entries = self.lock();
        if let Some(entry) = entries.get(&texture.id()) {
            return Arc::clone(&entry.mask);
        }

        let mask = Arc::new(AlphaMask::from_texture(texture));
        log::debug!(
            "Built alpha mask for texture {} ({}x{})",
            texture.id(),
            mask.width(),
            mask.height()
        );
        entries.insert(
            texture.id(),
            Entry {
                texture: Arc::downgrade(texture),
                mask: Arc::clone(&mask),
            },
        );
        mask
    }

    /// Build the mask for `texture` ahead of the first collision query
    ///
    /// Used at load time. Keeps an existing entry if there is one.
    pub fn prime(&self, texture: &Arc<Texture>) -> Arc<AlphaMask> {
        let mut entries = self.lock();
        let entry = entries.entry(texture.id()).or_insert_with(|| Entry {
            texture: Arc::downgrade(texture),
            mask: Arc::new(AlphaMask::from_texture(texture)),
        });
        Arc::clone(&entry.mask)
    }

    /// Whether a mask has been built for `texture`
    pub fn contains(&self, texture: &Texture) -> bool {
        self.lock().contains_key(&texture.id())
    }

    /// Drop the mask for `texture`; returns whether one was cached
    pub fn invalidate(&self, texture: &Texture) -> bool {
        let removed = self.lock().remove(&texture.id()).is_some();
        if removed {
            log::debug!("Invalidated alpha mask for texture {}", texture.id());
        }
        removed
    }

    /// Drop masks whose texture no longer exists; returns how many were removed
    pub fn purge_dropped(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.texture.strong_count() > 0);
        let removed = before - entries.len();
        if removed > 0 {
            log::debug!("Purged {} alpha masks for dropped textures", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
