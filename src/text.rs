use std::{borrow::Cow, path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::core::{PxSize, Rgba8};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::surface::Surface;

pub(crate) mod parley_raster;

/// Font bytes plus the pixel size to shape them at.
#[derive(Clone)]
pub struct Font {
    bytes: Arc<Vec<u8>>,
    fingerprint: u64,
    size_px: f32,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes_len", &self.bytes.len())
            .field("size_px", &self.size_px)
            .finish()
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.size_px == other.size_px
            && self.fingerprint == other.fingerprint
            && (Arc::ptr_eq(&self.bytes, &other.bytes) || self.bytes == other.bytes)
    }
}

impl Font {
    /// Wrap raw TTF/OTF bytes.
    pub fn new(bytes: impl Into<Arc<Vec<u8>>>, size_px: f32) -> VeneerResult<Self> {
        check_size_px(size_px)?;
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(VeneerError::validation("font bytes must be non-empty"));
        }
        let fingerprint = fingerprint_bytes(&bytes);
        Ok(Self {
            bytes,
            fingerprint,
            size_px,
        })
    }

    /// Read a font file from disk.
    pub fn from_file(path: impl AsRef<Path>, size_px: f32) -> VeneerResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::new(bytes, size_px)
    }

    /// Same font bytes at a different size.
    pub fn with_size(&self, size_px: f32) -> VeneerResult<Self> {
        check_size_px(size_px)?;
        Ok(Self {
            size_px,
            ..self.clone()
        })
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixel size.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// FNV-1a digest of the font bytes, independent of size. Equal bytes give equal digests.
    pub(crate) fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

fn check_size_px(size_px: f32) -> VeneerResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(VeneerError::validation("font size_px must be finite and > 0"));
    }
    Ok(())
}

fn fingerprint_bytes(bytes: &[u8]) -> u64 {
    let mut h = 0xcbf29ce484222325u64;
    for &b in bytes {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

/// Measured extent of a block of text. Either axis may be zero for empty text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextMetrics {
    /// Width in whole pixels (rounded up).
    pub width: u32,
    /// Height in whole pixels (rounded up).
    pub height: u32,
}

/// Measures and rasterizes strings into surfaces.
///
/// Text is anchored at the top-left corner of the target. Glyphs falling outside the target are
/// clipped by the implementation.
pub trait TextRasterizer {
    /// Measure `text` as it would be laid out by [`TextRasterizer::rasterize`].
    fn measure(&mut self, text: &str, font: &Font, multiline: bool) -> VeneerResult<TextMetrics>;

    /// Rasterize `text` into a new surface of `size`.
    ///
    /// With `multiline`, each `\n`-delimited segment is its own line; otherwise the whole string is
    /// laid out on one line.
    fn rasterize(
        &mut self,
        text: &str,
        font: &Font,
        color: Rgba8,
        size: PxSize,
        multiline: bool,
    ) -> VeneerResult<Surface>;
}

/// Fold line breaks into spaces for single-line layout.
pub(crate) fn line_folded(text: &str, multiline: bool) -> Cow<'_, str> {
    if multiline || !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", " ").replace(['\n', '\r'], " "))
}

pub use parley_raster::ParleyRasterizer;

#[cfg(test)]
#[path = "../tests/unit/text.rs"]
mod tests;
