use crate::foundation::core::{PxPoint, PxRect, PxSize, Rgba8, Rgba8Premul};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::text::{Font, TextRasterizer};

/// An owned rectangular pixel buffer: premultiplied RGBA8, tightly packed, row-major.
///
/// A surface is never resized in place. Recomputing content produces a new surface and the old
/// buffer is released when its owner drops it.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    size: PxSize,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.size.width())
            .field("height", &self.size.height())
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Surface {
    /// Allocate a fully transparent surface.
    ///
    /// Fails with [`VeneerError::InvalidDimensions`] when either axis is `<= 0`.
    pub fn allocate(width: i64, height: i64) -> VeneerResult<Self> {
        Self::with_size(PxSize::new(width, height)?)
    }

    /// Allocate a fully transparent surface of a validated size.
    pub fn with_size(size: PxSize) -> VeneerResult<Self> {
        Ok(Self {
            size,
            data: vec![0u8; size.byte_len()?],
        })
    }

    /// Allocate a surface of uniform `color`.
    pub fn solid(size: PxSize, color: Rgba8) -> VeneerResult<Self> {
        let px = color.to_premul().to_array();
        Ok(Self {
            size,
            data: px.repeat(size.pixel_count()?),
        })
    }

    /// New surface of the same size filled with `color`.
    pub fn fill(&self, color: Rgba8) -> Surface {
        let px = color.to_premul().to_array();
        Self {
            size: self.size,
            data: px.repeat(self.data.len() / 4),
        }
    }

    /// Rasterize `text` top-left anchored through `rasterizer`.
    pub fn from_text(
        rasterizer: &mut dyn TextRasterizer,
        text: &str,
        font: &Font,
        color: Rgba8,
        size: PxSize,
        multiline: bool,
    ) -> VeneerResult<Self> {
        rasterizer.rasterize(text, font, color, size, multiline)
    }

    /// Wrap an existing premultiplied RGBA8 buffer.
    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> VeneerResult<Self> {
        let size = PxSize::from_u32(width, height)?;
        if data.len() != size.byte_len()? {
            return Err(VeneerError::validation(format!(
                "surface buffer length {} does not match {}x{} rgba8",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { size, data })
    }

    /// Convert a straight-alpha image into a surface.
    pub fn from_image(img: &image::RgbaImage) -> VeneerResult<Self> {
        let size = PxSize::from_u32(img.width(), img.height())?;
        let mut data = Vec::with_capacity(size.byte_len()?);
        for px in img.pixels() {
            let [r, g, b, a] = px.0;
            data.extend_from_slice(&Rgba8Premul::from_straight_rgba(r, g, b, a).to_array());
        }
        Ok(Self { size, data })
    }

    /// Decode an encoded image (PNG, JPEG, ...) into a surface.
    pub fn decode(bytes: &[u8]) -> VeneerResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| VeneerError::Other(anyhow::Error::new(e).context("decode image")))?;
        Self::from_image(&img.to_rgba8())
    }

    /// Convert into a straight-alpha image.
    pub fn to_image(&self) -> image::RgbaImage {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        // Dimensions and length are consistent by construction.
        image::RgbaImage::from_raw(self.size.width(), self.size.height(), out)
            .unwrap_or_else(|| image::RgbaImage::new(self.size.width(), self.size.height()))
    }

    /// Validated dimensions.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn paint(&mut self, color: Rgba8) {
        let px = color.to_premul().to_array();
        for dst in self.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Rectangle covering the whole surface at the origin.
    pub fn bounds(&self) -> PxRect {
        PxRect::at(PxPoint::default(), self.size)
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        let i = self.index_of(x, y)?;
        Some(Rgba8Premul::from_array([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8Premul) {
        if let Some(i) = self.index_of(x, y) {
            self.data[i..i + 4].copy_from_slice(&px.to_array());
        }
    }

    /// Copy the pixels inside `rect` into a new surface.
    pub fn crop(&self, rect: PxRect) -> VeneerResult<Surface> {
        let size = PxSize::from_u32(rect.width, rect.height)?;
        if !rect.fits_within(self.size) {
            return Err(VeneerError::validation(format!(
                "crop rect {rect:?} exceeds surface {}x{}",
                self.width(),
                self.height()
            )));
        }
        let row_bytes = rect.width as usize * 4;
        let mut data = Vec::with_capacity(size.byte_len()?);
        for y in rect.y..rect.y + rect.height {
            let start = (y as usize * self.width() as usize + rect.x as usize) * 4;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Ok(Surface { size, data })
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some((y as usize * self.width() as usize + x as usize) * 4)
    }
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 {
        let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
        v.min(255) as u8
    };
    [un(px[0]), un(px[1]), un(px[2]), a]
}

#[cfg(test)]
#[path = "../tests/unit/surface.rs"]
mod tests;
