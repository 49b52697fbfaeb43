use std::collections::HashMap;

use crate::foundation::core::{PxSize, Rgba8};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::surface::Surface;
use crate::text::{Font, TextMetrics, TextRasterizer, line_folded};

/// Font bytes registered with the Parley collection, keyed by content so clones and reloads of
/// the same file share one registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FaceKey {
    fingerprint: u64,
    len: usize,
}

impl FaceKey {
    fn of(font: &Font) -> Self {
        Self {
            fingerprint: font.fingerprint(),
            len: font.bytes().len(),
        }
    }
}

struct RegisteredFace {
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
}

/// [`TextRasterizer`] backed by Parley layout and `vello_cpu` glyph rendering.
///
/// Each distinct font is registered once and reused by every later measure and rasterize call.
pub struct ParleyRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    faces: HashMap<FaceKey, RegisteredFace>,
}

impl Default for ParleyRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyRasterizer {
    /// Construct a rasterizer with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn face(&mut self, font: &Font) -> VeneerResult<FaceKey> {
        let key = FaceKey::of(font);
        if self.faces.contains_key(&key) {
            return Ok(key);
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| VeneerError::text("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VeneerError::text("registered font family has no name"))?
            .to_string();
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );
        tracing::debug!(family = %family_name, bytes = key.len, "font registered");

        self.faces.insert(
            key,
            RegisteredFace {
                family_name,
                font_data,
            },
        );
        Ok(key)
    }

    fn layout(
        &mut self,
        text: &str,
        font: &Font,
        brush: Rgba8,
        multiline: bool,
    ) -> VeneerResult<parley::Layout<Rgba8>> {
        let key = self.face(font)?;
        let family_name = self
            .faces
            .get(&key)
            .map(|face| face.family_name.clone())
            .ok_or_else(|| VeneerError::text("font face missing after registration"))?;

        let text = line_folded(text, multiline);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px()));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(&text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

impl TextRasterizer for ParleyRasterizer {
    fn measure(&mut self, text: &str, font: &Font, multiline: bool) -> VeneerResult<TextMetrics> {
        if text.is_empty() {
            return Ok(TextMetrics::default());
        }
        let layout = self.layout(text, font, Rgba8::default(), multiline)?;
        Ok(TextMetrics {
            width: layout.width().max(0.0).ceil() as u32,
            height: layout.height().max(0.0).ceil() as u32,
        })
    }

    fn rasterize(
        &mut self,
        text: &str,
        font: &Font,
        color: Rgba8,
        size: PxSize,
        multiline: bool,
    ) -> VeneerResult<Surface> {
        let w: u16 = size
            .width()
            .try_into()
            .map_err(|_| VeneerError::text("text surface width exceeds u16"))?;
        let h: u16 = size
            .height()
            .try_into()
            .map_err(|_| VeneerError::text("text surface height exceeds u16"))?;
        if text.is_empty() {
            return Surface::with_size(size);
        }

        let layout = self.layout(text, font, color, multiline)?;
        let font_data = self
            .faces
            .get(&FaceKey::of(font))
            .map(|face| &face.font_data)
            .ok_or_else(|| VeneerError::text("font face missing after registration"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        tracing::trace!(width = w, height = h, "rasterized text");
        Surface::from_rgba8_premul(
            size.width(),
            size.height(),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_raster.rs"]
mod tests;
