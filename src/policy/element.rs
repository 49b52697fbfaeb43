use crate::atlas::Atlas;
use crate::foundation::core::{PxRect, PxSize, Rgba8};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::policy::compose::{self, Appearance, DrawId};
use crate::policy::config::{AUTO_SIZE_PADDING, ElementConfig, ElementKind};
use crate::render::backend::RenderBackend;
use crate::slots::{SlotName, SlotStore};
use crate::surface::Surface;
use crate::text::{Font, TextMetrics, TextRasterizer};

/// A widget's appearance state plus the cached surfaces and atlas derived from it.
///
/// Setters only record the change and mark the element stale; pixels are produced by
/// [`Element::refresh`] (or [`Element::refresh_if_stale`]) on the caller's thread.
#[derive(Debug)]
pub struct Element {
    kind: ElementKind,
    size: PxSize,
    color: Rgba8,
    text_color: Rgba8,
    text: String,
    font: Option<Font>,
    config: ElementConfig,
    slots: SlotStore,
    atlas: Option<Atlas>,
    stale: bool,
}

impl Element {
    /// New element with no text and default config. It is stale until the first refresh.
    pub fn new(kind: ElementKind, size: PxSize, color: Rgba8) -> Self {
        Self {
            kind,
            size,
            color,
            text_color: Rgba8::rgb(0, 0, 0),
            text: String::new(),
            font: None,
            config: ElementConfig::default(),
            slots: SlotStore::new(),
            atlas: None,
            stale: true,
        }
    }

    /// Builder-style [`Element::set_text`] plus [`Element::set_font`].
    pub fn with_text(mut self, text: impl Into<String>, font: Font) -> Self {
        self.set_text(text);
        self.set_font(Some(font));
        self
    }

    /// Builder-style [`Element::set_config`].
    pub fn with_config(mut self, config: ElementConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Element kind.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Current bounds (updated by auto-size on refresh).
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Fill color.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Text color.
    pub fn text_color(&self) -> Rgba8 {
        self.text_color
    }

    /// Label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font used for the label.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Compositing options.
    pub fn config(&self) -> ElementConfig {
        self.config
    }

    /// Slot storage, for inspecting overrides and current surfaces.
    pub fn slots(&self) -> &SlotStore {
        &self.slots
    }

    /// Last built atlas. May be out of date when [`Element::is_stale`] is `true`.
    pub fn atlas(&self) -> Option<&Atlas> {
        self.atlas.as_ref()
    }

    /// Return `true` when an input changed since the last refresh.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Change the element kind.
    pub fn set_kind(&mut self, kind: ElementKind) {
        self.kind = kind;
        self.stale = true;
    }

    /// Change the bounds.
    pub fn set_size(&mut self, size: PxSize) {
        self.size = size;
        self.stale = true;
    }

    /// Change the fill color.
    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
        self.stale = true;
    }

    /// Change the text color.
    pub fn set_text_color(&mut self, color: Rgba8) {
        self.text_color = color;
        self.stale = true;
    }

    /// Change the label. Empty text drops the default text slot.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.stale = true;
    }

    /// Change the label font.
    pub fn set_font(&mut self, font: Option<Font>) {
        self.font = font;
        self.stale = true;
    }

    /// Change the compositing options.
    pub fn set_config(&mut self, config: ElementConfig) {
        self.config = config;
        self.stale = true;
    }

    /// Supply the idle surface; it is kept as-is until [`Element::clear_override`].
    pub fn set_background(&mut self, surface: Surface) {
        self.set_slot(SlotName::Background, surface);
    }

    /// Supply the text surface.
    pub fn set_foreground(&mut self, surface: Surface) {
        self.set_slot(SlotName::Foreground, surface);
    }

    /// Supply the hover surface.
    pub fn set_hover_texture(&mut self, surface: Surface) {
        self.set_slot(SlotName::Hover, surface);
    }

    /// Supply the pressed surface.
    pub fn set_click_texture(&mut self, surface: Surface) {
        self.set_slot(SlotName::Click, surface);
    }

    /// Supply the focused surface.
    pub fn set_focused_texture(&mut self, surface: Surface) {
        self.set_slot(SlotName::Focused, surface);
    }

    /// Caller override for any slot.
    pub fn set_slot(&mut self, slot: SlotName, surface: Surface) {
        self.slots.set(slot, surface);
        self.stale = true;
    }

    /// Hand `slot` back to default policy, returning the surface that overrode it.
    pub fn clear_override(&mut self, slot: SlotName) -> Option<Surface> {
        let prev = self.slots.clear_override(slot);
        if prev.is_some() {
            self.stale = true;
        }
        prev
    }

    /// Recompute every non-overridden slot and rebuild the atlas.
    ///
    /// With `auto_size`, the element is laid out at its measured text plus
    /// [`AUTO_SIZE_PADDING`]. On failure the previous size and atlas are kept and the element
    /// stays stale.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = self.kind.name()))]
    pub fn refresh<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        text: &mut dyn TextRasterizer,
    ) -> VeneerResult<&Atlas> {
        let resized = if self.config.auto_size {
            self.auto_size(text)?
        } else {
            None
        };
        let size = resized.unwrap_or(self.size);

        let look = Appearance {
            size,
            color: self.color,
            text_color: self.text_color,
            text: &self.text,
            font: self.font.as_ref(),
            config: self.config,
        };
        let atlas = compose::compose(&self.kind, &mut self.slots, &look, backend, text)?;
        if resized.is_some() {
            tracing::debug!(
                from_w = self.size.width(),
                from_h = self.size.height(),
                to_w = size.width(),
                to_h = size.height(),
                "auto-size"
            );
            self.size = size;
        }
        tracing::debug!(
            width = atlas.surface().width(),
            height = atlas.surface().height(),
            regions = atlas.len(),
            "element refreshed"
        );
        self.stale = false;
        Ok(&*self.atlas.insert(atlas))
    }

    /// [`Element::refresh`] only when something changed since the last successful refresh.
    pub fn refresh_if_stale<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        text: &mut dyn TextRasterizer,
    ) -> VeneerResult<&Atlas> {
        if self.stale || self.atlas.is_none() {
            return self.refresh(backend, text);
        }
        self.atlas
            .as_ref()
            .ok_or_else(|| VeneerError::validation("element has no atlas"))
    }

    /// Atlas surface and the sub-rectangle to draw for `draw`, if the current atlas has it.
    pub fn draw_source(&self, draw: DrawId) -> Option<(&Surface, PxRect)> {
        self.source_for(draw.key())
    }

    /// Same as [`Element::draw_source`] for the row of dropdown option `index`.
    pub fn option_source(&self, index: u32, draw: DrawId) -> Option<(&Surface, PxRect)> {
        self.source_for(draw.option_key(index))
    }

    fn source_for(&self, key: crate::atlas::AtlasKey) -> Option<(&Surface, PxRect)> {
        let atlas = self.atlas.as_ref()?;
        Some((atlas.surface(), atlas.region(key)?))
    }

    /// Padded size the text asks for, or `None` when the current size already fits.
    fn auto_size(&self, text: &mut dyn TextRasterizer) -> VeneerResult<Option<PxSize>> {
        let Some(font) = &self.font else {
            return Ok(None);
        };
        let mut measured: Option<TextMetrics> = None;
        let options: &[String] = match &self.kind {
            ElementKind::Dropdown { options } => options,
            _ => &[],
        };
        for label in std::iter::once(&self.text).chain(options) {
            if label.is_empty() {
                continue;
            }
            let m = text.measure(label, font, self.config.multi_line)?;
            measured = Some(match measured {
                Some(prev) => TextMetrics {
                    width: prev.width.max(m.width),
                    height: prev.height.max(m.height),
                },
                None => m,
            });
        }
        match measured {
            Some(measured) => padded_resize(self.size, measured),
            None => Ok(None),
        }
    }
}

/// New size when the padded measurement differs from `current` on either axis. Axes that did not
/// change keep their current value.
pub(crate) fn padded_resize(
    current: PxSize,
    measured: TextMetrics,
) -> VeneerResult<Option<PxSize>> {
    let want_w = measured.width.saturating_add(AUTO_SIZE_PADDING);
    let want_h = measured.height.saturating_add(AUTO_SIZE_PADDING);
    let width_changed = want_w != current.width();
    let height_changed = want_h != current.height();
    if !width_changed && !height_changed {
        return Ok(None);
    }
    let w = if width_changed { want_w } else { current.width() };
    let h = if height_changed { want_h } else { current.height() };
    Ok(Some(PxSize::from_u32(w, h)?))
}

#[cfg(test)]
#[path = "../../tests/unit/policy/element.rs"]
mod tests;
