use std::borrow::Cow;

use smallvec::SmallVec;

use crate::atlas::{Atlas, AtlasBuilder, AtlasKey};
use crate::decorate::{BorderStyle, InteractionStyle, apply_border, focus_ring};
use crate::foundation::core::{PxPoint, PxSize, Rgba8};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::policy::config::{ElementConfig, ElementKind};
use crate::render::backend::RenderBackend;
use crate::slots::{SlotName, SlotStore};
use crate::surface::Surface;
use crate::text::{Font, TextRasterizer};

/// Atlas entry a widget draws for its current interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawId {
    /// Idle fill.
    Idle,
    /// Text layer.
    Text,
    /// Pointer over.
    Hover,
    /// Pressed.
    Pressed,
    /// Keyboard focus (buttons with `focus_ring`).
    Focused,
}

impl DrawId {
    /// Slot backing this entry.
    pub fn slot(self) -> SlotName {
        match self {
            DrawId::Idle => SlotName::Background,
            DrawId::Text => SlotName::Foreground,
            DrawId::Hover => SlotName::Hover,
            DrawId::Pressed => SlotName::Click,
            DrawId::Focused => SlotName::Focused,
        }
    }

    /// Top-level atlas key.
    pub fn key(self) -> AtlasKey {
        AtlasKey::id(self.slot().atlas_id())
    }

    /// Key of this entry inside the nested row for dropdown option `index`.
    pub fn option_key(self, index: u32) -> AtlasKey {
        AtlasKey::from([index, self.slot().atlas_id()])
    }
}

/// Inputs that feed default slot content.
pub(crate) struct Appearance<'a> {
    pub(crate) size: PxSize,
    pub(crate) color: Rgba8,
    pub(crate) text_color: Rgba8,
    pub(crate) text: &'a str,
    pub(crate) font: Option<&'a Font>,
    pub(crate) config: ElementConfig,
}

impl Appearance<'_> {
    fn with_text<'t>(&'t self, text: &'t str) -> Appearance<'t> {
        Appearance {
            size: self.size,
            color: self.color,
            text_color: self.text_color,
            text,
            font: self.font,
            config: self.config,
        }
    }
}

enum Layer<'a> {
    Slot(u32, &'a Surface),
    Nested(u32, &'a Atlas),
}

impl Layer<'_> {
    fn size(&self) -> PxSize {
        match self {
            Layer::Slot(_, s) => s.size(),
            Layer::Nested(_, a) => a.surface().size(),
        }
    }
}

/// Slots that make up `kind`'s atlas, in stacking order.
///
/// The text slot is present when the caller overrode it or there is text to rasterize.
pub(crate) fn layout(
    kind: &ElementKind,
    config: ElementConfig,
    has_text: bool,
    slots: &SlotStore,
) -> SmallVec<[SlotName; 5]> {
    let with_text = has_text || slots.is_overridden(SlotName::Foreground);
    let mut out = SmallVec::new();
    out.push(SlotName::Background);
    if with_text && !matches!(kind, ElementKind::PlainFill) {
        out.push(SlotName::Foreground);
    }
    if matches!(kind, ElementKind::Button | ElementKind::Dropdown { .. }) {
        out.push(SlotName::Hover);
        out.push(SlotName::Click);
        if config.focus_ring && matches!(kind, ElementKind::Button) {
            out.push(SlotName::Focused);
        }
    }
    out
}

/// Resolve every slot of `kind` through `slots`, then stitch the atlas.
pub(crate) fn compose<B: RenderBackend + ?Sized>(
    kind: &ElementKind,
    slots: &mut SlotStore,
    look: &Appearance<'_>,
    backend: &mut B,
    text: &mut dyn TextRasterizer,
) -> VeneerResult<Atlas> {
    let wanted = layout(kind, look.config, !look.text.is_empty(), slots);
    for slot in SlotName::ALL {
        if !wanted.contains(&slot) {
            slots.release_default(slot);
        }
    }
    for &slot in &wanted {
        slots.get_or_compute(slot, || default_slot(slot, look, backend, text))?;
    }

    let rows = match kind {
        ElementKind::Dropdown { options } => options
            .iter()
            .map(|option| option_row(&look.with_text(option), backend, text))
            .collect::<VeneerResult<Vec<_>>>()?,
        _ => Vec::new(),
    };

    let mut layers: Vec<Layer<'_>> = Vec::with_capacity(wanted.len() + rows.len());
    for &slot in &wanted {
        let surface = slots.get(slot).ok_or_else(|| {
            VeneerError::validation(format!("slot {slot:?} has no surface after refresh"))
        })?;
        layers.push(Layer::Slot(slot.atlas_id(), surface));
    }
    for (index, row) in rows.iter().enumerate() {
        layers.push(Layer::Nested(option_base(index)?, row));
    }
    stack(backend, &layers)
}

/// Button-style atlas for one dropdown option. Rows are never overridable, so they are built
/// straight from defaults.
fn option_row<B: RenderBackend + ?Sized>(
    look: &Appearance<'_>,
    backend: &mut B,
    text: &mut dyn TextRasterizer,
) -> VeneerResult<Atlas> {
    let mut surfaces: SmallVec<[(u32, Surface); 4]> = SmallVec::new();
    for slot in [
        SlotName::Background,
        SlotName::Foreground,
        SlotName::Hover,
        SlotName::Click,
    ] {
        if slot == SlotName::Foreground && look.text.is_empty() {
            continue;
        }
        surfaces.push((slot.atlas_id(), default_slot(slot, look, backend, text)?));
    }
    let layers: Vec<Layer<'_>> = surfaces
        .iter()
        .map(|(id, surface)| Layer::Slot(*id, surface))
        .collect();
    stack(backend, &layers)
}

fn option_base(index: usize) -> VeneerResult<u32> {
    u32::try_from(index)
        .map_err(|_| VeneerError::validation(format!("dropdown option index {index} exceeds u32")))
}

/// Default content of `slot`.
pub(crate) fn default_slot<B: RenderBackend + ?Sized>(
    slot: SlotName,
    look: &Appearance<'_>,
    backend: &mut B,
    text: &mut dyn TextRasterizer,
) -> VeneerResult<Surface> {
    let border = look.config.border_style;
    match slot {
        SlotName::Background => decorated_fill(backend, look, border, InteractionStyle::Default),
        SlotName::Hover => decorated_fill(backend, look, border, InteractionStyle::Hover),
        SlotName::Click => decorated_fill(backend, look, border, InteractionStyle::Pressed),
        SlotName::Focused => {
            let idle = decorated_fill(backend, look, border, InteractionStyle::Default)?;
            Ok(focus_ring(&idle))
        }
        SlotName::Foreground => {
            let font = look.font.ok_or_else(|| {
                VeneerError::validation("element has text but no font was set")
            })?;
            Surface::from_text(
                text,
                look.text,
                font,
                look.text_color,
                look.size,
                look.config.multi_line,
            )
        }
    }
}

fn decorated_fill<B: RenderBackend + ?Sized>(
    backend: &mut B,
    look: &Appearance<'_>,
    border: BorderStyle,
    interaction: InteractionStyle,
) -> VeneerResult<Surface> {
    let mut base = backend.allocate(look.size)?;
    base.paint(look.color);
    let owned = match apply_border(&base, border, interaction) {
        Cow::Owned(decorated) => Some(decorated),
        Cow::Borrowed(_) => None,
    };
    Ok(owned.unwrap_or(base))
}

/// Stack `layers` top to bottom at x = 0. The atlas is as wide as the widest layer and as tall as
/// all layers together.
fn stack<B: RenderBackend + ?Sized>(backend: &mut B, layers: &[Layer<'_>]) -> VeneerResult<Atlas> {
    let mut width = 0u32;
    let mut height = 0u32;
    for layer in layers {
        let size = layer.size();
        width = width.max(size.width());
        height = height
            .checked_add(size.height())
            .ok_or_else(|| VeneerError::allocation("stacked atlas height overflows u32"))?;
    }
    let size = PxSize::from_u32(width, height)?;

    let mut builder = AtlasBuilder::start(backend, size)?;
    let mut y = 0u32;
    for layer in layers {
        let at = PxPoint::new(0, y);
        match layer {
            Layer::Slot(id, surface) => {
                builder.draw_surface_at(*id, surface, at)?;
            }
            Layer::Nested(base, child) => builder.draw_nested(*base, child, at)?,
        }
        y += layer.size().height();
    }
    builder.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/policy/compose.rs"]
mod tests;
