//! Border and bevel treatment for surfaces.
//!
//! Decoration is pure: the input surface is only borrowed and every styled result is a new
//! surface. Channel arithmetic is integer and clamped, so shading never wraps.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::foundation::math::offset_channel;
use crate::surface::Surface;

/// Edge treatment applied around a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// No decoration; the input is returned as-is.
    #[default]
    None,
    /// 1-pixel frame of a fixed color.
    SingleLine,
    /// Top/left edges in a shadow tone, bottom/right edges in a lighter tone.
    Bevel,
}

/// Which interaction variant of a decoration to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStyle {
    /// Idle appearance.
    #[default]
    Default,
    /// Pointer over the element.
    Hover,
    /// Element held down: edges toned down and interior darkened.
    Pressed,
}

/// Frame color for [`BorderStyle::SingleLine`].
pub const BORDER_COLOR: Rgba8 = Rgba8::rgb(96, 96, 96);
/// Frame color for [`BorderStyle::SingleLine`] while hovered.
pub const BORDER_HOVER_COLOR: Rgba8 = Rgba8::rgb(64, 128, 220);
/// Top/left bevel edge color.
pub const BEVEL_SHADOW_COLOR: Rgba8 = Rgba8::rgb(112, 112, 112);
/// Bottom/right bevel edge color.
pub const BEVEL_HIGHLIGHT_COLOR: Rgba8 = Rgba8::rgb(232, 232, 232);
/// Frame color painted by [`focus_ring`].
pub const FOCUS_RING_COLOR: Rgba8 = Rgba8::rgb(255, 196, 0);
/// Per-channel delta applied to bevel edges while hovered.
pub const HOVER_TONE: i16 = 20;
/// Per-channel delta applied to edges and interior while pressed.
pub const PRESSED_DARKEN: i16 = -24;

struct EdgePalette {
    top_left: Rgba8Premul,
    bottom_right: Rgba8Premul,
    interior_delta: i16,
}

impl EdgePalette {
    fn for_style(border: BorderStyle, interaction: InteractionStyle) -> Option<Self> {
        let (tl, br) = match border {
            BorderStyle::None => return None,
            BorderStyle::SingleLine => match interaction {
                InteractionStyle::Hover => (BORDER_HOVER_COLOR, BORDER_HOVER_COLOR),
                _ => (BORDER_COLOR, BORDER_COLOR),
            },
            BorderStyle::Bevel => (BEVEL_SHADOW_COLOR, BEVEL_HIGHLIGHT_COLOR),
        };
        let (tl, br) = (tl.to_premul(), br.to_premul());

        Some(match (border, interaction) {
            (_, InteractionStyle::Default) | (BorderStyle::SingleLine, InteractionStyle::Hover) => {
                Self {
                    top_left: tl,
                    bottom_right: br,
                    interior_delta: 0,
                }
            }
            (_, InteractionStyle::Hover) => Self {
                top_left: shade(tl, HOVER_TONE),
                bottom_right: shade(br, HOVER_TONE),
                interior_delta: 0,
            },
            (_, InteractionStyle::Pressed) => Self {
                top_left: shade(tl, PRESSED_DARKEN),
                bottom_right: shade(br, PRESSED_DARKEN),
                interior_delta: PRESSED_DARKEN,
            },
        })
    }
}

/// Decorate `surface` with `border` in the given interaction variant.
///
/// [`BorderStyle::None`] borrows the input unchanged. Every other style returns a new surface;
/// the input is never mutated. Where bevel edges meet, the bottom/right tone wins.
pub fn apply_border(
    surface: &Surface,
    border: BorderStyle,
    interaction: InteractionStyle,
) -> Cow<'_, Surface> {
    let Some(palette) = EdgePalette::for_style(border, interaction) else {
        return Cow::Borrowed(surface);
    };

    let mut out = surface.clone();
    let (w, h) = (out.width(), out.height());

    if palette.interior_delta != 0 {
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                if let Some(px) = out.pixel(x, y) {
                    out.set_pixel(x, y, shade(px, palette.interior_delta));
                }
            }
        }
    }

    for x in 0..w {
        out.set_pixel(x, 0, palette.top_left);
    }
    for y in 0..h {
        out.set_pixel(0, y, palette.top_left);
    }
    for x in 0..w {
        out.set_pixel(x, h - 1, palette.bottom_right);
    }
    for y in 0..h {
        out.set_pixel(w - 1, y, palette.bottom_right);
    }

    Cow::Owned(out)
}

/// New surface with a 1-pixel [`FOCUS_RING_COLOR`] frame around `surface`.
pub fn focus_ring(surface: &Surface) -> Surface {
    let mut out = surface.clone();
    let (w, h) = (out.width(), out.height());
    let ring = FOCUS_RING_COLOR.to_premul();
    for x in 0..w {
        out.set_pixel(x, 0, ring);
        out.set_pixel(x, h - 1, ring);
    }
    for y in 0..h {
        out.set_pixel(0, y, ring);
        out.set_pixel(w - 1, y, ring);
    }
    out
}

/// Offset each color channel by `delta`, clamped to `[0, alpha]` so the pixel stays a valid
/// premultiplied value. Alpha is unchanged.
pub fn shade(px: Rgba8Premul, delta: i16) -> Rgba8Premul {
    Rgba8Premul {
        r: offset_channel(px.r, delta, px.a),
        g: offset_channel(px.g, delta, px.a),
        b: offset_channel(px.b, delta, px.a),
        a: px.a,
    }
}

#[cfg(test)]
#[path = "../tests/unit/decorate.rs"]
mod tests;
