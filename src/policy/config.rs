use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::decorate::BorderStyle;
use crate::foundation::core::{PxSize, Rgba8};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::policy::element::Element;
use crate::text::Font;

/// Padding added to each measured text axis before auto-size compares it to the current bounds.
pub const AUTO_SIZE_PADDING: u32 = 3;

/// Font size used when a description does not name one.
pub const DEFAULT_FONT_SIZE_PX: f32 = 14.0;

/// Compositing options recognized by every element kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementConfig {
    /// Resize to the measured text plus [`AUTO_SIZE_PADDING`] on refresh.
    pub auto_size: bool,
    /// Border applied to computed fill slots.
    pub border_style: BorderStyle,
    /// Lay text out one line per `\n`-delimited segment.
    pub multi_line: bool,
    /// Give buttons a focused variant.
    pub focus_ring: bool,
}

/// The closed set of element kinds and their per-kind data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    /// Background only.
    PlainFill,
    /// Background with text stacked below it.
    LabeledPanel,
    /// Background, text, hover and pressed variants (plus focused with `focus_ring`).
    Button,
    /// A button header followed by one nested button atlas per option.
    Dropdown {
        /// Option labels, in display order.
        options: Vec<String>,
    },
}

impl ElementKind {
    /// Stable snake_case name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::PlainFill => "plain_fill",
            ElementKind::LabeledPanel => "labeled_panel",
            ElementKind::Button => "button",
            ElementKind::Dropdown { .. } => "dropdown",
        }
    }
}

fn default_text_color() -> Rgba8 {
    Rgba8::rgb(0, 0, 0)
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE_PX
}

/// JSON description of an element.
///
/// ```json
/// { "kind": "button", "color": "#c8c8c8", "width": 80, "height": 24,
///   "text": "OK", "font": "fonts/Inter.ttf", "config": { "border_style": "bevel" } }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Element kind (and dropdown options).
    #[serde(flatten)]
    pub kind: ElementKind,
    /// Fill color.
    pub color: Rgba8,
    /// Text color.
    #[serde(default = "default_text_color")]
    pub text_color: Rgba8,
    /// Label text.
    #[serde(default)]
    pub text: String,
    /// Font file, relative to the description's directory.
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    /// Compositing options.
    #[serde(default)]
    pub config: ElementConfig,
}

impl ElementSpec {
    /// Parse a JSON description.
    pub fn from_json(json: &str) -> VeneerResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VeneerError::validation(format!("invalid element description: {e}")))
    }

    /// Check geometry and text/font consistency without touching the filesystem.
    pub fn validate(&self) -> VeneerResult<()> {
        PxSize::new(self.width, self.height)?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(VeneerError::validation("font_size must be finite and > 0"));
        }
        let has_text = !self.text.is_empty()
            || matches!(&self.kind, ElementKind::Dropdown { options }
                if options.iter().any(|o| !o.is_empty()));
        if has_text && self.font.is_none() {
            return Err(VeneerError::validation("element has text but no font was given"));
        }
        Ok(())
    }

    /// Build an element, loading the font relative to `root`.
    pub fn build(&self, root: &Path) -> VeneerResult<Element> {
        self.validate()?;
        let size = PxSize::new(self.width, self.height)?;
        let mut element = Element::new(self.kind.clone(), size, self.color);
        element.set_text_color(self.text_color);
        element.set_config(self.config);
        if let Some(rel) = &self.font {
            let font = Font::from_file(root.join(rel), self.font_size)?;
            element.set_font(Some(font));
        }
        element.set_text(self.text.clone());
        Ok(element)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/policy/config.rs"]
mod tests;
