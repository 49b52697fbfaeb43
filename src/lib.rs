//! Veneer is a compositing cache for retained-mode widget visuals.
//!
//! An [`Element`] turns a semantic appearance description (fill color, text, border style and
//! interaction variants) into pixel [`Surface`]s, keeps caller-supplied surfaces apart from
//! default-computed ones, and stitches everything into one addressable [`Atlas`]:
//!
//! - Describe an element in code or as an [`ElementSpec`] JSON document
//! - Call [`Element::refresh`] with a [`RenderBackend`] and a [`TextRasterizer`]
//! - Draw by looking up a [`DrawId`] in the resulting atlas
//!
//! Everything is single-threaded and synchronous; refresh only after a state change.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod atlas;
pub(crate) mod decorate;
pub(crate) mod policy;
pub(crate) mod render;
pub(crate) mod slots;
pub(crate) mod surface;
pub(crate) mod text;

pub use crate::foundation::core::{PxPoint, PxRect, PxSize, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{VeneerError, VeneerResult};

pub use crate::atlas::{Atlas, AtlasBuilder, AtlasKey};
pub use crate::decorate::{
    BEVEL_HIGHLIGHT_COLOR, BEVEL_SHADOW_COLOR, BORDER_COLOR, BORDER_HOVER_COLOR, BorderStyle,
    FOCUS_RING_COLOR, HOVER_TONE, InteractionStyle, PRESSED_DARKEN, apply_border, focus_ring,
    shade,
};
pub use crate::policy::compose::DrawId;
pub use crate::policy::config::{
    AUTO_SIZE_PADDING, DEFAULT_FONT_SIZE_PX, ElementConfig, ElementKind, ElementSpec,
};
pub use crate::policy::element::Element;
pub use crate::render::backend::{BackendKind, BackendStats, RenderBackend, create_backend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::slots::{SlotName, SlotStore};
pub use crate::surface::Surface;
pub use crate::text::{Font, ParleyRasterizer, TextMetrics, TextRasterizer};
