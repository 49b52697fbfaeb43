use std::collections::BTreeMap;

use crate::foundation::core::PxRect;
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::surface::Surface;

pub(crate) mod builder;
pub(crate) mod key;

pub use builder::AtlasBuilder;
pub use key::AtlasKey;

/// One composited surface plus the key -> sub-rectangle registry describing it.
#[derive(Clone, Debug)]
pub struct Atlas {
    surface: Surface,
    regions: BTreeMap<AtlasKey, PxRect>,
}

impl Atlas {
    pub(crate) fn from_parts(surface: Surface, regions: BTreeMap<AtlasKey, PxRect>) -> Self {
        Self { surface, regions }
    }

    /// The composited pixels.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Sub-rectangle registered for `key`.
    pub fn region(&self, key: impl Into<AtlasKey>) -> Option<PxRect> {
        self.regions.get(&key.into()).copied()
    }

    /// Return `true` when `key` is registered.
    pub fn contains(&self, key: impl Into<AtlasKey>) -> bool {
        self.regions.contains_key(&key.into())
    }

    /// All registrations in key order.
    pub fn regions(&self) -> impl Iterator<Item = (&AtlasKey, PxRect)> + '_ {
        self.regions.iter().map(|(k, r)| (k, *r))
    }

    /// Registered keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &AtlasKey> + '_ {
        self.regions.keys()
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Return `true` when nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Copy the pixels registered under `key` into a new surface.
    pub fn crop(&self, key: impl Into<AtlasKey>) -> VeneerResult<Surface> {
        let key = key.into();
        let rect = self
            .regions
            .get(&key)
            .ok_or_else(|| VeneerError::validation(format!("atlas has no region for key {key}")))?;
        self.surface.crop(*rect)
    }

    /// Split into the surface and the registry.
    pub fn into_parts(self) -> (Surface, BTreeMap<AtlasKey, PxRect>) {
        (self.surface, self.regions)
    }
}
