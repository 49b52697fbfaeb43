use std::collections::BTreeMap;

use crate::atlas::{Atlas, AtlasKey};
use crate::foundation::core::{PxPoint, PxRect, PxSize};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::render::backend::RenderBackend;
use crate::surface::Surface;

/// An atlas build in progress (the Building state).
///
/// [`AtlasBuilder::start`] opens the backend batch and [`AtlasBuilder::finish`] reads it back. A
/// builder cannot exist in the Idle state, so draws outside a build are unrepresentable. Dropping
/// a builder without finishing aborts the batch.
pub struct AtlasBuilder<'b, B: RenderBackend + ?Sized> {
    backend: &'b mut B,
    size: PxSize,
    regions: BTreeMap<AtlasKey, PxRect>,
    done: bool,
}

impl<'b, B: RenderBackend + ?Sized> AtlasBuilder<'b, B> {
    /// Open a batch on `backend` with a destination surface of `size`.
    ///
    /// Fails with [`VeneerError::AlreadyBuilding`] if the backend already has an open batch.
    pub fn start(backend: &'b mut B, size: PxSize) -> VeneerResult<Self> {
        backend.begin_batch(size)?;
        Ok(Self {
            backend,
            size,
            regions: BTreeMap::new(),
            done: false,
        })
    }

    /// Destination surface size.
    pub fn size(&self) -> PxSize {
        self.size
    }

    /// Draw `surface` into `dest` and register `key -> dest`.
    ///
    /// Re-registering an existing key replaces the previous region (last write wins).
    pub fn draw_at(
        &mut self,
        key: impl Into<AtlasKey>,
        surface: &Surface,
        dest: PxRect,
    ) -> VeneerResult<()> {
        self.check_dest(dest)?;
        self.backend.draw_surface(surface, dest)?;
        self.register(key.into(), dest);
        Ok(())
    }

    /// Draw `surface` at its natural size with its top-left corner at `at`.
    pub fn draw_surface_at(
        &mut self,
        key: impl Into<AtlasKey>,
        surface: &Surface,
        at: PxPoint,
    ) -> VeneerResult<PxRect> {
        let dest = PxRect::at(at, surface.size());
        self.draw_at(key, surface, dest)?;
        Ok(dest)
    }

    /// Copy all of `child` into this atlas at `position` and re-register every child region as
    /// `[base, ..child_key]`, translated by `position`.
    ///
    /// Pixels are copied, so `child` may be dropped afterwards without affecting this atlas.
    pub fn draw_nested(&mut self, base: u32, child: &Atlas, position: PxPoint) -> VeneerResult<()> {
        let dest = PxRect::at(position, child.surface().size());
        self.check_dest(dest)?;
        self.backend.draw_surface(child.surface(), dest)?;
        for (child_key, rect) in child.regions() {
            self.register(AtlasKey::nested(base, child_key), rect.translate(position));
        }
        Ok(())
    }

    /// Close the batch, read back the composited pixels and return the finished atlas.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn finish(mut self) -> VeneerResult<Atlas> {
        self.done = true;
        let surface = self.backend.end_batch()?;
        let regions = std::mem::take(&mut self.regions);
        tracing::debug!(
            width = surface.width(),
            height = surface.height(),
            regions = regions.len(),
            "atlas finished"
        );
        Ok(Atlas::from_parts(surface, regions))
    }

    fn check_dest(&self, dest: PxRect) -> VeneerResult<()> {
        if dest.width == 0 || dest.height == 0 {
            return Err(VeneerError::invalid_dimensions(dest.width, dest.height));
        }
        if !dest.fits_within(self.size) {
            return Err(VeneerError::validation(format!(
                "region {dest:?} exceeds atlas {}x{}",
                self.size.width(),
                self.size.height()
            )));
        }
        Ok(())
    }

    fn register(&mut self, key: AtlasKey, rect: PxRect) {
        if let Some(prev) = self.regions.insert(key.clone(), rect) {
            tracing::warn!(%key, ?prev, ?rect, "atlas key registered twice; last write wins");
        }
    }
}

impl<B: RenderBackend + ?Sized> Drop for AtlasBuilder<'_, B> {
    fn drop(&mut self) {
        if !self.done {
            tracing::debug!("atlas build dropped before finish; aborting batch");
            self.backend.abort_batch();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/builder.rs"]
mod tests;
