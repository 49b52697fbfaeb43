use crate::foundation::core::{PxRect, PxSize};
use crate::foundation::error::{VeneerError, VeneerResult};
use crate::render::backend::{BackendStats, RenderBackend};
use crate::render::composite::blit_over;
use crate::surface::Surface;

/// CPU backend configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuBackendOpts {
    /// Largest single buffer the backend will allocate. Larger requests fail with
    /// [`VeneerError::Allocation`].
    pub max_surface_bytes: usize,
}

impl Default for CpuBackendOpts {
    fn default() -> Self {
        Self {
            max_surface_bytes: 256 * 1024 * 1024,
        }
    }
}

/// Software backend: buffers are plain premultiplied RGBA8 vectors and draws are source-over
/// blits.
#[derive(Debug)]
pub struct CpuBackend {
    opts: CpuBackendOpts,
    target: Option<Surface>,
    stats: BackendStats,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(CpuBackendOpts::default())
    }
}

impl CpuBackend {
    /// Construct a backend with no open batch.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            target: None,
            stats: BackendStats::default(),
        }
    }

    /// Backend configuration.
    pub fn opts(&self) -> CpuBackendOpts {
        self.opts
    }
}

impl RenderBackend for CpuBackend {
    fn allocate(&mut self, size: PxSize) -> VeneerResult<Surface> {
        let bytes = size.byte_len()?;
        if bytes > self.opts.max_surface_bytes {
            return Err(VeneerError::allocation(format!(
                "{}x{} surface needs {bytes} bytes, limit is {}",
                size.width(),
                size.height(),
                self.opts.max_surface_bytes
            )));
        }
        let surface = Surface::with_size(size)?;
        self.stats.alloc_surfaces = self.stats.alloc_surfaces.saturating_add(1);
        self.stats.alloc_bytes = self.stats.alloc_bytes.saturating_add(bytes as u64);
        Ok(surface)
    }

    fn begin_batch(&mut self, size: PxSize) -> VeneerResult<()> {
        if self.target.is_some() {
            return Err(VeneerError::AlreadyBuilding);
        }
        let target = self.allocate(size)?;
        self.target = Some(target);
        self.stats.batches_begun = self.stats.batches_begun.saturating_add(1);
        Ok(())
    }

    fn draw_surface(&mut self, surface: &Surface, dest: PxRect) -> VeneerResult<()> {
        let target = self.target.as_mut().ok_or(VeneerError::NotBuilding)?;
        blit_over(target, surface, dest);
        self.stats.draws = self.stats.draws.saturating_add(1);
        Ok(())
    }

    fn end_batch(&mut self) -> VeneerResult<Surface> {
        let target = self.target.take().ok_or(VeneerError::NotBuilding)?;
        self.stats.batches_finished = self.stats.batches_finished.saturating_add(1);
        Ok(target)
    }

    fn abort_batch(&mut self) {
        if self.target.take().is_some() {
            self.stats.batches_aborted = self.stats.batches_aborted.saturating_add(1);
        }
    }

    fn is_batching(&self) -> bool {
        self.target.is_some()
    }

    fn stats(&self) -> BackendStats {
        self.stats.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
