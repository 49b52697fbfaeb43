use crate::foundation::core::{PxRect, PxSize};
use crate::foundation::error::VeneerResult;
use crate::surface::Surface;

/// Pixel-buffer service the compositing core draws through.
///
/// A backend owns at most one open batch (the offscreen target an atlas is stitched into). The
/// batch is a shared mutable resource: opening a second one while the first is live fails with
/// [`crate::VeneerError::AlreadyBuilding`].
pub trait RenderBackend {
    /// Allocate a transparent pixel buffer. Allocation failures are propagated unchanged.
    fn allocate(&mut self, size: PxSize) -> VeneerResult<Surface>;

    /// Open a batch drawing into a fresh transparent target of `size`.
    fn begin_batch(&mut self, size: PxSize) -> VeneerResult<()>;

    /// Draw `surface` into the open batch target at `dest`.
    ///
    /// The surface is stretched when `dest` differs from its size; pixels outside the target are
    /// clipped.
    fn draw_surface(&mut self, surface: &Surface, dest: PxRect) -> VeneerResult<()>;

    /// Close the batch and read the target back into a persistent surface.
    fn end_batch(&mut self) -> VeneerResult<Surface>;

    /// Discard the open batch, if any.
    fn abort_batch(&mut self);

    /// Return `true` while a batch is open.
    fn is_batching(&self) -> bool;

    /// Counters for allocations and batches, if the backend tracks them.
    fn stats(&self) -> BackendStats {
        BackendStats::default()
    }
}

/// Allocation and batch counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendStats {
    /// Buffers allocated (including batch targets).
    pub alloc_surfaces: u64,
    /// Bytes allocated (including batch targets).
    pub alloc_bytes: u64,
    /// Batches opened.
    pub batches_begun: u64,
    /// Batches read back.
    pub batches_finished: u64,
    /// Batches discarded without read back.
    pub batches_aborted: u64,
    /// Surfaces drawn into batch targets.
    pub draws: u64,
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    /// CPU raster backend.
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    opts: crate::render::cpu::CpuBackendOpts,
) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new(opts)),
    }
}
