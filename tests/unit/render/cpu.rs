use super::*;
use crate::foundation::core::Rgba8;

fn size(w: i64, h: i64) -> PxSize {
    PxSize::new(w, h).unwrap()
}

#[test]
fn allocate_honors_byte_limit() {
    let mut b = CpuBackend::new(CpuBackendOpts {
        max_surface_bytes: 4 * 4 * 4,
    });
    assert!(b.allocate(size(4, 4)).is_ok());
    assert!(matches!(
        b.allocate(size(5, 4)),
        Err(VeneerError::Allocation(_))
    ));

    let st = b.stats();
    assert_eq!(st.alloc_surfaces, 1);
    assert_eq!(st.alloc_bytes, 64);
}

#[test]
fn second_batch_is_rejected_until_first_ends() {
    let mut b = CpuBackend::default();
    b.begin_batch(size(2, 2)).unwrap();
    assert!(b.is_batching());
    assert!(matches!(
        b.begin_batch(size(2, 2)),
        Err(VeneerError::AlreadyBuilding)
    ));

    let out = b.end_batch().unwrap();
    assert_eq!(out.size(), size(2, 2));
    assert!(!b.is_batching());
    b.begin_batch(size(1, 1)).unwrap();
}

#[test]
fn draw_and_readback_without_batch_fail() {
    let mut b = CpuBackend::default();
    let s = Surface::allocate(1, 1).unwrap();
    assert!(matches!(
        b.draw_surface(&s, PxRect::new(0, 0, 1, 1)),
        Err(VeneerError::NotBuilding)
    ));
    assert!(matches!(b.end_batch(), Err(VeneerError::NotBuilding)));
}

#[test]
fn batch_reads_back_drawn_pixels() {
    let mut b = CpuBackend::default();
    b.begin_batch(size(2, 3)).unwrap();
    let red = Surface::solid(size(2, 1), Rgba8::rgb(255, 0, 0)).unwrap();
    b.draw_surface(&red, PxRect::new(0, 1, 2, 1)).unwrap();
    let out = b.end_batch().unwrap();

    assert_eq!(out.pixel(1, 1).unwrap().to_array(), [255, 0, 0, 255]);
    assert_eq!(out.pixel(1, 0).unwrap().to_array(), [0, 0, 0, 0]);
    assert_eq!(b.stats().draws, 1);
    assert_eq!(b.stats().batches_finished, 1);
}

#[test]
fn abort_discards_target() {
    let mut b = CpuBackend::default();
    b.abort_batch();
    assert_eq!(b.stats().batches_aborted, 0);

    b.begin_batch(size(2, 2)).unwrap();
    b.abort_batch();
    assert!(!b.is_batching());
    assert_eq!(b.stats().batches_aborted, 1);
}

#[test]
fn batch_target_counts_against_allocation_limit() {
    let mut b = CpuBackend::new(CpuBackendOpts {
        max_surface_bytes: 16,
    });
    assert!(matches!(
        b.begin_batch(size(3, 3)),
        Err(VeneerError::Allocation(_))
    ));
    assert!(!b.is_batching());
}
