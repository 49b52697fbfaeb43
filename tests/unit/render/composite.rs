use super::*;
use crate::foundation::core::{PxSize, Rgba8, Rgba8Premul};

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_dst_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn blit_copies_at_offset_and_clips() {
    let mut dst = Surface::allocate(4, 4).unwrap();
    let src = Surface::solid(PxSize::new(3, 3).unwrap(), Rgba8::rgb(9, 9, 9)).unwrap();

    let written = blit_over(&mut dst, &src, PxRect::new(2, 2, 3, 3));
    assert_eq!(written, 4);
    assert_eq!(dst.pixel(3, 3).unwrap().to_array(), [9, 9, 9, 255]);
    assert_eq!(dst.pixel(1, 1).unwrap(), Rgba8Premul::transparent());
}

#[test]
fn blit_stretches_nearest_neighbour() {
    let mut src = Surface::allocate(2, 1).unwrap();
    src.set_pixel(0, 0, Rgba8Premul::from_array([255, 0, 0, 255]));
    src.set_pixel(1, 0, Rgba8Premul::from_array([0, 0, 255, 255]));

    let mut dst = Surface::allocate(4, 2).unwrap();
    blit_over(&mut dst, &src, PxRect::new(0, 0, 4, 2));
    assert_eq!(dst.pixel(1, 1).unwrap().to_array(), [255, 0, 0, 255]);
    assert_eq!(dst.pixel(2, 0).unwrap().to_array(), [0, 0, 255, 255]);
}

#[test]
fn blit_zero_area_writes_nothing() {
    let mut dst = Surface::allocate(2, 2).unwrap();
    let src = Surface::allocate(1, 1).unwrap();
    assert_eq!(blit_over(&mut dst, &src, PxRect::new(0, 0, 0, 2)), 0);
}
