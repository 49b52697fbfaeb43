use crate::foundation::core::PxRect;
use crate::foundation::math::mul_div255_u8;
use crate::surface::Surface;

pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` into `dst` at `dest`, nearest-neighbour stretched when sizes differ and
/// clipped to `dst`. Returns the number of destination pixels written.
pub(crate) fn blit_over(dst: &mut Surface, src: &Surface, dest: PxRect) -> usize {
    if dest.width == 0 || dest.height == 0 {
        return 0;
    }
    let (dw, dh) = (dst.width(), dst.height());
    let (sw, sh) = (u64::from(src.width()), u64::from(src.height()));
    let src_bytes = src.data();
    let dst_stride = dw as usize * 4;
    let dst_bytes = dst.data_mut();

    let mut written = 0usize;
    for dy in 0..dest.height {
        let ty = u64::from(dest.y) + u64::from(dy);
        if ty >= u64::from(dh) {
            break;
        }
        let sy = u64::from(dy) * sh / u64::from(dest.height);
        for dx in 0..dest.width {
            let tx = u64::from(dest.x) + u64::from(dx);
            if tx >= u64::from(dw) {
                break;
            }
            let sx = u64::from(dx) * sw / u64::from(dest.width);

            let si = ((sy * sw + sx) * 4) as usize;
            let di = ty as usize * dst_stride + tx as usize * 4;
            let s = [
                src_bytes[si],
                src_bytes[si + 1],
                src_bytes[si + 2],
                src_bytes[si + 3],
            ];
            let d = [
                dst_bytes[di],
                dst_bytes[di + 1],
                dst_bytes[di + 2],
                dst_bytes[di + 3],
            ];
            dst_bytes[di..di + 4].copy_from_slice(&over(d, s));
            written += 1;
        }
    }
    written
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
