pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Add a signed delta to a channel, clamped to `[0, max]`.
pub(crate) fn offset_channel(c: u8, delta: i16, max: u8) -> u8 {
    (i16::from(c) + delta).clamp(0, i16::from(max)) as u8
}
