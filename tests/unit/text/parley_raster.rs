use super::*;

fn junk_font() -> Font {
    Font::new(vec![0u8; 64], 14.0).unwrap()
}

#[test]
fn empty_text_measures_zero_without_touching_font() {
    let mut r = ParleyRasterizer::new();
    assert_eq!(
        r.measure("", &junk_font(), false).unwrap(),
        TextMetrics::default()
    );
}

#[test]
fn empty_text_rasterizes_transparent_surface() {
    let mut r = ParleyRasterizer::new();
    let size = PxSize::new(8, 4).unwrap();
    let s = r
        .rasterize("", &junk_font(), Rgba8::rgb(0, 0, 0), size, true)
        .unwrap();
    assert_eq!(s.size(), size);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn unparseable_font_bytes_are_a_text_error() {
    let mut r = ParleyRasterizer::new();
    let err = r.measure("hello", &junk_font(), false).unwrap_err();
    assert!(matches!(err, VeneerError::Text(_)));
}

#[test]
fn oversized_target_is_rejected() {
    let mut r = ParleyRasterizer::new();
    let size = PxSize::new(70_000, 1).unwrap();
    let err = r
        .rasterize("x", &junk_font(), Rgba8::rgb(0, 0, 0), size, false)
        .unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));
}

fn dejavu(size_px: f32) -> Font {
    let bytes = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    Font::new(bytes, size_px).unwrap()
}

fn ink_bounds(s: &Surface) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..s.height() {
        for x in 0..s.width() {
            if s.pixel(x, y).unwrap().a == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

#[test]
fn real_font_draws_ink_inside_measured_box() {
    let mut r = ParleyRasterizer::new();
    let font = dejavu(14.0);

    let m = r.measure("Hello", &font, false).unwrap();
    assert!(m.width > 0 && m.height > 0, "{m:?}");
    assert!(m.width <= 64 && m.height <= 24, "{m:?}");

    let size = PxSize::new(64, 24).unwrap();
    let s = r
        .rasterize("Hello", &font, Rgba8::rgb(0, 0, 0), size, false)
        .unwrap();
    assert_eq!(s.size(), size);

    let (x0, y0, x1, y1) = ink_bounds(&s).expect("glyphs left no ink");
    // Layout starts at the top-left corner.
    assert!(x0 <= 2, "left ink edge at {x0}");
    assert!(y0 < m.height / 2, "top ink edge at {y0}");
    assert!(x1 <= m.width, "ink column {x1} past measured width {}", m.width);
    assert!(y1 <= m.height, "ink row {y1} past measured height {}", m.height);
}

#[test]
fn real_font_multiline_measures_taller() {
    let mut r = ParleyRasterizer::new();
    let font = dejavu(14.0);

    let one = r.measure("A\nB", &font, false).unwrap();
    let two = r.measure("A\nB", &font, true).unwrap();
    assert!(two.height > one.height, "{one:?} vs {two:?}");
    assert!(two.width < one.width, "{one:?} vs {two:?}");
}

#[test]
fn font_is_registered_once_across_calls() {
    let mut r = ParleyRasterizer::new();
    let font = dejavu(14.0);
    let size = PxSize::new(40, 20).unwrap();

    for _ in 0..8 {
        r.measure("abc", &font, false).unwrap();
        r.rasterize("abc", &font, Rgba8::rgb(0, 0, 0), size, false).unwrap();
    }
    assert_eq!(r.faces.len(), 1);

    // Same bytes at another size, or loaded again, reuse the registration.
    r.measure("abc", &font.with_size(20.0).unwrap(), false).unwrap();
    r.measure("abc", &dejavu(9.0), false).unwrap();
    assert_eq!(r.faces.len(), 1);
}

#[test]
fn failed_registration_is_not_cached() {
    let mut r = ParleyRasterizer::new();
    assert!(r.measure("x", &junk_font(), false).is_err());
    assert!(r.measure("x", &junk_font(), false).is_err());
    assert!(r.faces.is_empty());
}
