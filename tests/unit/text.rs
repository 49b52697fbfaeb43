use super::*;

#[test]
fn font_validates_size_and_bytes() {
    assert!(Font::new(vec![1, 2, 3], 12.0).is_ok());
    assert!(matches!(
        Font::new(vec![1, 2, 3], 0.0),
        Err(VeneerError::Validation(_))
    ));
    assert!(Font::new(vec![1, 2, 3], f32::NAN).is_err());
    assert!(Font::new(Vec::new(), 12.0).is_err());
}

#[test]
fn font_with_size_shares_bytes() {
    let a = Font::new(vec![7; 8], 12.0).unwrap();
    let b = a.with_size(20.0).unwrap();
    assert_eq!(b.bytes(), a.bytes());
    assert_eq!(b.size_px(), 20.0);
    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn font_from_missing_file_is_wrapped_io_error() {
    let err = Font::from_file("/definitely/not/here.ttf", 12.0).unwrap_err();
    assert!(matches!(err, VeneerError::Other(_)));
    assert!(err.to_string().contains("read font"));
}

#[test]
fn single_line_folds_breaks() {
    assert_eq!(line_folded("a\nb\r\nc", false), "a b c");
    assert_eq!(line_folded("a\nb", true), "a\nb");
    assert!(matches!(line_folded("plain", false), Cow::Borrowed(_)));
}

#[test]
fn fingerprint_follows_bytes_not_size() {
    let a = Font::new(vec![1, 2, 3], 12.0).unwrap();
    let b = Font::new(vec![1, 2, 3], 30.0).unwrap();
    let c = Font::new(vec![1, 2, 4], 12.0).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint(), a.with_size(8.0).unwrap().fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_eq!(fingerprint_bytes(&[]), 0xcbf2_9ce4_8422_2325);
}
