use super::*;

#[test]
fn nesting_prefixes_child_path() {
    let child = AtlasKey::id(7);
    let nested = AtlasKey::nested(8, &child);
    assert_eq!(nested.segments(), &[8u32, 7]);
    assert_eq!(nested, AtlasKey::from([8u32, 7]));
    assert_eq!(nested.depth(), 2);
    assert_eq!(nested.base(), Some(8));
    assert_eq!(nested.leaf(), Some(7));

    let deeper = AtlasKey::nested(1, &nested);
    assert_eq!(deeper.segments(), &[1u32, 8, 7]);
}

#[test]
fn levels_never_collide() {
    // With bit-packed ids, 8|7 and 15 would alias; as paths they stay distinct.
    assert_ne!(AtlasKey::nested(8, &AtlasKey::id(7)), AtlasKey::id(15));
    assert_ne!(AtlasKey::nested(0, &AtlasKey::id(0)), AtlasKey::id(0));
}

#[test]
fn display_joins_segments() {
    assert_eq!(AtlasKey::from([2u32, 0, 3]).to_string(), "2/0/3");
    assert_eq!(format!("{:?}", AtlasKey::id(4)), "AtlasKey(4)");
}

#[test]
fn ordering_is_lexicographic() {
    let mut keys = vec![
        AtlasKey::from([1u32, 0]),
        AtlasKey::id(3),
        AtlasKey::id(1),
        AtlasKey::from([0u32, 2]),
    ];
    keys.sort();
    let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["0/2", "1", "1/0", "3"]);
}
