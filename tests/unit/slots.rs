use super::*;
use crate::foundation::core::{PxSize, Rgba8};
use crate::foundation::error::VeneerError;

fn solid(c: u8) -> Surface {
    Surface::solid(PxSize::new(2, 2).unwrap(), Rgba8::rgb(c, c, c)).unwrap()
}

#[test]
fn fresh_slots_are_empty_and_not_overridden() {
    let store = SlotStore::new();
    for slot in SlotName::ALL {
        assert!(store.get(slot).is_none());
        assert!(!store.is_overridden(slot));
    }
}

#[test]
fn get_or_compute_fills_default_without_override() {
    let mut store = SlotStore::new();
    let got = store
        .get_or_compute(SlotName::Background, || Ok(solid(10)))
        .unwrap();
    assert_eq!(*got, solid(10));
    assert!(!store.is_overridden(SlotName::Background));

    // Non-overridden slots recompute every time.
    let got = store
        .get_or_compute(SlotName::Background, || Ok(solid(20)))
        .unwrap();
    assert_eq!(*got, solid(20));
}

#[test]
fn overridden_slot_skips_default_fn() {
    let mut store = SlotStore::new();
    store.set(SlotName::Hover, solid(99));
    assert!(store.is_overridden(SlotName::Hover));

    let mut called = false;
    let got = store
        .get_or_compute(SlotName::Hover, || {
            called = true;
            Ok(solid(1))
        })
        .unwrap();
    assert_eq!(*got, solid(99));
    assert!(!called);
}

#[test]
fn set_internal_does_not_mark_override() {
    let mut store = SlotStore::new();
    store.set_internal(SlotName::Click, solid(5));
    assert!(!store.is_overridden(SlotName::Click));
    assert_eq!(store.get(SlotName::Click), Some(&solid(5)));

    store.set(SlotName::Click, solid(6));
    store.set_internal(SlotName::Click, solid(7));
    assert!(store.is_overridden(SlotName::Click));
}

#[test]
fn failed_default_keeps_previous_surface() {
    let mut store = SlotStore::new();
    store.set_internal(SlotName::Foreground, solid(3));
    let err = store
        .get_or_compute(SlotName::Foreground, || {
            Err(VeneerError::text("no font"))
        })
        .unwrap_err();
    assert!(matches!(err, VeneerError::Text(_)));
    assert_eq!(store.get(SlotName::Foreground), Some(&solid(3)));
}

#[test]
fn clear_override_returns_surface_and_reenables_defaults() {
    let mut store = SlotStore::new();
    assert!(store.clear_override(SlotName::Focused).is_none());

    store.set(SlotName::Focused, solid(42));
    assert_eq!(store.clear_override(SlotName::Focused), Some(solid(42)));
    assert!(!store.is_overridden(SlotName::Focused));
    assert!(store.get(SlotName::Focused).is_none());

    let got = store
        .get_or_compute(SlotName::Focused, || Ok(solid(1)))
        .unwrap();
    assert_eq!(*got, solid(1));
}

#[test]
fn release_default_spares_overrides() {
    let mut store = SlotStore::new();
    store.set_internal(SlotName::Foreground, solid(1));
    store.set(SlotName::Background, solid(2));
    store.release_default(SlotName::Foreground);
    store.release_default(SlotName::Background);
    assert!(store.get(SlotName::Foreground).is_none());
    assert_eq!(store.get(SlotName::Background), Some(&solid(2)));
}

#[test]
fn atlas_ids_follow_slot_order() {
    let ids: Vec<u32> = SlotName::ALL.iter().map(|s| s.atlas_id()).collect();
    assert_eq!(ids, [0, 1, 2, 3, 4]);
}

#[test]
fn overridden_surface_is_returned_in_place() {
    let mut store = SlotStore::new();
    store.set(SlotName::Background, solid(8));
    let got: *const Surface = store
        .get_or_compute(SlotName::Background, || Ok(solid(0)))
        .unwrap();
    assert!(std::ptr::eq(got, store.get(SlotName::Background).unwrap()));

    store.set_internal(SlotName::Hover, solid(1));
    let got = store
        .get_or_compute(SlotName::Hover, || Ok(solid(2)))
        .unwrap();
    assert_eq!(*got, solid(2));
}
