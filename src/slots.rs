use serde::{Deserialize, Serialize};

use crate::foundation::error::{VeneerError, VeneerResult};
use crate::surface::Surface;

/// Named surfaces an element can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    /// Idle fill.
    Background,
    /// Rasterized text.
    Foreground,
    /// Pointer-over variant.
    Hover,
    /// Pressed variant.
    Click,
    /// Keyboard-focus variant.
    Focused,
}

impl SlotName {
    /// Every slot, in atlas-id order.
    pub const ALL: [SlotName; 5] = [
        SlotName::Background,
        SlotName::Foreground,
        SlotName::Hover,
        SlotName::Click,
        SlotName::Focused,
    ];

    /// Top-level atlas id the slot is registered under.
    pub fn atlas_id(self) -> u32 {
        self.index() as u32
    }

    fn index(self) -> usize {
        match self {
            SlotName::Background => 0,
            SlotName::Foreground => 1,
            SlotName::Hover => 2,
            SlotName::Click => 3,
            SlotName::Focused => 4,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    surface: Option<Surface>,
    overridden: bool,
}

/// Per-element slot storage with override tracking.
///
/// A slot becomes overridden when the caller assigns it through [`SlotStore::set`]; overridden
/// slots are exempt from default recomputation until [`SlotStore::clear_override`]. Each slot
/// holds at most one live surface: every assignment drops the previous one.
#[derive(Debug, Default)]
pub struct SlotStore {
    slots: [Slot; 5],
}

impl SlotStore {
    /// Empty store: no surfaces, nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current surface in `slot`, if any.
    pub fn get(&self, slot: SlotName) -> Option<&Surface> {
        self.slots[slot.index()].surface.as_ref()
    }

    /// Return the slot's surface, recomputing it first from `default_fn` unless overridden.
    ///
    /// The recomputed surface is stored as a system write, so the override flag is untouched. If
    /// `default_fn` fails, the previous surface stays in place.
    pub fn get_or_compute<F>(&mut self, slot: SlotName, default_fn: F) -> VeneerResult<&Surface>
    where
        F: FnOnce() -> VeneerResult<Surface>,
    {
        let entry = &mut self.slots[slot.index()];
        if !(entry.overridden && entry.surface.is_some()) {
            let fresh = default_fn()?;
            tracing::trace!(?slot, replaced = entry.surface.is_some(), "slot default recomputed");
            entry.surface = Some(fresh);
        }
        entry
            .surface
            .as_ref()
            .ok_or_else(|| VeneerError::validation(format!("slot {slot:?} has no surface")))
    }

    /// Caller assignment: stores `surface` and marks the slot overridden.
    pub fn set(&mut self, slot: SlotName, surface: Surface) {
        let entry = &mut self.slots[slot.index()];
        entry.surface = Some(surface);
        entry.overridden = true;
    }

    /// System assignment: stores `surface` without touching the override flag.
    pub fn set_internal(&mut self, slot: SlotName, surface: Surface) {
        self.slots[slot.index()].surface = Some(surface);
    }

    /// Return `true` when the caller supplied the slot's surface.
    pub fn is_overridden(&self, slot: SlotName) -> bool {
        self.slots[slot.index()].overridden
    }

    /// Revert `slot` to default policy. The overriding surface is returned to the caller and the
    /// slot is recomputed on the next refresh. Non-overridden slots are left untouched.
    pub fn clear_override(&mut self, slot: SlotName) -> Option<Surface> {
        let entry = &mut self.slots[slot.index()];
        if !entry.overridden {
            return None;
        }
        entry.overridden = false;
        entry.surface.take()
    }

    /// Drop the surface of a non-overridden slot (used when a slot leaves the element's layout).
    pub fn release_default(&mut self, slot: SlotName) {
        let entry = &mut self.slots[slot.index()];
        if !entry.overridden {
            entry.surface = None;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/slots.rs"]
mod tests;
