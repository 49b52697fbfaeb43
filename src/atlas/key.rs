use smallvec::SmallVec;

/// Hierarchical atlas identifier: a short path of `u32` segments.
///
/// Top-level registrations are single-segment keys. Nesting an atlas under base `k` prefixes
/// every child key with `k`, so `[8]` nested child `[7]` becomes `[8, 7]`. Levels never share an
/// encoding, which makes collisions between nesting levels impossible.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtlasKey(SmallVec<[u32; 4]>);

impl AtlasKey {
    /// Single-segment key.
    pub fn id(id: u32) -> Self {
        let mut v = SmallVec::new();
        v.push(id);
        Self(v)
    }

    /// `base` followed by every segment of `child`.
    pub fn nested(base: u32, child: &AtlasKey) -> Self {
        let mut v = SmallVec::with_capacity(child.0.len() + 1);
        v.push(base);
        v.extend_from_slice(&child.0);
        Self(v)
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Nesting depth (1 for top-level keys).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Outermost segment.
    pub fn base(&self) -> Option<u32> {
        self.0.first().copied()
    }

    /// Innermost segment.
    pub fn leaf(&self) -> Option<u32> {
        self.0.last().copied()
    }
}

impl From<u32> for AtlasKey {
    fn from(id: u32) -> Self {
        Self::id(id)
    }
}

impl<const N: usize> From<[u32; N]> for AtlasKey {
    fn from(path: [u32; N]) -> Self {
        Self(SmallVec::from_slice(&path))
    }
}

impl From<&AtlasKey> for AtlasKey {
    fn from(key: &AtlasKey) -> Self {
        key.clone()
    }
}

impl std::fmt::Display for AtlasKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for AtlasKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AtlasKey({self})")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/key.rs"]
mod tests;
