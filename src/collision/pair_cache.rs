use std::collections::HashSet;

use crate::core::body_set::BodyHandle;

/// Order-independent key for a body pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(BodyHandle, BodyHandle);

impl PairKey {
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> BodyHandle {
        self.0
    }

    pub fn second(&self) -> BodyHandle {
        self.1
    }
}

/// Pairs already accepted this step, so `(a, b)` and `(b, a)` are only
/// handed to the narrow phase once.
#[derive(Debug, Clone, Default)]
pub struct PairCache {
    seen: HashSet<PairKey>,
    pairs: Vec<(BodyHandle, BodyHandle)>,
}

impl PairCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
        self.pairs.clear();
    }

    /// Records the pair, returning false when it (or its mirror) was
    /// already present or both handles are the same body.
    pub fn insert(&mut self, a: BodyHandle, b: BodyHandle) -> bool {
        if a == b {
            return false;
        }
        if self.seen.insert(PairKey::new(a, b)) {
            self.pairs.push((a, b));
            true
        } else {
            false
        }
    }

    pub fn contains(&self, a: BodyHandle, b: BodyHandle) -> bool {
        self.seen.contains(&PairKey::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Accepted pairs in insertion order, with the orientation they were
    /// first seen in.
    pub fn pairs(&self) -> &[(BodyHandle, BodyHandle)] {
        &self.pairs
    }
}
