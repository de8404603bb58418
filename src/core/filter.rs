use serde::{Deserialize, Serialize};

/// Category/mask/group bits deciding which body pairs may collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionFilter {
    /// Bits this body belongs to.
    pub category: u16,
    /// Bits this body accepts contacts from.
    pub mask: u16,
    /// Shared non-zero group overrides the bit test: positive always
    /// collides, negative never does.
    pub group: i16,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            category: 0x0001,
            mask: u16::MAX,
            group: 0,
        }
    }
}

impl CollisionFilter {
    pub fn new(category: u16, mask: u16, group: i16) -> Self {
        Self {
            category,
            mask,
            group,
        }
    }
}

/// Signature of the pair eligibility callback installed on the world.
pub type CollisionFilterFn = dyn Fn(&CollisionFilter, &CollisionFilter) -> bool + Send + Sync;

/// Default eligibility rule.
pub fn should_collide(a: &CollisionFilter, b: &CollisionFilter) -> bool {
    if a.group == b.group && a.group != 0 {
        return a.group > 0;
    }
    (a.mask & b.category) != 0 && (b.mask & a.category) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_collide() {
        let f = CollisionFilter::default();
        assert!(should_collide(&f, &f));
    }

    #[test]
    fn mask_must_accept_both_ways() {
        let a = CollisionFilter::new(0b01, 0b10, 0);
        let b = CollisionFilter::new(0b10, 0b01, 0);
        let c = CollisionFilter::new(0b10, 0b10, 0);
        assert!(should_collide(&a, &b));
        assert!(!should_collide(&a, &c));
        assert!(!should_collide(&c, &a));
    }

    #[test]
    fn shared_group_overrides_masks() {
        let positive = CollisionFilter::new(0b01, 0, 3);
        assert!(should_collide(&positive, &positive));

        let negative = CollisionFilter::new(0b01, u16::MAX, -2);
        assert!(!should_collide(&negative, &negative));

        // Different groups fall back to the bit test.
        let other = CollisionFilter::new(0b01, u16::MAX, -5);
        assert!(should_collide(&negative, &other));
    }
}
