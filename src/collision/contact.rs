use glam::Vec2;

use crate::core::{body_set::BodyHandle, types::MaterialPairProperties};

/// Maximum number of contact points a 2D manifold carries.
pub const MAX_CONTACTS: usize = 2;

/// Contact manifold for one body pair in one step.
///
/// The normal points from body A towards body B and the penetration is
/// non-negative. Manifolds are rebuilt every step; nothing is carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactManifold {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub normal: Vec2,
    pub penetration: f32,
    contacts: [Vec2; MAX_CONTACTS],
    contact_count: usize,
    /// Mixed coefficients filled in by the solver's initialize pass.
    pub material: MaterialPairProperties,
}

impl ContactManifold {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle) -> Self {
        Self {
            body_a,
            body_b,
            normal: Vec2::ZERO,
            penetration: 0.0,
            contacts: [Vec2::ZERO; MAX_CONTACTS],
            contact_count: 0,
            material: MaterialPairProperties::default(),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    /// World-space contact points.
    pub fn contacts(&self) -> &[Vec2] {
        &self.contacts[..self.contact_count]
    }

    pub fn is_colliding(&self) -> bool {
        self.contact_count > 0
    }

    pub fn push_contact(&mut self, point: Vec2) {
        assert!(
            self.contact_count < MAX_CONTACTS,
            "manifold already holds {MAX_CONTACTS} contacts"
        );
        self.contacts[self.contact_count] = point;
        self.contact_count += 1;
    }

    pub fn clear_contacts(&mut self) {
        self.contact_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contacts_slice_tracks_count() {
        let mut manifold = ContactManifold::new(BodyHandle::INVALID, BodyHandle::INVALID);
        assert!(!manifold.is_colliding());
        manifold.push_contact(Vec2::X);
        manifold.push_contact(Vec2::Y);
        assert_eq!(manifold.contacts(), &[Vec2::X, Vec2::Y]);
        manifold.clear_contacts();
        assert!(manifold.contacts().is_empty());
    }

    #[test]
    #[should_panic(expected = "already holds")]
    fn third_contact_is_an_invariant_violation() {
        let mut manifold = ContactManifold::new(BodyHandle::INVALID, BodyHandle::INVALID);
        for _ in 0..3 {
            manifold.push_contact(Vec2::ZERO);
        }
    }
}
