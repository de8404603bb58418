use glam::Vec2;

use crate::{
    collision::contact::ContactManifold,
    config::PhysicsConfig,
    core::body_set::BodySet,
    dynamics::friction::{apply_friction, ContactPoint},
    utils::math::{cross, point_velocity},
};

/// Per-step totals reported by [`ContactSolver::solve`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SolverStepMetrics {
    pub manifolds_solved: usize,
    pub contacts_solved: usize,
    pub resting_contacts: usize,
    pub iterations: u32,
}

/// Sequential-impulse contact solver.
///
/// Manifolds are solved one after another in the order they were found and
/// every sweep sees the velocities left by the previous one. No impulses
/// are cached between steps.
#[derive(Debug, Clone)]
pub struct ContactSolver {
    pub iterations: u32,
    pub correction_percent: f32,
    pub slop: f32,
    pub epsilon: f32,
}

impl Default for ContactSolver {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}

impl ContactSolver {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            iterations: config.scene_iterations,
            correction_percent: config.positional_correction_percent,
            slop: config.slop,
            epsilon: config.epsilon,
        }
    }

    /// Mixes the pair's material coefficients and disables restitution
    /// for contacts moving no faster than gravity alone would make them
    /// over `dt`. Returns true when the manifold was classified as resting.
    pub fn initialize(
        &self,
        manifold: &mut ContactManifold,
        bodies: &BodySet,
        dt: f32,
        gravity: Vec2,
    ) -> bool {
        let (Some(a), Some(b)) = (bodies.get(manifold.body_a), bodies.get(manifold.body_b)) else {
            return false;
        };

        manifold.material = a.material().combine_with(b.material());

        let resting_threshold = (gravity * dt).length_squared() + self.epsilon;
        let mut resting = false;
        for &contact in manifold.contacts() {
            let ra = contact - a.position;
            let rb = contact - b.position;
            let rv = point_velocity(b.linear_velocity, b.angular_velocity, rb)
                - point_velocity(a.linear_velocity, a.angular_velocity, ra);
            if rv.length_squared() < resting_threshold {
                resting = true;
            }
        }
        if resting {
            manifold.material.restitution = 0.0;
        }
        resting
    }

    /// One sweep of normal and friction impulses over the manifold's
    /// contact points.
    pub fn apply_impulse(&self, manifold: &ContactManifold, bodies: &mut BodySet) {
        let Some((a, b)) = bodies.get2_mut(manifold.body_a, manifold.body_b) else {
            return;
        };

        if a.inverse_mass() + b.inverse_mass() == 0.0 {
            a.linear_velocity = Vec2::ZERO;
            b.linear_velocity = Vec2::ZERO;
            return;
        }

        let normal = manifold.normal;
        let count = manifold.contact_count();
        for &contact in manifold.contacts() {
            let ra = contact - a.position;
            let rb = contact - b.position;

            let rv = point_velocity(b.linear_velocity, b.angular_velocity, rb)
                - point_velocity(a.linear_velocity, a.angular_velocity, ra);
            let contact_velocity = rv.dot(normal);

            // Already separating at this point.
            if contact_velocity > 0.0 {
                continue;
            }

            let ra_cross_n = cross(ra, normal);
            let rb_cross_n = cross(rb, normal);
            let inv_mass_sum = a.inverse_mass()
                + b.inverse_mass()
                + ra_cross_n * ra_cross_n * a.inverse_inertia()
                + rb_cross_n * rb_cross_n * b.inverse_inertia();

            let j = -(1.0 + manifold.material.restitution) * contact_velocity
                / inv_mass_sum
                / count as f32;
            let impulse = normal * j;
            a.apply_impulse(-impulse, ra);
            b.apply_impulse(impulse, rb);

            let point = ContactPoint {
                normal,
                ra,
                rb,
                normal_impulse: j,
                contact_count: count,
            };
            apply_friction(a, b, &point, &manifold.material, self.epsilon);
        }
    }

    /// Pushes the bodies apart along the normal by a fraction of the
    /// penetration that exceeds the slop, weighted by inverse mass.
    pub fn positional_correction(&self, manifold: &ContactManifold, bodies: &mut BodySet) {
        let Some((a, b)) = bodies.get2_mut(manifold.body_a, manifold.body_b) else {
            return;
        };
        let inv_mass_sum = a.inverse_mass() + b.inverse_mass();
        if inv_mass_sum == 0.0 {
            return;
        }
        let excess = (manifold.penetration - self.slop).max(0.0);
        let correction = manifold.normal * (excess / inv_mass_sum * self.correction_percent);
        a.position -= correction * a.inverse_mass();
        b.position += correction * b.inverse_mass();
    }

    /// Initializes every manifold and runs the configured impulse sweeps.
    /// Positional correction is left to the caller, after integration.
    pub fn solve(
        &self,
        manifolds: &mut [ContactManifold],
        bodies: &mut BodySet,
        dt: f32,
        gravity: Vec2,
    ) -> SolverStepMetrics {
        let mut metrics = SolverStepMetrics {
            iterations: self.iterations,
            ..SolverStepMetrics::default()
        };

        for manifold in manifolds.iter_mut() {
            if self.initialize(manifold, bodies, dt, gravity) {
                metrics.resting_contacts += 1;
            }
            metrics.manifolds_solved += 1;
            metrics.contacts_solved += manifold.contact_count();
        }

        for _ in 0..self.iterations {
            for manifold in manifolds.iter() {
                self.apply_impulse(manifold, bodies);
            }
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collision::narrowphase::NarrowPhase,
        core::{
            body_set::BodyHandle,
            rigidbody::RigidBody,
            shape::Shape,
            types::{MassProperties, Material},
        },
    };
    use approx::assert_relative_eq;

    fn unit_circle(x: f32, restitution: f32) -> RigidBody {
        let mut body = RigidBody::new(
            Shape::circle(1.0).unwrap(),
            Vec2::new(x, 0.0),
            Material::default().with_restitution(restitution),
        )
        .unwrap();
        body.set_mass_properties(MassProperties { mass: 1.0, inertia: 1.0 });
        body
    }

    fn collide(bodies: &BodySet, a: BodyHandle, b: BodyHandle) -> ContactManifold {
        NarrowPhase::default().collide(bodies.get(a).unwrap(), bodies.get(b).unwrap())
    }

    #[test]
    fn head_on_impulse_flips_and_scales_relative_velocity() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(unit_circle(0.0, 0.5).with_velocity(Vec2::X, 0.0));
        let b = bodies.insert(unit_circle(1.5, 0.5).with_velocity(-Vec2::X, 0.0));

        let mut manifold = collide(&bodies, a, b);
        let solver = ContactSolver::default();
        let resting = solver.initialize(&mut manifold, &bodies, 1.0 / 60.0, Vec2::ZERO);
        assert!(!resting);
        assert_relative_eq!(manifold.material.restitution, 0.5);

        solver.apply_impulse(&manifold, &mut bodies);
        let va = bodies.get(a).unwrap().linear_velocity;
        let vb = bodies.get(b).unwrap().linear_velocity;
        assert_relative_eq!(va.x, -0.5, epsilon = 1e-5);
        assert_relative_eq!(vb.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!((vb - va).dot(manifold.normal), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn separating_contacts_receive_no_impulse() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(unit_circle(0.0, 0.5).with_velocity(-Vec2::X, 0.0));
        let b = bodies.insert(unit_circle(1.5, 0.5).with_velocity(Vec2::X, 0.0));
        let mut manifold = collide(&bodies, a, b);
        let solver = ContactSolver::default();
        solver.initialize(&mut manifold, &bodies, 1.0 / 60.0, Vec2::ZERO);
        solver.apply_impulse(&manifold, &mut bodies);
        assert_eq!(bodies.get(a).unwrap().linear_velocity, -Vec2::X);
        assert_eq!(bodies.get(b).unwrap().linear_velocity, Vec2::X);
    }

    #[test]
    fn slow_contacts_are_treated_as_resting() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(unit_circle(0.0, 1.0).with_velocity(Vec2::new(0.01, 0.0), 0.0));
        let b = bodies.insert(unit_circle(1.5, 1.0));
        let mut manifold = collide(&bodies, a, b);
        let gravity = Vec2::new(0.0, 9.8);
        let resting =
            ContactSolver::default().initialize(&mut manifold, &bodies, 1.0 / 60.0, gravity);
        assert!(resting);
        assert_eq!(manifold.material.restitution, 0.0);
    }

    #[test]
    fn two_static_bodies_are_held_still() {
        let mut bodies = BodySet::new();
        let mut a = unit_circle(0.0, 0.5);
        a.set_static();
        a.linear_velocity = Vec2::X;
        let mut b = unit_circle(1.5, 0.5);
        b.set_static();
        let (a, b) = (bodies.insert(a), bodies.insert(b));
        let manifold = collide(&bodies, a, b);
        ContactSolver::default().apply_impulse(&manifold, &mut bodies);
        assert_eq!(bodies.get(a).unwrap().linear_velocity, Vec2::ZERO);

        let before = bodies.get(a).unwrap().position;
        ContactSolver::default().positional_correction(&manifold, &mut bodies);
        assert_eq!(bodies.get(a).unwrap().position, before);
    }

    #[test]
    fn positional_correction_removes_fraction_beyond_slop() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(unit_circle(0.0, 0.0));
        let b = bodies.insert(unit_circle(1.5, 0.0));
        let manifold = collide(&bodies, a, b);
        let solver = ContactSolver::default();
        solver.positional_correction(&manifold, &mut bodies);
        // (0.5 - 0.05) * 0.4 split evenly between equal masses.
        let shift = (0.5 - 0.05) * 0.4 / 2.0;
        assert_relative_eq!(bodies.get(a).unwrap().position.x, -shift, epsilon = 1e-6);
        assert_relative_eq!(bodies.get(b).unwrap().position.x, 1.5 + shift, epsilon = 1e-6);
    }

    #[test]
    fn solve_reports_metrics() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(unit_circle(0.0, 0.5).with_velocity(Vec2::X, 0.0));
        let b = bodies.insert(unit_circle(1.5, 0.5));
        let mut manifolds = vec![collide(&bodies, a, b)];
        let metrics =
            ContactSolver::new(4).solve(&mut manifolds, &mut bodies, 1.0 / 60.0, Vec2::ZERO);
        assert_eq!(metrics.manifolds_solved, 1);
        assert_eq!(metrics.contacts_solved, 1);
        assert_eq!(metrics.iterations, 4);
    }
}
