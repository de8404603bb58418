use glam::Vec2;

use crate::core::{body_set::BodySet, rigidbody::RigidBody};

/// Semi-implicit Euler integrator.
///
/// Forces are applied in two half steps around the contact impulses: one
/// before the solver runs and one after the pose update. A full step adds
/// `dt` worth of acceleration while the position only sees the first half.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    pub gravity: Vec2,
}

impl Integrator {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }

    /// Half-step velocity update from accumulated force, torque and gravity.
    pub fn integrate_forces(&self, body: &mut RigidBody, dt: f32) {
        if body.inverse_mass() == 0.0 {
            return;
        }
        let half_dt = dt * 0.5;
        body.linear_velocity += (body.force * body.inverse_mass() + self.gravity) * half_dt;
        body.angular_velocity += body.torque * body.inverse_inertia() * half_dt;
    }

    pub fn integrate_all_forces(&self, bodies: &mut BodySet, dt: f32) {
        for body in bodies.iter_mut() {
            self.integrate_forces(body, dt);
        }
    }

    /// Pose update from the post-impulse velocities, then the second force
    /// half step.
    pub fn integrate_velocity(&self, body: &mut RigidBody, dt: f32) {
        if body.inverse_mass() == 0.0 {
            return;
        }
        body.position += body.linear_velocity * dt;
        let orientation = body.orientation() + body.angular_velocity * dt;
        body.set_orientation(orientation);
        self.integrate_forces(body, dt);
    }

    pub fn integrate_all_velocities(&self, bodies: &mut BodySet, dt: f32) {
        for body in bodies.iter_mut() {
            self.integrate_velocity(body, dt);
        }
    }
}
