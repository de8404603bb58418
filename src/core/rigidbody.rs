use glam::Vec2;

use super::{
    body_set::BodyHandle,
    filter::CollisionFilter,
    shape::Shape,
    types::{MassProperties, Material},
};
use crate::{collision::aabb::BoundingBox, error::PhysicsError, utils::math::cross};

/// Core rigid body description storing kinematic state and properties.
///
/// Mass and inertia are derived from the shape and the material density
/// when the body is created. A body whose inverse mass and inverse inertia
/// are both zero is static: impulses and forces never move it.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub id: BodyHandle,
    pub position: Vec2,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub force: Vec2,
    pub torque: f32,
    pub filter: CollisionFilter,
    shape: Shape,
    orientation: f32,
    material: Material,
    mass_properties: MassProperties,
    inverse_mass: f32,
    inverse_inertia: f32,
}

impl RigidBody {
    pub fn new(shape: Shape, position: Vec2, material: Material) -> Result<Self, PhysicsError> {
        material.validate()?;
        let mass_properties = shape.mass_properties(material.density);
        let mut body = Self {
            id: BodyHandle::INVALID,
            position,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            filter: CollisionFilter::default(),
            shape,
            orientation: 0.0,
            material,
            mass_properties,
            inverse_mass: 0.0,
            inverse_inertia: 0.0,
        };
        // A shape rotated before it was attached starts at the body angle.
        body.shape.set_orientation(body.orientation);
        body.recompute_inverses();
        Ok(body)
    }

    pub fn with_orientation(mut self, angle: f32) -> Self {
        self.set_orientation(angle);
        self
    }

    pub fn with_velocity(mut self, linear: Vec2, angular: f32) -> Self {
        self.set_velocity(linear, angular);
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Sets the angle and keeps the polygon rotation matrix in sync.
    pub fn set_orientation(&mut self, angle: f32) {
        self.orientation = angle;
        self.shape.set_orientation(angle);
    }

    pub fn set_velocity(&mut self, linear: Vec2, angular: f32) {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
    }

    pub fn mass(&self) -> f32 {
        self.mass_properties.mass
    }

    pub fn inertia(&self) -> f32 {
        self.mass_properties.inertia
    }

    pub fn mass_properties(&self) -> MassProperties {
        self.mass_properties
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn inverse_inertia(&self) -> f32 {
        self.inverse_inertia
    }

    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0 && self.inverse_inertia == 0.0
    }

    /// Pins the body in place: infinite mass and inertia, no velocity.
    pub fn set_static(&mut self) {
        self.inverse_mass = 0.0;
        self.inverse_inertia = 0.0;
        self.linear_velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
    }

    pub fn set_mass_properties(&mut self, props: MassProperties) {
        self.mass_properties = props;
        self.recompute_inverses();
    }

    /// Accumulates a force applied at the centre of mass until the next
    /// [`clear_forces`](Self::clear_forces).
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    /// Applies `impulse` at `contact_arm`, the offset from the centre of mass.
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_arm: Vec2) {
        self.linear_velocity += impulse * self.inverse_mass;
        self.angular_velocity += self.inverse_inertia * cross(contact_arm, impulse);
    }

    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.shape.bounding_box(self.position)
    }

    fn recompute_inverses(&mut self) {
        self.inverse_mass = self.mass_properties.inverse_mass();
        self.inverse_inertia = self.mass_properties.inverse_inertia();
    }
}
