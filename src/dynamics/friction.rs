use glam::Vec2;

use crate::{
    core::{rigidbody::RigidBody, types::MaterialPairProperties},
    utils::math::{approx_zero, cross, point_velocity},
};

/// Coulomb friction impulse along `tangent`.
///
/// Below the static cone (`|jt| < j·μs`) the raw impulse is used and the
/// contact sticks; otherwise the impulse is clamped to the dynamic
/// coefficient and opposes sliding.
pub fn coulomb_impulse(
    tangent: Vec2,
    tangent_impulse: f32,
    normal_impulse: f32,
    material: &MaterialPairProperties,
) -> Vec2 {
    if tangent_impulse.abs() < normal_impulse * material.static_friction {
        tangent * tangent_impulse
    } else {
        tangent * -normal_impulse * material.dynamic_friction
    }
}

/// One contact point of a manifold as seen by the friction pass.
#[derive(Debug, Clone, Copy)]
pub struct ContactPoint {
    pub normal: Vec2,
    /// Contact arm of body A.
    pub ra: Vec2,
    /// Contact arm of body B.
    pub rb: Vec2,
    /// Normal impulse already applied at this point.
    pub normal_impulse: f32,
    /// Number of points in the manifold; spreads the impulse over them.
    pub contact_count: usize,
}

/// Applies the friction impulse for one contact point after its normal
/// impulse has been applied.
pub fn apply_friction(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    point: &ContactPoint,
    material: &MaterialPairProperties,
    epsilon: f32,
) {
    let ContactPoint {
        normal,
        ra,
        rb,
        normal_impulse,
        contact_count,
    } = *point;

    let rv = point_velocity(body_b.linear_velocity, body_b.angular_velocity, rb)
        - point_velocity(body_a.linear_velocity, body_a.angular_velocity, ra);

    let tangent = (rv - normal * rv.dot(normal)).normalize_or_zero();
    if tangent == Vec2::ZERO {
        return;
    }

    let ra_cross_t = cross(ra, tangent);
    let rb_cross_t = cross(rb, tangent);
    let inv_mass_sum = body_a.inverse_mass()
        + body_b.inverse_mass()
        + ra_cross_t * ra_cross_t * body_a.inverse_inertia()
        + rb_cross_t * rb_cross_t * body_b.inverse_inertia();
    if inv_mass_sum <= 0.0 {
        return;
    }

    let jt = -rv.dot(tangent) / inv_mass_sum / contact_count as f32;
    if approx_zero(jt, epsilon) {
        return;
    }

    let impulse = coulomb_impulse(tangent, jt, normal_impulse, material);
    body_a.apply_impulse(-impulse, ra);
    body_b.apply_impulse(impulse, rb);
}
