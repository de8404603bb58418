//! Additional 2D math helpers layered on top of `glam`.

use glam::{Mat2, Vec2};

/// Scalar cross product `a × b` of two planar vectors.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Cross product of an angular velocity (scalar) with an arm: `ω × r`.
#[inline]
pub fn cross_scalar(w: f32, r: Vec2) -> Vec2 {
    Vec2::new(-w * r.y, w * r.x)
}

/// Rotation matrix for an orientation in radians.
#[inline]
pub fn rotation(angle: f32) -> Mat2 {
    Mat2::from_angle(angle)
}

/// `x ≤ ε`: non-positive within tolerance.
#[inline]
pub fn non_positive(x: f32, epsilon: f32) -> bool {
    x <= epsilon
}

/// `|x| ≤ ε`.
#[inline]
pub fn approx_zero(x: f32, epsilon: f32) -> bool {
    x.abs() <= epsilon
}

/// Velocity of a point rigidly attached to a body at arm `r`.
#[inline]
pub fn point_velocity(linear: Vec2, angular: f32, r: Vec2) -> Vec2 {
    linear + cross_scalar(angular, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cross_scalar_is_perpendicular_to_arm() {
        let r = Vec2::new(2.0, 0.0);
        let v = cross_scalar(3.0, r);
        assert_abs_diff_eq!(v.dot(r), 0.0);
        assert_abs_diff_eq!(v.y, 6.0);
    }

    #[test]
    fn rotation_quarter_turn_maps_x_to_y() {
        let rotated = rotation(std::f32::consts::FRAC_PI_2) * Vec2::X;
        assert_abs_diff_eq!(rotated.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rotated.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn tolerance_tests_use_the_intended_inequality() {
        assert!(non_positive(-1.0, 1e-4));
        assert!(non_positive(5e-5, 1e-4));
        assert!(!non_positive(2e-4, 1e-4));
        assert!(approx_zero(-5e-5, 1e-4));
    }
}
