use serde::{Deserialize, Serialize};

use crate::error::MaterialError;

/// Common math types re-exported for convenience.
pub use glam::{Mat2, Vec2};

/// Mass and rotational inertia about the centre of mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassProperties {
    pub mass: f32,
    pub inertia: f32,
}

impl Default for MassProperties {
    fn default() -> Self {
        Self {
            mass: 1.0,
            inertia: 1.0,
        }
    }
}

impl MassProperties {
    /// Reciprocal of `value`, with a zero (or non-finite) value mapping to 0.
    pub(crate) fn inverse_of(value: f32) -> f32 {
        if value.is_finite() && value > f32::EPSILON {
            1.0 / value
        } else {
            0.0
        }
    }

    pub fn inverse_mass(&self) -> f32 {
        Self::inverse_of(self.mass)
    }

    pub fn inverse_inertia(&self) -> f32 {
        Self::inverse_of(self.inertia)
    }
}

/// Material coefficients that affect interactions.
///
/// A density of zero produces a body with infinite mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub density: f32,
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            restitution: 0.2,
            static_friction: 0.5,
            dynamic_friction: 0.3,
        }
    }
}

impl Material {
    pub fn new(
        density: f32,
        restitution: f32,
        static_friction: f32,
        dynamic_friction: f32,
    ) -> Result<Self, MaterialError> {
        let material = Self {
            density,
            restitution,
            static_friction,
            dynamic_friction,
        };
        material.validate()?;
        Ok(material)
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, static_friction: f32, dynamic_friction: f32) -> Self {
        self.static_friction = static_friction;
        self.dynamic_friction = dynamic_friction;
        self
    }

    /// Checks every coefficient against its admissible range.
    pub fn validate(&self) -> Result<(), MaterialError> {
        if !self.density.is_finite() || self.density < 0.0 {
            return Err(MaterialError::InvalidDensity(self.density));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(MaterialError::RestitutionOutOfRange(self.restitution));
        }
        let frictions_ok = self.static_friction.is_finite()
            && self.dynamic_friction.is_finite()
            && self.static_friction >= 0.0
            && self.dynamic_friction >= 0.0;
        if !frictions_ok {
            return Err(MaterialError::NegativeFriction {
                static_friction: self.static_friction,
                dynamic_friction: self.dynamic_friction,
            });
        }
        Ok(())
    }

    /// Coefficients used for a contact between `self` and `other`.
    ///
    /// Restitution takes the minimum; friction takes the geometric mean.
    pub fn combine_with(&self, other: &Self) -> MaterialPairProperties {
        MaterialPairProperties {
            restitution: self.restitution.min(other.restitution),
            static_friction: (self.static_friction * other.static_friction).sqrt(),
            dynamic_friction: (self.dynamic_friction * other.dynamic_friction).sqrt(),
        }
    }
}

/// Mixed coefficients for one contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialPairProperties {
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn combine_uses_min_restitution_and_geometric_mean_friction() {
        let a = Material::new(1.0, 0.8, 0.9, 0.4).unwrap();
        let b = Material::new(1.0, 0.3, 0.1, 0.9).unwrap();
        let pair = a.combine_with(&b);
        assert_relative_eq!(pair.restitution, 0.3);
        assert_relative_eq!(pair.static_friction, 0.3, epsilon = 1e-6);
        assert_relative_eq!(pair.dynamic_friction, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn invalid_coefficients_are_rejected() {
        assert_eq!(
            Material::new(-1.0, 0.5, 0.5, 0.5),
            Err(MaterialError::InvalidDensity(-1.0))
        );
        assert_eq!(
            Material::new(1.0, 1.5, 0.5, 0.5),
            Err(MaterialError::RestitutionOutOfRange(1.5))
        );
        assert!(matches!(
            Material::new(1.0, 0.5, -0.1, 0.5),
            Err(MaterialError::NegativeFriction { .. })
        ));
        assert!(Material::default().validate().is_ok());
    }

    #[test]
    fn zero_mass_inverts_to_zero() {
        let props = MassProperties {
            mass: 0.0,
            inertia: 0.0,
        };
        assert_eq!(props.inverse_mass(), 0.0);
        assert_eq!(props.inverse_inertia(), 0.0);
        let props = MassProperties {
            mass: 4.0,
            inertia: 2.0,
        };
        assert_relative_eq!(props.inverse_mass(), 0.25);
        assert_relative_eq!(props.inverse_inertia(), 0.5);
    }
}
