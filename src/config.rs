//! Global configuration defaults and the per-world [`PhysicsConfig`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::aabb::BoundingBox;

/// Default gravity vector (Y-down screen coordinates).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 9.8];

/// Default multiplier applied to [`DEFAULT_GRAVITY`].
pub const DEFAULT_GRAVITY_SCALE: f32 = 1.0;

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Number of sequential-impulse sweeps performed per step.
pub const DEFAULT_SCENE_ITERATIONS: u32 = 10;

/// Fraction of the residual penetration removed by positional correction.
pub const DEFAULT_CORRECTION_PERCENT: f32 = 0.4;

/// Penetration tolerated before positional correction kicks in.
pub const DEFAULT_SLOP: f32 = 0.05;

/// Tolerance used by every sign and equality test in the pipeline.
pub const DEFAULT_EPSILON: f32 = 1e-4;

/// Default world extent used as the quadtree root.
pub const DEFAULT_WORLD_SIZE: f32 = 1000.0;

/// Tunables consumed by [`crate::PhysicsWorld`] and its subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub time_step: f32,
    pub gravity: Vec2,
    pub gravity_scale: f32,
    pub scene_iterations: u32,
    pub positional_correction_percent: f32,
    pub slop: f32,
    pub epsilon: f32,
    /// Region covered by the broad-phase root node.
    pub bounds: BoundingBox,
    /// Drop bodies whose position left `bounds` at the end of a step.
    pub remove_out_of_bounds: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            gravity_scale: DEFAULT_GRAVITY_SCALE,
            scene_iterations: DEFAULT_SCENE_ITERATIONS,
            positional_correction_percent: DEFAULT_CORRECTION_PERCENT,
            slop: DEFAULT_SLOP,
            epsilon: DEFAULT_EPSILON,
            bounds: BoundingBox::new(Vec2::ZERO, Vec2::splat(DEFAULT_WORLD_SIZE)),
            remove_out_of_bounds: false,
        }
    }
}

impl PhysicsConfig {
    /// Gravity actually applied to bodies.
    pub fn effective_gravity(&self) -> Vec2 {
        self.gravity * self.gravity_scale
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = if time_step > 0.0 {
            time_step
        } else {
            DEFAULT_TIME_STEP
        };
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_scene_iterations(mut self, iterations: u32) -> Self {
        self.scene_iterations = iterations;
        self
    }

    pub fn with_positional_correction(mut self, percent: f32, slop: f32) -> Self {
        self.positional_correction_percent = percent;
        self.slop = slop;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_out_of_bounds_removal(mut self, enabled: bool) -> Self {
        self.remove_out_of_bounds = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tunables() {
        let config = PhysicsConfig::default();
        assert_eq!(config.scene_iterations, 10);
        assert!((config.time_step - 1.0 / 60.0).abs() < 1e-9);
        assert!((config.positional_correction_percent - 0.4).abs() < 1e-6);
        assert!((config.slop - 0.05).abs() < 1e-6);
        assert_eq!(config.effective_gravity(), Vec2::new(0.0, 9.8));
    }

    #[test]
    fn gravity_scale_multiplies_gravity() {
        let config = PhysicsConfig::default().with_gravity_scale(5.0);
        assert!((config.effective_gravity().y - 49.0).abs() < 1e-4);
    }

    #[test]
    fn non_positive_time_step_falls_back_to_default() {
        let config = PhysicsConfig::default().with_time_step(0.0);
        assert_eq!(config.time_step, DEFAULT_TIME_STEP);
    }
}
