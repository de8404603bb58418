//! impulse2d – 2D impulse-based rigid-body physics for Rust.
//!
//! The crate is organised around a collision pipeline: a quadtree broad
//! phase prunes body pairs, shape-pair routines build contact manifolds,
//! and a sequential-impulse solver resolves them with Coulomb friction and
//! positional correction before a semi-implicit Euler integrator advances
//! the bodies.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{Mat2, Vec2};

pub use collision::{
    aabb::BoundingBox,
    broadphase::{BroadPhase, QuadTree},
    contact::ContactManifold,
    narrowphase::NarrowPhase,
    pair_cache::PairCache,
};
pub use config::PhysicsConfig;
pub use core::{
    body_set::{BodyHandle, BodySet},
    filter::{should_collide, CollisionFilter},
    rigidbody::RigidBody,
    shape::{Circle, Polygon, Shape, ShapeKind, MAX_POLYGON_VERTICES},
    types::{MassProperties, Material, MaterialPairProperties},
};
pub use dynamics::{
    integrator::Integrator,
    solver::{ContactSolver, SolverStepMetrics},
};
pub use error::{MaterialError, PhysicsError, ShapeError};
pub use utils::profiling::StepProfile;
pub use world::PhysicsWorld;

/// High-level convenience wrapper that owns a [`PhysicsWorld`].
#[derive(Debug, Default)]
pub struct PhysicsEngine {
    world: PhysicsWorld,
}

impl PhysicsEngine {
    /// Creates an engine around an empty world built from `config`.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            world: PhysicsWorld::new(config),
        }
    }

    /// Builds a body from its parts and adds it to the world.
    pub fn spawn(
        &mut self,
        shape: Shape,
        position: Vec2,
        material: Material,
    ) -> error::Result<BodyHandle> {
        let body = RigidBody::new(shape, position, material)?;
        Ok(self.world.add_body(body))
    }

    /// Adds an already built body and returns its handle.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.world.add_body(body)
    }

    /// Advances the simulation by `elapsed` seconds of wall time using
    /// fixed steps; returns the number of steps taken.
    pub fn update(&mut self, elapsed: f32) -> u32 {
        self.world.advance(elapsed)
    }

    /// Returns the body behind `handle`, or `None` once it was removed.
    pub fn get_body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.world.body(handle)
    }

    /// Mutable access to a body, e.g. to apply forces between updates.
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.world.body_mut(handle)
    }

    /// Shared access to the underlying world.
    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Mutable access to the underlying world for configuration and
    /// direct stepping.
    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }
}
