//! Core types describing bodies, their shapes and shared data.

pub mod body_set;
pub mod filter;
pub mod rigidbody;
pub mod shape;
pub mod types;

pub use body_set::{BodyHandle, BodySet};
pub use filter::{should_collide, CollisionFilter, CollisionFilterFn};
pub use rigidbody::RigidBody;
pub use shape::{Circle, Polygon, Shape, ShapeKind, MAX_POLYGON_VERTICES};
pub use types::{MassProperties, Material, MaterialPairProperties};
