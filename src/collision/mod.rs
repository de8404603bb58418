//! Collision detection modules: bounding boxes, broad phase, narrow phase,
//! clipping, contact manifolds and pair bookkeeping.

pub mod aabb;
pub mod broadphase;
pub mod clipping;
pub mod contact;
pub mod narrowphase;
pub mod pair_cache;

pub use aabb::BoundingBox;
pub use broadphase::{BroadPhase, QuadTree};
pub use contact::ContactManifold;
pub use narrowphase::NarrowPhase;
pub use pair_cache::{PairCache, PairKey};
