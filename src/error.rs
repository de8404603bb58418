//! Error types returned when constructing shapes, materials and bodies.
//!
//! Only construction can fail. Once a body exists the step loop is
//! infallible: numerically degenerate situations are handled by explicit
//! fallback branches inside the pipeline instead of errors.

use thiserror::Error;

/// Rejected shape parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Circle radius must be finite and strictly positive.
    #[error("invalid circle radius {0}")]
    InvalidRadius(f32),
    /// Box dimensions must be finite and strictly positive.
    #[error("invalid box dimensions {width} x {height}")]
    InvalidDimensions {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// A polygon needs at least three points.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of points supplied (or surviving the hull pass).
        count: usize,
    },
    /// A polygon may not exceed the vertex cap.
    #[error("polygon supports at most {max} vertices, got {count}")]
    TooManyVertices {
        /// Number of points supplied.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A vertex coordinate was NaN or infinite.
    #[error("polygon vertex {index} is not finite")]
    NonFiniteVertex {
        /// Offending input index.
        index: usize,
    },
    /// The input points are collinear (or coincident) and enclose no area.
    #[error("polygon points are degenerate and enclose no area")]
    DegenerateHull,
    /// Two consecutive hull vertices coincide.
    #[error("polygon edge {index} has zero length")]
    ZeroLengthEdge {
        /// Index of the edge's first vertex.
        index: usize,
    },
}

/// Rejected material coefficients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    #[error("density must be finite and non-negative, got {0}")]
    InvalidDensity(f32),
    #[error("restitution must lie in [0, 1], got {0}")]
    RestitutionOutOfRange(f32),
    #[error("friction must be non-negative, got {static_friction} / {dynamic_friction}")]
    NegativeFriction {
        static_friction: f32,
        dynamic_friction: f32,
    },
}

/// Top-level error for body construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Material(#[from] MaterialError),
}

/// Convenience alias used by fallible constructors.
pub type Result<T, E = PhysicsError> = std::result::Result<T, E>;
