//! Utility helpers: 2D math extensions, logging and per-step profiling.

pub mod logging;
pub mod math;
pub mod profiling;

pub use math::*;
