//! Math primitives for the raycast renderer.
//!
//! Re-exports the `glam` double-precision vector type and provides the
//! ray/primitive intersection routines used by the rasterizer.

// Re-export glam for convenience
pub use glam::DVec3;

mod intersect;
mod ray;

pub use intersect::{normalize, plane_intersect, sphere_intersect, GeometryError, PARALLEL_EPSILON};
pub use ray::Ray;
