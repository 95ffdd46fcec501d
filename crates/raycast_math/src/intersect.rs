//! Ray/primitive intersection routines.
//!
//! Pure functions with no shared state; safe to call from the parallel
//! pixel loop.

use glam::DVec3;
use thiserror::Error;

/// Rays whose |normal . direction| falls below this are treated as parallel
/// to the plane.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Errors that can occur in the geometry routines.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,
}

/// Normalize a vector to unit length.
///
/// A zero-length input is an explicit error rather than a silent NaN.
pub fn normalize(v: DVec3) -> Result<DVec3, GeometryError> {
    let norm = v.length();
    if norm == 0.0 {
        return Err(GeometryError::DegenerateVector);
    }
    Ok(v / norm)
}

/// Intersect a ray with a sphere.
///
/// Solves the quadratic `a*t^2 + b*t + c = 0` and returns the smaller
/// positive root, falling back to the larger root when the near one lies
/// behind or at the ray origin. `None` means no visible hit.
pub fn sphere_intersect(
    origin: DVec3,
    direction: DVec3,
    center: DVec3,
    radius: f64,
) -> Option<f64> {
    let oc = origin - center;
    let a = direction.length_squared();
    let b = 2.0 * direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    let t0 = (-b - sqrtd) / (2.0 * a);
    if t0 > 0.0 {
        return Some(t0);
    }

    let t1 = (-b + sqrtd) / (2.0 * a);
    if t1 > 0.0 {
        return Some(t1);
    }

    None
}

/// Intersect a ray with an infinite plane through `point` with `normal`.
///
/// Returns `None` when the ray is parallel to the plane (denominator below
/// [`PARALLEL_EPSILON`]) or when the hit lies behind the ray origin.
pub fn plane_intersect(
    origin: DVec3,
    direction: DVec3,
    point: DVec3,
    normal: DVec3,
) -> Option<f64> {
    let denom = normal.dot(direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = normal.dot(point - origin) / denom;
    if t < 0.0 {
        return None;
    }

    Some(t)
}
