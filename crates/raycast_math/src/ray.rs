use glam::DVec3;

/// A ray in 3D space with an origin and a direction.
///
/// The rasterizer constructs one ray per pixel; `direction` is unit length
/// by construction there, but nothing in this type requires it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
