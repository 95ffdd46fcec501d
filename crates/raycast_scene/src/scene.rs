//! Scene model types.
//!
//! These are the parsed, immutable objects the rasterizer consumes. Each
//! object kind is a separate payload struct behind the [`SceneObject`] enum,
//! so only the fields legal for a kind can exist on it.

use glam::DVec3;

/// The view rectangle at unit distance along the view axis.
///
/// A valid scene contains exactly one camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Physical width of the view plane, strictly positive
    pub width: f64,

    /// Physical height of the view plane, strictly positive
    pub height: f64,
}

/// A sphere with a flat surface color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Surface color (RGB, each component within 0-1)
    pub color: DVec3,

    /// Center position
    pub position: DVec3,

    /// Radius, strictly positive
    pub radius: f64,
}

/// An infinite plane with a flat surface color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Surface color (RGB, each component within 0-1)
    pub color: DVec3,

    /// A point on the plane
    pub position: DVec3,

    /// Plane normal; not required to be unit length
    pub normal: DVec3,
}

/// One entry parsed from a scene description file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneObject {
    Camera(Camera),
    Sphere(Sphere),
    Plane(Plane),
}

impl SceneObject {
    /// The object's declared type name, as written in scene files.
    pub fn type_name(&self) -> &'static str {
        match self {
            SceneObject::Camera(_) => "camera",
            SceneObject::Sphere(_) => "sphere",
            SceneObject::Plane(_) => "plane",
        }
    }
}

/// An ordered, immutable list of scene objects.
///
/// Declaration order is preserved; it is the intersection scan order, so it
/// decides ties between objects at equal distance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Build a scene from parsed objects.
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    /// All objects in declaration order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// The first camera in the scene, if any.
    pub fn camera(&self) -> Option<&Camera> {
        self.objects.iter().find_map(|object| match object {
            SceneObject::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    /// Number of camera objects.
    pub fn camera_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object, SceneObject::Camera(_)))
            .count()
    }

    /// Total object count, cameras included.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}
