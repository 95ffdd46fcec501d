//! Per-pixel ray casting over a parsed scene.

use glam::DVec3;
use rayon::prelude::*;
use thiserror::Error;

use raycast_math::{normalize, plane_intersect, sphere_intersect, GeometryError, Ray};
use raycast_scene::{Camera, Scene, SceneObject};

use crate::image::Image;

/// Errors that can occur during rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("scene contains no camera")]
    MissingCamera,

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Render the scene at the given pixel resolution.
///
/// Rows are rendered in parallel: each worker writes a disjoint row slice
/// of the pixel buffer and only reads the scene, so no locking is needed.
pub fn render(scene: &Scene, columns: u32, rows: u32) -> Result<Image, RenderError> {
    let camera = scene.camera().ok_or(RenderError::MissingCamera)?;

    let mut image = Image::new(columns, rows);
    if columns == 0 || rows == 0 {
        return Ok(image);
    }

    log::debug!(
        "rendering {}x{} over {} objects",
        columns,
        rows,
        scene.object_count()
    );

    let row_stride = columns as usize * 3;
    image
        .bytes_mut()
        .par_chunks_mut(row_stride)
        .enumerate()
        .try_for_each(|(y, row)| -> Result<(), RenderError> {
            for x in 0..columns {
                let rgb = render_pixel(scene, camera, columns, rows, x, y as u32)?;
                let offset = x as usize * 3;
                row[offset..offset + 3].copy_from_slice(&rgb);
            }
            Ok(())
        })?;

    Ok(image)
}

/// Render a single pixel.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    columns: u32,
    rows: u32,
    x: u32,
    y: u32,
) -> Result<[u8; 3], RenderError> {
    let ray = primary_ray(camera, columns, rows, x, y)?;

    Ok(match nearest_hit(scene, &ray) {
        Some(color) => color_to_rgb(color),
        // background stays black
        None => [0, 0, 0],
    })
}

/// Construct the camera ray through the center of pixel (x, y).
///
/// The view plane sits at unit distance along +Z and is sampled row by row
/// with `y = 0` producing the top row of the image.
fn primary_ray(
    camera: &Camera,
    columns: u32,
    rows: u32,
    x: u32,
    y: u32,
) -> Result<Ray, RenderError> {
    let pixel_width = camera.width / f64::from(columns);
    let pixel_height = camera.height / f64::from(rows);

    let target = DVec3::new(
        -camera.width / 2.0 + pixel_width * (f64::from(x) + 0.5),
        -camera.height / 2.0 + pixel_height * (f64::from(y) + 0.5),
        1.0,
    );

    let direction = normalize(target)?;
    Ok(Ray::new(DVec3::ZERO, direction))
}

/// Scan every shape in declaration order and keep the smallest positive t.
///
/// The strict `t < best` comparison makes the first declared object win
/// ties at equal distance.
fn nearest_hit(scene: &Scene, ray: &Ray) -> Option<DVec3> {
    let mut nearest: Option<(f64, DVec3)> = None;

    for object in scene.objects() {
        let hit = match object {
            SceneObject::Camera(_) => None,
            SceneObject::Sphere(sphere) => {
                sphere_intersect(ray.origin, ray.direction, sphere.position, sphere.radius)
                    .map(|t| (t, sphere.color))
            }
            SceneObject::Plane(plane) => {
                plane_intersect(ray.origin, ray.direction, plane.position, plane.normal)
                    .map(|t| (t, plane.color))
            }
        };

        if let Some((t, color)) = hit {
            if t > 0.0 && nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, color));
            }
        }
    }

    nearest.map(|(_, color)| color)
}

/// Scale a 0-1 color into 8-bit RGB, truncating.
pub fn color_to_rgb(color: DVec3) -> [u8; 3] {
    let r = (255.0 * color.x.clamp(0.0, 1.0)) as u8;
    let g = (255.0 * color.y.clamp(0.0, 1.0)) as u8;
    let b = (255.0 * color.z.clamp(0.0, 1.0)) as u8;
    [r, g, b]
}
