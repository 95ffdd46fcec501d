//! CPU ray casting renderer.
//!
//! Turns a parsed [`raycast_scene::Scene`] into an RGB image: one camera ray
//! per pixel, nearest-hit selection over the scene objects in declaration
//! order, flat per-object color, black background. The finished image is
//! serialized as binary PPM.

mod image;
mod ppm;
mod raster;

pub use image::Image;
pub use ppm::write_ppm;
pub use raster::{color_to_rgb, render, render_pixel, RenderError};

/// Re-export the math types callers need alongside the renderer
pub use raycast_math::{DVec3, Ray};
