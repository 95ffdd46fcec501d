//! Scene model and scene-description reader for the raycast renderer.
//!
//! This crate provides:
//!
//! - **Scene types**: [`Scene`], [`SceneObject`] and its per-kind payloads
//! - **Reader**: a hand-written recursive-descent parser for the JSON-like
//!   scene description format, plus file loading
//!
//! # Example
//!
//! ```ignore
//! use raycast_scene::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("loaded {} objects", scene.object_count());
//! ```

pub mod json;
pub mod scene;

// Re-export commonly used items
pub use json::{load_scene, load_scene_from_str, parse, LoadError, ParseError};
pub use scene::{Camera, Plane, Scene, SceneObject, Sphere};
