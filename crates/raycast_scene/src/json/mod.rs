//! Scene-description reader.
//!
//! The scene format is a constrained JSON-like grammar: a top-level array of
//! flat objects, each declaring its `"type"` first and then per-type fields.
//!
//! # Supported syntax
//!
//! - `[ { ... }, { ... } ]`
//! - `{ "type": "camera", "width": 2.0, "height": 2.0 }`
//! - `{ "type": "sphere", "color": [1, 0, 0], "position": [0, 0, 5], "radius": 1 }`
//! - `{ "type": "plane", "color": [0, 1, 0], "position": [0, -1, 0], "normal": [0, 1, 0] }`
//!
//! # Not supported (by design)
//!
//! - Nested objects or arrays beyond the fixed schema
//! - String escape sequences or non-ASCII strings
//! - Strings longer than 128 characters

mod loader;
mod parser;

pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use parser::{parse, ParseError};
