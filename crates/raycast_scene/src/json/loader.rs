//! Scene file loading.
//!
//! Thin layer over the parser: reads the file, parses it, and applies the
//! whole-scene validation that individual objects cannot see.

use std::path::Path;

use thiserror::Error;

use super::parser::{parse, ParseError};
use crate::scene::Scene;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("scene declares more than one camera")]
    MultipleCameras,
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description file.
///
/// # Example
///
/// ```ignore
/// use raycast_scene::load_scene;
///
/// let scene = load_scene("scene.json")?;
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let content = std::fs::read_to_string(path)?;
    load_scene_from_str(&content)
}

/// Load a scene from text (useful for testing).
///
/// A scene with no camera is accepted here; the renderer rejects it when
/// asked to produce an image. More than one camera is never valid.
pub fn load_scene_from_str(content: &str) -> LoadResult<Scene> {
    let scene = parse(content)?;

    if scene.camera_count() > 1 {
        return Err(LoadError::MultipleCameras);
    }

    log::info!(
        "loaded scene: {} objects ({} camera)",
        scene.object_count(),
        scene.camera_count()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_str() {
        let scene = load_scene_from_str(
            r#"[
                { "type": "camera", "width": 1.0, "height": 1.0 },
                { "type": "sphere", "color": [0, 0, 1], "position": [0, 0, 4], "radius": 2 }
            ]"#,
        )
        .unwrap();

        assert_eq!(scene.object_count(), 2);
        assert!(scene.camera().is_some());
    }

    #[test]
    fn test_second_camera_is_rejected() {
        let err = load_scene_from_str(
            r#"[
                { "type": "camera", "width": 1.0, "height": 1.0 },
                { "type": "camera", "width": 2.0, "height": 2.0 }
            ]"#,
        )
        .unwrap_err();

        assert!(matches!(err, LoadError::MultipleCameras));
    }

    #[test]
    fn test_parse_errors_pass_through() {
        let err = load_scene_from_str("[").unwrap_err();
        assert!(matches!(err, LoadError::Parse(ParseError::UnexpectedEof(1))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_scene("does-not-exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
