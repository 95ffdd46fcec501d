//! Load a scene description file and print a summary.
//!
//! Usage: `cargo run --example load_scene -- scene.json`

use raycast_scene::load_scene;

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scene.json".to_string());

    match load_scene(&path) {
        Ok(scene) => {
            println!("loaded {} objects from {}", scene.object_count(), path);
            for object in scene.objects() {
                println!("  - {}", object.type_name());
            }
        }
        Err(err) => {
            eprintln!("failed to load {path}: {err}");
            std::process::exit(1);
        }
    }
}
