//! Command-line entry point.
//!
//! `raycast <width> <height> <input.json> <output.ppm>`
//!
//! Argument problems, scene errors and I/O failures all exit with status 1
//! and a message on stderr; the core crates are never invoked with invalid
//! arguments.

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};

use raycast_render::{render, write_ppm, Image};
use raycast_scene::load_scene;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (columns, rows, input, output) = check_arguments(&args)?;

    let scene = load_scene(&input)
        .with_context(|| format!("could not load scene \"{}\"", input.display()))?;

    let start = Instant::now();
    let image = render(&scene, columns, rows)?;
    log::info!("rendered {}x{} in {:?}", columns, rows, start.elapsed());

    save_ppm(&image, &output)
        .with_context(|| format!("could not write image \"{}\"", output.display()))?;

    Ok(())
}

/// Validate the command line before touching the core.
///
/// Exactly four arguments: positive integer width and height, a `.json`
/// input path and a `.ppm` output path.
fn check_arguments(args: &[String]) -> Result<(u32, u32, PathBuf, PathBuf)> {
    if args.len() != 5 {
        bail!("incorrect number of arguments (expected: raycast <width> <height> <input.json> <output.ppm>)");
    }

    let columns = parse_dimension(&args[1], "width")?;
    let rows = parse_dimension(&args[2], "height")?;

    let input = PathBuf::from(&args[3]);
    if !has_extension(&input, "json") {
        bail!("invalid input filename (must have .json extension)");
    }

    let output = PathBuf::from(&args[4]);
    if !has_extension(&output, "ppm") {
        bail!("invalid output filename (must have .ppm extension)");
    }

    Ok((columns, rows, input, output))
}

fn parse_dimension(arg: &str, name: &str) -> Result<u32> {
    let value: u32 = arg
        .parse()
        .with_context(|| format!("invalid {name} argument (must be a number)"))?;
    if value == 0 {
        bail!("invalid {name} value (must be greater than 0)");
    }
    Ok(value)
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension().map_or(false, |extension| extension == wanted)
}

/// Write the image beside its final location, then rename into place, so a
/// failure never leaves a truncated output file behind.
fn save_ppm(image: &Image, path: &Path) -> Result<()> {
    let tmp_path = path.with_extension("ppm.tmp");

    let written = (|| -> Result<()> {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        writer.flush()?;
        Ok(())
    })();

    if let Err(err) = written {
        fs::remove_file(&tmp_path).ok();
        return Err(err);
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
