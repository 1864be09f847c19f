#[path = "shared/constants.rs"]
mod constants;
use constants::COMPRESSED_RESOURCES;

use flate2::write::GzEncoder;
use flate2::Compression;
use std::env;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compressed resources are written next to the other generated artifacts
    let output_dir = PathBuf::from(env::var("OUT_DIR")?);

    for (source_path, compressed_file_name, env_var) in COMPRESSED_RESOURCES.iter() {
        // Ensure that Cargo re-runs the build script if the resource file changes
        println!("cargo:rerun-if-changed={}", source_path.display());

        let compressed_path = output_dir.join(compressed_file_name);
        compress_resource(source_path, &compressed_path)?;

        println!("cargo:rustc-env={}={}", env_var, compressed_path.display());
    }

    Ok(())
}

fn compress_resource(input_path: &Path, output_path: &Path) -> io::Result<()> {
    let mut input_file = File::open(input_path)?;
    let output_file = File::create(output_path)?;

    let mut encoder = GzEncoder::new(output_file, Compression::default());
    io::copy(&mut input_file, &mut encoder)?;
    encoder.finish()?;

    Ok(())
}
