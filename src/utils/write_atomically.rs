use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Writes `bytes` to a hidden sibling temp file, syncs it, and renames it over `path`, so
/// readers only ever observe the previous file or the complete new one.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{:?} does not name a file", path),
        )
    })?;

    let mut temp_file_name = OsString::from(".");
    temp_file_name.push(file_name);
    temp_file_name.push(".tmp");
    let temp_path = path.with_file_name(temp_file_name);

    let result = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp_path, path));

    if result.is_err() {
        // Leave no stray temp file behind
        let _ = fs::remove_file(&temp_path);
    }

    result
}
