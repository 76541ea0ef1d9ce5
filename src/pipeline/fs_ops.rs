use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

use super::BuildError;

pub const DESCRIPTOR_EXT: &str = "cursor";

/// How many `(copia N)` suffixes are tried before giving up.
const MAX_COPIES: usize = 10_000;

/// `base`, then `base (copia 1)`, `base (copia 2)`, ...
pub fn unique_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((1..=MAX_COPIES).map(move |n| format!("{} (copia {})", base, n)))
}

/// Directory that receives the temporary files for `image_path`: the image's
/// own directory, with relative paths resolved against the current directory.
pub fn artifact_dir(image_path: &Path) -> Result<PathBuf, BuildError> {
    let absolute = std::path::absolute(image_path).map_err(BuildError::io(image_path))?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

pub fn descriptor_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, DESCRIPTOR_EXT))
}

pub fn resized_image_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("resized_{}.png", name))
}

/// First candidate name whose temporaries, `<name>.cursor` and
/// `resized_<name>.png`, are both free in `dir`.
pub fn resolve_unique(dir: &Path, base: &str) -> Result<String, BuildError> {
    unique_candidates(base)
        .find(|name| !descriptor_path(dir, name).exists() && !resized_image_path(dir, name).exists())
        .ok_or_else(|| BuildError::NameExhausted(base.to_string()))
}

/// Creates a new file at `path` and returns it with a guard that removes it
/// on drop. Fails if anything is already there, so the guard only ever owns
/// a file this call created.
pub fn create_temp(path: &Path) -> Result<(File, TempPath), BuildError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => BuildError::TempExists(path.to_path_buf()),
            _ => BuildError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
    Ok((file, TempPath::from_path(path)))
}
