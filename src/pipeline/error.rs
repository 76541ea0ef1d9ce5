use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid cursor size `{0}`: expected a whole number greater than zero")]
    InvalidSize(String),

    #[error("failed to open image {}", .path.display())]
    OpenImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save resized image {}", .path.display())]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch cursor compiler `{program}`")]
    CompilerSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{} already exists and would be overwritten", .0.display())]
    TempExists(PathBuf),

    #[error("cursor compiler `{program}` failed ({status})")]
    CompilerFailed { program: String, status: ExitStatus },

    #[error("no free cursor name left for `{0}`")]
    NameExhausted(String),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| BuildError::Io { path, source }
    }
}
