use std::path::{Path, PathBuf};

use crate::pipeline::BuildError;

/// The optional fourth positional of `build`: a size when it is all digits,
/// an output name otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameOrSize {
    Name(String),
    Size(String),
}

impl NameOrSize {
    pub fn classify(arg: &str) -> Self {
        if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
            NameOrSize::Size(arg.to_string())
        } else {
            NameOrSize::Name(arg.to_string())
        }
    }
}

/// Everything one builder run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorSpec {
    pub image_path: PathBuf,
    pub hotspot: (u32, u32),
    pub output_name: PathBuf,
    pub size: u32,
}

impl CursorSpec {
    pub fn new<P, O>(image_path: P, hotspot: (u32, u32), output_name: O, size: u32) -> Result<Self, BuildError>
    where
        P: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        if size == 0 {
            return Err(BuildError::InvalidSize(size.to_string()));
        }

        Ok(Self {
            image_path: image_path.into(),
            hotspot,
            output_name: output_name.into(),
            size,
        })
    }

    /// Builds a spec from the positional arguments of `build`.
    ///
    /// An empty `extra` counts as absent. A name argument ending in `/`, or
    /// naming an existing directory, keeps `default_name` and places the
    /// output inside that directory.
    pub fn from_args(
        image_path: &Path,
        hotspot: (u32, u32),
        extra: Option<&str>,
        default_name: &str,
        default_size: u32,
    ) -> Result<Self, BuildError> {
        let mut output_name = PathBuf::from(default_name);
        let mut size = default_size;

        match extra.filter(|s| !s.is_empty()).map(NameOrSize::classify) {
            Some(NameOrSize::Size(digits)) => {
                size = digits
                    .parse()
                    .map_err(|_| BuildError::InvalidSize(digits.clone()))?;
            }
            Some(NameOrSize::Name(name)) => {
                let candidate = PathBuf::from(&name);
                output_name = if name.ends_with('/') || candidate.is_dir() {
                    candidate.join(default_name)
                } else {
                    candidate
                };
            }
            None => {}
        }

        Self::new(image_path, hotspot, output_name, size)
    }

    /// File name part of the output name, used to name the temporary files.
    pub fn stem(&self) -> String {
        self.output_name
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_name.to_string_lossy().into_owned())
    }

    /// Replaces the file name part of the output name, keeping its directory.
    pub fn with_stem(mut self, stem: &str) -> Self {
        self.output_name = match self.output_name.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(stem),
            _ => PathBuf::from(stem),
        };
        self
    }

    pub fn hotspot_in_bounds(&self) -> bool {
        self.hotspot.0 < self.size && self.hotspot.1 < self.size
    }
}
