// XCursor builder - resizes a PNG, writes an xcursorgen descriptor next to it
// and hands both to the external cursor compiler

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::BuildError;
use super::fs_ops::{artifact_dir, create_temp, descriptor_path, resized_image_path};
use crate::model::cursor::CursorSpec;

pub const DEFAULT_COMPILER: &str = "xcursorgen";

/// Turns a descriptor file into a cursor artifact.
pub trait CursorCompiler {
    fn compile(&self, descriptor: &Path, output: &Path) -> Result<(), BuildError>;
}

/// Runs `<program> <descriptor> <output>` and waits for it to exit.
#[derive(Clone, Debug)]
pub struct Xcursorgen {
    program: String,
}

impl Xcursorgen {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Xcursorgen {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

impl CursorCompiler for Xcursorgen {
    fn compile(&self, descriptor: &Path, output: &Path) -> Result<(), BuildError> {
        log::info!(
            "Launching {} {} {}",
            self.program,
            descriptor.display(),
            output.display()
        );

        let status = Command::new(&self.program)
            .arg(descriptor)
            .arg(output)
            .status()
            .map_err(|source| BuildError::CompilerSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::CompilerFailed {
                program: self.program.clone(),
                status,
            });
        }

        Ok(())
    }
}

pub fn format_descriptor_line(size: u32, hotspot: (u32, u32), image_path: &Path) -> String {
    format!(
        "{} {} {} {}\n",
        size,
        hotspot.0,
        hotspot.1,
        image_path.display()
    )
}

pub fn resize_square(image: &DynamicImage, size: u32) -> RgbaImage {
    imageops::resize(&image.to_rgba8(), size, size, FilterType::Lanczos3)
}

/// Build one cursor from `spec`.
///
/// The resized PNG and the descriptor live next to the source image and are
/// removed before this returns, whether the compiler succeeded or not. If
/// either path is already taken the build fails with
/// [`BuildError::TempExists`] and the existing file is left alone.
pub fn build_cursor<C, F>(spec: &CursorSpec, compiler: &C, mut log_fn: F) -> Result<PathBuf, BuildError>
where
    C: CursorCompiler + ?Sized,
    F: FnMut(String),
{
    if spec.size == 0 {
        return Err(BuildError::InvalidSize(spec.size.to_string()));
    }

    let image_path = std::path::absolute(&spec.image_path).map_err(BuildError::io(&spec.image_path))?;
    let work_dir = artifact_dir(&image_path)?;
    let stem = spec.stem();

    if !spec.hotspot_in_bounds() {
        log::warn!(
            "hotspot ({}, {}) lies outside the {}x{} cursor",
            spec.hotspot.0,
            spec.hotspot.1,
            spec.size,
            spec.size
        );
    }

    let source = image::open(&image_path).map_err(|source| BuildError::OpenImage {
        path: image_path.clone(),
        source,
    })?;
    log_fn(format!(
        "Loaded {} ({}x{})",
        image_path.display(),
        source.width(),
        source.height()
    ));

    let resized = resize_square(&source, spec.size);

    let resized_path = resized_image_path(&work_dir, &stem);
    let (resized_file, resized_guard) = create_temp(&resized_path)?;
    let mut writer = BufWriter::new(resized_file);
    resized
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|source| BuildError::SaveImage {
            path: resized_path.clone(),
            source,
        })?;
    writer.flush().map_err(BuildError::io(&resized_path))?;
    log_fn(format!("Resized to {}x{}: {}", spec.size, spec.size, resized_path.display()));

    let descriptor = descriptor_path(&work_dir, &stem);
    let (mut descriptor_file, descriptor_guard) = create_temp(&descriptor)?;
    descriptor_file
        .write_all(format_descriptor_line(spec.size, spec.hotspot, &resized_path).as_bytes())
        .map_err(BuildError::io(&descriptor))?;
    drop(descriptor_file);
    log_fn(format!("Wrote descriptor {}", descriptor.display()));

    compiler.compile(&descriptor, &spec.output_name)?;

    descriptor_guard.close().map_err(BuildError::io(&descriptor))?;
    resized_guard.close().map_err(BuildError::io(&resized_path))?;
    log_fn("Removed temporary files".to_string());

    Ok(spec.output_name.clone())
}
