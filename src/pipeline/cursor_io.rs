// Reading back compiled cursor files

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use xcursor::parser::parse_xcursor;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorImageInfo {
    pub size: u32,
    pub width: u32,
    pub height: u32,
    pub hotspot: (u32, u32),
    pub delay: u32,
}

impl fmt::Display for CursorImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size {} ({}x{}), hotspot ({}, {})",
            self.size, self.width, self.height, self.hotspot.0, self.hotspot.1
        )
    }
}

/// Lists the images stored in an X11 cursor file.
pub fn inspect_cursor(path: &Path) -> Result<Vec<CursorImageInfo>> {
    let data = fs::read(path).context("Failed to read cursor file")?;
    let images = parse_xcursor(&data).context("Failed to parse X11 cursor file")?;

    Ok(images
        .into_iter()
        .map(|img| CursorImageInfo {
            size: img.size,
            width: img.width,
            height: img.height,
            hotspot: (img.xhot, img.yhot),
            delay: img.delay,
        })
        .collect())
}
