pub mod common;
pub mod pixel_grid;
pub mod theme;
