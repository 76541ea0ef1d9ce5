// Library exports for cursorsmith

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod event;
pub mod model;
pub mod pipeline;
pub mod widgets;

// Re-export the builder entry points
pub use model::cursor::CursorSpec;
pub use pipeline::{BuildError, CursorCompiler, Xcursorgen, build_cursor};
