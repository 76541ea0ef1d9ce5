pub mod cursor_io;
pub mod error;
pub mod fs_ops;
pub mod xcursor_gen;

pub use cursor_io::{CursorImageInfo, inspect_cursor};
pub use error::BuildError;
pub use xcursor_gen::{CursorCompiler, Xcursorgen, build_cursor};
