//! # CLI UI Module
//!
//! Styling and formatting layer for `reposcope` terminal output.
//!
//! Output must work without colors (respect `NO_COLOR`) and every command
//! that prints results accepts `--json` for scripting.
//!
//! ## Module Structure
//!
//! - `color`: Color mode detection and terminal capability checks
//! - `style`: Message types, prefixes, and styling functions
//! - `format`: Utility formatters (sizes, truncation, lists)
//! - `table`: Table rendering with comfy-table
//! - `progress`: Spinner for the analysis commands

pub mod color;
pub mod format;
pub mod progress;
pub mod style;
pub mod table;

pub use color::ColorMode;
pub use progress::{Progress, ProgressMode};
pub use style::{MessageType, Style};
