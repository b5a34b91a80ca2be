//! High-level operations that correspond to CLI commands
//!
//! These modules hold the logic each stripname command runs, kept apart
//! from argument parsing and output formatting.

pub mod apply;
pub mod preview;

// Re-export the main operation functions for easy access
pub use apply::{apply_operation, apply_planned_operation};
pub use preview::{preview_operation, resolve_root};
