pub mod args;
pub mod types;

pub use args::{Cli, Commands, DisplayArgs, ModeArgs};
pub use types::{OutputFormat, PreviewArg};
