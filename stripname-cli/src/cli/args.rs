use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stripname_core::config::SmartConfig;
use stripname_core::{Configuration, SmartOptions};

use super::types::{OutputFormat, PreviewArg};

/// Preview and apply bulk filename cleanup across a directory tree
#[derive(Parser, Debug)]
#[command(name = "stripname")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read defaults from this TOML file
    #[arg(long, global = true, value_name = "PATH", env = "STRIPNAME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "STRIPNAME_YES")]
    pub yes: bool,
}

/// How new names are computed
#[derive(Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// Text to remove from every filename (case-insensitive)
    #[arg(long, value_name = "TEXT", conflicts_with = "smart")]
    pub remove: Option<String>,

    /// Put this in place of every removed match
    #[arg(long, value_name = "TEXT", conflicts_with = "smart")]
    pub replace: Option<String>,

    /// Strip the prefix shared by the files of each directory
    #[arg(long)]
    pub smart: bool,

    /// Keep a trailing zero on the inferred prefix
    #[arg(long, requires = "smart")]
    pub keep_trailing_zero: bool,

    /// Write "bpm" as "BPM"
    #[arg(long, requires = "smart")]
    pub bpm: bool,

    /// Title-case words, except short stop words
    #[arg(long, requires = "smart")]
    pub title_case: bool,

    /// Turn underscores into spaces
    #[arg(long, requires = "smart")]
    pub spaces: bool,
}

impl ModeArgs {
    /// Build the engine configuration. Flags only ever switch smart options
    /// away from the config file's values.
    pub fn configuration(&self, defaults: SmartConfig) -> Configuration {
        if !self.smart {
            return Configuration::literal(
                self.remove.clone().unwrap_or_default(),
                self.replace.clone().unwrap_or_default(),
            );
        }

        let mut options = SmartOptions::from(defaults);
        if self.keep_trailing_zero {
            options.strip_leading_zero = false;
        }
        options.cosmetics.capitalize_bpm |= self.bpm;
        options.cosmetics.title_case_words |= self.title_case;
        options.cosmetics.underscores_to_spaces |= self.spaces;
        Configuration::smart(options)
    }
}

/// What gets printed
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Preview format (defaults to the config file's, then tree)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Leave hidden files out of the preview
    #[arg(long)]
    pub hide_hidden: bool,

    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what would be renamed, without touching anything
    Preview {
        /// Directory to clean up
        dir: PathBuf,

        #[command(flatten)]
        mode: ModeArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Rename files after showing the preview
    Apply {
        /// Directory to clean up
        dir: PathBuf,

        #[command(flatten)]
        mode: ModeArgs,

        #[command(flatten)]
        display: DisplayArgs,

        /// Append a timestamped journal of the renames to this file
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
