use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use std::str::FromStr;
use stripname_core::preview::should_use_color;
use stripname_core::{
    Config, DisplayOptions, OutputFormatter, Preview, TraversalWarning, VersionResult,
};

mod apply;
mod cli;
mod preview;

use cli::{Cli, Commands, DisplayArgs, OutputFormat};

/// Everything a command needs beyond its own flags
struct Settings {
    config: Config,
    use_color: bool,
    yes: bool,
}

impl Settings {
    fn load(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
        let use_color = !cli.no_color && should_use_color(config.defaults.use_color);
        Ok(Self {
            config,
            use_color,
            yes: cli.yes,
        })
    }

    fn preview_format(&self, display: &DisplayArgs) -> Preview {
        display.preview.map(Into::into).unwrap_or_else(|| {
            Preview::from_str(&self.config.defaults.preview_format).unwrap_or(Preview::Tree)
        })
    }

    fn display_options(&self, display: &DisplayArgs) -> DisplayOptions {
        DisplayOptions {
            use_color: self.use_color,
            show_hidden: !display.hide_hidden && self.config.defaults.show_hidden,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => process::exit(0),
        // Finished, but some files could not be renamed
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    }
}

fn run(cli: Cli) -> Result<bool> {
    let settings = Settings::load(&cli)?;

    match cli.command {
        Commands::Preview { dir, mode, display } => {
            let config = mode.configuration(settings.config.smart);
            preview::handle_preview(
                &dir,
                &config,
                settings.preview_format(&display),
                settings.display_options(&display),
                display.output,
            )?;
            Ok(true)
        },

        Commands::Apply {
            dir,
            mode,
            display,
            log_file,
        } => {
            let config = mode.configuration(settings.config.smart);
            let log_file = log_file.or_else(|| settings.config.defaults.log_file.clone());
            apply::handle_apply(
                &dir,
                &config,
                settings.preview_format(&display),
                settings.display_options(&display),
                display.output,
                log_file,
                settings.yes,
            )
        },

        Commands::Version { output } => {
            handle_version(output);
            Ok(true)
        },
    }
}

fn handle_version(output: OutputFormat) {
    let version_result = VersionResult {
        name: "stripname".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
}

/// Walk warnings go to stderr so stdout stays parseable.
fn report_warnings(warnings: &[TraversalWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

