use anyhow::{anyhow, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use stripname_core::operations::{apply_planned_operation, preview_operation};
use stripname_core::{Configuration, DisplayOptions, OutputFormatter, Preview};

use crate::cli::OutputFormat;
use crate::report_warnings;

/// Preview, confirm, apply. Returns false when some files were not renamed.
#[allow(clippy::too_many_arguments)]
pub fn handle_apply(
    dir: &Path,
    config: &Configuration,
    preview: Preview,
    options: DisplayOptions,
    output: OutputFormat,
    log_file: Option<PathBuf>,
    yes: bool,
) -> Result<bool> {
    let preview = if output == OutputFormat::Json {
        Preview::None
    } else {
        preview
    };

    let (result, content) = preview_operation(dir, config, preview, options, None)?;
    let plan = result
        .plan
        .ok_or_else(|| anyhow!("Preview returned no plan for {}", dir.display()))?;

    if let Some(content) = content {
        print!("{}", content);
    }
    report_warnings(&plan.warnings);

    let changes = plan.change_count();
    if changes > 0 && !yes && !confirm(changes)? {
        println!("Operation cancelled.");
        return Ok(true);
    }

    let applied = apply_planned_operation(&plan, log_file)?;

    for failure in &applied.failures {
        eprintln!("Failed: {}", failure);
    }
    print!("{}", applied.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }

    Ok(applied.is_success())
}

fn confirm(changes: usize) -> Result<bool> {
    eprint!("Rename {} files? [y/N]: ", changes);
    io::stderr().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}
