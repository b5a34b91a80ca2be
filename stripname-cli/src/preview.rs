use anyhow::Result;
use std::path::Path;
use stripname_core::operations::preview_operation;
use stripname_core::{Configuration, DisplayOptions, OutputFormatter, Preview};

use crate::cli::OutputFormat;
use crate::report_warnings;

pub fn handle_preview(
    dir: &Path,
    config: &Configuration,
    preview: Preview,
    options: DisplayOptions,
    output: OutputFormat,
) -> Result<()> {
    // JSON output carries the plan itself; no rendered preview
    let preview = if output == OutputFormat::Json {
        Preview::None
    } else {
        preview
    };

    let (result, content) = preview_operation(dir, config, preview, options, None)?;

    if let Some(plan) = &result.plan {
        report_warnings(&plan.warnings);
    }

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => match content {
            Some(content) => print!("{}", content),
            None => print!("{}", result.format_summary()),
        },
    }

    Ok(())
}
