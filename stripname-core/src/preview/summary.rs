use super::{relative_display, sorted_by_directory, DisplayOptions};
use crate::planner::RenamePlan;
use std::fmt::Write;

/// Render plan as a plain, line-oriented summary for scripts and logs
pub fn render_summary(plan: &RenamePlan, options: DisplayOptions) -> String {
    let mut output = String::new();

    writeln!(output, "[PREVIEW]").unwrap();
    writeln!(output, "Root: {}", plan.root.display()).unwrap();
    writeln!(output, "Mode: {}", plan.mode).unwrap();
    writeln!(output, "Directories: {}", plan.directories.len()).unwrap();
    writeln!(output, "Files: {}", plan.len()).unwrap();
    writeln!(output, "Hidden: {}", plan.hidden_count()).unwrap();
    writeln!(output, "Renames: {}", plan.change_count()).unwrap();

    if !plan.patterns.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[PATTERNS]").unwrap();
        for pattern in plan.patterns.iter() {
            writeln!(output, "{}: {:?}", pattern.directory, pattern.prefix).unwrap();
        }
    }

    let grouped = sorted_by_directory(plan, options.show_hidden);

    if plan.change_count() > 0 {
        writeln!(output).unwrap();
        writeln!(output, "[RENAMES]").unwrap();
        for (directory, entries) in &grouped {
            let dir_str = relative_display(&plan.root, directory);
            for entry in entries.iter().filter(|e| e.is_change()) {
                writeln!(
                    output,
                    "{}: {} -> {}",
                    dir_str, entry.original, entry.candidate
                )
                .unwrap();
            }
        }
    }

    if options.show_hidden && plan.hidden_count() > 0 {
        writeln!(output).unwrap();
        writeln!(output, "[HIDDEN]").unwrap();
        for (directory, entries) in &grouped {
            let dir_str = relative_display(&plan.root, directory);
            for entry in entries.iter().filter(|e| e.hidden) {
                writeln!(output, "{}: {}", dir_str, entry.original).unwrap();
            }
        }
    }

    if !plan.warnings.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[WARNINGS]").unwrap();
        for warning in &plan.warnings {
            writeln!(output, "{}", warning).unwrap();
        }
    }

    output
}
