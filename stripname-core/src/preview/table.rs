use super::{format_size, relative_display, sorted_by_directory, DisplayOptions};
use crate::planner::RenamePlan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render plan as a table, one row per file
pub fn render_table(plan: &RenamePlan, options: DisplayOptions) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if options.use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Directory").fg(Color::Cyan),
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("Proposed").fg(Color::Cyan),
            Cell::new("Size").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Directory", "Original", "Proposed", "Size"]);
    }

    let mut total_bytes = 0u64;
    let mut shown = 0usize;
    for (directory, entries) in sorted_by_directory(plan, options.show_hidden) {
        let dir_str = relative_display(&plan.root, &directory);
        for entry in entries {
            shown += 1;
            total_bytes += entry.size;
            let proposed = if entry.is_change() {
                format!("→ {}", entry.candidate)
            } else {
                String::new()
            };
            let size = format_size(entry.size);

            if !options.use_color {
                table.add_row(vec![&dir_str, &entry.original, &proposed, &size]);
            } else if entry.hidden {
                table.add_row(vec![
                    Cell::new(&dir_str).fg(Color::DarkGrey),
                    Cell::new(&entry.original).fg(Color::DarkGrey),
                    Cell::new("hidden").fg(Color::DarkGrey),
                    Cell::new(&size).fg(Color::DarkGrey),
                ]);
            } else {
                table.add_row(vec![
                    Cell::new(&dir_str).fg(Color::Blue),
                    Cell::new(&entry.original),
                    Cell::new(&proposed).fg(Color::Green),
                    Cell::new(&size),
                ]);
            }
        }
    }

    // Add footer with totals
    let totals = format!("{} of {} files", plan.change_count(), shown);
    let dirs = format!("{} directories", plan.directories.len());
    let size = format_size(total_bytes);
    if options.use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(&dirs).fg(Color::White),
            Cell::new(&totals).fg(Color::Yellow),
            Cell::new(&size).fg(Color::White),
        ]);
    } else {
        table.add_row(vec!["─────────", "─────────", "─────────", "─────────"]);
        table.add_row(vec!["TOTALS", &dirs, &totals, &size]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::test_support::sample_plan;

    #[test]
    fn test_render_table_rows() {
        let output = render_table(&sample_plan(), DisplayOptions::default());
        assert!(output.contains("Directory"));
        assert!(output.contains("Proposed"));
        assert!(output.contains("pack_kick.wav"));
        assert!(output.contains("→ kick.wav"));
        assert!(output.contains("loops"));
        assert!(output.contains(".DS_Store"));
        assert!(output.contains("TOTALS"));
        assert!(output.contains("3 of 5 files"));
        assert!(output.contains("2 directories"));
    }

    #[test]
    fn test_render_table_unchanged_file_has_no_arrow() {
        let output = render_table(&sample_plan(), DisplayOptions::default());
        let readme_line = output.lines().find(|l| l.contains("readme")).unwrap();
        assert!(!readme_line.contains('→'));
    }

    #[test]
    fn test_render_table_hides_hidden_on_request() {
        let options = DisplayOptions {
            use_color: false,
            show_hidden: false,
        };
        let output = render_table(&sample_plan(), options);
        assert!(!output.contains(".DS_Store"));
        assert!(output.contains("3 of 4 files"));
    }

    #[test]
    fn test_render_table_colored() {
        let options = DisplayOptions {
            use_color: true,
            show_hidden: true,
        };
        let output = render_table(&sample_plan(), options);
        assert!(output.contains("\x1b["));
    }
}
