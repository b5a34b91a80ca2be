mod json;
mod summary;
mod table;
mod tree;

pub use json::render_json;
pub use summary::render_summary;
pub use table::render_table;
pub use tree::render_tree;

use crate::planner::{RenamePlan, RenamePlanEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preview {
    Tree,
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// How a plan is displayed. The plan itself is never filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub use_color: bool,
    pub show_hidden: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            use_color: false,
            show_hidden: true,
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color, // Honor explicit color request
        None => is_terminal(),                  // Auto-detect only when not specified
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &RenamePlan, format: Preview, options: DisplayOptions) -> String {
    match format {
        Preview::Tree => render_tree(plan, options),
        Preview::Table => render_table(plan, options),
        Preview::Summary => render_summary(plan, options),
        Preview::Json => render_json(plan),
        Preview::None => String::new(),
    }
}

/// `path` relative to the plan root, `.` for the root itself
pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.display().to_string().replace('\\', "/"),
        Err(_) => path.display().to_string(),
    }
}

/// Entries grouped by directory, both sorted by name
pub(crate) fn sorted_by_directory(
    plan: &RenamePlan,
    show_hidden: bool,
) -> BTreeMap<PathBuf, Vec<&RenamePlanEntry>> {
    let mut grouped: BTreeMap<PathBuf, Vec<&RenamePlanEntry>> = BTreeMap::new();
    for entry in &plan.entries {
        if entry.hidden && !show_hidden {
            continue;
        }
        grouped.entry(entry.directory.clone()).or_default().push(entry);
    }
    for entries in grouped.values_mut() {
        entries.sort_by(|a, b| a.original.cmp(&b.original));
    }
    grouped
}

pub(crate) fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
