use crate::apply::ApplyResult;
use crate::planner::{ModeKind, RenamePlan};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a preview operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewResult {
    pub root: PathBuf,
    pub mode: ModeKind,
    pub directories: usize,
    pub files: usize,
    pub hidden_files: usize,
    pub changes: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

impl PreviewResult {
    /// Counts for `plan`, without embedding the plan itself
    pub fn from_plan(plan: &RenamePlan) -> Self {
        Self {
            root: plan.root.clone(),
            mode: plan.mode,
            directories: plan.directories.len(),
            files: plan.len(),
            hidden_files: plan.hidden_count(),
            changes: plan.change_count(),
            warnings: plan.warnings.len(),
            plan: None,
        }
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PreviewResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "preview",
            "root": self.root,
            "mode": self.mode,
            "summary": {
                "directories": self.directories,
                "files": self.files,
                "hidden_files": self.hidden_files,
                "changes": self.changes,
                "warnings": self.warnings,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Stripname preview ({}): {}",
            self.mode,
            self.root.display()
        )
        .unwrap();
        writeln!(
            output,
            "Renames: {} of {} files in {} directories",
            self.changes,
            self.files - self.hidden_files,
            self.directories
        )
        .unwrap();

        if self.hidden_files > 0 {
            writeln!(output, "Hidden files left as-is: {}", self.hidden_files).unwrap();
        }
        if self.warnings > 0 {
            writeln!(output, "Warnings: {}", self.warnings).unwrap();
        }

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_success(),
            "operation": "apply",
            "root": self.root,
            "summary": {
                "renamed": self.renamed.len(),
                "failed": self.failures.len(),
                "warnings": self.warnings.len(),
            },
            "renamed": self.renamed,
            "failures": self.failures,
            "warnings": self.warnings,
        }))
        .unwrap_or_default()
    }

    /// Counts only. Per-file failures and walk warnings are listed by the
    /// caller, on stderr.
    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.renamed.is_empty() && self.failures.is_empty() {
            output.push_str("Nothing to rename\n");
        } else {
            writeln!(output, "✓ Renamed {} files", self.renamed.len()).unwrap();
        }

        if !self.failures.is_empty() {
            writeln!(output, "✗ {} files could not be renamed", self.failures.len()).unwrap();
        }

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
