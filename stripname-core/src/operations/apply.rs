use super::preview::resolve_root;
use crate::apply::{apply_plan, ApplyOptions, ApplyResult};
use crate::planner::{preview, Configuration, RenamePlan};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Apply operation - re-plans `root` from disk and renames.
pub fn apply_operation(
    root: &Path,
    config: &Configuration,
    log_file: Option<PathBuf>,
    working_dir: Option<&Path>,
) -> Result<ApplyResult> {
    let root = resolve_root(root, working_dir)?;
    let plan = preview(&root, config)
        .with_context(|| format!("Failed to plan renames under {}", root.display()))?;
    apply_planned_operation(&plan, log_file)
}

/// Apply a plan the caller already showed to the user.
pub fn apply_planned_operation(plan: &RenamePlan, log_file: Option<PathBuf>) -> Result<ApplyResult> {
    let options = ApplyOptions { log_file };
    apply_plan(plan, &options)
        .with_context(|| format!("Failed to apply renames under {}", plan.root.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SmartOptions;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_apply_operation_renames() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("test_cool1.txt"), "").unwrap();
        fs::write(root.join("test-sad2.txt"), "").unwrap();

        let result = apply_operation(
            root,
            &Configuration::smart(SmartOptions::default()),
            None,
            None,
        )
        .unwrap();

        assert_eq!(result.renamed_count(), 2);
        assert!(root.join("cool1.txt").exists());
        assert!(root.join("sad2.txt").exists());
    }

    #[test]
    fn test_apply_operation_bad_log_path() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("files");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("x_a.txt"), "").unwrap();
        // A file where the log's parent directory should be
        fs::write(temp_dir.path().join("blocker"), "").unwrap();

        let err = apply_operation(
            &root,
            &Configuration::literal("x_", ""),
            Some(temp_dir.path().join("blocker").join("apply.log")),
            None,
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("failed to open apply log"));
        assert!(root.join("x_a.txt").exists());
    }
}
