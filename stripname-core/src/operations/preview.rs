use crate::output::PreviewResult;
use crate::planner::{preview, Configuration};
use crate::preview::{render_plan, DisplayOptions, Preview};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Make `root` absolute against `working_dir` (or the process cwd).
pub fn resolve_root(root: &Path, working_dir: Option<&Path>) -> Result<PathBuf> {
    if root.is_absolute() {
        return Ok(root.canonicalize().unwrap_or_else(|_| root.to_path_buf()));
    }
    let current_dir = match working_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let absolute = current_dir.join(root);
    Ok(absolute.canonicalize().unwrap_or(absolute))
}

/// Preview operation - returns structured data plus the rendered preview.
///
/// The returned result carries the full plan so a caller can go on to
/// apply exactly what was shown.
pub fn preview_operation(
    root: &Path,
    config: &Configuration,
    preview_format: Preview,
    options: DisplayOptions,
    working_dir: Option<&Path>,
) -> Result<(PreviewResult, Option<String>)> {
    let root = resolve_root(root, working_dir)?;

    let plan = preview(&root, config)
        .with_context(|| format!("Failed to plan renames under {}", root.display()))?;

    let preview_content = match preview_format {
        Preview::None => None,
        Preview::Json => Some(render_plan(
            &plan,
            preview_format,
            DisplayOptions {
                use_color: false,
                ..options
            },
        )),
        _ => Some(render_plan(&plan, preview_format, options)),
    };

    let mut result = PreviewResult::from_plan(&plan);
    result.plan = Some(plan);

    Ok((result, preview_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SmartOptions;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preview_operation_relative_root() {
        let temp_dir = TempDir::new().unwrap();
        let pack = temp_dir.path().join("pack");
        fs::create_dir(&pack).unwrap();
        fs::write(pack.join("pack_kick.wav"), "").unwrap();
        fs::write(pack.join("pack_snare.wav"), "").unwrap();

        let (result, content) = preview_operation(
            Path::new("pack"),
            &Configuration::smart(SmartOptions::default()),
            Preview::Summary,
            DisplayOptions::default(),
            Some(temp_dir.path()),
        )
        .unwrap();

        assert_eq!(result.changes, 2);
        assert_eq!(result.files, 2);
        assert!(result.root.is_absolute());
        let content = content.unwrap();
        assert!(content.contains(".: pack_kick.wav -> kick.wav"));
        assert!(result.plan.is_some());
    }

    #[test]
    fn test_preview_operation_none_format() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a_b.txt"), "").unwrap();

        let (result, content) = preview_operation(
            temp_dir.path(),
            &Configuration::literal("a_", ""),
            Preview::None,
            DisplayOptions::default(),
            None,
        )
        .unwrap();

        assert!(content.is_none());
        assert_eq!(result.changes, 1);
    }

    #[test]
    fn test_preview_operation_json_is_never_colored() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a_b.txt"), "").unwrap();

        let options = DisplayOptions {
            use_color: true,
            show_hidden: true,
        };
        let (_, content) = preview_operation(
            temp_dir.path(),
            &Configuration::literal("a_", ""),
            Preview::Json,
            options,
            None,
        )
        .unwrap();

        let content = content.unwrap();
        assert!(!content.contains("\x1b["));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["entries"][0]["candidate"], "b.txt");
    }

    #[test]
    fn test_preview_operation_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = preview_operation(
            Path::new("missing"),
            &Configuration::literal("a", ""),
            Preview::Tree,
            DisplayOptions::default(),
            Some(temp_dir.path()),
        )
        .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("Failed to plan renames under"));
        assert!(message.contains("invalid root"));
    }
}
