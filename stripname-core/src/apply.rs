use crate::error::{FailureKind, PlanError, RenameFailure, TraversalWarning};
use crate::planner::{preview, Configuration, RenamePlan, RenamePlanEntry};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Options for applying a rename plan
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Append a timestamped journal of every attempt to this file
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of an apply. Failures never abort the batch; they end up here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    pub root: PathBuf,
    pub renamed: Vec<RenamedFile>,
    pub failures: Vec<RenameFailure>,
    pub warnings: Vec<TraversalWarning>,
}

impl ApplyResult {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Tracks the state of an apply operation
struct ApplyState {
    log_file: Option<File>,
    renamed: Vec<RenamedFile>,
    failures: Vec<RenameFailure>,
}

impl ApplyState {
    fn new(log_file: Option<&Path>) -> Result<Self, PlanError> {
        let log_file = match log_file {
            Some(path) => Some(open_log(path).map_err(|source| PlanError::LogFile {
                path: path.to_path_buf(),
                source,
            })?),
            None => None,
        };

        Ok(Self {
            log_file,
            renamed: Vec::new(),
            failures: Vec::new(),
        })
    }

    /// Journal writes are best effort; a full disk must not stop the batch.
    fn log(&mut self, message: &str) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            )
            .and_then(|()| file.flush());
        }
    }

    fn fail(&mut self, entry: &RenamePlanEntry, kind: FailureKind, cause: impl Into<String>) {
        let failure = RenameFailure::new(&entry.path, &entry.candidate, kind, cause);
        self.log(&format!("Failed {failure}"));
        self.failures.push(failure);
    }
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Reject names that are not a single, non-empty path component.
fn check_candidate(candidate: &str) -> Option<(FailureKind, &'static str)> {
    if candidate.is_empty() {
        return Some((FailureKind::EmptyName, "new name is empty"));
    }
    if candidate == "." || candidate == ".." {
        return Some((FailureKind::InvalidName, "new name is a relative directory"));
    }
    if candidate.contains('/') || candidate.contains(MAIN_SEPARATOR) || candidate.contains('\0') {
        return Some((FailureKind::InvalidName, "new name contains a path separator"));
    }
    None
}

/// Check if filesystem is case-insensitive
fn is_case_insensitive_fs(dir: &Path) -> bool {
    let probe_lower = dir.join(".stripname_case_probe");
    let probe_upper = dir.join(".STRIPNAME_CASE_PROBE");

    if File::create(&probe_lower).is_ok() {
        let case_insensitive = probe_upper.exists();
        let _ = fs::remove_file(&probe_lower);
        case_insensitive
    } else {
        // Assume case-sensitive if we can't test
        false
    }
}

fn is_case_only_change(from: &str, to: &str) -> bool {
    from != to && from.to_lowercase() == to.to_lowercase()
}

/// Rename one file, going through a temporary name for case-only changes on
/// case-insensitive filesystems.
fn perform_rename(from: &Path, to: &Path, case_only: bool) -> io::Result<()> {
    if case_only {
        let temp_name = from.with_extension(format!("{}.stripname.tmp", std::process::id()));
        fs::rename(from, &temp_name)?;
        if let Err(err) = fs::rename(&temp_name, to) {
            let _ = fs::rename(&temp_name, from);
            return Err(err);
        }
        Ok(())
    } else {
        fs::rename(from, to)
    }
}

fn apply_entry(entry: &RenamePlanEntry, state: &mut ApplyState) {
    if let Some((kind, cause)) = check_candidate(&entry.candidate) {
        state.fail(entry, kind, cause);
        return;
    }

    let target = entry.target_path();
    let mut case_only = false;
    if fs::symlink_metadata(&target).is_ok() {
        case_only = is_case_only_change(&entry.original, &entry.candidate)
            && is_case_insensitive_fs(&entry.directory);
        if !case_only {
            state.fail(
                entry,
                FailureKind::DestinationExists,
                format!("{} already exists", target.display()),
            );
            return;
        }
    }

    match perform_rename(&entry.path, &target, case_only) {
        Ok(()) => {
            state.log(&format!(
                "Renamed {} -> {}",
                entry.path.display(),
                target.display()
            ));
            state.renamed.push(RenamedFile {
                from: entry.path.clone(),
                to: target,
            });
        },
        Err(err) => state.fail(entry, FailureKind::Io, err.to_string()),
    }
}

/// Apply an already computed plan.
///
/// Hidden entries and unchanged names are skipped. Every other entry gets
/// its own rename attempt, in plan order.
pub fn apply_plan(plan: &RenamePlan, options: &ApplyOptions) -> Result<ApplyResult, PlanError> {
    let mut state = ApplyState::new(options.log_file.as_deref())?;

    state.log(&format!(
        "Applying {} {} renames under {}",
        plan.change_count(),
        plan.mode,
        plan.root.display()
    ));

    for entry in plan.changes() {
        apply_entry(entry, &mut state);
    }

    state.log(&format!(
        "Finished: {} renamed, {} failed",
        state.renamed.len(),
        state.failures.len()
    ));

    Ok(ApplyResult {
        root: plan.root.clone(),
        renamed: state.renamed,
        failures: state.failures,
        warnings: plan.warnings.clone(),
    })
}

/// Re-derive the plan for `root` and apply it.
pub fn apply(root: &Path, config: &Configuration) -> Result<ApplyResult, PlanError> {
    apply_with_options(root, config, &ApplyOptions::default())
}

pub fn apply_with_options(
    root: &Path,
    config: &Configuration,
    options: &ApplyOptions,
) -> Result<ApplyResult, PlanError> {
    let plan = preview(root, config)?;
    apply_plan(&plan, options)
}
