use crate::error::{PlanError, TraversalWarning};
use crate::normalize::{
    apply_cosmetics, common_prefix, normalize_stem, normalized_name, split_extension, Cosmetics,
};
use crate::pattern::{CompiledSpec, MatchSpec};
use crate::walker::{walk, DirectoryEntry, DirectoryTree, TreeFile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

/// Options for smart mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartOptions {
    /// Drop one trailing `0` from each inferred prefix
    #[serde(default = "default_true")]
    pub strip_leading_zero: bool,
    #[serde(flatten)]
    pub cosmetics: Cosmetics,
}

impl Default for SmartOptions {
    fn default() -> Self {
        Self {
            strip_leading_zero: true,
            cosmetics: Cosmetics::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// Replace every case-insensitive occurrence of `substring`
    Literal {
        substring: String,
        #[serde(default)]
        replacement: String,
    },
    /// Remove each directory's inferred prefix
    Smart(SmartOptions),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Literal,
    Smart,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => f.write_str("literal"),
            Self::Smart => f.write_str("smart"),
        }
    }
}

/// Everything one `preview`/`apply` call needs. The engine keeps none of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(flatten)]
    pub mode: Mode,
}

impl Configuration {
    pub fn literal(substring: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            mode: Mode::Literal {
                substring: substring.into(),
                replacement: replacement.into(),
            },
        }
    }

    pub fn smart(options: SmartOptions) -> Self {
        Self {
            mode: Mode::Smart(options),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self.mode {
            Mode::Literal { .. } => ModeKind::Literal,
            Mode::Smart(_) => ModeKind::Smart,
        }
    }
}

/// The prefix inferred for one directory, keyed by the directory's basename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripPattern {
    pub directory: String,
    pub prefix: String,
    pub spec: MatchSpec,
}

/// Patterns derived during one call. At most one per directory basename;
/// the first directory with a given basename wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripPatterns(Vec<StripPattern>);

impl StripPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the existing pattern) if the basename is taken.
    pub fn insert(&mut self, pattern: StripPattern) -> bool {
        if self.get(&pattern.directory).is_some() {
            return false;
        }
        self.0.push(pattern);
        true
    }

    pub fn get(&self, directory: &str) -> Option<&StripPattern> {
        self.0.iter().find(|p| p.directory == directory)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StripPattern> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether a planning call derives fresh patterns or reuses a table the
/// caller already holds from earlier in the same operation.
#[derive(Debug, Clone, Copy)]
pub enum PatternSource<'a> {
    Derive,
    Reuse(&'a StripPatterns),
}

/// One row of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlanEntry {
    pub path: PathBuf,
    pub directory: PathBuf,
    pub original: String,
    pub candidate: String,
    pub size: u64,
    pub hidden: bool,
}

impl RenamePlanEntry {
    /// True when applying the plan would touch this file
    pub fn is_change(&self) -> bool {
        !self.hidden && self.candidate != self.original
    }

    pub fn target_path(&self) -> PathBuf {
        self.directory.join(&self.candidate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub root: PathBuf,
    pub mode: ModeKind,
    /// Every walked directory, root first, in walk order
    pub directories: Vec<PathBuf>,
    pub entries: Vec<RenamePlanEntry>,
    pub patterns: StripPatterns,
    pub warnings: Vec<TraversalWarning>,
}

impl RenamePlan {
    pub fn changes(&self) -> impl Iterator<Item = &RenamePlanEntry> {
        self.entries.iter().filter(|e| e.is_change())
    }

    pub fn change_count(&self) -> usize {
        self.changes().count()
    }

    pub fn hidden_count(&self) -> usize {
        self.entries.iter().filter(|e| e.hidden).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Infer the prefix shared by every visible file in `dir`.
///
/// Hidden files take no part. Returns `None` when there is nothing to strip.
pub fn derive_pattern(dir: &DirectoryEntry, options: &SmartOptions) -> Option<StripPattern> {
    let stems: Vec<String> = dir.visible_files().map(|f| normalize_stem(&f.name)).collect();
    if stems.is_empty() {
        return None;
    }

    let mut prefix = common_prefix(&stems);
    if prefix.is_empty() {
        return None;
    }
    if options.strip_leading_zero {
        if let Some(trimmed) = prefix.strip_suffix('0') {
            prefix = trimmed.to_string();
        }
    }
    if prefix.is_empty() {
        return None;
    }

    Some(StripPattern {
        directory: dir.name.clone(),
        spec: MatchSpec::Derived(prefix.clone()),
        prefix,
    })
}

/// Build the pattern table for every directory of `tree`.
pub fn derive_patterns(tree: &DirectoryTree, options: &SmartOptions) -> StripPatterns {
    let mut patterns = StripPatterns::new();
    for dir in &tree.directories {
        if let Some(pattern) = derive_pattern(dir, options) {
            patterns.insert(pattern);
        }
    }
    patterns
}

/// Compute the new name for a single visible file.
///
/// `spec` is the literal substring in literal mode, or the directory's
/// derived prefix in smart mode. An empty spec leaves the name unchanged.
pub fn plan_name(name: &str, mode: &Mode, spec: &CompiledSpec) -> String {
    if spec.is_empty() {
        return name.to_string();
    }

    match mode {
        Mode::Literal { replacement, .. } => spec.replace_all(name, replacement),
        Mode::Smart(options) => {
            let stripped = spec.replace_all(&normalized_name(name), "");
            finish_smart_name(&stripped, &options.cosmetics)
        },
    }
}

/// Cosmetics only touch the stem; the extension comes through as-is.
fn finish_smart_name(name: &str, cosmetics: &Cosmetics) -> String {
    if !cosmetics.any() {
        return name.to_string();
    }
    let (stem, extension) = split_extension(name);
    let mut result = apply_cosmetics(stem, cosmetics);
    result.push_str(extension);
    result
}

fn entry_for(dir: &DirectoryEntry, file: &TreeFile, candidate: String) -> RenamePlanEntry {
    RenamePlanEntry {
        path: dir.path.join(&file.name),
        directory: dir.path.clone(),
        original: file.name.clone(),
        candidate,
        size: file.size,
        hidden: file.hidden,
    }
}

/// Plan every file of an already-walked tree.
pub fn plan_tree(
    tree: &DirectoryTree,
    config: &Configuration,
    source: PatternSource<'_>,
) -> Result<RenamePlan, PlanError> {
    let patterns = match (&config.mode, source) {
        (Mode::Smart(_), PatternSource::Reuse(existing)) => existing.clone(),
        (Mode::Smart(options), PatternSource::Derive) => derive_patterns(tree, options),
        (Mode::Literal { .. }, _) => StripPatterns::new(),
    };

    let literal = match &config.mode {
        Mode::Literal { substring, .. } => {
            Some(CompiledSpec::new(MatchSpec::Literal(substring.clone()))?)
        },
        Mode::Smart(_) => None,
    };
    let no_pattern = CompiledSpec::new(MatchSpec::Derived(String::new()))?;

    let mut entries = Vec::with_capacity(tree.file_count());
    for dir in &tree.directories {
        let derived = match patterns.get(&dir.name) {
            Some(pattern) if literal.is_none() => Some(CompiledSpec::new(pattern.spec.clone())?),
            _ => None,
        };
        let spec = literal.as_ref().or(derived.as_ref()).unwrap_or(&no_pattern);

        for file in &dir.files {
            let candidate = if file.hidden {
                file.name.clone()
            } else {
                plan_name(&file.name, &config.mode, spec)
            };
            entries.push(entry_for(dir, file, candidate));
        }
    }

    Ok(RenamePlan {
        root: tree.root.clone(),
        mode: config.kind(),
        directories: tree.directories.iter().map(|d| d.path.clone()).collect(),
        entries,
        patterns,
        warnings: tree.warnings.clone(),
    })
}

/// Walk `root` and compute the full plan without touching the filesystem.
pub fn preview(root: &Path, config: &Configuration) -> Result<RenamePlan, PlanError> {
    preview_with(root, config, PatternSource::Derive)
}

pub fn preview_with(
    root: &Path,
    config: &Configuration,
    source: PatternSource<'_>,
) -> Result<RenamePlan, PlanError> {
    let tree = walk(root)?;
    plan_tree(&tree, config, source)
}
