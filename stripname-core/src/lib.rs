#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod error;
pub mod normalize;
pub mod operations;
pub mod output;
pub mod pattern;
pub mod planner;
pub mod preview;
pub mod walker;

pub use apply::{apply, apply_plan, apply_with_options, ApplyOptions, ApplyResult, RenamedFile};
pub use config::Config;
pub use error::{FailureKind, PlanError, RenameFailure, TraversalWarning};
pub use normalize::{
    apply_cosmetics, common_prefix, escape_for_match, normalize_stem, split_extension, Cosmetics,
};
pub use output::{OutputFormat, OutputFormatter, PreviewResult, VersionResult};
pub use pattern::{CompiledSpec, MatchSpec};
pub use planner::{
    derive_patterns, plan_tree, preview, preview_with, Configuration, Mode, ModeKind,
    PatternSource, RenamePlan, RenamePlanEntry, SmartOptions, StripPattern, StripPatterns,
};
pub use preview::{render_plan, DisplayOptions, Preview};
pub use walker::{walk, DirectoryEntry, DirectoryTree, TreeFile};
