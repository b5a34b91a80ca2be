use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use stripname_core::{
    apply, apply_plan, preview, ApplyOptions, Configuration, FailureKind, PlanError, SmartOptions,
};

fn sample_pack() -> TempDir {
    let temp = TempDir::new().unwrap();
    for name in [
        "pack_kick.wav",
        "pack_snare.wav",
        "pack_hat.wav",
        ".DS_Store",
        "loops/loop_90.wav",
        "loops/loop_120.wav",
        "loops/nested/fx_rise.wav",
        "loops/nested/fx_fall.wav",
    ] {
        temp.child(name).touch().unwrap();
    }
    temp
}

#[test]
fn test_preview_twice_yields_identical_plans() {
    let temp = sample_pack();
    let config = Configuration::smart(SmartOptions::default());

    let first = preview(temp.path(), &config).unwrap();
    let second = preview(temp.path(), &config).unwrap();

    assert_eq!(first.entries, second.entries);
    assert_eq!(first.patterns, second.patterns);
}

#[test]
fn test_preview_after_apply_proposes_nothing() {
    let temp = sample_pack();
    let config = Configuration::literal("pack_", "");

    let result = apply(temp.path(), &config).unwrap();
    assert_eq!(result.renamed_count(), 3);

    let plan = preview(temp.path(), &config).unwrap();
    assert_eq!(plan.change_count(), 0);
    assert!(plan.entries.iter().all(|e| e.candidate == e.original));
}

#[test]
fn test_partial_failure_reports_one_collision() {
    let temp = sample_pack();
    temp.child("snare.wav").write_str("keep me").unwrap();

    let result = apply(temp.path(), &Configuration::literal("pack_", "")).unwrap();

    assert_eq!(result.renamed_count(), 2);
    assert_eq!(result.failures.len(), 1);
    let failure = &result.failures[0];
    assert_eq!(failure.kind, FailureKind::DestinationExists);
    assert_eq!(failure.path, temp.path().join("pack_snare.wav"));
    assert_eq!(failure.candidate, "snare.wav");

    temp.child("snare.wav").assert("keep me");
    temp.child("pack_snare.wav").assert(predicate::path::exists());
    temp.child("kick.wav").assert(predicate::path::exists());
    temp.child("hat.wav").assert(predicate::path::exists());
}

#[test]
fn test_apply_plan_records_from_and_to() {
    let temp = sample_pack();
    let plan = preview(temp.path(), &Configuration::literal("fx_", "")).unwrap();

    let result = apply_plan(&plan, &ApplyOptions::default()).unwrap();

    assert_eq!(result.renamed_count(), 2);
    let nested = temp.path().join("loops").join("nested");
    let rise = result
        .renamed
        .iter()
        .find(|r| r.from == nested.join("fx_rise.wav"))
        .unwrap();
    assert_eq!(rise.to, nested.join("rise.wav"));
}

#[test]
fn test_each_directory_gets_its_own_prefix() {
    let temp = sample_pack();
    let result = apply(temp.path(), &Configuration::smart(SmartOptions::default())).unwrap();

    assert!(result.is_success());
    temp.child("kick.wav").assert(predicate::path::exists());
    temp.child("loops/90.wav").assert(predicate::path::exists());
    temp.child("loops/120.wav").assert(predicate::path::exists());
    temp.child("loops/nested/rise.wav").assert(predicate::path::exists());
    temp.child(".DS_Store").assert(predicate::path::exists());
}

#[test]
fn test_invalid_root_fails_before_any_rename() {
    let temp = sample_pack();
    let file_root = temp.path().join("pack_kick.wav");

    let err = apply(&file_root, &Configuration::literal("pack_", "")).unwrap_err();

    assert!(matches!(err, PlanError::InvalidRoot { .. }));
    temp.child("pack_kick.wav").assert(predicate::path::exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_a_warning() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let temp = sample_pack();
    let locked = temp.child("locked");
    locked.create_dir_all().unwrap();
    locked.child("pack_secret.wav").touch().unwrap();
    fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits, so there is nothing to observe
    if fs::read_dir(locked.path()).is_ok() {
        fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let plan = preview(temp.path(), &Configuration::literal("pack_", "")).unwrap();
    fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].path, locked.path());
    assert!(plan.entries.iter().all(|e| e.original != "pack_secret.wav"));
    assert_eq!(plan.change_count(), 3);
}
