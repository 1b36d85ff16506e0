use super::{canonicalize_best_effort, resolve_workspace_root, ResolutionMode};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn resolves_explicit_override() {
    let root = temp_dir("explicit");
    fs::create_dir_all(&root).expect("create root");
    let resolved = resolve_workspace_root(root.clone(), Some(root.clone())).expect("resolve");
    assert_eq!(resolved.resolution_mode, ResolutionMode::Explicit);
    assert_eq!(resolved.resolved_root, canonicalize_best_effort(root));
}

#[test]
fn rejects_explicit_override_that_is_not_a_directory() {
    let root = temp_dir("explicit-missing");
    let err = resolve_workspace_root(std::env::temp_dir(), Some(root)).expect_err("not a dir");
    assert!(err.to_string().contains("not a directory"));
}

#[test]
fn resolves_nearest_manifest_directory() {
    let base = temp_dir("nearest");
    let repo = base.join("repo");
    let nested = repo.join("libs/lib1/src");
    fs::create_dir_all(&nested).expect("create nested");
    fs::write(repo.join("angular.json"), "{ \"projects\": {} }\n").expect("write manifest");

    let resolved = resolve_workspace_root(nested, None).expect("resolve");
    assert_eq!(resolved.resolution_mode, ResolutionMode::AutoNearest);
    assert_eq!(resolved.resolved_root, canonicalize_best_effort(repo));
    assert!(resolved.evidence[0].contains("`angular.json`"));
}

fn temp_dir(name: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!("workgen-resolver-{name}-{ts}"))
}
