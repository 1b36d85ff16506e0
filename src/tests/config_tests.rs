use super::{load_config, parse_config, WorkgenConfig, CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn missing_config_file_yields_defaults() {
    let root = temp_dir("no-config");
    fs::create_dir_all(&root).expect("mkdir");
    let config = load_config(&root).expect("load");
    assert_eq!(config, WorkgenConfig::default());
    assert_eq!(config.manifest, "angular.json");
    assert_eq!(config.karma_builder, "@angular-devkit/build-angular:karma");
    assert!(config.ignore.iter().any(|p| p == "**/node_modules/**"));
}

#[test]
fn overrides_manifest_ignore_and_builder() {
    let path = Path::new("/repo/workgen.toml");
    let config = parse_config(
        "[workspace]\nmanifest = \"workspace.json\"\nignore = [\"vendor/**\"]\n\n[karma]\nbuilder = \"@nrwl/builders:karma\"\n",
        path,
    )
    .expect("parse");
    assert_eq!(config.manifest, "workspace.json");
    assert_eq!(config.ignore, vec!["vendor/**".to_owned()]);
    assert_eq!(config.karma_builder, "@nrwl/builders:karma");
    assert_eq!(config.source, Some(path.to_path_buf()));
}

#[test]
fn partial_config_keeps_remaining_defaults() {
    let config = parse_config("[karma]\n", Path::new("workgen.toml")).expect("parse");
    assert_eq!(config.manifest, "angular.json");
    assert_eq!(config.karma_builder, "@angular-devkit/build-angular:karma");
}

#[test]
fn rejects_unknown_keys() {
    let root = temp_dir("bad-config");
    fs::create_dir_all(&root).expect("mkdir");
    fs::write(root.join(CONFIG_FILE), "[workspace]\nmanfest = \"x.json\"\n").expect("write");
    let err = load_config(&root).expect_err("unknown key");
    assert!(err.to_string().contains("failed to parse"));
}

fn temp_dir(name: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!("workgen-config-{name}-{ts}"))
}
