use std::path::{Path, PathBuf};

use crate::generators::karma::DEFAULT_KARMA_BUILDER;
use crate::tree::DEFAULT_IGNORE;
use crate::workspace::DEFAULT_MANIFEST_FILE;

pub const CONFIG_FILE: &str = "workgen.toml";

#[derive(Debug, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    workspace: Option<WorkspaceSection>,
    #[serde(default)]
    karma: Option<KarmaSection>,
}

#[derive(Debug, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct WorkspaceSection {
    #[serde(default)]
    manifest: Option<String>,
    #[serde(default)]
    ignore: Option<Vec<String>>,
}

#[derive(Debug, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct KarmaSection {
    #[serde(default)]
    builder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkgenConfig {
    pub manifest: String,
    pub ignore: Vec<String>,
    pub karma_builder: String,
    pub source: Option<PathBuf>,
}

impl Default for WorkgenConfig {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST_FILE.to_owned(),
            ignore: DEFAULT_IGNORE.iter().map(|p| (*p).to_owned()).collect(),
            karma_builder: DEFAULT_KARMA_BUILDER.to_owned(),
            source: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    Parse {
        path: PathBuf,
        error: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, error } => {
                write!(f, "failed to read {}: {error}", path.display())
            }
            ConfigError::Parse { path, error } => {
                write!(f, "failed to parse {}: {error}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads `workgen.toml` from the workspace root, falling back to defaults
/// when the file is absent.
pub fn load_config(root: &Path) -> Result<WorkgenConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(WorkgenConfig::default());
    }
    let raw = std::fs::read_to_string(&path).map_err(|error| ConfigError::Read {
        path: path.clone(),
        error,
    })?;
    parse_config(&raw, &path)
}

pub fn parse_config(raw: &str, path: &Path) -> Result<WorkgenConfig, ConfigError> {
    let parsed = toml::from_str::<ConfigFile>(raw).map_err(|error| ConfigError::Parse {
        path: path.to_path_buf(),
        error,
    })?;
    let mut config = WorkgenConfig {
        source: Some(path.to_path_buf()),
        ..WorkgenConfig::default()
    };
    if let Some(workspace) = parsed.workspace {
        if let Some(manifest) = workspace.manifest {
            config.manifest = manifest;
        }
        if let Some(ignore) = workspace.ignore {
            config.ignore = ignore;
        }
    }
    if let Some(builder) = parsed.karma.and_then(|karma| karma.builder) {
        config.karma_builder = builder;
    }
    Ok(config)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
