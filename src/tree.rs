use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use walkdir::WalkDir;

pub const DEFAULT_IGNORE: [&str; 5] = [
    "**/node_modules/**",
    "**/.git/**",
    "dist/**",
    "coverage/**",
    "tmp/**",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Create,
    Update,
}

impl ChangeAction {
    pub fn label(self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub action: ChangeAction,
}

#[derive(Debug)]
pub enum TreeError {
    InvalidIgnorePattern {
        pattern: String,
        error: globset::Error,
    },
    Walk {
        root: PathBuf,
        error: walkdir::Error,
    },
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    Write {
        path: PathBuf,
        error: std::io::Error,
    },
    NotUtf8 {
        path: String,
    },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::InvalidIgnorePattern { pattern, error } => {
                write!(f, "invalid ignore pattern `{pattern}`: {error}")
            }
            TreeError::Walk { root, error } => {
                write!(f, "failed to scan {}: {error}", root.display())
            }
            TreeError::Read { path, error } => {
                write!(f, "failed to read {}: {error}", path.display())
            }
            TreeError::Write { path, error } => {
                write!(f, "failed to write {}: {error}", path.display())
            }
            TreeError::NotUtf8 { path } => write!(f, "{path} is not valid utf-8"),
        }
    }
}

impl std::error::Error for TreeError {}

/// In-memory staging area for workspace files.
///
/// Paths are workspace-relative and `/`-separated. Writes only touch memory
/// until [`FileTree::commit`] materializes the changed files under a root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    files: BTreeMap<String, Vec<u8>>,
    changes: IndexMap<String, ChangeAction>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every file under `root`, skipping paths matched by `ignore`.
    /// Ignored directories are pruned before the walk enters them.
    pub fn load(root: &Path, ignore: &[String]) -> Result<Self, TreeError> {
        let ignore = IgnoreSet::build(ignore)?;
        let mut files = BTreeMap::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !ignore.prunes(&relative_key(root, entry.path()))
            });
        for entry in walker {
            let entry = entry.map_err(|error| TreeError::Walk {
                root: root.to_path_buf(),
                error,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let key = relative_key(root, entry.path());
            if ignore.excludes(&key) {
                continue;
            }
            let contents = fs::read(entry.path()).map_err(|error| TreeError::Read {
                path: entry.path().to_path_buf(),
                error,
            })?;
            files.insert(key, contents);
        }
        Ok(Self {
            files,
            changes: IndexMap::new(),
        })
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    /// A directory exists when at least one file lives beneath it.
    pub fn dir_exists(&self, dir: &str) -> bool {
        let dir = normalize_path(dir);
        if dir.is_empty() {
            return !self.files.is_empty();
        }
        let prefix = format!("{dir}/");
        self.files
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(path, _)| path.starts_with(&prefix))
    }

    pub fn read(&self, path: &str) -> Option<&[u8]> {
        self.files.get(&normalize_path(path)).map(Vec::as_slice)
    }

    pub fn read_to_string(&self, path: &str) -> Result<Option<&str>, TreeError> {
        let path = normalize_path(path);
        match self.files.get(&path) {
            None => Ok(None),
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|_| TreeError::NotUtf8 { path }),
        }
    }

    /// Creates or overwrites `path`. Returns `None` when the contents were
    /// already identical and nothing changed.
    pub fn write(&mut self, path: &str, contents: impl Into<Vec<u8>>) -> Option<ChangeAction> {
        let path = normalize_path(path);
        let contents = contents.into();
        let action = match self.files.get(&path) {
            Some(existing) if *existing == contents => return None,
            Some(_) => ChangeAction::Update,
            None => ChangeAction::Create,
        };
        self.files.insert(path.clone(), contents);
        // a file created earlier in this session stays a create
        self.changes.entry(path).or_insert(action);
        Some(action)
    }

    pub fn changes(&self) -> Vec<FileChange> {
        self.changes
            .iter()
            .map(|(path, action)| FileChange {
                path: path.clone(),
                action: *action,
            })
            .collect()
    }

    /// Writes every changed file under `root` and returns the written paths.
    pub fn commit(&self, root: &Path) -> Result<Vec<PathBuf>, TreeError> {
        let mut written = Vec::with_capacity(self.changes.len());
        for path in self.changes.keys() {
            let Some(contents) = self.files.get(path) else {
                continue;
            };
            let target = root.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|error| TreeError::Write {
                    path: parent.to_path_buf(),
                    error,
                })?;
            }
            fs::write(&target, contents).map_err(|error| TreeError::Write {
                path: target.clone(),
                error,
            })?;
            written.push(target);
        }
        Ok(written)
    }
}

pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<&str>>()
        .join("/")
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    normalize_path(&relative.to_string_lossy())
}

/// Ignore patterns split into file matches and directory prunes.
///
/// A `dir/**` pattern also prunes `dir` itself, so `**/node_modules/**`
/// stops the walk at every `node_modules` directory.
pub(crate) struct IgnoreSet {
    files: GlobSet,
    dirs: GlobSet,
}

impl IgnoreSet {
    pub(crate) fn build(patterns: &[String]) -> Result<Self, TreeError> {
        let mut files = GlobSetBuilder::new();
        let mut dirs = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = compile_glob(pattern)?;
            files.add(glob.clone());
            dirs.add(glob);
            if let Some(dir) = pattern.strip_suffix("/**").filter(|dir| !dir.is_empty()) {
                dirs.add(compile_glob(dir)?);
            }
        }
        let finish = |builder: GlobSetBuilder| {
            builder
                .build()
                .map_err(|error| TreeError::InvalidIgnorePattern {
                    pattern: patterns.join(", "),
                    error,
                })
        };
        Ok(Self {
            files: finish(files)?,
            dirs: finish(dirs)?,
        })
    }

    pub(crate) fn excludes(&self, path: &str) -> bool {
        self.files.is_match(path)
    }

    pub(crate) fn prunes(&self, dir: &str) -> bool {
        self.dirs.is_match(dir)
    }
}

fn compile_glob(pattern: &str) -> Result<Glob, TreeError> {
    Glob::new(pattern).map_err(|error| TreeError::InvalidIgnorePattern {
        pattern: pattern.to_owned(),
        error,
    })
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
