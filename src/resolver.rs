use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;

const ROOT_MARKERS: [&str; 5] = [
    CONFIG_FILE,
    "angular.json",
    "workspace.json",
    "nx.json",
    ".git",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    Explicit,
    AutoNearest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub resolved_root: PathBuf,
    pub resolution_mode: ResolutionMode,
    pub evidence: Vec<String>,
}

#[derive(Debug)]
pub enum ResolveError {
    Cwd(std::io::Error),
    InvalidExplicitRoot { path: PathBuf },
    NoCandidateRoot { cwd: PathBuf },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Cwd(err) => write!(f, "failed to resolve current directory: {err}"),
            ResolveError::InvalidExplicitRoot { path } => {
                write!(
                    f,
                    "explicit --repo path is not a directory: {}",
                    path.display()
                )
            }
            ResolveError::NoCandidateRoot { cwd } => write!(
                f,
                "could not find a workspace root from cwd {} (use --repo <path>)",
                cwd.display()
            ),
        }
    }
}

impl std::error::Error for ResolveError {}

pub fn resolve_workspace_root(
    cwd: PathBuf,
    repo_override: Option<PathBuf>,
) -> Result<ResolvedTarget, ResolveError> {
    if let Some(explicit) = repo_override {
        let explicit = if explicit.is_absolute() {
            explicit
        } else {
            cwd.join(explicit)
        };
        let canonical = canonicalize_best_effort(explicit);
        if !canonical.is_dir() {
            return Err(ResolveError::InvalidExplicitRoot { path: canonical });
        }
        return Ok(ResolvedTarget {
            resolved_root: canonical,
            resolution_mode: ResolutionMode::Explicit,
            evidence: vec!["resolved via explicit --repo override".to_owned()],
        });
    }

    let (root, marker) =
        find_nearest_candidate(&cwd).ok_or(ResolveError::NoCandidateRoot { cwd })?;
    Ok(ResolvedTarget {
        evidence: vec![format!(
            "selected nearest workspace root {} (found `{marker}`)",
            root.display()
        )],
        resolved_root: root,
        resolution_mode: ResolutionMode::AutoNearest,
    })
}

fn find_nearest_candidate(cwd: &Path) -> Option<(PathBuf, &'static str)> {
    let mut current = Some(canonicalize_best_effort(cwd.to_path_buf()));
    while let Some(path) = current {
        if let Some(marker) = ROOT_MARKERS
            .iter()
            .copied()
            .find(|marker| path.join(marker).exists())
        {
            return Some((path, marker));
        }
        current = path.parent().map(Path::to_path_buf);
    }
    None
}

fn canonicalize_best_effort(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
