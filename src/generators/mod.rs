pub mod karma;

use crate::tree::{FileChange, FileTree};
use crate::workspace::ProjectDescriptor;

pub use karma::KarmaProject;

#[derive(Debug)]
pub enum GenerateError {
    ManifestNotFound {
        path: String,
    },
    ProjectNotFound {
        name: String,
        manifest: String,
    },
    ProjectRootNotFound {
        name: String,
        root: String,
    },
    MalformedManifest {
        path: String,
        detail: String,
    },
    Parse {
        path: String,
        error: serde_json::Error,
    },
    Encode {
        path: String,
        error: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateErrorKind {
    NotFound,
    MalformedManifest,
    Parse,
    /// A generated JSON document could not be serialized.
    Encode,
}

impl GenerateError {
    pub fn kind(&self) -> GenerateErrorKind {
        match self {
            GenerateError::ManifestNotFound { .. }
            | GenerateError::ProjectNotFound { .. }
            | GenerateError::ProjectRootNotFound { .. } => GenerateErrorKind::NotFound,
            GenerateError::MalformedManifest { .. } => GenerateErrorKind::MalformedManifest,
            GenerateError::Parse { .. } => GenerateErrorKind::Parse,
            GenerateError::Encode { .. } => GenerateErrorKind::Encode,
        }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::ManifestNotFound { path } => {
                write!(f, "workspace manifest not found: {path}")
            }
            GenerateError::ProjectNotFound { name, manifest } => {
                write!(f, "project `{name}` is not defined in {manifest}")
            }
            GenerateError::ProjectRootNotFound { name, root } => {
                write!(f, "root `{root}` of project `{name}` does not exist")
            }
            GenerateError::MalformedManifest { path, detail } => {
                write!(f, "malformed {path}: {detail}")
            }
            GenerateError::Parse { path, error } => {
                write!(f, "failed to parse {path}: {error}")
            }
            GenerateError::Encode { path, error } => {
                write!(f, "failed to encode {path}: {error}")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub path: String,
    pub contents: Vec<u8>,
}

/// Writes computed up front so that a failure leaves the tree untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub writes: Vec<PlannedWrite>,
    pub skipped: Vec<String>,
}

impl Plan {
    pub fn write(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.writes.push(PlannedWrite {
            path: path.into(),
            contents: contents.into(),
        });
    }

    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skipped.push(reason.into());
    }

    pub fn extend(&mut self, other: Plan) {
        self.writes.extend(other.writes);
        self.skipped.extend(other.skipped);
    }

    pub fn apply(self, tree: &mut FileTree) -> Vec<FileChange> {
        let mut changes = Vec::new();
        for write in self.writes {
            if let Some(action) = tree.write(&write.path, write.contents) {
                changes.push(FileChange {
                    path: write.path,
                    action,
                });
            }
        }
        changes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub project: ProjectDescriptor,
    pub changes: Vec<FileChange>,
    pub skipped: Vec<String>,
}

pub trait Generator {
    fn id(&self) -> &'static str;
    fn generate(&self, project: &str, tree: &mut FileTree)
        -> Result<GenerateOutcome, GenerateError>;
}

pub const GENERATORS: [(&str, &str); 1] = [(
    karma::GENERATOR_ID,
    "Add karma test configuration and a `test` target to a project",
)];

pub fn is_generator(name: &str) -> bool {
    GENERATORS.iter().any(|(id, _)| *id == name)
}
