use serde_json::Value;

use crate::generators::GenerateError;
use crate::tree::{normalize_path, FileTree};

pub const DEFAULT_MANIFEST_FILE: &str = "angular.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Library,
    Application,
}

impl ProjectKind {
    pub fn from_project_type(value: &str) -> Option<Self> {
        match value {
            "library" => Some(ProjectKind::Library),
            "application" => Some(ProjectKind::Application),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Library => "library",
            ProjectKind::Application => "application",
        }
    }
}

/// Project metadata resolved once from the manifest for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub name: String,
    pub kind: ProjectKind,
    pub root: String,
    pub source_root: String,
}

impl ProjectDescriptor {
    pub fn new(name: impl Into<String>, kind: ProjectKind, root: impl Into<String>) -> Self {
        let root = normalize_path(&root.into());
        let source_root = if root.is_empty() {
            "src".to_owned()
        } else {
            format!("{root}/src")
        };
        Self {
            name: name.into(),
            kind,
            root,
            source_root,
        }
    }

    /// Workspace-relative path of `relative` inside the project. A project
    /// rooted at the workspace root (`""` or `"."`) adds no prefix.
    pub fn root_path(&self, relative: &str) -> String {
        let relative = normalize_path(relative);
        if self.root.is_empty() {
            relative
        } else {
            format!("{}/{relative}", self.root)
        }
    }

    /// `../` once per root segment, pointing back at the workspace root.
    /// `./` when the project is the workspace root, so `require` stays relative.
    pub fn offset_from_root(&self) -> String {
        match self.root.split('/').filter(|s| !s.is_empty()).count() {
            0 => "./".to_owned(),
            depth => "../".repeat(depth),
        }
    }

    /// `<offset><base>/<root>`: a workspace-level output directory mirrored
    /// per project, addressed from inside the project.
    pub fn mirrored_path(&self, base: &str) -> String {
        let offset = self.offset_from_root();
        if self.root.is_empty() {
            format!("{offset}{base}")
        } else {
            format!("{offset}{base}/{}", self.root)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub name: String,
    pub kind: Option<ProjectKind>,
    pub root: Option<String>,
    pub has_test_target: bool,
}

pub fn read_manifest(tree: &FileTree, manifest_path: &str) -> Result<Value, GenerateError> {
    let raw = tree
        .read_to_string(manifest_path)
        .map_err(|error| GenerateError::MalformedManifest {
            path: manifest_path.to_owned(),
            detail: error.to_string(),
        })?
        .ok_or_else(|| GenerateError::ManifestNotFound {
            path: manifest_path.to_owned(),
        })?;
    serde_json::from_str::<Value>(raw).map_err(|error| GenerateError::Parse {
        path: manifest_path.to_owned(),
        error,
    })
}

pub fn resolve_project(
    tree: &FileTree,
    manifest_path: &str,
    name: &str,
) -> Result<ProjectDescriptor, GenerateError> {
    let manifest = read_manifest(tree, manifest_path)?;
    let projects = projects_of(&manifest, manifest_path)?;
    let Some(entry) = projects.get(name) else {
        return Err(GenerateError::ProjectNotFound {
            name: name.to_owned(),
            manifest: manifest_path.to_owned(),
        });
    };

    let malformed = |detail: String| GenerateError::MalformedManifest {
        path: manifest_path.to_owned(),
        detail,
    };
    let project_type = entry
        .get("projectType")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("project `{name}` has no `projectType`")))?;
    let kind = ProjectKind::from_project_type(project_type).ok_or_else(|| {
        malformed(format!(
            "project `{name}` has unsupported projectType `{project_type}` (expected library or application)"
        ))
    })?;
    let root = entry
        .get("root")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("project `{name}` has no `root`")))?;

    let mut descriptor = ProjectDescriptor::new(name, kind, root);
    if let Some(source_root) = entry.get("sourceRoot").and_then(Value::as_str) {
        descriptor.source_root = normalize_path(source_root);
    }
    Ok(descriptor)
}

pub fn list_projects(
    tree: &FileTree,
    manifest_path: &str,
) -> Result<Vec<ProjectSummary>, GenerateError> {
    let manifest = read_manifest(tree, manifest_path)?;
    let projects = projects_of(&manifest, manifest_path)?;
    Ok(projects
        .iter()
        .map(|(name, entry)| ProjectSummary {
            name: name.clone(),
            kind: entry
                .get("projectType")
                .and_then(Value::as_str)
                .and_then(ProjectKind::from_project_type),
            root: entry.get("root").and_then(Value::as_str).map(normalize_path),
            has_test_target: entry
                .get("architect")
                .and_then(|architect| architect.get("test"))
                .is_some(),
        })
        .collect())
}

fn projects_of<'a>(
    manifest: &'a Value,
    manifest_path: &str,
) -> Result<&'a serde_json::Map<String, Value>, GenerateError> {
    manifest
        .get("projects")
        .and_then(Value::as_object)
        .ok_or_else(|| GenerateError::MalformedManifest {
            path: manifest_path.to_owned(),
            detail: "missing `projects` object".to_owned(),
        })
}

#[cfg(test)]
#[path = "tests/workspace_tests.rs"]
mod tests;
