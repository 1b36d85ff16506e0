//! Karma test wiring for a single workspace project.
//!
//! The generator writes `karma.conf.js`, `tsconfig.spec.json` and
//! `src/test.ts` under the project root, then registers a `test` target in
//! the workspace manifest and points the `lint` target at the new spec
//! config. Library and application projects differ only through their
//! [`KindProfile`](profile::KindProfile).

mod emit;
mod patch;
pub mod profile;
mod templates;

use crate::tree::FileTree;
use crate::workspace::{resolve_project, ProjectDescriptor, DEFAULT_MANIFEST_FILE};

use super::{GenerateError, GenerateOutcome, Generator};

pub use emit::{KARMA_CONF_FILE, LOCAL_TSCONFIG_FILE, SPEC_TSCONFIG_FILE, TEST_ENTRY_FILE};

pub const GENERATOR_ID: &str = "karma-project";
pub const DEFAULT_KARMA_BUILDER: &str = "@angular-devkit/build-angular:karma";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KarmaProject {
    manifest_path: String,
    builder: String,
}

impl Default for KarmaProject {
    fn default() -> Self {
        Self {
            manifest_path: DEFAULT_MANIFEST_FILE.to_owned(),
            builder: DEFAULT_KARMA_BUILDER.to_owned(),
        }
    }
}

impl KarmaProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest_path(mut self, manifest_path: impl Into<String>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }

    pub fn with_builder(mut self, builder: impl Into<String>) -> Self {
        self.builder = builder.into();
        self
    }

    /// Writes the karma config, spec tsconfig and test bootstrap for the
    /// project, overwriting whatever is already there.
    pub fn emit(
        &self,
        descriptor: &ProjectDescriptor,
        tree: &mut FileTree,
    ) -> Result<(), GenerateError> {
        emit::plan_emit(descriptor, tree)?.apply(tree);
        Ok(())
    }

    /// Registers the `test` target and extends `lint.options.tsConfig`.
    pub fn patch(
        &self,
        descriptor: &ProjectDescriptor,
        tree: &mut FileTree,
    ) -> Result<(), GenerateError> {
        patch::plan_patch(descriptor, tree, &self.manifest_path, &self.builder)?.apply(tree);
        Ok(())
    }
}

impl Generator for KarmaProject {
    fn id(&self) -> &'static str {
        GENERATOR_ID
    }

    fn generate(
        &self,
        project: &str,
        tree: &mut FileTree,
    ) -> Result<GenerateOutcome, GenerateError> {
        let descriptor = resolve_project(tree, &self.manifest_path, project)?;
        let mut plan = emit::plan_emit(&descriptor, tree)?;
        plan.extend(patch::plan_patch(
            &descriptor,
            tree,
            &self.manifest_path,
            &self.builder,
        )?);
        let skipped = plan.skipped.clone();
        let changes = plan.apply(tree);
        Ok(GenerateOutcome {
            project: descriptor,
            changes,
            skipped,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/karma_tests.rs"]
mod tests;
