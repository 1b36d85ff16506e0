use serde_json::{json, Map, Value};

use crate::generators::{GenerateError, Plan};
use crate::tree::FileTree;
use crate::workspace::{read_manifest, ProjectDescriptor};

use super::emit::{encode_json, KARMA_CONF_FILE, SPEC_TSCONFIG_FILE, TEST_ENTRY_FILE};
use super::profile::{profile_for, KindProfile};

/// `lint.options.tsConfig` accepts a single path or a list of paths.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum TsConfigRef {
    One(String),
    Many(Vec<String>),
}

impl TsConfigRef {
    pub(crate) fn into_paths(self) -> Vec<String> {
        match self {
            TsConfigRef::One(path) => vec![path],
            TsConfigRef::Many(paths) => paths,
        }
    }
}

pub(crate) fn plan_patch(
    descriptor: &ProjectDescriptor,
    tree: &FileTree,
    manifest_path: &str,
    builder: &str,
) -> Result<Plan, GenerateError> {
    let malformed = |detail: String| GenerateError::MalformedManifest {
        path: manifest_path.to_owned(),
        detail,
    };

    let mut manifest = read_manifest(tree, manifest_path)?;
    let projects = manifest
        .get_mut("projects")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| malformed("missing `projects` object".to_owned()))?;
    let entry = projects
        .get_mut(&descriptor.name)
        .ok_or_else(|| GenerateError::ProjectNotFound {
            name: descriptor.name.clone(),
            manifest: manifest_path.to_owned(),
        })?;
    let architect = entry
        .get_mut("architect")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            malformed(format!(
                "project `{}` has no `architect` mapping",
                descriptor.name
            ))
        })?;

    let profile = profile_for(descriptor.kind);
    architect.insert(
        "test".to_owned(),
        json!({
            "builder": builder,
            "options": test_options(descriptor, profile),
        }),
    );

    let spec_path = descriptor.root_path(SPEC_TSCONFIG_FILE);
    let mut plan = Plan::default();
    let lint_ts_config = architect
        .get_mut("lint")
        .and_then(|lint| lint.get_mut("options"))
        .and_then(|options| options.get_mut("tsConfig"));
    match lint_ts_config {
        Some(ts_config) => extend_ts_config(ts_config, &spec_path).map_err(|detail| {
            malformed(format!(
                "project `{}` lint tsConfig {detail}",
                descriptor.name
            ))
        })?,
        // TODO: decide whether projects without a lint target should get one
        None => plan.skip(format!(
            "project `{}` has no lint tsConfig; lint target left untouched",
            descriptor.name
        )),
    }

    plan.write(manifest_path, encode_json(manifest_path, &manifest)?);
    Ok(plan)
}

pub(crate) fn test_options(descriptor: &ProjectDescriptor, profile: &KindProfile) -> Value {
    let mut options = Map::new();
    options.insert(
        "main".to_owned(),
        Value::String(descriptor.root_path(TEST_ENTRY_FILE)),
    );
    if let Some(polyfills) = profile.polyfills {
        options.insert(
            "polyfills".to_owned(),
            Value::String(descriptor.root_path(polyfills)),
        );
    }
    options.insert(
        "tsConfig".to_owned(),
        Value::String(descriptor.root_path(SPEC_TSCONFIG_FILE)),
    );
    options.insert(
        "karmaConfig".to_owned(),
        Value::String(descriptor.root_path(KARMA_CONF_FILE)),
    );
    for key in profile.placeholder_options {
        options.insert((*key).to_owned(), Value::Array(Vec::new()));
    }
    Value::Object(options)
}

pub(crate) fn extend_ts_config(ts_config: &mut Value, spec_path: &str) -> Result<(), String> {
    let current = serde_json::from_value::<TsConfigRef>(ts_config.clone())
        .map_err(|_| "must be a string or an array of strings".to_owned())?;
    let mut paths = current.into_paths();
    if !paths.iter().any(|path| path == spec_path) {
        paths.push(spec_path.to_owned());
    }
    *ts_config = Value::from(paths);
    Ok(())
}
