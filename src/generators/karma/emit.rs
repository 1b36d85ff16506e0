use serde_json::{json, Value};

use crate::generators::{GenerateError, Plan};
use crate::tree::FileTree;
use crate::workspace::ProjectDescriptor;

use super::profile::{profile_for, KindProfile, TypesAmendment};
use super::templates::{render_template, KARMA_CONF_TEMPLATE, TEST_BOOTSTRAP_TEMPLATE};

pub const KARMA_CONF_FILE: &str = "karma.conf.js";
pub const SPEC_TSCONFIG_FILE: &str = "tsconfig.spec.json";
pub const LOCAL_TSCONFIG_FILE: &str = "tsconfig.json";
pub const TEST_ENTRY_FILE: &str = "src/test.ts";

pub(crate) fn plan_emit(
    descriptor: &ProjectDescriptor,
    tree: &FileTree,
) -> Result<Plan, GenerateError> {
    if !tree.dir_exists(&descriptor.root) {
        return Err(GenerateError::ProjectRootNotFound {
            name: descriptor.name.clone(),
            root: descriptor.root.clone(),
        });
    }
    let profile = profile_for(descriptor.kind);
    let mut plan = Plan::default();

    plan.write(
        descriptor.root_path(KARMA_CONF_FILE),
        render_karma_conf(descriptor),
    );
    plan.write(
        descriptor.root_path(SPEC_TSCONFIG_FILE),
        encode_json(
            &descriptor.root_path(SPEC_TSCONFIG_FILE),
            &spec_tsconfig(descriptor, profile),
        )?,
    );
    plan.write(
        descriptor.root_path(TEST_ENTRY_FILE),
        render_test_bootstrap(profile),
    );

    if let Some(amendment) = profile.local_types {
        let path = descriptor.root_path(LOCAL_TSCONFIG_FILE);
        match amend_local_tsconfig(tree, &path, amendment)? {
            Some(contents) => plan.write(path, contents),
            None => plan.skip(format!("{path} not found; compiler types left as-is")),
        }
    }
    Ok(plan)
}

pub(crate) fn render_karma_conf(descriptor: &ProjectDescriptor) -> String {
    render_template(
        KARMA_CONF_TEMPLATE,
        &[
            ("offset", descriptor.offset_from_root().as_str()),
            ("coverage_dir", descriptor.mirrored_path("coverage").as_str()),
        ],
    )
}

pub(crate) fn render_test_bootstrap(profile: &KindProfile) -> String {
    let shims = profile
        .shim_imports
        .iter()
        .map(|line| format!("{line}\n"))
        .collect::<String>();
    render_template(TEST_BOOTSTRAP_TEMPLATE, &[("shims", shims.as_str())])
}

pub(crate) fn spec_tsconfig(descriptor: &ProjectDescriptor, profile: &KindProfile) -> Value {
    json!({
        "extends": "./tsconfig.json",
        "compilerOptions": {
            "outDir": descriptor.mirrored_path("dist/out-tsc"),
            "types": ["jasmine", "node"],
        },
        "files": profile.spec_files,
        "include": ["**/*.spec.ts", "**/*.d.ts"],
    })
}

/// Returns the amended file, or `None` when the project has no local tsconfig.
fn amend_local_tsconfig(
    tree: &FileTree,
    path: &str,
    amendment: TypesAmendment,
) -> Result<Option<String>, GenerateError> {
    let raw = tree
        .read_to_string(path)
        .map_err(|error| GenerateError::MalformedManifest {
            path: path.to_owned(),
            detail: error.to_string(),
        })?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let mut doc = serde_json::from_str::<Value>(raw).map_err(|error| GenerateError::Parse {
        path: path.to_owned(),
        error,
    })?;
    apply_types_amendment(&mut doc, amendment).map_err(|detail| {
        GenerateError::MalformedManifest {
            path: path.to_owned(),
            detail,
        }
    })?;
    encode_json(path, &doc).map(Some)
}

pub(crate) fn apply_types_amendment(
    doc: &mut Value,
    amendment: TypesAmendment,
) -> Result<(), String> {
    let Some(root) = doc.as_object_mut() else {
        return Err("expected a json object at the top level".to_owned());
    };
    let options = root
        .entry("compilerOptions")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| "`compilerOptions` must be an object".to_owned())?;
    let types = options
        .entry("types")
        .or_insert_with(|| json!([]))
        .as_array_mut()
        .ok_or_else(|| "`compilerOptions.types` must be an array".to_owned())?;

    types.retain(|entry| entry.as_str() != Some(amendment.remove));
    if !types.iter().any(|entry| entry.as_str() == Some(amendment.add)) {
        types.push(Value::String(amendment.add.to_owned()));
    }
    Ok(())
}

pub(crate) fn encode_json(path: &str, value: &Value) -> Result<String, GenerateError> {
    serde_json::to_string_pretty(value)
        .map(|rendered| format!("{rendered}\n"))
        .map_err(|error| GenerateError::Encode {
            path: path.to_owned(),
            error,
        })
}
