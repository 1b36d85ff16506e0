use super::{list_projects, resolve_project, ProjectDescriptor, ProjectKind};
use crate::generators::GenerateErrorKind;
use crate::tree::FileTree;

fn tree_with_manifest(manifest: &str) -> FileTree {
    let mut tree = FileTree::new();
    tree.write("angular.json", manifest);
    tree
}

#[test]
fn resolves_library_descriptor_with_explicit_source_root() {
    let tree = tree_with_manifest(
        r#"{ "projects": { "lib1": { "root": "libs/lib1", "sourceRoot": "libs/lib1/lib", "projectType": "library" } } }"#,
    );
    let descriptor = resolve_project(&tree, "angular.json", "lib1").expect("resolve");
    assert_eq!(
        descriptor,
        ProjectDescriptor {
            name: "lib1".to_owned(),
            kind: ProjectKind::Library,
            root: "libs/lib1".to_owned(),
            source_root: "libs/lib1/lib".to_owned(),
        }
    );
}

#[test]
fn source_root_defaults_under_project_root() {
    let tree = tree_with_manifest(
        r#"{ "projects": { "app1": { "root": "apps/app1/", "projectType": "application" } } }"#,
    );
    let descriptor = resolve_project(&tree, "angular.json", "app1").expect("resolve");
    assert_eq!(descriptor.kind, ProjectKind::Application);
    assert_eq!(descriptor.root, "apps/app1");
    assert_eq!(descriptor.source_root, "apps/app1/src");
}

#[test]
fn unknown_project_type_is_malformed() {
    let tree = tree_with_manifest(
        r#"{ "projects": { "e2e": { "root": "apps/e2e", "projectType": "e2e" } } }"#,
    );
    let err = resolve_project(&tree, "angular.json", "e2e").expect_err("unsupported kind");
    assert_eq!(err.kind(), GenerateErrorKind::MalformedManifest);
    assert!(err.to_string().contains("unsupported projectType `e2e`"));
}

#[test]
fn missing_manifest_is_not_found() {
    let tree = FileTree::new();
    let err = resolve_project(&tree, "angular.json", "lib1").expect_err("no manifest");
    assert_eq!(err.kind(), GenerateErrorKind::NotFound);
    assert_eq!(err.to_string(), "workspace manifest not found: angular.json");
}

#[test]
fn offset_from_root_counts_segments() {
    let descriptor = ProjectDescriptor::new("ui", ProjectKind::Library, "/libs/shared/ui/");
    assert_eq!(descriptor.root, "libs/shared/ui");
    assert_eq!(descriptor.offset_from_root(), "../../../");
    assert_eq!(descriptor.root_path("src/test.ts"), "libs/shared/ui/src/test.ts");
}

#[test]
fn workspace_root_project_has_no_path_prefix() {
    for root in ["", ".", "./"] {
        let descriptor = ProjectDescriptor::new("site", ProjectKind::Application, root);
        assert_eq!(descriptor.root, "");
        assert_eq!(descriptor.source_root, "src");
        assert_eq!(descriptor.offset_from_root(), "./");
        assert_eq!(descriptor.root_path("src/test.ts"), "src/test.ts");
        assert_eq!(descriptor.mirrored_path("coverage"), "./coverage");
    }
}

#[test]
fn lists_projects_in_manifest_order() {
    let tree = tree_with_manifest(
        r#"{ "projects": {
            "web": { "root": "apps/web", "projectType": "application", "architect": { "test": {} } },
            "core": { "root": "libs/core", "projectType": "library", "architect": {} },
            "odd": { "projectType": "plugin" }
        } }"#,
    );
    let projects = list_projects(&tree, "angular.json").expect("list");
    let names = projects.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["web", "core", "odd"]);
    assert!(projects[0].has_test_target);
    assert_eq!(projects[1].kind, Some(ProjectKind::Library));
    assert!(!projects[1].has_test_target);
    assert_eq!(projects[2].kind, None);
    assert_eq!(projects[2].root, None);
}
