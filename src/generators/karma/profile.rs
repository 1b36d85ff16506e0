use crate::workspace::ProjectKind;

/// Everything that differs between a library and an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub kind: ProjectKind,
    /// Runtime shims imported at the top of `src/test.ts`.
    pub shim_imports: &'static [&'static str],
    /// `files` of the generated `tsconfig.spec.json`, relative to the project root.
    pub spec_files: &'static [&'static str],
    /// Polyfills entry registered on the `test` target.
    pub polyfills: Option<&'static str>,
    /// `test` target options seeded as empty arrays.
    pub placeholder_options: &'static [&'static str],
    /// Amendment applied to the project's own `tsconfig.json`.
    pub local_types: Option<TypesAmendment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypesAmendment {
    pub add: &'static str,
    pub remove: &'static str,
}

pub const REFLECT_SHIM: &str = "import 'core-js/es7/reflect';";
pub const ZONE_SHIM: &str = "import 'zone.js/dist/zone';";

pub static LIBRARY_PROFILE: KindProfile = KindProfile {
    kind: ProjectKind::Library,
    shim_imports: &[],
    spec_files: &["src/test.ts"],
    polyfills: None,
    placeholder_options: &[],
    local_types: Some(TypesAmendment {
        add: "jasmine",
        remove: "node",
    }),
};

pub static APPLICATION_PROFILE: KindProfile = KindProfile {
    kind: ProjectKind::Application,
    shim_imports: &[REFLECT_SHIM, ZONE_SHIM],
    spec_files: &["src/test.ts", "src/polyfills.ts"],
    polyfills: Some("src/polyfills.ts"),
    placeholder_options: &["styles", "scripts", "assets"],
    local_types: None,
};

pub fn profile_for(kind: ProjectKind) -> &'static KindProfile {
    match kind {
        ProjectKind::Library => &LIBRARY_PROFILE,
        ProjectKind::Application => &APPLICATION_PROFILE,
    }
}
