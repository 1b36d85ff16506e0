use std::io::IsTerminal;
use std::path::PathBuf;

use serde_json::json;

use crate::config::{load_config, ConfigError, WorkgenConfig};
use crate::generators::karma::{self, KarmaProject};
use crate::generators::{GenerateError, GenerateOutcome, Generator};
use crate::resolver::{resolve_workspace_root, ResolveError, ResolvedTarget};
use crate::tree::{FileTree, TreeError};
use crate::ui::theme::resolve_color_enabled;
use crate::ui::{KeyValue, NoticeLevel, OutputMode, PlainRenderer, Renderer, TableSpec, UiError};
use crate::workspace::list_projects;
use crate::{usage, Command, GenerateArgs, ProjectsArgs};

#[derive(Debug)]
pub enum RunnerError {
    Cwd(std::io::Error),
    Resolve(ResolveError),
    Config(ConfigError),
    Tree(TreeError),
    Generate(GenerateError),
    UnknownGenerator(String),
    Ui(String),
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunnerError::Cwd(err) => write!(f, "failed to resolve current directory: {err}"),
            RunnerError::Resolve(err) => write!(f, "{err}"),
            RunnerError::Config(err) => write!(f, "{err}"),
            RunnerError::Tree(err) => write!(f, "{err}"),
            RunnerError::Generate(err) => write!(f, "{err}"),
            RunnerError::UnknownGenerator(id) => write!(f, "no generator registered as `{id}`"),
            RunnerError::Ui(msg) => write!(f, "ui render failed: {msg}"),
        }
    }
}

impl std::error::Error for RunnerError {}

impl RunnerError {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            RunnerError::Generate(GenerateError::ProjectNotFound { .. }) => {
                Some("Run `workgen projects` to list the projects in the manifest")
            }
            RunnerError::Generate(GenerateError::ManifestNotFound { .. }) => {
                Some("Set `[workspace] manifest` in workgen.toml or pass --repo <PATH>")
            }
            RunnerError::Resolve(_) => Some("Pass --repo <PATH> to select the workspace root"),
            _ => None,
        }
    }
}

impl From<ResolveError> for RunnerError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl From<ConfigError> for RunnerError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TreeError> for RunnerError {
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<GenerateError> for RunnerError {
    fn from(value: GenerateError) -> Self {
        Self::Generate(value)
    }
}

impl From<UiError> for RunnerError {
    fn from(value: UiError) -> Self {
        Self::Ui(value.to_string())
    }
}

struct Workspace {
    target: ResolvedTarget,
    config: WorkgenConfig,
    tree: FileTree,
}

pub fn run_command(cmd: Command) -> Result<String, RunnerError> {
    match cmd {
        Command::Generate(args) => run_generate(args),
        Command::Projects(args) => run_projects(args),
        Command::Help => Ok(usage()),
    }
}

fn open_workspace(repo_override: Option<PathBuf>) -> Result<Workspace, RunnerError> {
    let cwd = std::env::current_dir().map_err(RunnerError::Cwd)?;
    let target = resolve_workspace_root(cwd, repo_override)?;
    let config = load_config(&target.resolved_root)?;
    let tree = FileTree::load(&target.resolved_root, &config.ignore)?;
    Ok(Workspace {
        target,
        config,
        tree,
    })
}

fn generator_for(id: &str, config: &WorkgenConfig) -> Result<Box<dyn Generator>, RunnerError> {
    match id {
        karma::GENERATOR_ID => Ok(Box::new(
            KarmaProject::new()
                .with_manifest_path(config.manifest.clone())
                .with_builder(config.karma_builder.clone()),
        )),
        other => Err(RunnerError::UnknownGenerator(other.to_owned())),
    }
}

fn run_generate(args: GenerateArgs) -> Result<String, RunnerError> {
    let Workspace {
        target,
        config,
        mut tree,
    } = open_workspace(args.repo_override)?;
    let generator = generator_for(&args.generator, &config)?;
    let outcome = generator.generate(&args.project, &mut tree)?;

    let written = !args.dry_run && !outcome.changes.is_empty();
    if written {
        tree.commit(&target.resolved_root)?;
    }

    if args.output_json {
        let payload = json!({
            "schema": format!("workgen.{}.v1", generator.id()),
            "schema_version": 1,
            "ok": true,
            "root": target.resolved_root.display().to_string(),
            "project": outcome.project.name,
            "kind": outcome.project.kind.label(),
            "dry_run": args.dry_run,
            "written": written,
            "changes": outcome
                .changes
                .iter()
                .map(|change| json!({"path": change.path, "action": change.action.label()}))
                .collect::<Vec<_>>(),
            "skipped": outcome.skipped,
        });
        return serde_json::to_string_pretty(&payload)
            .map_err(|error| RunnerError::Ui(format!("failed to encode json: {error}")));
    }

    render_generate_report(generator.id(), &target, &config, &outcome, args.dry_run)
}

fn render_generate_report(
    generator_id: &str,
    target: &ResolvedTarget,
    config: &WorkgenConfig,
    outcome: &GenerateOutcome,
    dry_run: bool,
) -> Result<String, RunnerError> {
    let mut renderer = stdout_buffer_renderer();
    render_workspace(&mut renderer, target, config)?;

    renderer.section(generator_id)?;
    renderer.key_values(&[
        KeyValue::new("project", outcome.project.name.clone()),
        KeyValue::new("kind", outcome.project.kind.label()),
        KeyValue::new("root", outcome.project.root.clone()),
    ])?;
    renderer.text("")?;

    if outcome.changes.is_empty() {
        renderer.notice(
            NoticeLevel::Info,
            "No changes: project is already up to date.",
        )?;
    } else {
        renderer.table(&TableSpec::new(
            vec!["action".to_owned(), "path".to_owned()],
            outcome
                .changes
                .iter()
                .map(|change| vec![change.action.label().to_owned(), change.path.clone()])
                .collect(),
        ))?;
    }

    if !outcome.skipped.is_empty() {
        renderer.text("")?;
        renderer.bullet_list("skipped", &outcome.skipped)?;
    }

    if dry_run {
        renderer.notice(NoticeLevel::Info, "Dry run: no files were written.")?;
    } else if !outcome.changes.is_empty() {
        renderer.notice(
            NoticeLevel::Success,
            &format!("Wrote {} file(s).", outcome.changes.len()),
        )?;
    }

    into_string(renderer)
}

fn run_projects(args: ProjectsArgs) -> Result<String, RunnerError> {
    let Workspace {
        target,
        config,
        tree,
    } = open_workspace(args.repo_override)?;
    let projects = list_projects(&tree, &config.manifest)?;

    if args.output_json {
        let payload = json!({
            "schema": "workgen.projects.v1",
            "schema_version": 1,
            "ok": true,
            "root": target.resolved_root.display().to_string(),
            "manifest": config.manifest,
            "projects": projects
                .iter()
                .map(|project| json!({
                    "name": project.name,
                    "kind": project.kind.map(|kind| kind.label()),
                    "root": project.root,
                    "test_target": project.has_test_target,
                }))
                .collect::<Vec<_>>(),
        });
        return serde_json::to_string_pretty(&payload)
            .map_err(|error| RunnerError::Ui(format!("failed to encode json: {error}")));
    }

    let mut renderer = stdout_buffer_renderer();
    render_workspace(&mut renderer, &target, &config)?;
    renderer.section("Projects")?;
    if projects.is_empty() {
        renderer.notice(NoticeLevel::Warning, "No projects declared in the manifest.")?;
        return into_string(renderer);
    }
    renderer.table(&TableSpec::new(
        vec![
            "project".to_owned(),
            "kind".to_owned(),
            "root".to_owned(),
            "test".to_owned(),
        ],
        projects
            .iter()
            .map(|project| {
                vec![
                    project.name.clone(),
                    project
                        .kind
                        .map(|kind| kind.label())
                        .unwrap_or("unknown")
                        .to_owned(),
                    project.root.clone().unwrap_or_else(|| "-".to_owned()),
                    if project.has_test_target { "yes" } else { "no" }.to_owned(),
                ]
            })
            .collect(),
    ))?;
    into_string(renderer)
}

fn render_workspace(
    renderer: &mut PlainRenderer<Vec<u8>>,
    target: &ResolvedTarget,
    config: &WorkgenConfig,
) -> Result<(), RunnerError> {
    renderer.section("Workspace")?;
    renderer.key_values(&[
        KeyValue::new("root", target.resolved_root.display().to_string()),
        KeyValue::new("mode", format!("{:?}", target.resolution_mode)),
        KeyValue::new("manifest", config.manifest.clone()),
        KeyValue::new(
            "config",
            config
                .source
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "defaults".to_owned()),
        ),
    ])?;
    renderer.bullet_list("evidence", &target.evidence)?;
    renderer.text("")?;
    Ok(())
}

fn stdout_buffer_renderer() -> PlainRenderer<Vec<u8>> {
    let color_enabled =
        resolve_color_enabled(OutputMode::from_env(), std::io::stdout().is_terminal());
    PlainRenderer::new(Vec::<u8>::new(), color_enabled)
}

fn into_string(renderer: PlainRenderer<Vec<u8>>) -> Result<String, RunnerError> {
    String::from_utf8(renderer.into_inner())
        .map_err(|error| RunnerError::Ui(format!("invalid utf-8 in rendered output: {error}")))
}
