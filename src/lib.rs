pub mod config;
pub mod generators;
pub mod resolver;
pub mod runner;
pub mod tree;
pub mod ui;
pub mod workspace;

use std::path::PathBuf;

use crate::generators::{is_generator, GENERATORS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(GenerateArgs),
    Projects(ProjectsArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    pub generator: String,
    pub project: String,
    pub repo_override: Option<PathBuf>,
    pub dry_run: bool,
    pub output_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectsArgs {
    pub repo_override: Option<PathBuf>,
    pub output_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliParseError {
    MissingRepoValue,
    MissingProjectValue,
    MissingProject { generator: String },
    UnknownCommand(String),
    UnknownArgument(String),
}

impl std::fmt::Display for CliParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliParseError::MissingRepoValue => write!(f, "--repo requires a value"),
            CliParseError::MissingProjectValue => write!(f, "--project requires a value"),
            CliParseError::MissingProject { generator } => {
                write!(f, "`{generator}` requires --project <NAME>")
            }
            CliParseError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            CliParseError::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliParseError {}

pub fn parse_command<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(cmd) = args.next() else {
        return Ok(Command::Help);
    };

    if cmd == "--help" || cmd == "-h" || cmd == "help" {
        return Ok(Command::Help);
    }
    if cmd == "projects" {
        return parse_projects(args);
    }
    if is_generator(&cmd) {
        return parse_generate(cmd, args);
    }

    Err(CliParseError::UnknownCommand(cmd))
}

fn parse_generate<I>(generator: String, args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut project: Option<String> = None;
    let mut repo_override: Option<PathBuf> = None;
    let mut dry_run = false;
    let mut output_json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--project" | "-p" => {
                let Some(name) = args.next() else {
                    return Err(CliParseError::MissingProjectValue);
                };
                project = Some(name);
            }
            "--repo" => {
                let Some(path) = args.next() else {
                    return Err(CliParseError::MissingRepoValue);
                };
                repo_override = Some(PathBuf::from(path));
            }
            "--dry-run" => dry_run = true,
            "--json" => output_json = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(CliParseError::UnknownArgument(other.to_owned())),
        }
    }

    let Some(project) = project else {
        return Err(CliParseError::MissingProject { generator });
    };

    Ok(Command::Generate(GenerateArgs {
        generator,
        project,
        repo_override,
        dry_run,
        output_json,
    }))
}

fn parse_projects<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut repo_override: Option<PathBuf> = None;
    let mut output_json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--repo" => {
                let Some(path) = args.next() else {
                    return Err(CliParseError::MissingRepoValue);
                };
                repo_override = Some(PathBuf::from(path));
            }
            "--json" => output_json = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(CliParseError::UnknownArgument(other.to_owned())),
        }
    }

    Ok(Command::Projects(ProjectsArgs {
        repo_override,
        output_json,
    }))
}

pub fn usage() -> String {
    let generators = GENERATORS
        .iter()
        .map(|(id, description)| format!("  {id:<18}{description}"))
        .collect::<Vec<String>>()
        .join("\n");
    format!(
        "workgen\n\nUSAGE:\n  workgen <generator> --project <NAME> [--repo <PATH>] [--dry-run] [--json]\n  workgen projects [--repo <PATH>] [--json]\n\nGENERATORS:\n{generators}\n\nCOMMANDS:\n  projects          List projects declared in the workspace manifest\n\nOPTIONS:\n  -p, --project <NAME>  Target project from the workspace manifest\n  --repo <PATH>         Override the workspace root\n  --dry-run             Show planned changes without writing files\n  --json                Print a machine-readable payload\n\nGENERAL:\n  -h, --help            Print help\n"
    )
}

pub fn print_usage() {
    eprintln!("{}", usage());
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
