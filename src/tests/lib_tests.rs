use super::{parse_command, usage, CliParseError, Command, GenerateArgs, ProjectsArgs};
use std::path::PathBuf;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn parse_defaults_to_help_without_command() {
    let cmd = parse_command(Vec::<String>::new()).expect("parse should succeed");
    assert_eq!(cmd, Command::Help);
}

#[test]
fn parse_karma_project_with_all_flags() {
    let cmd = parse_command(args(&[
        "karma-project",
        "--project",
        "lib1",
        "--repo",
        "/tmp/ws",
        "--dry-run",
        "--json",
    ]))
    .expect("parse should succeed");
    assert_eq!(
        cmd,
        Command::Generate(GenerateArgs {
            generator: "karma-project".to_owned(),
            project: "lib1".to_owned(),
            repo_override: Some(PathBuf::from("/tmp/ws")),
            dry_run: true,
            output_json: true,
        })
    );
}

#[test]
fn parse_karma_project_requires_project() {
    let err = parse_command(args(&["karma-project", "--dry-run"])).expect_err("missing project");
    assert_eq!(
        err,
        CliParseError::MissingProject {
            generator: "karma-project".to_owned()
        }
    );
}

#[test]
fn parse_project_flag_requires_value() {
    let err = parse_command(args(&["karma-project", "-p"])).expect_err("missing value");
    assert_eq!(err, CliParseError::MissingProjectValue);
}

#[test]
fn parse_projects_with_repo() {
    let cmd = parse_command(args(&["projects", "--repo", "/tmp/ws"])).expect("parse");
    assert_eq!(
        cmd,
        Command::Projects(ProjectsArgs {
            repo_override: Some(PathBuf::from("/tmp/ws")),
            output_json: false,
        })
    );
}

#[test]
fn parse_rejects_unknown_command_and_argument() {
    assert_eq!(
        parse_command(args(&["jest-project"])).expect_err("unknown command"),
        CliParseError::UnknownCommand("jest-project".to_owned())
    );
    assert_eq!(
        parse_command(args(&["projects", "--force"])).expect_err("unknown argument"),
        CliParseError::UnknownArgument("--force".to_owned())
    );
}

#[test]
fn usage_lists_registered_generators() {
    let text = usage();
    assert!(text.contains("USAGE:"));
    assert!(text.contains("karma-project"));
    assert!(text.contains("projects"));
}
