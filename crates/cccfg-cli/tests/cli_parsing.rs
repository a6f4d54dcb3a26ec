use cccfg_cli::cli_args::{Cli, Command, ConfigCommand, GroupCommand, TerminalApp};
use clap::Parser;

// Integration tests for the argument surface: every subcommand must parse
// the flag spellings the help text advertises.

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments should parse")
}

#[test]
fn test_config_create_full_flag_set() {
    let cli = parse(&[
        "cccfg",
        "config",
        "create",
        "--name",
        "work",
        "--api-url",
        "https://proxy.example.com",
        "--api-key",
        "sk-test",
        "--working-directory",
        "/tmp/proj",
        "--model",
        "claude-sonnet-4-5",
        "--default",
        "--dangerous",
        "--group",
        "servers",
    ]);
    let Command::Config(ConfigCommand::Create(args)) = cli.command else {
        panic!("expected config create");
    };
    assert_eq!(args.name, "work");
    assert_eq!(args.api_url, "https://proxy.example.com");
    assert_eq!(args.api_key.as_deref(), Some("sk-test"));
    assert_eq!(args.working_directory, "/tmp/proj");
    assert_eq!(args.model_name, "claude-sonnet-4-5");
    assert!(args.is_default);
    assert!(args.is_dangerous_mode);
    assert_eq!(args.group.as_deref(), Some("servers"));
}

#[test]
fn test_config_create_defaults() {
    let cli = parse(&[
        "cccfg",
        "config",
        "create",
        "--name",
        "minimal",
        "--working-directory",
        "/tmp",
    ]);
    let Command::Config(ConfigCommand::Create(args)) = cli.command else {
        panic!("expected config create");
    };
    assert_eq!(args.api_url, cccfg_core::DEFAULT_API_URL);
    assert!(args.api_key.is_none(), "omitted key triggers a prompt");
    assert_eq!(args.model_name, "");
    assert!(!args.is_default);
    assert!(!args.is_dangerous_mode);
    assert!(args.group.is_none());
}

#[test]
fn test_config_create_requires_name() {
    let result = Cli::try_parse_from(["cccfg", "config", "create", "--working-directory", "/tmp"]);
    assert!(result.is_err(), "--name is required");
}

#[test]
fn test_config_add_alias() {
    let cli = parse(&[
        "cccfg",
        "config",
        "add",
        "--name",
        "aliased",
        "--working-directory",
        "/tmp",
    ]);
    assert!(matches!(
        cli.command,
        Command::Config(ConfigCommand::Create(_))
    ));
}

#[test]
fn test_config_update_bare_dangerous_flag_means_true() {
    let cli = parse(&["cccfg", "config", "update", "work", "--dangerous"]);
    let Command::Config(ConfigCommand::Update(args)) = cli.command else {
        panic!("expected config update");
    };
    assert_eq!(args.profile, "work");
    assert_eq!(args.is_dangerous_mode, Some(true));
    assert_eq!(args.is_default, None);
}

#[test]
fn test_config_update_explicit_false_disables_flag() {
    let cli = parse(&["cccfg", "config", "update", "work", "--dangerous", "false"]);
    let Command::Config(ConfigCommand::Update(args)) = cli.command else {
        panic!("expected config update");
    };
    assert_eq!(args.is_dangerous_mode, Some(false));
}

#[test]
fn test_config_update_bare_api_key_requests_prompt() {
    let cli = parse(&["cccfg", "config", "update", "work", "--api-key"]);
    let Command::Config(ConfigCommand::Update(args)) = cli.command else {
        panic!("expected config update");
    };
    assert_eq!(args.api_key.as_deref(), Some(""));
}

#[test]
fn test_group_create_defaults() {
    let cli = parse(&["cccfg", "group", "create", "--name", "servers"]);
    let Command::Group(GroupCommand::Create(args)) = cli.command else {
        panic!("expected group create");
    };
    assert_eq!(args.name, "servers");
    assert_eq!(args.color, "blue");
    assert_eq!(args.icon, "folder");
    assert_eq!(args.sort_order, 0);
}

#[test]
fn test_group_remove_alias() {
    let cli = parse(&["cccfg", "group", "remove", "servers"]);
    assert!(matches!(
        cli.command,
        Command::Group(GroupCommand::Delete(_))
    ));
}

#[test]
fn test_print_with_escaping_and_toolchain_path() {
    let cli = parse(&[
        "cccfg",
        "print",
        "work",
        "--escaped",
        "--toolchain-path",
        "/opt/node/bin",
    ]);
    let Command::Print(args) = cli.command else {
        panic!("expected print");
    };
    assert_eq!(args.profile, "work");
    assert!(args.escaped);
    assert_eq!(args.toolchain_path.as_deref(), Some("/opt/node/bin"));
    assert_eq!(args.terminal, TerminalApp::Iterm);
}

#[test]
fn test_launch_can_target_stock_terminal() {
    let cli = parse(&["cccfg", "launch", "work", "--terminal", "terminal"]);
    let Command::Launch(args) = cli.command else {
        panic!("expected launch");
    };
    assert_eq!(args.terminal, TerminalApp::Terminal);
    assert!(!args.escaped);
}

#[test]
fn test_path_takes_no_arguments() {
    let cli = parse(&["cccfg", "path"]);
    assert!(matches!(cli.command, Command::Path));
    assert!(Cli::try_parse_from(["cccfg", "path", "extra"]).is_err());
}
