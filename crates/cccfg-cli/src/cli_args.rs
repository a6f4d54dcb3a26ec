use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "cccfg", version, about = "Manage launch profiles for the Claude CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage launch profiles.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Manage profile groups.
    #[command(subcommand)]
    Group(GroupCommand),
    /// Print the launch command for a profile.
    Print(LaunchArgs),
    /// Copy the launch command for a profile to the clipboard.
    Copy(LaunchArgs),
    /// Open a terminal tab and run the launch command for a profile.
    Launch(LaunchArgs),
    /// Show where profiles and groups are stored on disk.
    Path,
}

/// Profile management subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// List profiles, optionally narrowed to one group.
    List(ConfigListArgs),
    /// Show a single profile (the API key is masked).
    Show(ConfigShowArgs),
    /// Create a new profile.
    #[command(alias = "add")]
    Create(ConfigCreateArgs),
    /// Update an existing profile by name.
    Update(ConfigUpdateArgs),
    /// Delete a profile by name.
    #[command(alias = "remove")]
    Delete(ConfigDeleteArgs),
}

/// Group management subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum GroupCommand {
    /// List groups in display order.
    List,
    /// Create a new group.
    #[command(alias = "add")]
    Create(GroupCreateArgs),
    /// Update an existing group by name.
    Update(GroupUpdateArgs),
    /// Delete a group by name; its profiles move to the default group.
    #[command(alias = "remove")]
    Delete(GroupDeleteArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ConfigListArgs {
    /// Only show profiles filed under this group (name or id).
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigShowArgs {
    /// Profile name or id.
    pub profile: String,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigCreateArgs {
    #[arg(long)]
    pub name: String,

    /// API endpoint the profile points at (must start with http).
    #[arg(long = "api-url", default_value = cccfg_core::DEFAULT_API_URL)]
    pub api_url: String,

    /// API key; prompted for interactively when omitted.
    #[arg(long = "api-key")]
    pub api_key: Option<String>,

    /// Directory the CLI starts in.
    #[arg(long = "working-directory", value_hint = ValueHint::DirPath)]
    pub working_directory: String,

    /// Model name exported as ANTHROPIC_MODEL; empty means the tool default.
    #[arg(long = "model", default_value = "")]
    pub model_name: String,

    /// Mark the profile as the preferred one.
    #[arg(long = "default", action = ArgAction::SetTrue)]
    pub is_default: bool,

    /// Launch with --dangerously-skip-permissions.
    #[arg(long = "dangerous", action = ArgAction::SetTrue)]
    pub is_dangerous_mode: bool,

    /// Group to file the profile under (name or id).
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigUpdateArgs {
    /// Profile to update (name or id).
    pub profile: String,

    /// New display name.
    #[arg(long = "rename", value_name = "NAME")]
    pub rename: Option<String>,

    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// New API key; pass an empty value to be prompted interactively.
    #[arg(long = "api-key", num_args = 0..=1, default_missing_value = "")]
    pub api_key: Option<String>,

    #[arg(long = "working-directory", value_hint = ValueHint::DirPath)]
    pub working_directory: Option<String>,

    /// New model name; pass an empty value to clear it.
    #[arg(long = "model")]
    pub model_name: Option<String>,

    /// Toggle the preferred-profile marker.
    #[arg(
        long = "default",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub is_default: Option<bool>,

    /// Toggle --dangerously-skip-permissions.
    #[arg(
        long = "dangerous",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub is_dangerous_mode: Option<bool>,

    /// Move the profile to another group (name or id).
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigDeleteArgs {
    /// Profile name or id.
    pub profile: String,
}

#[derive(Debug, Clone, Args)]
pub struct GroupCreateArgs {
    #[arg(long)]
    pub name: String,

    /// Symbolic color: blue, green, red, orange, purple or pink.
    #[arg(long, default_value = "blue")]
    pub color: String,

    /// Free-form icon name.
    #[arg(long, default_value = "folder")]
    pub icon: String,

    /// Position in the group list (ascending).
    #[arg(long = "sort-order", default_value_t = 0)]
    pub sort_order: i64,
}

#[derive(Debug, Clone, Args)]
pub struct GroupUpdateArgs {
    /// Group to update (name or id).
    pub group: String,

    /// New display name.
    #[arg(long = "rename", value_name = "NAME")]
    pub rename: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long = "sort-order")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct GroupDeleteArgs {
    /// Group name or id.
    pub group: String,
}

/// Arguments shared by print, copy and launch.
#[derive(Debug, Clone, Args)]
pub struct LaunchArgs {
    /// Profile name or id.
    pub profile: String,

    /// Directory holding the claude binary, prepended to PATH. Falls back to
    /// the CCCFG_TOOLCHAIN_PATH environment variable.
    #[arg(long = "toolchain-path", value_hint = ValueHint::DirPath)]
    pub toolchain_path: Option<String>,

    /// Escape quotes and shell metacharacters in interpolated values instead
    /// of splicing them in verbatim.
    #[arg(long, action = ArgAction::SetTrue)]
    pub escaped: bool,

    /// Terminal application to target (launch only).
    #[arg(long, value_enum, default_value_t = TerminalApp::Iterm)]
    pub terminal: TerminalApp,
}

/// Terminal applications the launcher can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TerminalApp {
    /// iTerm2.
    Iterm,
    /// The stock macOS Terminal.
    Terminal,
}
