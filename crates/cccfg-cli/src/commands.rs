use std::env;
use std::path::Path;

use crate::cli_args::{
    Cli, Command, ConfigCommand, ConfigCreateArgs, ConfigDeleteArgs, ConfigListArgs,
    ConfigShowArgs, ConfigUpdateArgs, GroupCommand, GroupCreateArgs, GroupDeleteArgs,
    GroupUpdateArgs, LaunchArgs, TerminalApp,
};
use crate::launcher;
use cccfg_core::{
    DEFAULT_TOOLCHAIN_PATH, Group, GroupColor, GroupStore, Profile, ProfileStore, ShellQuoting,
    TOOLCHAIN_PATH_ENV, build_launch_command_with, configs_path, current_log_path,
    default_group_id, groups_path,
};
use rpassword::prompt_password;
use uuid::Uuid;

pub fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Config(cmd) => handle_config_command(cmd),
        Command::Group(cmd) => handle_group_command(cmd),
        Command::Print(args) => handle_print(args),
        Command::Copy(args) => handle_copy(args),
        Command::Launch(args) => handle_launch(args),
        Command::Path => handle_path(),
    }
}

fn handle_config_command(command: ConfigCommand) -> Result<(), String> {
    match command {
        ConfigCommand::List(args) => config_list(args),
        ConfigCommand::Show(args) => config_show(args),
        ConfigCommand::Create(args) => config_create(args),
        ConfigCommand::Update(args) => config_update(args),
        ConfigCommand::Delete(args) => config_delete(args),
    }
}

fn handle_group_command(command: GroupCommand) -> Result<(), String> {
    match command {
        GroupCommand::List => group_list(),
        GroupCommand::Create(args) => group_create(args),
        GroupCommand::Update(args) => group_update(args),
        GroupCommand::Delete(args) => group_delete(args),
    }
}

fn config_list(args: ConfigListArgs) -> Result<(), String> {
    let profiles = ProfileStore::open();
    let groups = GroupStore::open();

    let group_filter = match args.group {
        Some(ref key) => Some(resolve_group(&groups, key)?.id),
        None => None,
    };

    let mut shown = 0;
    for profile in profiles.profiles() {
        if let Some(id) = group_filter {
            if profile.group_id != id {
                continue;
            }
        }
        shown += 1;
        let group_name = groups
            .find(profile.group_id)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| groups.default_group().name);
        let marker = if profile.is_default { "*" } else { " " };
        let model = if profile.model_name.is_empty() {
            "-"
        } else {
            profile.model_name.as_str()
        };
        let danger = if profile.is_dangerous_mode {
            "  dangerous"
        } else {
            ""
        };
        let state = if profile.is_valid() {
            ""
        } else {
            "  (incomplete)"
        };
        println!(
            "{marker} {name:<24} [{group_name}]  {url}  model={model}{danger}{state}",
            name = profile.name,
            url = profile.api_url,
        );
    }
    if shown == 0 {
        println!("No profiles found.");
    }
    Ok(())
}

fn config_show(args: ConfigShowArgs) -> Result<(), String> {
    let profiles = ProfileStore::open();
    let groups = GroupStore::open();
    let profile = resolve_profile(&profiles, &args.profile)?;

    let group_name = groups
        .find(profile.group_id)
        .map(|g| g.name.clone())
        .unwrap_or_else(|| groups.default_group().name);

    println!("id:                 {}", profile.id);
    println!("name:               {}", profile.name);
    println!("api url:            {}", profile.api_url);
    println!("api key:            {}", mask_secret(&profile.api_key));
    println!("working directory:  {}", profile.working_directory);
    println!(
        "model:              {}",
        if profile.model_name.is_empty() {
            "(tool default)"
        } else {
            &profile.model_name
        }
    );
    println!("group:              {group_name}");
    println!("default:            {}", profile.is_default);
    println!("dangerous mode:     {}", profile.is_dangerous_mode);

    let issues = profile.validation_issues();
    if !issues.is_empty() {
        println!("incomplete:         {}", format_issues(&issues));
    }
    Ok(())
}

fn config_create(args: ConfigCreateArgs) -> Result<(), String> {
    let mut profiles = ProfileStore::open();
    let groups = GroupStore::open();

    if profiles.find_by_name(&args.name).is_some() {
        return Err(format!("Profile '{}' already exists.", args.name));
    }

    let api_key = match args.api_key {
        Some(key) => key,
        None => prompt_password("Enter API key: ")
            .map_err(|err| format!("Failed to read API key: {err}"))?,
    };

    let mut profile = Profile::new(
        &args.name,
        &args.api_url,
        &api_key,
        &args.working_directory,
    );
    profile.model_name = args.model_name;
    profile.is_default = args.is_default;
    profile.is_dangerous_mode = args.is_dangerous_mode;
    if let Some(ref key) = args.group {
        profile.group_id = resolve_group(&groups, key)?.id;
    }

    warn_if_incomplete(&profile);
    profiles.add(profile).map_err(|err| err.to_string())?;
    println!("Created profile '{}'", args.name);
    Ok(())
}

fn config_update(args: ConfigUpdateArgs) -> Result<(), String> {
    let mut profiles = ProfileStore::open();
    let groups = GroupStore::open();
    let mut profile = resolve_profile(&profiles, &args.profile)?;

    if let Some(name) = args.rename {
        if name != profile.name && profiles.find_by_name(&name).is_some() {
            return Err(format!("Profile '{name}' already exists."));
        }
        profile.name = name;
    }
    if let Some(api_url) = args.api_url {
        profile.api_url = api_url;
    }
    if let Some(api_key) = args.api_key {
        profile.api_key = if api_key.is_empty() {
            prompt_password("Enter API key: ")
                .map_err(|err| format!("Failed to read API key: {err}"))?
        } else {
            api_key
        };
    }
    if let Some(working_directory) = args.working_directory {
        profile.working_directory = working_directory;
    }
    if let Some(model_name) = args.model_name {
        profile.model_name = model_name;
    }
    if let Some(is_default) = args.is_default {
        profile.is_default = is_default;
    }
    if let Some(is_dangerous_mode) = args.is_dangerous_mode {
        profile.is_dangerous_mode = is_dangerous_mode;
    }
    if let Some(ref key) = args.group {
        profile.group_id = resolve_group(&groups, key)?.id;
    }

    warn_if_incomplete(&profile);
    let name = profile.name.clone();
    profiles.update(profile).map_err(|err| err.to_string())?;
    println!("Updated profile '{name}'");
    Ok(())
}

fn config_delete(args: ConfigDeleteArgs) -> Result<(), String> {
    let mut profiles = ProfileStore::open();
    let profile = resolve_profile(&profiles, &args.profile)?;
    let name = profile.name.clone();
    profiles.delete(profile.id).map_err(|err| err.to_string())?;
    println!("Deleted profile '{name}'");
    Ok(())
}

fn group_list() -> Result<(), String> {
    let groups = GroupStore::open();
    let profiles = ProfileStore::open();
    for group in groups.groups() {
        let count = profiles
            .profiles()
            .iter()
            .filter(|p| p.group_id == group.id)
            .count();
        let marker = if group.is_default() { "*" } else { " " };
        println!(
            "{marker} {name:<24} color={color:<8} icon={icon:<16} sort={sort}  ({count} profile{s})",
            name = group.name,
            color = group.color,
            icon = group.icon,
            sort = group.sort_order,
            s = if count == 1 { "" } else { "s" },
        );
    }
    Ok(())
}

fn group_create(args: GroupCreateArgs) -> Result<(), String> {
    let mut groups = GroupStore::open();
    if groups.find_by_name(&args.name).is_some() {
        return Err(format!("Group '{}' already exists.", args.name));
    }
    warn_if_unknown_color(&args.color);

    let mut group = Group::new(&args.name, &args.color, &args.icon);
    group.sort_order = args.sort_order;
    groups.add(group).map_err(|err| err.to_string())?;
    println!("Created group '{}'", args.name);
    Ok(())
}

fn group_update(args: GroupUpdateArgs) -> Result<(), String> {
    let mut groups = GroupStore::open();
    let mut group = resolve_group(&groups, &args.group)?;

    if let Some(name) = args.rename {
        if name != group.name && groups.find_by_name(&name).is_some() {
            return Err(format!("Group '{name}' already exists."));
        }
        group.name = name;
    }
    if let Some(color) = args.color {
        warn_if_unknown_color(&color);
        group.color = color;
    }
    if let Some(icon) = args.icon {
        group.icon = icon;
    }
    if let Some(sort_order) = args.sort_order {
        group.sort_order = sort_order;
    }

    let name = group.name.clone();
    groups.update(group).map_err(|err| err.to_string())?;
    println!("Updated group '{name}'");
    Ok(())
}

fn group_delete(args: GroupDeleteArgs) -> Result<(), String> {
    let mut groups = GroupStore::open();
    let group = resolve_group(&groups, &args.group)?;
    if group.is_default() {
        return Err("The default group cannot be deleted.".to_string());
    }

    // The store never cascades; move orphaned profiles to the default group
    // before dropping the category.
    let mut profiles = ProfileStore::open();
    let moved = profiles
        .reassign_group(group.id, default_group_id())
        .map_err(|err| err.to_string())?;

    groups.delete(group.id).map_err(|err| err.to_string())?;
    if moved > 0 {
        println!(
            "Deleted group '{}' ({moved} profile{s} moved to the default group)",
            group.name,
            s = if moved == 1 { "" } else { "s" },
        );
    } else {
        println!("Deleted group '{}'", group.name);
    }
    Ok(())
}

fn handle_print(args: LaunchArgs) -> Result<(), String> {
    let profiles = ProfileStore::open();
    let profile = resolve_profile(&profiles, &args.profile)?;
    let command = render_command(&profile, &args)?;
    println!("{command}");
    Ok(())
}

fn handle_copy(args: LaunchArgs) -> Result<(), String> {
    let profiles = ProfileStore::open();
    let profile = resolve_profile(&profiles, &args.profile)?;
    let command = render_command(&profile, &args)?;
    launcher::copy_to_clipboard(&command).map_err(|err| err.to_string())?;
    println!("Launch command for '{}' copied to the clipboard.", profile.name);
    Ok(())
}

fn handle_launch(args: LaunchArgs) -> Result<(), String> {
    let profiles = ProfileStore::open();
    let profile = resolve_profile(&profiles, &args.profile)?;
    let command = render_command(&profile, &args)?;

    let expanded = shellexpand::tilde(&profile.working_directory);
    if !Path::new(expanded.as_ref()).is_dir() {
        eprintln!(
            "Warning: working directory '{}' does not exist.",
            profile.working_directory
        );
    }

    launcher::launch_in_terminal(&command, args.terminal).map_err(|err| err.to_string())?;
    let app = match args.terminal {
        TerminalApp::Iterm => "iTerm2",
        TerminalApp::Terminal => "Terminal",
    };
    println!("Launched '{}' in {app}.", profile.name);
    Ok(())
}

fn handle_path() -> Result<(), String> {
    println!("profiles: {}", configs_path().display());
    println!("groups:   {}", groups_path().display());
    if let Some(log_path) = current_log_path() {
        println!("log:      {}", log_path.display());
    }
    Ok(())
}

/// Looks a profile up by name first, then by id. Returns a detached copy so
/// the store can be mutated afterwards.
fn resolve_profile(profiles: &ProfileStore, key: &str) -> Result<Profile, String> {
    if let Some(profile) = profiles.find_by_name(key) {
        return Ok(profile.clone());
    }
    if let Ok(id) = key.parse::<Uuid>() {
        if let Some(profile) = profiles.find(id) {
            return Ok(profile.clone());
        }
    }
    Err(format!("Profile '{key}' not found."))
}

/// Looks a group up by name first, then by id.
fn resolve_group(groups: &GroupStore, key: &str) -> Result<Group, String> {
    if let Some(group) = groups.find_by_name(key) {
        return Ok(group.clone());
    }
    if let Ok(id) = key.parse::<Uuid>() {
        if let Some(group) = groups.find(id) {
            return Ok(group.clone());
        }
    }
    Err(format!("Group '{key}' not found."))
}

fn render_command(profile: &Profile, args: &LaunchArgs) -> Result<String, String> {
    let issues = profile.validation_issues();
    if !issues.is_empty() {
        return Err(format!(
            "Profile '{}' cannot be launched: {}",
            profile.name,
            format_issues(&issues)
        ));
    }

    let toolchain_path = args
        .toolchain_path
        .clone()
        .or_else(|| env::var(TOOLCHAIN_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_TOOLCHAIN_PATH.to_string());
    let quoting = if args.escaped {
        ShellQuoting::Escaped
    } else {
        ShellQuoting::Legacy
    };
    Ok(build_launch_command_with(profile, &toolchain_path, quoting))
}

fn format_issues(issues: &[cccfg_core::ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn warn_if_incomplete(profile: &Profile) {
    let issues = profile.validation_issues();
    if !issues.is_empty() {
        eprintln!(
            "Warning: profile '{}' is saved but cannot be launched yet: {}",
            profile.name,
            format_issues(&issues)
        );
    }
}

fn warn_if_unknown_color(color: &str) {
    if GroupColor::parse(color).is_none() {
        eprintln!("Warning: unknown color '{color}'; the group will display as blue.");
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "••••••••".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}…{suffix}")
}
