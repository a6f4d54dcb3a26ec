//! Core library crate: profile and group storage plus the launch-command
//! builder for the Claude CLI.
//!
//! Everything here is synchronous and single-process. The persisted files
//! are not locked; two processes mutating the same store race on a
//! last-writer-wins basis, which is acceptable for a single-user desktop
//! tool.

pub mod command;
pub mod logging;
pub mod model;
pub mod store;

pub use command::{
    DEFAULT_TOOLCHAIN_PATH, ShellQuoting, TOOLCHAIN_PATH_ENV, build_launch_command,
    build_launch_command_with,
};
pub use logging::{LoggingDestination, LoggingError, current_log_path, init_logging};
pub use model::{
    DEFAULT_API_URL, Group, GroupColor, Profile, ValidationIssue, default_group_id,
};
pub use store::{
    GroupStore, ProfileStore, StoreError, configs_path, groups_path, storage_directory,
};
