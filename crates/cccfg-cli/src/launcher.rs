//! The two collaborators a finished command line is handed to: the system
//! clipboard, and a terminal driven through AppleScript.

use std::process::Command;

use thiserror::Error;
use tracing::debug;

use crate::cli_args::TerminalApp;

/// Failures while handing the command string off to the host system.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to access clipboard: {0}")]
    Clipboard(String),
    #[error("failed to run osascript: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("terminal automation failed: {0}")]
    Automation(String),
    #[error("terminal automation requires macOS")]
    UnsupportedPlatform,
}

/// Put a plain string on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), LaunchError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| LaunchError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| LaunchError::Clipboard(e.to_string()))?;
    Ok(())
}

/// Open (or reuse) a terminal window and type the command into it for
/// execution.
pub fn launch_in_terminal(command: &str, terminal: TerminalApp) -> Result<(), LaunchError> {
    if !cfg!(target_os = "macos") {
        return Err(LaunchError::UnsupportedPlatform);
    }

    let script = match terminal {
        TerminalApp::Iterm => iterm_script(command),
        TerminalApp::Terminal => terminal_app_script(command),
    };
    debug!(%script, "running osascript");

    let output = Command::new("osascript").args(["-e", &script]).output()?;
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(LaunchError::Automation(stderr.trim().to_string()))
    }
}

/// Escape a string for splicing between double quotes in AppleScript source.
fn applescript_quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn iterm_script(command: &str) -> String {
    format!(
        r#"tell application "iTerm2"
    if it is running then
        tell current window to create tab with default profile
    else
        activate
        delay 1
    end if
    tell current session of current window
        write text "{}"
    end tell
end tell"#,
        applescript_quote(command)
    )
}

fn terminal_app_script(command: &str) -> String {
    format!(
        r#"tell application "Terminal"
    activate
    do script "{}"
end tell"#,
        applescript_quote(command)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applescript_quote_escapes_quotes_and_backslashes() {
        assert_eq!(applescript_quote(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(applescript_quote(r"a\b"), r"a\\b");
        assert_eq!(applescript_quote("plain"), "plain");
    }

    #[test]
    fn test_iterm_script_embeds_escaped_command() {
        let script = iterm_script(r#"cd "/tmp" && claude"#);
        assert!(script.contains(r#"write text "cd \"/tmp\" && claude""#));
        assert!(script.starts_with(r#"tell application "iTerm2""#));
    }

    #[test]
    fn test_terminal_script_embeds_escaped_command() {
        let script = terminal_app_script(r#"cd "/tmp" && claude"#);
        assert!(script.contains(r#"do script "cd \"/tmp\" && claude""#));
    }
}
