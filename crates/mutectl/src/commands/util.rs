//! Shared helpers for command handlers.

use mutectl_config::Preferences;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Emit an outcome notice to stderr.
///
/// Suppressed by the `show_toasts` preference or `--quiet` — errors still
/// surface through the normal diagnostic path either way.
pub fn notify(message: &str, prefs: &Preferences, global: &GlobalOpts) {
    if prefs.show_toasts && !global.quiet {
        eprintln!("{message}");
    }
}
