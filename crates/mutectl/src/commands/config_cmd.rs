//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use mutectl_config::{Preferences, config_path, load_preferences, load_preferences_or_default,
    save_preferences};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Set { key, value } => set(key, value, global),
        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }
    }
}

/// Guided setup: prompt for every preference, seeded with current values.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let current = load_preferences_or_default();

    let api_endpoint: String = Input::new()
        .with_prompt("Controller endpoint")
        .default(current.api_endpoint)
        .interact_text()
        .map_err(prompt_err)?;

    let status_refresh_interval: u64 = Input::new()
        .with_prompt("Status refresh interval (seconds)")
        .default(current.status_refresh_interval)
        .interact_text()
        .map_err(prompt_err)?;

    let timeout: u64 = Input::new()
        .with_prompt("Request timeout (seconds)")
        .default(current.timeout)
        .interact_text()
        .map_err(prompt_err)?;

    let confirm_leave = Confirm::new()
        .with_prompt("Confirm before leaving a meeting?")
        .default(current.confirm_leave)
        .interact()
        .map_err(prompt_err)?;

    let confirm_mute_in_presentation = Confirm::new()
        .with_prompt("Confirm microphone toggles while presenting or recording?")
        .default(current.confirm_mute_in_presentation)
        .interact()
        .map_err(prompt_err)?;

    let confirm_video_in_presentation = Confirm::new()
        .with_prompt("Confirm camera toggles while presenting or recording?")
        .default(current.confirm_video_in_presentation)
        .interact()
        .map_err(prompt_err)?;

    let show_toasts = Confirm::new()
        .with_prompt("Show outcome notices after commands?")
        .default(current.show_toasts)
        .interact()
        .map_err(prompt_err)?;

    let prefs = Preferences {
        api_endpoint,
        status_refresh_interval,
        timeout,
        confirm_leave,
        confirm_mute_in_presentation,
        confirm_video_in_presentation,
        show_toasts,
    };
    prefs.validate()?;
    save_preferences(&prefs)?;

    if !global.quiet {
        eprintln!("Config written to {}", config_path().display());
    }
    Ok(())
}

/// Display the resolved configuration (file + env merged).
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let prefs = load_preferences()?;

    let out = output::render_single(
        &global.output,
        &prefs,
        |p| toml::to_string_pretty(p).expect("serialization should not fail"),
        |p| p.api_endpoint.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Set a single preference key and persist the file.
fn set(key: &str, value: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut prefs = load_preferences_or_default();

    match key {
        "api_endpoint" => prefs.api_endpoint = value.into(),
        "status_refresh_interval" => prefs.status_refresh_interval = parse_u64(key, value)?,
        "timeout" => prefs.timeout = parse_u64(key, value)?,
        "confirm_leave" => prefs.confirm_leave = parse_bool(key, value)?,
        "confirm_mute_in_presentation" => {
            prefs.confirm_mute_in_presentation = parse_bool(key, value)?;
        }
        "confirm_video_in_presentation" => {
            prefs.confirm_video_in_presentation = parse_bool(key, value)?;
        }
        "show_toasts" => prefs.show_toasts = parse_bool(key, value)?,
        other => {
            return Err(CliError::Validation {
                field: "key".into(),
                reason: format!(
                    "unknown key '{other}' (valid: api_endpoint, status_refresh_interval, \
                     timeout, confirm_leave, confirm_mute_in_presentation, \
                     confirm_video_in_presentation, show_toasts)"
                ),
            });
        }
    }

    prefs.validate()?;
    save_preferences(&prefs)?;

    if !global.quiet {
        eprintln!("{key} = {value}");
    }
    Ok(())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("expected a number, got '{value}'"),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CliError> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(CliError::Validation {
            field: key.into(),
            reason: format!("expected true/false, got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_u64};

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        for v in ["true", "yes", "on", "1"] {
            assert_eq!(parse_bool("k", v).ok(), Some(true), "value {v:?}");
        }
        for v in ["false", "no", "off", "0"] {
            assert_eq!(parse_bool("k", v).ok(), Some(false), "value {v:?}");
        }
        assert!(parse_bool("k", "maybe").is_err());
    }

    #[test]
    fn u64_parsing_rejects_garbage() {
        assert_eq!(parse_u64("k", "5").ok(), Some(5));
        assert!(parse_u64("k", "five").is_err());
    }
}
