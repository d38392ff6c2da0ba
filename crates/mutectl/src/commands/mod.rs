//! Command handlers, one module per intent.

pub mod config_cmd;
pub mod leave;
pub mod mute;
pub mod status;
pub mod util;
pub mod video;

use mutectl_api::ControllerClient;
use mutectl_config::Preferences;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-backed command to its handler.
pub async fn dispatch(
    cmd: Command,
    client: &ControllerClient,
    prefs: &Preferences,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(client, global).await,
        Command::Mute => mute::handle(client, prefs, global).await,
        Command::Video => video::handle(client, prefs, global).await,
        Command::Leave => leave::handle(client, prefs, global).await,
        // Handled before dispatch — no controller needed.
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in run()"),
    }
}
