//! Microphone toggle handler.

use mutectl_api::ControllerClient;
use mutectl_config::Preferences;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

/// Toggle the microphone.
///
/// Flow: fetch status → gate on controller health → optionally confirm when
/// presenting/recording → POST the toggle → re-fetch → report the new state.
/// Toggling outside a meeting is allowed; the notice calls it out.
pub async fn handle(
    client: &ControllerClient,
    prefs: &Preferences,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let status = client.status().await?;

    if !status.is_running() {
        return Err(CliError::ControllerNotRunning);
    }

    if prefs.confirm_mute_in_presentation && (status.is_presenting() || status.is_recording()) {
        let verb = if status.is_muted() { "Unmute" } else { "Mute" };
        let activity = if status.is_presenting() {
            "presenting"
        } else {
            "recording"
        };
        let prompt = format!("{verb} the microphone while {activity}?");

        if !util::confirm(&prompt, global.yes)? {
            util::notify("Cancelled — microphone unchanged", prefs, global);
            return Ok(());
        }
    }

    client.toggle_microphone().await?;
    let new_status = client.status().await?;

    let outcome = if new_status.is_muted() {
        "Microphone muted"
    } else {
        "Microphone unmuted"
    };
    if new_status.is_in_meeting() {
        util::notify(outcome, prefs, global);
    } else {
        util::notify(&format!("{outcome} (not in a meeting)"), prefs, global);
    }
    Ok(())
}
