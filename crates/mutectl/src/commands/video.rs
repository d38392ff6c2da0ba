//! Camera toggle handler.

use mutectl_api::ControllerClient;
use mutectl_config::Preferences;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

/// Toggle the camera. Same flow as the microphone toggle, gated by
/// `confirm_video_in_presentation` instead.
pub async fn handle(
    client: &ControllerClient,
    prefs: &Preferences,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let status = client.status().await?;

    if !status.is_running() {
        return Err(CliError::ControllerNotRunning);
    }

    if prefs.confirm_video_in_presentation && (status.is_presenting() || status.is_recording()) {
        let verb = if status.is_video_on() {
            "Turn off"
        } else {
            "Turn on"
        };
        let activity = if status.is_presenting() {
            "presenting"
        } else {
            "recording"
        };
        let prompt = format!("{verb} the camera while {activity}?");

        if !util::confirm(&prompt, global.yes)? {
            util::notify("Cancelled — camera unchanged", prefs, global);
            return Ok(());
        }
    }

    client.toggle_video().await?;
    let new_status = client.status().await?;

    let outcome = if new_status.is_video_on() {
        "Camera on"
    } else {
        "Camera off"
    };
    if new_status.is_in_meeting() {
        util::notify(outcome, prefs, global);
    } else {
        util::notify(&format!("{outcome} (not in a meeting)"), prefs, global);
    }
    Ok(())
}
