//! Leave-meeting handler.

use mutectl_api::ControllerClient;
use mutectl_config::Preferences;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

/// Leave the current meeting.
///
/// Unlike the toggles, this refuses outright when no meeting is active —
/// there is nothing to leave, and the controller would 404 anyway.
pub async fn handle(
    client: &ControllerClient,
    prefs: &Preferences,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let status = client.status().await?;

    if !status.is_running() {
        return Err(CliError::ControllerNotRunning);
    }

    if !status.is_in_meeting() {
        return Err(CliError::NoActiveMeeting {
            message: "You are not in a meeting.".into(),
        });
    }

    if prefs.confirm_leave && !util::confirm("Leave the current meeting?", global.yes)? {
        util::notify("Cancelled — staying in the meeting", prefs, global);
        return Ok(());
    }

    client.leave_meeting().await?;
    util::notify("Left the meeting", prefs, global);
    Ok(())
}
