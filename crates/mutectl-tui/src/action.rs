//! Messages flowing through the app's action channel.

use mutectl_api::StatusRecord;

/// Everything the main loop reacts to, from the poller, command tasks,
/// and key handling.
#[derive(Debug)]
pub enum Action {
    /// A fresh status snapshot arrived; replaces the previous one wholesale.
    StatusUpdated(StatusRecord),
    /// The poll (or an explicit refresh) failed; the view shows this inline.
    StatusError(String),
    /// A fired command finished; carries the outcome notice.
    CommandCompleted(String),
    /// A fired command failed; carries the diagnostic.
    CommandFailed(String),
}

/// A state-changing intent awaiting confirmation or dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ToggleMicrophone,
    ToggleVideo,
    LeaveMeeting,
}
