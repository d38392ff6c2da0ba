use thiserror::Error;

/// Which client operation a failure belongs to.
///
/// Remediation text depends on the operation: a 404 means "endpoint missing"
/// when fetching status but "no active meeting" when leaving one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /v1/status`
    Status,
    /// `POST /v1/mute`
    ToggleMicrophone,
    /// `POST /v1/video`
    ToggleVideo,
    /// `POST /v1/leave`
    LeaveMeeting,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Status => "status fetch",
            Self::ToggleMicrophone => "microphone toggle",
            Self::ToggleVideo => "camera toggle",
            Self::LeaveMeeting => "leave meeting",
        };
        f.write_str(label)
    }
}

/// Top-level error type for the `mutectl-api` crate.
///
/// Mirrors the three-tier wire taxonomy: the transport never reached the
/// controller, the controller answered with a non-success status, or the
/// body wasn't valid JSON. The CLI and TUI map these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connection refused, DNS failure, or timeout.
    #[error("Could not connect to the controller ({operation}): {message}")]
    Connectivity { operation: Operation, message: String },

    /// The controller answered with a non-2xx HTTP status.
    #[error("Controller rejected {operation} (HTTP {status}): {message}")]
    Protocol {
        operation: Operation,
        status: u16,
        message: String,
    },

    /// Response body was not valid JSON.
    #[error("Invalid response from controller ({operation}): {message}")]
    Parse {
        operation: Operation,
        message: String,
        body: String,
    },

    /// The configured endpoint is not a valid URL.
    #[error("Invalid controller URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl Error {
    /// Returns `true` if the controller could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Returns `true` if this is a "not found" protocol error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Protocol { status: 404, .. })
    }

    /// The HTTP status carried by a protocol error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The operation this error belongs to, if it came off the wire.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Connectivity { operation, .. }
            | Self::Protocol { operation, .. }
            | Self::Parse { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Remediation text for a non-2xx response, keyed by (operation, status).
///
/// One classifier for all four operations — the per-operation prose blocks
/// this replaces drifted apart over time, so the special cases live here:
/// 404 on status (endpoint missing), 403 on either toggle (device
/// permissions), 404 on leave (no active meeting).
pub(crate) fn remediation(operation: Operation, status: u16) -> String {
    match (operation, status) {
        (Operation::Status, 404) => "The control API endpoint was not found. Check that the \
            controller is running, that the endpoint is correct (default \
            http://localhost:3491), and that the controller is up to date."
            .into(),

        (Operation::ToggleMicrophone, 403) => "The controller is not allowed to control the \
            microphone. Grant it microphone access in the system privacy settings and close \
            any other app holding the device."
            .into(),

        (Operation::ToggleVideo, 403) => "The controller is not allowed to control the camera. \
            Grant it camera access in the system privacy settings and close any other app \
            holding the device."
            .into(),

        (Operation::LeaveMeeting, 404) => "No active meeting was found. Check that you are \
            still in a meeting and that your meeting app is supported and responding."
            .into(),

        (op, status) => format!(
            "The controller rejected the {op} request (HTTP {status}). Check that the \
             controller is healthy and up to date and that your meeting app is detected."
        ),
    }
}

/// Guidance for transport-level failures, shared by every operation.
pub(crate) fn connectivity_guidance(timed_out: bool) -> &'static str {
    if timed_out {
        "The controller did not respond in time. Check that it is running and not hung, \
         and that the endpoint is correct (default http://localhost:3491)."
    } else {
        "Check that the controller is installed and running (look for it in the system \
         tray), that the endpoint is correct (default http://localhost:3491), and that no \
         firewall is blocking the port."
    }
}

#[cfg(test)]
mod tests {
    use super::{Operation, remediation};

    #[test]
    fn leave_404_mentions_missing_meeting() {
        let text = remediation(Operation::LeaveMeeting, 404);
        assert!(text.contains("No active meeting"));
    }

    #[test]
    fn toggle_403_mentions_permissions() {
        let mic = remediation(Operation::ToggleMicrophone, 403);
        let cam = remediation(Operation::ToggleVideo, 403);
        assert!(mic.contains("microphone access"));
        assert!(cam.contains("camera access"));
    }

    #[test]
    fn generic_status_is_distinct_from_special_cases() {
        let generic = remediation(Operation::LeaveMeeting, 500);
        assert!(!generic.contains("No active meeting"));
        assert!(generic.contains("HTTP 500"));
    }
}
