//! CLI error types with miette diagnostics.
//!
//! Maps `mutectl_api::Error` variants into user-facing errors with
//! actionable help text. The mapping happens exactly once, here — command
//! handlers never format remediation prose themselves.

use miette::Diagnostic;
use thiserror::Error;

use mutectl_api::Operation;

/// Exit codes, mirroring the usual sysexits-style split.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the controller")]
    #[diagnostic(
        code(mutectl::connection_failed),
        help(
            "Check that the controller is running (look for it in the system tray),\n\
             that the endpoint is correct (default http://localhost:3491),\n\
             and that no firewall is blocking the port.\n{message}"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Controller is not running")]
    #[diagnostic(
        code(mutectl::not_running),
        help("The controller answered but reports an unhealthy status. Restart it and try again.")
    )]
    ControllerNotRunning,

    // ── Meeting state ────────────────────────────────────────────────
    #[error("No active meeting")]
    #[diagnostic(code(mutectl::no_meeting), help("{message}"))]
    NoActiveMeeting { message: String },

    // ── Permissions ──────────────────────────────────────────────────
    #[error("Controller refused the {operation}")]
    #[diagnostic(code(mutectl::permission_denied), help("{message}"))]
    PermissionDenied {
        operation: Operation,
        message: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Controller rejected the {operation} (HTTP {status})")]
    #[diagnostic(code(mutectl::api_error), help("{message}"))]
    Api {
        operation: Operation,
        status: u16,
        message: String,
    },

    #[error("Controller sent an unreadable response")]
    #[diagnostic(
        code(mutectl::parse_error),
        help("The response was not valid JSON — the controller may be outdated.\n{message}")
    )]
    Parse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(mutectl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(mutectl::config))]
    Config(#[from] mutectl_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(mutectl::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::ControllerNotRunning => exit_code::CONNECTION,
            Self::NoActiveMeeting { .. } => exit_code::NOT_FOUND,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── api::Error → CliError mapping ────────────────────────────────────

impl From<mutectl_api::Error> for CliError {
    fn from(err: mutectl_api::Error) -> Self {
        match err {
            mutectl_api::Error::Connectivity { message, .. } => {
                CliError::ConnectionFailed { message }
            }

            mutectl_api::Error::Protocol {
                operation: Operation::LeaveMeeting,
                status: 404,
                message,
            } => CliError::NoActiveMeeting { message },

            mutectl_api::Error::Protocol {
                operation: operation @ (Operation::ToggleMicrophone | Operation::ToggleVideo),
                status: 403,
                message,
            } => CliError::PermissionDenied { operation, message },

            mutectl_api::Error::Protocol {
                operation,
                status,
                message,
            } => CliError::Api {
                operation,
                status,
                message,
            },

            mutectl_api::Error::Parse { message, .. } => CliError::Parse { message },

            mutectl_api::Error::InvalidUrl(e) => CliError::Validation {
                field: "endpoint".into(),
                reason: e.to_string(),
            },

            mutectl_api::Error::ClientBuild(message) => CliError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, exit_code};
    use mutectl_api::{Error, Operation};

    #[test]
    fn leave_404_maps_to_no_active_meeting() {
        let err: CliError = Error::Protocol {
            operation: Operation::LeaveMeeting,
            status: 404,
            message: "No active meeting was found.".into(),
        }
        .into();
        assert!(matches!(err, CliError::NoActiveMeeting { .. }));
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn toggle_403_maps_to_permission_denied() {
        let err: CliError = Error::Protocol {
            operation: Operation::ToggleVideo,
            status: 403,
            message: "camera access".into(),
        }
        .into();
        assert!(matches!(err, CliError::PermissionDenied { .. }));
        assert_eq!(err.exit_code(), exit_code::PERMISSION);
    }

    #[test]
    fn status_404_stays_generic_api_error() {
        let err: CliError = Error::Protocol {
            operation: Operation::Status,
            status: 404,
            message: "endpoint".into(),
        }
        .into();
        assert!(matches!(err, CliError::Api { status: 404, .. }));
    }

    #[test]
    fn connectivity_maps_to_connection_exit_code() {
        let err: CliError = Error::Connectivity {
            operation: Operation::Status,
            message: "refused".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }
}
