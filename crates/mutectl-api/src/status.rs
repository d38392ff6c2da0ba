// Controller status snapshot and the derived boolean flags.

use serde::{Deserialize, Serialize};

/// Flag fields report `"active"` when set; any other value means inactive.
const ACTIVE: &str = "active";

/// Point-in-time snapshot of the controller's state, as returned by
/// `GET /v1/status`.
///
/// A record is replaced wholesale on each fetch — never merged or patched.
/// All fields default when absent so a sparse body still deserializes; the
/// defaults read as "inactive" / "not running" through the predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Meeting-in-progress flag.
    #[serde(default)]
    pub call: String,

    /// Which backend/control surface is driving the meeting app.
    #[serde(default)]
    pub control: String,

    /// Microphone-muted flag.
    #[serde(default)]
    pub mute: String,

    /// Recording-in-progress flag.
    #[serde(default)]
    pub record: String,

    /// Screen-share/presenting flag.
    #[serde(default)]
    pub share: String,

    /// HTTP-style status code from the controller; 200 means healthy.
    #[serde(default)]
    pub status: u16,

    /// State of the optional Teams integration ("disabled" when off).
    #[serde(default)]
    pub teams_api: String,

    /// Camera-on flag.
    #[serde(default)]
    pub video: String,
}

/// The six status predicates live here and ONLY here. The CLI and TUI both
/// branch on controller state; deriving the flags in one place keeps their
/// behavior from drifting apart.
impl StatusRecord {
    /// The controller itself is reachable and healthy.
    pub fn is_running(&self) -> bool {
        self.status == 200
    }

    /// A meeting is currently in progress.
    pub fn is_in_meeting(&self) -> bool {
        self.call == ACTIVE
    }

    /// The microphone is muted.
    pub fn is_muted(&self) -> bool {
        self.mute == ACTIVE
    }

    /// The camera is on.
    pub fn is_video_on(&self) -> bool {
        self.video == ACTIVE
    }

    /// Screen sharing / presenting is in progress.
    pub fn is_presenting(&self) -> bool {
        self.share == ACTIVE
    }

    /// A recording is in progress.
    pub fn is_recording(&self) -> bool {
        self.record == ACTIVE
    }

    /// The Teams integration is configured at all (connected or not).
    pub fn has_teams_integration(&self) -> bool {
        !self.teams_api.is_empty() && self.teams_api != "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::StatusRecord;

    fn record(field: &str, value: &str) -> StatusRecord {
        let mut r = StatusRecord {
            status: 200,
            ..StatusRecord::default()
        };
        match field {
            "call" => r.call = value.into(),
            "mute" => r.mute = value.into(),
            "video" => r.video = value.into(),
            "share" => r.share = value.into(),
            "record" => r.record = value.into(),
            "teams_api" => r.teams_api = value.into(),
            other => panic!("unknown field {other}"),
        }
        r
    }

    #[test]
    fn predicates_require_exact_active() {
        assert!(record("call", "active").is_in_meeting());
        assert!(record("mute", "active").is_muted());
        assert!(record("video", "active").is_video_on());
        assert!(record("share", "active").is_presenting());
        assert!(record("record", "active").is_recording());
    }

    #[test]
    fn predicates_reject_everything_else() {
        for value in ["inactive", "Active", "ACTIVE", "true", "1", ""] {
            assert!(!record("call", value).is_in_meeting(), "call={value:?}");
            assert!(!record("mute", value).is_muted(), "mute={value:?}");
            assert!(!record("video", value).is_video_on(), "video={value:?}");
            assert!(!record("share", value).is_presenting(), "share={value:?}");
            assert!(!record("record", value).is_recording(), "record={value:?}");
        }
    }

    #[test]
    fn running_requires_exactly_200() {
        for status in [0u16, 199, 201, 404, 500] {
            let r = StatusRecord {
                status,
                ..StatusRecord::default()
            };
            assert!(!r.is_running(), "status={status}");
        }
        let r = StatusRecord {
            status: 200,
            ..StatusRecord::default()
        };
        assert!(r.is_running());
    }

    #[test]
    fn defaults_read_as_not_running_and_inactive() {
        let r = StatusRecord::default();
        assert!(!r.is_running());
        assert!(!r.is_in_meeting());
        assert!(!r.is_muted());
        assert!(!r.is_video_on());
        assert!(!r.is_presenting());
        assert!(!r.is_recording());
        assert!(!r.has_teams_integration());
    }

    #[test]
    fn teams_integration_gates_on_disabled() {
        assert!(!record("teams_api", "disabled").has_teams_integration());
        assert!(record("teams_api", "connected").has_teams_integration());
        assert!(record("teams_api", "disconnected").has_teams_integration());
    }

    #[test]
    fn sparse_body_deserializes_with_defaults() {
        let r: StatusRecord =
            serde_json::from_str(r#"{"status": 200, "call": "active"}"#).expect("valid json");
        assert!(r.is_running());
        assert!(r.is_in_meeting());
        assert!(!r.is_muted());
        assert!(r.control.is_empty());
    }
}
