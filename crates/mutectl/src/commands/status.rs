//! Status command handler — fetch once, render.

use owo_colors::OwoColorize;
use tabled::Tabled;

use mutectl_api::{ControllerClient, StatusRecord};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl StatusRow {
    fn new(item: &str, state: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            state: state.into(),
            notes: notes.into(),
        }
    }
}

/// Build the table rows for a healthy status snapshot.
///
/// Presenting and Recording only appear while active, and the Teams row
/// only when the integration is configured at all.
fn status_rows(status: &StatusRecord) -> Vec<StatusRow> {
    let mut rows = vec![
        StatusRow::new(
            "Meeting",
            if status.is_in_meeting() {
                "● Active"
            } else {
                "○ Not in meeting"
            },
            if status.control.is_empty() {
                String::new()
            } else {
                format!("via {}", status.control)
            },
        ),
        StatusRow::new(
            "Microphone",
            if status.is_muted() { "Muted" } else { "Unmuted" },
            "",
        ),
        StatusRow::new(
            "Camera",
            if status.is_video_on() { "On" } else { "Off" },
            "",
        ),
    ];

    if status.is_presenting() {
        rows.push(StatusRow::new("Presenting", "● Active", ""));
    }
    if status.is_recording() {
        rows.push(StatusRow::new("Recording", "● Active", ""));
    }
    if status.has_teams_integration() {
        rows.push(StatusRow::new("Teams API", status.teams_api.clone(), ""));
    }

    rows
}

/// One-line summary for `--output plain`.
fn summary_line(status: &StatusRecord) -> String {
    if !status.is_running() {
        return "not-running".into();
    }

    let mut parts = vec![
        if status.is_in_meeting() {
            "in-meeting"
        } else {
            "idle"
        },
        if status.is_muted() { "muted" } else { "unmuted" },
        if status.is_video_on() {
            "camera-on"
        } else {
            "camera-off"
        },
    ];
    if status.is_presenting() {
        parts.push("presenting");
    }
    if status.is_recording() {
        parts.push("recording");
    }
    parts.join(" ")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &ControllerClient, global: &GlobalOpts) -> Result<(), CliError> {
    let status = client.status().await?;

    // Structured formats always emit the raw record, healthy or not.
    if !status.is_running() && matches!(global.output, OutputFormat::Table) {
        let notice = "Controller is not running — start it and try again";
        if output::should_color(&global.color) {
            output::print_output(&notice.yellow().to_string(), global.quiet);
        } else {
            output::print_output(notice, global.quiet);
        }
        return Ok(());
    }

    let out = output::render_single(
        &global.output,
        &status,
        |s| output::render_table(&status_rows(s)),
        summary_line,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{status_rows, summary_line};
    use mutectl_api::StatusRecord;

    fn sample() -> StatusRecord {
        StatusRecord {
            status: 200,
            call: "active".into(),
            mute: "active".into(),
            video: "inactive".into(),
            share: "inactive".into(),
            record: "inactive".into(),
            control: "x".into(),
            teams_api: "disabled".into(),
        }
    }

    #[test]
    fn active_muted_snapshot_renders_three_rows() {
        let rows = status_rows(&sample());

        assert_eq!(rows.len(), 3, "no presenting/recording/teams rows expected");
        assert_eq!(rows[0].item, "Meeting");
        assert!(rows[0].state.contains("Active"));
        assert_eq!(rows[0].notes, "via x");
        assert_eq!(rows[1].state, "Muted");
        assert_eq!(rows[2].state, "Off");
    }

    #[test]
    fn badges_appear_only_when_active() {
        let mut status = sample();
        status.share = "active".into();
        status.record = "active".into();
        status.teams_api = "connected".into();

        let rows = status_rows(&status);
        let items: Vec<&str> = rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(
            items,
            ["Meeting", "Microphone", "Camera", "Presenting", "Recording", "Teams API"]
        );
    }

    #[test]
    fn summary_line_compacts_the_flags() {
        assert_eq!(summary_line(&sample()), "in-meeting muted camera-off");

        let mut status = sample();
        status.share = "active".into();
        assert_eq!(summary_line(&status), "in-meeting muted camera-off presenting");

        status.status = 0;
        assert_eq!(summary_line(&status), "not-running");
    }
}
