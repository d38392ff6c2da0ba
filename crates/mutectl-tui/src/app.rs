//! Application core — event loop, status state, action dispatch.
//!
//! One screen, one piece of state: the last known status (or the error that
//! replaced it). Key presses turn into controller calls on background
//! tasks; their results come back through the same action channel the
//! poller feeds.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use mutectl_api::{ControllerClient, StatusRecord};
use mutectl_config::Preferences;

use crate::action::{Action, Intent};
use crate::event::{Event, EventReader};
use crate::poller;
use crate::theme;
use crate::tui::Tui;

/// How long an outcome notice stays in the footer.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// A state-changing intent waiting for the user's y/n.
struct Pending {
    intent: Intent,
    prompt: String,
}

enum NoticeLevel {
    Info,
    Error,
}

struct Notice {
    message: String,
    level: NoticeLevel,
    at: Instant,
}

/// Top-level application state and event loop.
pub struct App {
    client: Arc<ControllerClient>,
    prefs: Preferences,
    /// Whether the app should keep running.
    running: bool,
    /// Last known status; replaced wholesale per fetch, dropped on error.
    status: Option<StatusRecord>,
    /// Last poll failure, rendered as the inline error view.
    error: Option<String>,
    /// When the last successful fetch landed (for the data-age display).
    last_update: Option<Instant>,
    /// Confirmation bar state.
    pending: Option<Pending>,
    /// Transient footer notice.
    notice: Option<Notice>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    refresh_tx: mpsc::UnboundedSender<()>,
    /// Handed to the poller on startup.
    refresh_rx: Option<mpsc::UnboundedReceiver<()>>,
}

impl App {
    pub fn new(client: ControllerClient, prefs: Preferences) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();

        Self {
            client: Arc::new(client),
            prefs,
            running: true,
            status: None,
            error: None,
            last_update: None,
            pending: None,
            notice: None,
            action_tx,
            action_rx,
            refresh_tx,
            refresh_rx: Some(refresh_rx),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let cancel = CancellationToken::new();
        let refresh_rx = self.refresh_rx.take().expect("run() is called once");
        let poller_handle = poller::spawn_status_poller(
            Arc::clone(&self.client),
            Duration::from_secs(self.prefs.status_refresh_interval),
            self.action_tx.clone(),
            refresh_rx,
            cancel.clone(),
        );

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("status view started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => self.handle_key_event(key),
                Event::Resize(_, _) => {}
                Event::Tick => self.expire_notice(),
                Event::Render => tui.draw(|frame| self.render(frame))?,
            }

            // Drain everything the poller and command tasks queued up.
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(action);
            }
        }

        // Explicit stop signals: the poller must not outlive the view.
        cancel.cancel();
        events.stop();
        let _ = poller_handle.await;

        info!("status view ended");
        Ok(())
    }

    // ── Input handling ───────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) {
        // The confirmation bar captures keys while visible.
        if let Some(pending) = self.pending.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.dispatch(pending.intent),
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.set_notice("Cancelled", NoticeLevel::Info);
                }
                _ => self.pending = Some(pending),
            }
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('m') => self.request(Intent::ToggleMicrophone),
            KeyCode::Char('c') => self.request(Intent::ToggleVideo),
            KeyCode::Char('l') => self.request(Intent::LeaveMeeting),
            KeyCode::Char('r') => {
                let _ = self.refresh_tx.send(());
            }
            _ => {}
        }
    }

    /// Gate an intent on current state and preferences, then dispatch or
    /// park it behind the confirmation bar.
    fn request(&mut self, intent: Intent) {
        let Some(status) = self.status.clone() else {
            self.set_notice("No status yet", NoticeLevel::Info);
            return;
        };
        if !status.is_running() {
            self.set_notice("Controller is not running", NoticeLevel::Error);
            return;
        }

        let busy = status.is_presenting() || status.is_recording();
        let activity = if status.is_presenting() {
            "presenting"
        } else {
            "recording"
        };

        let prompt = match intent {
            Intent::LeaveMeeting => {
                if !status.is_in_meeting() {
                    self.set_notice("Not in a meeting", NoticeLevel::Info);
                    return;
                }
                self.prefs
                    .confirm_leave
                    .then(|| "Leave the current meeting?".to_owned())
            }
            Intent::ToggleMicrophone => (self.prefs.confirm_mute_in_presentation && busy)
                .then(|| {
                    let verb = if status.is_muted() { "Unmute" } else { "Mute" };
                    format!("{verb} the microphone while {activity}?")
                }),
            Intent::ToggleVideo => (self.prefs.confirm_video_in_presentation && busy).then(|| {
                let verb = if status.is_video_on() {
                    "Turn off"
                } else {
                    "Turn on"
                };
                format!("{verb} the camera while {activity}?")
            }),
        };

        if let Some(prompt) = prompt {
            self.pending = Some(Pending { intent, prompt });
        } else {
            self.dispatch(intent);
        }
    }

    /// Fire the controller call on a background task; results come back
    /// through the action channel.
    fn dispatch(&self, intent: Intent) {
        let client = Arc::clone(&self.client);
        let action_tx = self.action_tx.clone();
        let refresh_tx = self.refresh_tx.clone();

        tokio::spawn(async move {
            let result = match intent {
                Intent::ToggleMicrophone => {
                    client.toggle_microphone().await.map(|()| "Microphone toggled")
                }
                Intent::ToggleVideo => client.toggle_video().await.map(|()| "Camera toggled"),
                Intent::LeaveMeeting => client.leave_meeting().await.map(|()| "Left the meeting"),
            };

            match result {
                Ok(outcome) => {
                    // Pull a fresh snapshot so the view reflects the flip.
                    let _ = refresh_tx.send(());
                    let _ = action_tx.send(Action::CommandCompleted(outcome.to_owned()));
                }
                Err(err) => {
                    let _ = action_tx.send(Action::CommandFailed(err.to_string()));
                }
            }
        });
    }

    // ── State updates ────────────────────────────────────────────────

    fn process_action(&mut self, action: Action) {
        match action {
            Action::StatusUpdated(status) => {
                self.status = Some(status);
                self.error = None;
                self.last_update = Some(Instant::now());
            }
            Action::StatusError(message) => {
                // The record is discarded, not kept stale behind an error.
                self.status = None;
                self.error = Some(message);
            }
            Action::CommandCompleted(message) => {
                if self.prefs.show_toasts {
                    self.set_notice(&message, NoticeLevel::Info);
                }
            }
            // Failures always surface, regardless of the notice preference.
            Action::CommandFailed(message) => self.set_notice(&message, NoticeLevel::Error),
        }
    }

    fn set_notice(&mut self, message: &str, level: NoticeLevel) {
        self.notice = Some(Notice {
            message: message.to_owned(),
            level,
            at: Instant::now(),
        });
    }

    fn expire_notice(&mut self) {
        if let Some(notice) = &self.notice {
            if notice.at.elapsed() > NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    /// Format the data age for the footer.
    fn refresh_age_str(&self) -> String {
        match self.last_update {
            Some(t) => {
                let secs = t.elapsed().as_secs();
                if secs < 2 {
                    "just now".into()
                } else if secs < 60 {
                    format!("{secs}s ago")
                } else {
                    format!("{}m ago", secs / 60)
                }
            }
            None => "no data".into(),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [main, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        if let Some(error) = &self.error {
            Self::render_error(frame, main, error);
        } else if let Some(status) = &self.status {
            self.render_status(frame, main, status);
        } else {
            Self::render_connecting(frame, main);
        }

        self.render_footer(frame, footer);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, status: &StatusRecord) {
        let block = Block::default()
            .title(" MuteDeck ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let paragraph = Paragraph::new(Self::status_lines(status));
        frame.render_widget(paragraph, inner);
    }

    /// Build the status body. Presenting/recording badges and the Teams
    /// section only appear when they carry information.
    fn status_lines(status: &StatusRecord) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];

        if !status.is_running() {
            lines.push(Line::from(Span::styled(
                "  ⚠ Controller is not running — start it and press r",
                theme::warning_style(),
            )));
            return lines;
        }

        let meeting = if status.is_in_meeting() {
            Line::from(vec![
                Span::styled("  ● ", theme::active_style()),
                Span::styled("In meeting", theme::text_style()),
                Span::styled(
                    if status.control.is_empty() {
                        String::new()
                    } else {
                        format!("  (via {})", status.control)
                    },
                    theme::hint_style(),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled("  ○ ", theme::inactive_style()),
                Span::styled("Not in a meeting", theme::text_style()),
            ])
        };
        lines.push(meeting);
        lines.push(Line::from(""));

        lines.push(Line::from(vec![
            Span::styled("  Microphone  ", theme::text_style()),
            if status.is_muted() {
                Span::styled("Muted", theme::inactive_style())
            } else {
                Span::styled("Unmuted", theme::active_style())
            },
        ]));

        lines.push(Line::from(vec![
            Span::styled("  Camera      ", theme::text_style()),
            if status.is_video_on() {
                Span::styled("On", theme::active_style())
            } else {
                Span::styled("Off", theme::inactive_style())
            },
        ]));

        if status.is_presenting() {
            lines.push(Line::from(Span::styled(
                "  ● Presenting",
                theme::warning_style(),
            )));
        }
        if status.is_recording() {
            lines.push(Line::from(Span::styled(
                "  ● Recording",
                theme::warning_style(),
            )));
        }

        if status.has_teams_integration() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("  Teams API   ", theme::text_style()),
                if status.teams_api == "connected" {
                    Span::styled("connected", theme::active_style())
                } else {
                    Span::styled(status.teams_api.clone(), theme::warning_style())
                },
            ]));
        }

        lines
    }

    fn render_error(frame: &mut Frame, area: Rect, error: &str) {
        let block = Block::default()
            .title(" Connection Error ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::inactive_style());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = format!("\n  {error}\n\n  Press r to retry.");
        let paragraph = Paragraph::new(text)
            .style(theme::text_style())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }

    fn render_connecting(frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" MuteDeck ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let paragraph =
            Paragraph::new("\n  Connecting to the controller…").style(theme::text_style());
        frame.render_widget(paragraph, inner);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(pending) = &self.pending {
            Line::from(Span::styled(
                format!(" {}  y confirm · n cancel", pending.prompt),
                theme::warning_style(),
            ))
        } else if let Some(notice) = &self.notice {
            let style = match notice.level {
                NoticeLevel::Info => theme::active_style(),
                NoticeLevel::Error => theme::inactive_style(),
            };
            Line::from(Span::styled(format!(" {}", notice.message), style))
        } else {
            Line::from(Span::styled(
                format!(
                    " m mic · c camera · l leave · r refresh · q quit   updated {}",
                    self.refresh_age_str()
                ),
                theme::hint_style(),
            ))
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use mutectl_api::{ControllerClient, StatusRecord};
    use mutectl_config::Preferences;

    use super::App;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn app_with_status(status: StatusRecord) -> App {
        let client = ControllerClient::new(
            "http://localhost:3491",
            &mutectl_api::TransportConfig::default(),
        )
        .expect("valid endpoint");
        let mut app = App::new(client, Preferences::default());
        app.status = Some(status);
        app
    }

    fn text_of(lines: &[ratatui::text::Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[test]
    fn active_muted_snapshot_renders_without_badges() {
        let status = StatusRecord {
            status: 200,
            call: "active".into(),
            mute: "active".into(),
            video: "inactive".into(),
            share: "inactive".into(),
            record: "inactive".into(),
            control: "x".into(),
            teams_api: "disabled".into(),
        };

        let text = text_of(&App::status_lines(&status));

        assert_eq!(
            text,
            vec![
                "  ● In meeting  (via x)".to_owned(),
                "  Microphone  Muted".to_owned(),
                "  Camera      Off".to_owned(),
            ]
        );
    }

    #[test]
    fn badges_and_teams_section_appear_when_active() {
        let status = StatusRecord {
            status: 200,
            call: "active".into(),
            share: "active".into(),
            record: "active".into(),
            teams_api: "connected".into(),
            ..StatusRecord::default()
        };

        let text = text_of(&App::status_lines(&status)).join("\n");
        assert!(text.contains("● Presenting"));
        assert!(text.contains("● Recording"));
        assert!(text.contains("Teams API   connected"));
    }

    #[test]
    fn toggle_while_presenting_waits_for_confirmation() {
        let mut app = app_with_status(StatusRecord {
            status: 200,
            call: "active".into(),
            share: "active".into(),
            ..StatusRecord::default()
        });

        // Presenting + confirm_mute_in_presentation (default on): the key
        // parks the intent behind the confirmation bar instead of firing.
        app.handle_key_event(key('m'));
        let pending = app.pending.as_ref().expect("confirmation expected");
        assert!(pending.prompt.contains("while presenting"));

        // Dismissal clears the intent without dispatching anything.
        app.handle_key_event(key('n'));
        assert!(app.pending.is_none());
        let notice = app.notice.as_ref().expect("cancellation notice expected");
        assert_eq!(notice.message, "Cancelled");
    }

    #[test]
    fn leave_without_a_meeting_is_refused_up_front() {
        let mut app = app_with_status(StatusRecord {
            status: 200,
            call: "inactive".into(),
            ..StatusRecord::default()
        });

        app.handle_key_event(key('l'));
        assert!(app.pending.is_none());
        let notice = app.notice.as_ref().expect("notice expected");
        assert_eq!(notice.message, "Not in a meeting");
    }

    #[test]
    fn unhealthy_controller_renders_the_warning_only() {
        let status = StatusRecord {
            status: 0,
            call: "active".into(),
            ..StatusRecord::default()
        };

        let text = text_of(&App::status_lines(&status));
        assert_eq!(text.len(), 1);
        assert!(text[0].contains("Controller is not running"));
    }
}
