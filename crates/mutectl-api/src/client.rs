// Hand-crafted async HTTP client for the MuteDeck control API.
//
// Base path: /v1/
// No authentication — the API is bound to the local host.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{self, Error, Operation};
use crate::status::StatusRecord;
use crate::transport::TransportConfig;

/// Async client for the controller's local control API.
///
/// Stateless between calls: four operations, each one HTTP round trip. The
/// client never retries — the polling view re-invokes on its own interval.
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ControllerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an explicit base URL and transport config.
    ///
    /// The endpoint is always passed in by the caller; the client itself
    /// never reads ambient configuration.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages timeouts).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so `join("v1/…")`
    /// appends rather than replaces the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized endpoint this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v1/status"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `v1/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Fetch the current controller status.
    ///
    /// `GET /v1/status`
    pub async fn status(&self) -> Result<StatusRecord, Error> {
        self.get("v1/status", Operation::Status).await
    }

    /// Toggle the microphone. The request carries no target state — the
    /// controller flips whatever the current state is.
    ///
    /// `POST /v1/mute`
    pub async fn toggle_microphone(&self) -> Result<(), Error> {
        self.post_no_response("v1/mute", Operation::ToggleMicrophone)
            .await
    }

    /// Toggle the camera.
    ///
    /// `POST /v1/video`
    pub async fn toggle_video(&self) -> Result<(), Error> {
        self.post_no_response("v1/video", Operation::ToggleVideo)
            .await
    }

    /// Leave the current meeting.
    ///
    /// `POST /v1/leave`
    pub async fn leave_meeting(&self) -> Result<(), Error> {
        self.post_no_response("v1/leave", Operation::LeaveMeeting)
            .await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str, op: Operation) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Self::connectivity(op, &e))?;
        Self::handle_response(op, resp).await
    }

    async fn post_no_response(&self, path: &str, op: Operation) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| Self::connectivity(op, &e))?;
        Self::handle_empty(op, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        op: Operation,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Protocol {
                operation: op,
                status: status.as_u16(),
                message: error::remediation(op, status.as_u16()),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Self::connectivity(op, &e))?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Parse {
                operation: op,
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn handle_empty(op: Operation, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol {
                operation: op,
                status: status.as_u16(),
                message: error::remediation(op, status.as_u16()),
            })
        }
    }

    /// Classify a transport-level failure. A timed-out request is a
    /// connectivity error like any other — never left pending.
    fn connectivity(op: Operation, err: &reqwest::Error) -> Error {
        let guidance = error::connectivity_guidance(err.is_timeout());
        Error::Connectivity {
            operation: op,
            message: format!("{err}. {guidance}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ControllerClient;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = ControllerClient::normalize_base_url("http://localhost:3491").expect("parses");
        assert_eq!(url.as_str(), "http://localhost:3491/");
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let url = ControllerClient::normalize_base_url("http://localhost:3491/").expect("parses");
        assert_eq!(url.as_str(), "http://localhost:3491/");
    }

    #[test]
    fn path_prefix_is_preserved() {
        let url =
            ControllerClient::normalize_base_url("http://example.com/mutedeck").expect("parses");
        assert_eq!(url.join("v1/status").expect("joins").path(), "/mutedeck/v1/status");
    }

    #[test]
    fn garbage_endpoint_is_rejected() {
        assert!(ControllerClient::normalize_base_url("not a url").is_err());
    }
}
