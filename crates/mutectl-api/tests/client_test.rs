#![allow(clippy::unwrap_used)]
// Integration tests for `ControllerClient` using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mutectl_api::{ControllerClient, Error, Operation, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ControllerClient) {
    let server = MockServer::start().await;
    let client = ControllerClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    (server, client)
}

fn status_body() -> serde_json::Value {
    json!({
        "call": "active",
        "control": "zoom",
        "mute": "active",
        "record": "inactive",
        "share": "inactive",
        "status": 200,
        "teams_api": "disabled",
        "video": "inactive"
    })
}

// ── Status fetch ────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body()))
        .mount(&server)
        .await;

    let status = client.status().await.unwrap();

    assert!(status.is_running());
    assert!(status.is_in_meeting());
    assert!(status.is_muted());
    assert!(!status.is_video_on());
    assert!(!status.is_presenting());
    assert!(!status.is_recording());
    assert_eq!(status.control, "zoom");
    assert!(!status.has_teams_integration());
}

#[tokio::test]
async fn test_status_not_found_names_the_endpoint() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client.status().await;

    match result {
        Err(Error::Protocol {
            operation: Operation::Status,
            status: 404,
            message,
        }) => assert!(message.contains("endpoint"), "message: {message}"),
        other => panic!("expected Protocol 404, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_malformed_body_is_a_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let result = client.status().await;

    assert!(
        matches!(result, Err(Error::Parse { body, .. }) if body == "not json at all"),
        "expected Parse error"
    );
}

// ── Toggle operations ───────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_microphone_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/mute"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.toggle_microphone().await.unwrap();
}

#[tokio::test]
async fn test_toggle_forbidden_names_permissions() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/mute"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/video"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    match client.toggle_microphone().await {
        Err(Error::Protocol {
            operation: Operation::ToggleMicrophone,
            status: 403,
            message,
        }) => assert!(message.contains("microphone access"), "message: {message}"),
        other => panic!("expected Protocol 403, got: {other:?}"),
    }

    match client.toggle_video().await {
        Err(Error::Protocol {
            operation: Operation::ToggleVideo,
            status: 403,
            message,
        }) => assert!(message.contains("camera access"), "message: {message}"),
        other => panic!("expected Protocol 403, got: {other:?}"),
    }
}

// ── Leave meeting ───────────────────────────────────────────────────

#[tokio::test]
async fn test_leave_not_found_means_no_active_meeting() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/leave"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    match client.leave_meeting().await {
        Err(Error::Protocol {
            operation: Operation::LeaveMeeting,
            status: 404,
            message,
        }) => assert!(message.contains("No active meeting"), "message: {message}"),
        other => panic!("expected Protocol 404, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_leave_generic_failure_is_not_the_404_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/leave"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    match client.leave_meeting().await {
        Err(Error::Protocol {
            status: 500,
            message,
            ..
        }) => assert!(!message.contains("No active meeting"), "message: {message}"),
        other => panic!("expected Protocol 500, got: {other:?}"),
    }
}

// ── Connectivity ────────────────────────────────────────────────────

#[tokio::test]
async fn test_refused_connection_is_a_connectivity_error() {
    // Bind a port, then drop the server so connections get refused.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let client = ControllerClient::with_client(reqwest::Client::new(), &uri).unwrap();
    let result = client.status().await;

    assert!(
        matches!(
            result,
            Err(Error::Connectivity {
                operation: Operation::Status,
                ..
            })
        ),
        "expected Connectivity error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_timeout_is_a_connectivity_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = TransportConfig {
        timeout: Duration::from_millis(200),
    };
    let client = ControllerClient::new(&server.uri(), &transport).unwrap();

    let result = client.status().await;

    match result {
        Err(Error::Connectivity { message, .. }) => {
            assert!(message.contains("did not respond"), "message: {message}");
        }
        other => panic!("expected Connectivity error, got: {other:?}"),
    }
}
