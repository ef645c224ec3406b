//! HTTP behaviour of the bridge client against a mock bridge.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use audiobridge_core::{
    BridgeAddress, BridgeClient, BridgeConfig, BridgeEndpoint, BridgeError, ConfiguredBridges, DeviceDirection,
    DeviceSelect, Entity, HttpBridgeClient, MediaAction, MediaPlayer, SetupError,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bridge_config(server: &MockServer, timeout: Duration) -> BridgeConfig {
    let addr = server.address();
    BridgeConfig::new(BridgeAddress::new(addr.ip().to_string(), addr.port())).with_request_timeout(timeout)
}

fn client_for(server: &MockServer, timeout: Duration) -> HttpBridgeClient {
    HttpBridgeClient::from_config(&bridge_config(server, timeout)).expect("client")
}

#[tokio::test]
async fn get_returns_body_on_200() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "volume": 42,
            "muted": false,
            "playback_state": "playing"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server, Duration::from_secs(5));

    // Act
    let body = client.get(BridgeEndpoint::Status).await.expect("status");

    // Assert
    assert_eq!(body["volume"], 42);
    assert_eq!(body["playback_state"], "playing");
}

#[tokio::test]
async fn non_200_is_reported_with_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/media/info"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Audio system not available" })))
        .mount(&server)
        .await;
    let client = client_for(&server, Duration::from_secs(5));

    let err = client.get(BridgeEndpoint::MediaInfo).await.expect_err("500");

    assert_eq!(err, BridgeError::HttpStatus(500));
}

#[tokio::test]
async fn other_success_codes_are_still_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/media/play"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = client_for(&server, Duration::from_secs(5));

    let err = client
        .post(BridgeEndpoint::Media(MediaAction::Play), None)
        .await
        .expect_err("204 is not 200");

    assert_eq!(err, BridgeError::HttpStatus(204));
}

#[tokio::test]
async fn malformed_body_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/audio/output"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let client = client_for(&server, Duration::from_secs(5));

    let body = client.get(BridgeEndpoint::OutputDevice).await.expect("200");

    assert!(body.is_null());
}

#[tokio::test]
async fn slow_bridge_times_out_then_recovers() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "volume": 30 }))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;
    let client = Arc::new(client_for(&server, Duration::from_millis(150)));
    let mut player = MediaPlayer::new(client.clone(), "bridge", "Bridge", 10);

    // Act
    let err = client.get(BridgeEndpoint::Status).await.expect_err("slow");
    player.refresh().await;

    // Assert
    assert_eq!(err, BridgeError::Timeout);
    assert!(!player.available());
    assert_eq!(player.status().volume_percent, 50);

    // Arrange
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "volume": 30 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/media/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Spring" })))
        .mount(&server)
        .await;

    // Act
    player.refresh().await;

    // Assert
    assert!(player.available());
    assert_eq!(player.status().volume_percent, 30);
}

#[tokio::test]
async fn refused_connection_is_a_connect_error() {
    // Arrange
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client =
        HttpBridgeClient::new(BridgeAddress::new("127.0.0.1", port), Duration::from_secs(2)).expect("client");

    // Act
    let err = client.get(BridgeEndpoint::Status).await.expect_err("nothing listening");

    // Assert
    assert!(matches!(err, BridgeError::Connect(_)), "got {err:?}");
}

#[tokio::test]
async fn volume_post_carries_percent_body() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/volume"))
        .and(body_json(json!({ "volume": 40 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "volume": 40 })))
        .expect(1)
        .mount(&server)
        .await;
    let client = Arc::new(client_for(&server, Duration::from_secs(5)));
    let mut player = MediaPlayer::new(client, "bridge", "Bridge", 10);

    // Act
    player.set_volume_level(0.4).await.expect("volume");

    // Assert
    assert_eq!(player.status().volume_percent, 40);
}

#[tokio::test]
async fn device_select_posts_name_to_output_endpoint() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/audio/output"))
        .and(body_json(json!({ "name": "Living Room" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let client = Arc::new(client_for(&server, Duration::from_secs(5)));
    let mut select = DeviceSelect::new(client, "bridge", "Bridge", DeviceDirection::Output);

    // Act
    select.select_option("Living Room").await.expect("select");

    // Assert
    assert_eq!(select.current_option(), Some("Living Room"));
}

#[tokio::test]
async fn setup_validates_and_rejects_duplicates() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "volume": 12, "muted": true })))
        .mount(&server)
        .await;
    let config = bridge_config(&server, Duration::from_secs(5)).with_name("Office Mac");
    let client = HttpBridgeClient::from_config(&config).expect("client");
    let mut bridges = ConfiguredBridges::new();

    // Act
    let validated = bridges.configure(&client, &config).await.expect("first setup");
    let duplicate = bridges.configure(&client, &config).await.expect_err("second setup");

    // Assert
    assert_eq!(validated.unique_id, config.address.identity());
    assert_eq!(validated.title, "Office Mac");
    assert_eq!(validated.status.volume_percent, 12);
    assert_eq!(duplicate, SetupError::AlreadyConfigured);
    assert_eq!(duplicate.code(), "already_configured");
}

#[tokio::test]
async fn setup_reports_operator_error_codes() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let config = bridge_config(&server, Duration::from_secs(5));

    // Act
    let not_found = audiobridge_core::setup::validate_address(&config).await.expect_err("404");

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
        .mount(&server)
        .await;
    let slow_config = config.clone().with_request_timeout(Duration::from_millis(100));
    let slow = audiobridge_core::setup::validate_address(&slow_config).await.expect_err("slow");

    // Assert
    assert_eq!(not_found.code(), "cannot_connect");
    assert_eq!(slow.code(), "timeout");
}
