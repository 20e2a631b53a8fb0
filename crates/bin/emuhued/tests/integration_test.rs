//! End-to-end tests for the emuhued stack.
//!
//! A discovery responder is bound to a loopback UDP socket (port 1900 and
//! multicast are not needed), and the HTTP layer is exercised via
//! `tower::ServiceExt::oneshot`, so no TCP port is bound.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use emuhue_adapter_emulated_hue::socket::UdpTransport;
use emuhue_adapter_emulated_hue::{EmulatedHueConfig, EmulatedHueIntegration, ResolvedHueConfig};
use emuhue_adapter_http_axum::router;
use emuhue_adapter_http_axum::state::AppState;
use emuhue_app::ports::Integration;
use emuhue_app::services::discovery_responder::ResponderState;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn resolved() -> ResolvedHueConfig {
    EmulatedHueConfig {
        host_ip: Some(Ipv4Addr::LOCALHOST.into()),
        advertise_ip: Some("10.0.0.5".parse().unwrap()),
        ..EmulatedHueConfig::default()
    }
    .resolve(8123)
    .expect("explicit host and advertise addresses should resolve")
}

fn app(config: &ResolvedHueConfig) -> axum::Router {
    router::build(AppState::new(&config.identity, config.advertise))
}

/// Start the integration on a loopback socket and return its address.
async fn start(integration: &mut EmulatedHueIntegration) -> SocketAddr {
    let socket = tokio::net::UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .unwrap();
    let addr = socket.local_addr().unwrap();
    integration.open_on(UdpTransport::from(socket));
    addr
}

async fn search(responder: SocketAddr, request: &[u8]) -> Option<String> {
    let client = tokio::net::UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .unwrap();
    client.send_to(request, responder).await.unwrap();

    let mut buf = [0u8; 2048];
    match tokio::time::timeout(Duration::from_millis(500), client.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => Some(String::from_utf8(buf[..len].to_vec()).unwrap()),
        // Timed out, or the port is closed.
        Ok(Err(_)) | Err(_) => None,
    }
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response
        .split("\r\n")
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(": "))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = String::from_utf8(
        resp.into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap();
    (status, body)
}

// ---------------------------------------------------------------------------
// SSDP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_answer_root_device_search() {
    let mut hue = EmulatedHueIntegration::new(resolved());
    let addr = start(&mut hue).await;

    let response = search(addr, b"M-SEARCH * HTTP/1.1\r\nST: upnp:rootdevice\r\n\r\n")
        .await
        .expect("M-SEARCH should be answered");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("LOCATION: http://10.0.0.5:8123/description.xml\r\n"));
    assert_eq!(header(&response, "ST"), Some("upnp:rootdevice"));
    assert!(response.ends_with("\r\n\r\n"));

    hue.teardown().await.unwrap();
}

#[tokio::test]
async fn should_answer_basic_device_search() {
    let mut hue = EmulatedHueIntegration::new(resolved());
    let addr = start(&mut hue).await;

    let response = search(
        addr,
        b"M-SEARCH * HTTP/1.1\r\nMAN: \"ssdp:discover\"\r\nST: ssdp:all\r\n\r\n",
    )
    .await
    .expect("M-SEARCH should be answered");

    assert_eq!(
        header(&response, "ST"),
        Some("urn:schemas-upnp-org:device:basic:1")
    );
    assert_eq!(
        header(&response, "USN"),
        Some("uuid:2f402f80-da50-11e1-9b23-001788255acc")
    );

    hue.teardown().await.unwrap();
}

#[tokio::test]
async fn should_not_answer_notify() {
    let mut hue = EmulatedHueIntegration::new(resolved());
    let addr = start(&mut hue).await;

    let response = search(addr, b"NOTIFY * HTTP/1.1\r\n\r\n").await;
    assert!(response.is_none());

    // Still serving afterwards.
    assert!(search(addr, b"M-SEARCH * HTTP/1.1\r\n\r\n").await.is_some());

    hue.teardown().await.unwrap();
}

#[tokio::test]
async fn should_answer_invalid_utf8_search() {
    let mut hue = EmulatedHueIntegration::new(resolved());
    let addr = start(&mut hue).await;

    let response = search(addr, b"\xff\xfe\xfdM-SEARCH * HTTP/1.1\r\n\x80\r\n").await;
    assert!(response.is_some());

    hue.teardown().await.unwrap();
}

#[tokio::test]
async fn should_stop_answering_after_teardown() {
    let mut hue = EmulatedHueIntegration::new(resolved());
    let addr = start(&mut hue).await;
    assert_eq!(hue.responder_state(), ResponderState::Open);

    hue.teardown().await.unwrap();
    assert_eq!(hue.responder_state(), ResponderState::Closed);

    assert!(search(addr, b"M-SEARCH * HTTP/1.1\r\n\r\n").await.is_none());
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (status, body) = get(app(&resolved()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn should_serve_description_at_advertised_location() {
    let config = resolved();
    let mut hue = EmulatedHueIntegration::new(config.clone());
    let addr = start(&mut hue).await;

    let response = search(addr, b"M-SEARCH * HTTP/1.1\r\nST: upnp:rootdevice\r\n\r\n")
        .await
        .expect("M-SEARCH should be answered");
    let location = header(&response, "LOCATION").unwrap();
    let path = location
        .strip_prefix("http://10.0.0.5:8123")
        .expect("LOCATION should point at the advertised address");

    let (status, body) = get(app(&config), path).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<URLBase>http://10.0.0.5:8123/</URLBase>"));
    assert!(body.contains("<serialNumber>001788FFFE23BFC2</serialNumber>"));

    // The description and the USN name the same device.
    let usn = header(&response, "USN").unwrap();
    let udn = usn.strip_suffix("::upnp:rootdevice").unwrap();
    assert!(body.contains(&format!("<UDN>{udn}</UDN>")));

    hue.teardown().await.unwrap();
}
