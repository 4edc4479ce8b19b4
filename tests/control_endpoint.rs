//! Integration tests: control endpoint over a real TCP socket.
//!
//! Binds to port 0 so the OS assigns a free port; each exchange connects,
//! writes one request, polls the server once and reads to EOF.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use leakguard::app::ports::SensorPort;
use leakguard::app::service::AppService;
use leakguard::config::SystemConfig;
use leakguard::server::ControlServer;

struct FixedFoil(u16);

impl SensorPort for FixedFoil {
    fn sample_spoon(&mut self) -> u16 {
        0
    }
    fn sample_foil(&mut self) -> u16 {
        self.0
    }
}

struct Harness {
    server: ControlServer,
    app: AppService,
    hw: FixedFoil,
}

impl Harness {
    fn new() -> Self {
        Self {
            server: ControlServer::bind(0, Duration::from_secs(2)).unwrap(),
            app: AppService::new(SystemConfig::default()),
            hw: FixedFoil(64_000),
        }
    }

    /// One full request/response exchange through the real socket.
    fn exchange(&mut self, method: &str, target: &str) -> String {
        let addr = self.server.local_addr().unwrap();
        let mut client = TcpStream::connect(addr).unwrap();
        client
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        write!(client, "{method} {target} HTTP/1.1\r\nHost: test\r\n\r\n").unwrap();

        assert!(
            self.server.poll(&mut self.app, &mut self.hw),
            "server must pick up the pending connection"
        );

        let mut response = String::new();
        client.read_to_string(&mut response).unwrap();
        response
    }
}

fn body(response: &str) -> &str {
    response
        .split_once("\r\n\r\n")
        .map(|(_, b)| b)
        .unwrap_or("")
}

#[test]
fn poll_without_client_returns_immediately() {
    let mut h = Harness::new();
    assert!(!h.server.poll(&mut h.app, &mut h.hw));
}

#[test]
fn status_reports_thresholds_over_the_wire() {
    let mut h = Harness::new();
    let response = h.exchange("GET", "/status");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Access-Control-Allow-Origin: *\r\n"));
    assert!(response.contains("Content-Type: application/json\r\n"));
    assert!(response.contains("Connection: close\r\n"));

    let v: serde_json::Value = serde_json::from_str(body(&response)).unwrap();
    assert_eq!(v["foil_thresh"], 52_000);
    assert_eq!(v["foil_dry"], 64_000);
    assert_eq!(v["foil_wet"], 40_000);
    assert_eq!(v["temp_limit"], 50);
}

#[test]
fn set_threshold_round_trips_through_status() {
    let mut h = Harness::new();

    let response = h.exchange("POST", "/set_threshold?value=50000");
    let v: serde_json::Value = serde_json::from_str(body(&response)).unwrap();
    assert_eq!(v["success"], true);
    assert_eq!(v["new_threshold"], 50_000);

    let response = h.exchange("GET", "/status");
    let v: serde_json::Value = serde_json::from_str(body(&response)).unwrap();
    assert_eq!(v["foil_thresh"], 50_000);
}

#[test]
fn reset_threshold_restores_the_midpoint() {
    let mut h = Harness::new();
    h.exchange("POST", "/set_threshold?value=60000");

    let response = h.exchange("POST", "/reset_threshold");
    let v: serde_json::Value = serde_json::from_str(body(&response)).unwrap();
    assert_eq!(v["new_threshold"], 52_000);
}

#[test]
fn calibrate_dry_uses_a_fresh_foil_reading() {
    let mut h = Harness::new();
    h.hw = FixedFoil(60_000);

    let response = h.exchange("POST", "/calibrate_dry");
    let v: serde_json::Value = serde_json::from_str(body(&response)).unwrap();
    assert_eq!(v["foil_dry"], 60_000);
    assert_eq!(v["new_threshold"], 50_000);
}

#[test]
fn unknown_route_is_a_bodyless_404() {
    let mut h = Harness::new();
    let response = h.exchange("GET", "/bogus");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(response.contains("Access-Control-Allow-Origin: *\r\n"));
    assert_eq!(body(&response), "");
}

#[test]
fn options_preflight_is_acknowledged() {
    let mut h = Harness::new();
    let response = h.exchange("OPTIONS", "/set_threshold");

    assert!(response.starts_with("HTTP/1.1 204 No Content\r\n"));
    assert!(response.contains("Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n"));
}

#[test]
fn garbage_request_gets_a_404_not_a_hang() {
    let mut h = Harness::new();
    let addr = h.server.local_addr().unwrap();
    let mut client = TcpStream::connect(addr).unwrap();
    client
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    client.write_all(b"\x00\x01\x02 not http\r\n\r\n").unwrap();

    assert!(h.server.poll(&mut h.app, &mut h.hw));

    let mut response = String::new();
    client.read_to_string(&mut response).unwrap();
    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}
