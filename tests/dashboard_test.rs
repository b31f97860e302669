//! Integration tests for the dashboard HTTP server
//!
//! Each test binds its own server on an ephemeral port and talks to it over
//! a real socket, either with reqwest or with a raw TCP stream for the
//! malformed-request cases.

use doorflow::domain::{ClockReading, Direction, DoorEvent};
use doorflow::infra::TrafficStats;
use doorflow::io::DashboardServer;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;

fn reading(hour: u8) -> ClockReading {
    ClockReading { year: 2024, month: 3, day: 15, weekday: 4, hour, minute: 30, second: 0 }
}

fn seeded_stats() -> Arc<TrafficStats> {
    let stats = Arc::new(TrafficStats::new());
    stats.record(&DoorEvent::new(Direction::Entry, reading(9)));
    stats.record(&DoorEvent::new(Direction::Entry, reading(9)));
    stats.record(&DoorEvent::new(Direction::Entry, reading(14)));
    stats.record(&DoorEvent::new(Direction::Exit, reading(15)));
    stats
}

async fn start_server(stats: Arc<TrafficStats>) -> (u16, watch::Sender<bool>, JoinHandle<()>) {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = DashboardServer::bind(0, stats, "test door")
        .await
        .expect("bind dashboard on ephemeral port");
    let port = server.local_addr().port();
    let handle = tokio::spawn(server.run(shutdown_rx));

    (port, shutdown_tx, handle)
}

/// Send raw bytes on a fresh connection and collect everything sent back.
async fn raw_exchange(port: u16, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    if !request.is_empty() {
        stream.write_all(request).await.unwrap();
    }
    stream.shutdown().await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    String::from_utf8_lossy(&raw).into_owned()
}

#[tokio::test]
async fn test_dashboard_serves_rendered_page() {
    let (port, shutdown_tx, handle) = start_server(seeded_stats()).await;

    let response = reqwest::get(format!("http://127.0.0.1:{}/", port)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );

    let body = response.text().await.unwrap();
    assert!(body.contains("<h1>test door</h1>"));
    assert!(body.contains("2024-03-15"));
    assert!(body.contains("Entries today"));
    assert!(body.contains("const hourlyEntries = [2,1];"));
    assert!(body.contains("const cumulativeEntries = [2,3];"));

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_dashboard_serves_sequential_requests() {
    let (port, shutdown_tx, handle) = start_server(seeded_stats()).await;

    for _ in 0..3 {
        let response = reqwest::get(format!("http://127.0.0.1:{}/", port)).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_dashboard_answers_garbage_request() {
    let (port, shutdown_tx, handle) = start_server(seeded_stats()).await;

    let text = raw_exchange(port, b"\x00\x01\x02 not http at all\r\n").await;
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("</html>"));

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_dashboard_answers_empty_request() {
    let (port, shutdown_tx, handle) = start_server(Arc::new(TrafficStats::new())).await;

    // Write half closed immediately; the server still sends the page.
    let text = raw_exchange(port, b"").await;
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("no events yet"));

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_dashboard_reflects_new_events() {
    let stats = Arc::new(TrafficStats::new());
    let (port, shutdown_tx, handle) = start_server(stats.clone()).await;
    let url = format!("http://127.0.0.1:{}/", port);

    let before = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert!(before.contains("no events yet"));

    stats.record(&DoorEvent::new(Direction::Entry, reading(11)));

    let after = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert!(after.contains("2024-03-15"));
    assert!(after.contains("const hourlyEntries = [1];"));

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}
