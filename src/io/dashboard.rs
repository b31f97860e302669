//! Dashboard HTTP endpoint
//!
//! Serves the live traffic report on a raw TCP listener. Every connection
//! gets the same rendered page no matter what it sends: the request is read
//! once into a bounded buffer and discarded, then a minimal HTTP/1.1
//! response with the full HTML body is written and the connection closed.
//! Connections are served one at a time; a slow client delays the next
//! dashboard viewer but never the sampling loop.

use crate::infra::stats::{StatsSnapshot, TrafficStats};
use anyhow::Context;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Request bytes read and discarded per connection
const REQUEST_BUFFER_SIZE: usize = 1024;

pub struct DashboardServer {
    listener: TcpListener,
    addr: SocketAddr,
    stats: Arc<TrafficStats>,
    site: String,
}

impl DashboardServer {
    /// Bind the dashboard listener on all interfaces
    pub async fn bind(port: u16, stats: Arc<TrafficStats>, site: &str) -> anyhow::Result<Self> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind dashboard listener on {}", addr))?;
        let addr = listener.local_addr().context("failed to read dashboard listener address")?;

        Ok(Self { listener, addr, stats, site: site.to_string() })
    }

    /// Bound address, resolved after binding (port 0 becomes the real port)
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accept and serve connections until shutdown
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(addr = %self.addr, site = %self.site, "dashboard_server_started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("dashboard_server_shutdown");
                        return;
                    }
                }
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            // Served inline: one connection at a time.
                            if let Err(e) = self.serve(stream).await {
                                warn!(peer = %peer, error = %e, "dashboard_connection_error");
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "dashboard_accept_failed");
                        }
                    }
                }
            }
        }
    }

    /// One request/response cycle on a fresh connection.
    ///
    /// The request is not parsed; an empty or malformed request still gets
    /// the rendered page.
    async fn serve(&self, mut stream: TcpStream) -> std::io::Result<()> {
        let mut request = [0u8; REQUEST_BUFFER_SIZE];
        let _ = stream.read(&mut request).await?;

        let body = render_dashboard(&self.stats.snapshot(), &self.site);
        stream.write_all(&http_response(&body)).await?;
        stream.shutdown().await
    }
}

/// Build a minimal HTTP/1.1 response around the rendered body
fn http_response(body: &str) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body.as_bytes());
    response
}

fn json_array<T: Serialize>(values: &[T]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Render the full dashboard page from one snapshot
fn render_dashboard(snapshot: &StatsSnapshot, site: &str) -> String {
    let mut labels = Vec::with_capacity(snapshot.entries_per_hour.len());
    let mut hourly = Vec::with_capacity(snapshot.entries_per_hour.len());
    let mut cumulative = Vec::with_capacity(snapshot.entries_per_hour.len());
    let mut running = 0u64;

    for (hour, count) in &snapshot.entries_per_hour {
        labels.push(format!("{:02}:00", hour));
        hourly.push(*count);
        running += count;
        cumulative.push(running);
    }

    let date = match snapshot.current_day {
        Some((year, month, day)) => format!("{:04}-{:02}-{:02}", year, month, day),
        None => "no events yet".to_string(),
    };

    DASHBOARD_HTML
        .replace("{{SITE}}", site)
        .replace("{{DATE}}", &date)
        .replace("{{DAILY_ENTRIES}}", &snapshot.daily_entries.to_string())
        .replace("{{DAILY_EXITS}}", &snapshot.daily_exits.to_string())
        .replace("{{TOTAL_ENTRIES}}", &snapshot.total_entries.to_string())
        .replace("{{TOTAL_EXITS}}", &snapshot.total_exits.to_string())
        .replace("{{ENTRIES_AVG}}", &format!("{:.1}", snapshot.entries_hourly_avg()))
        .replace("{{EXITS_AVG}}", &format!("{:.1}", snapshot.exits_hourly_avg()))
        .replace("{{HOUR_LABELS}}", &json_array(&labels))
        .replace("{{HOURLY_ENTRIES}}", &json_array(&hourly))
        .replace("{{CUMULATIVE_ENTRIES}}", &json_array(&cumulative))
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{SITE}} traffic</title>
  <style>
    :root {
      --ink: #21313c;
      --muted: #6d7a84;
      --entry: #2f6f4f;
      --exit: #b24a31;
      --card: #ffffff;
    }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      padding: 28px 18px 40px;
      background: #eef1f3;
      color: var(--ink);
      font-family: 'Segoe UI', 'Helvetica Neue', sans-serif;
    }
    main { max-width: 880px; margin: 0 auto; display: grid; gap: 20px; }
    header h1 { margin: 0; font-size: 1.9rem; }
    header p { margin: 4px 0 0; color: var(--muted); }
    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }
    .stat {
      background: var(--card);
      border-radius: 12px;
      padding: 16px;
      border: 1px solid #dce2e6;
    }
    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }
    .stat .value { display: block; font-size: 1.8rem; font-weight: 600; }
    .stat .value.entry { color: var(--entry); }
    .stat .value.exit { color: var(--exit); }
    .stat .detail { display: block; margin-top: 2px; font-size: 0.85rem; color: var(--muted); }
    .chart-card {
      background: var(--card);
      border-radius: 12px;
      padding: 16px;
      border: 1px solid #dce2e6;
    }
    .chart-card h2 { margin: 0 0 10px; font-size: 1.1rem; }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>{{SITE}}</h1>
      <p>Doorway traffic &middot; {{DATE}}</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Entries today</span>
        <span class="value entry">{{DAILY_ENTRIES}}</span>
        <span class="detail">avg {{ENTRIES_AVG}} / active hour</span>
      </div>
      <div class="stat">
        <span class="label">Exits today</span>
        <span class="value exit">{{DAILY_EXITS}}</span>
        <span class="detail">avg {{EXITS_AVG}} / active hour</span>
      </div>
      <div class="stat">
        <span class="label">Total entries</span>
        <span class="value">{{TOTAL_ENTRIES}}</span>
      </div>
      <div class="stat">
        <span class="label">Total exits</span>
        <span class="value">{{TOTAL_EXITS}}</span>
      </div>
    </section>

    <section class="chart-card">
      <h2>Entries per hour</h2>
      <canvas id="hourly"></canvas>
    </section>

    <section class="chart-card">
      <h2>Cumulative entries</h2>
      <canvas id="cumulative"></canvas>
    </section>
  </main>

  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <script>
    const hourLabels = {{HOUR_LABELS}};
    const hourlyEntries = {{HOURLY_ENTRIES}};
    const cumulativeEntries = {{CUMULATIVE_ENTRIES}};

    new Chart(document.getElementById('hourly'), {
      type: 'bar',
      data: {
        labels: hourLabels,
        datasets: [{ data: hourlyEntries, backgroundColor: '#2f6f4f' }]
      },
      options: {
        plugins: { legend: { display: false } },
        scales: { y: { beginAtZero: true, ticks: { precision: 0 } } }
      }
    });

    new Chart(document.getElementById('cumulative'), {
      type: 'line',
      data: {
        labels: hourLabels,
        datasets: [{ data: cumulativeEntries, borderColor: '#b24a31', tension: 0.2, fill: false }]
      },
      options: {
        plugins: { legend: { display: false } },
        scales: { y: { beginAtZero: true, ticks: { precision: 0 } } }
      }
    });
  </script>
</body>
</html>
"#;
