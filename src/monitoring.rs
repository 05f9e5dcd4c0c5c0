use crate::error::KioskError;
use crate::state::KioskState;
use anyhow::Result;
use metrics::{Counter, Gauge, counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::{net::SocketAddr, sync::LazyLock};
use tracing::{error, info};

// Global metrics
pub static ORDERS_PUBLISHED_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("kiosk_orders_published_total"));
pub static PUBLISH_FAILURES_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("kiosk_publish_failures_total"));
pub static RECONNECT_COUNTER: LazyLock<Counter> =
    LazyLock::new(|| counter!("kiosk_reconnects_total"));
pub static CONNECTED_GAUGE: LazyLock<Gauge> = LazyLock::new(|| gauge!("kiosk_connected"));

pub async fn setup_metrics(port: u16) -> Result<()> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    let builder = PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", "drink-kiosk")
        .add_global_label("version", env!("CARGO_PKG_VERSION"));

    match builder.install() {
        Ok(_handle) => {
            info!(
                "Prometheus metrics server started on http://{}/metrics",
                addr
            );

            ORDERS_PUBLISHED_COUNTER.absolute(0);
            PUBLISH_FAILURES_COUNTER.absolute(0);
            RECONNECT_COUNTER.absolute(0);
            CONNECTED_GAUGE.set(0.0);

            Ok(())
        }
        Err(e) => {
            error!("Failed to start metrics server: {}", e);
            Err(KioskError::MetricsError(e.to_string()).into())
        }
    }
}

#[derive(Debug)]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub catalog_items: usize,
    pub orders_published: u64,
    pub publish_failures: u64,
    pub reconnect_count: u32,
    pub uptime: chrono::Duration,
}

impl HealthStatus {
    pub fn snapshot(state: &KioskState, catalog_items: usize) -> Self {
        Self {
            is_healthy: state.is_connected(),
            catalog_items,
            orders_published: state.orders_published,
            publish_failures: state.publish_failures,
            reconnect_count: state.reconnect_count,
            uptime: chrono::Duration::from_std(state.started_at.elapsed())
                .unwrap_or_else(|_| chrono::Duration::zero()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": if self.is_healthy { "connected" } else { "disconnected" },
            "catalog_items": self.catalog_items,
            "orders_published": self.orders_published,
            "publish_failures": self.publish_failures,
            "reconnect_count": self.reconnect_count,
            "uptime_seconds": self.uptime.num_seconds(),
            "timestamp": chrono::Utc::now()
        })
    }
}
