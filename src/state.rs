/// file: src/state.rs
/// description: shared kiosk state - selection, connection status, counters
use crate::catalog::CatalogItem;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Lifecycle of the broker connection as observed by the monitor. Ordering
/// is permitted only in `Connected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Error,
    Closed,
}

#[derive(Debug)]
pub struct KioskState {
    pub session_id: String,
    pub status: ConnectionStatus,
    selection: Option<CatalogItem>,
    pub reconnect_count: u32,
    pub orders_published: u64,
    pub publish_failures: u64,
    pub last_event_time: Option<Instant>,
    pub started_at: Instant,
}

impl Default for KioskState {
    fn default() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            status: ConnectionStatus::Connecting,
            selection: None,
            reconnect_count: 0,
            orders_published: 0,
            publish_failures: 0,
            last_event_time: None,
            started_at: Instant::now(),
        }
    }
}

impl KioskState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection wholesale. There is at most one selected item.
    pub fn select(&mut self, item: CatalogItem) {
        self.selection = Some(item);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&CatalogItem> {
        self.selection.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn mark_connected(&mut self) {
        self.status = ConnectionStatus::Connected;
        self.reconnect_count = 0;
        self.last_event_time = Some(Instant::now());
    }

    pub fn mark_connecting(&mut self) {
        self.status = ConnectionStatus::Connecting;
    }

    pub fn mark_error(&mut self) {
        self.status = ConnectionStatus::Error;
        self.last_event_time = Some(Instant::now());
    }

    pub fn mark_closed(&mut self) {
        self.status = ConnectionStatus::Closed;
        self.last_event_time = Some(Instant::now());
    }

    /// Returns the attempt number for the failure just observed.
    pub fn increment_reconnect(&mut self) -> u32 {
        self.reconnect_count += 1;
        self.reconnect_count
    }

    pub fn record_order(&mut self) {
        self.orders_published += 1;
    }

    pub fn record_publish_failure(&mut self) {
        self.publish_failures += 1;
    }
}

pub type SharedKioskState = Arc<Mutex<KioskState>>;

pub fn shared_state() -> SharedKioskState {
    Arc::new(Mutex::new(KioskState::new()))
}
