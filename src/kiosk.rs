// file: src/kiosk.rs
// description: kiosk controller - selection, guarded order submission, command loop

use crate::{
    catalog::CatalogItem,
    config::Config,
    events::{EventSender, KioskEvent},
    monitoring::{HealthStatus, ORDERS_PUBLISHED_COUNTER, PUBLISH_FAILURES_COUNTER},
    order::{OrderMessage, SubmitBlock, SubmitOutcome},
    state::SharedKioskState,
    transport::OrderTransport,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Controller owning the selection operations and the guarded submit path.
/// The transport is injected so submission logic is exercised against a
/// test double without a broker.
pub struct Kiosk {
    config: Arc<Config>,
    catalog: Arc<Vec<CatalogItem>>,
    state: SharedKioskState,
    transport: Arc<dyn OrderTransport>,
    events: EventSender,
}

impl Kiosk {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<Vec<CatalogItem>>,
        state: SharedKioskState,
        transport: Arc<dyn OrderTransport>,
        events: EventSender,
    ) -> Self {
        Self {
            config,
            catalog,
            state,
            transport,
            events,
        }
    }

    /// Selects the catalog item at `index`, replacing any previous
    /// selection. Returns the item, or `None` when out of range.
    pub async fn select(&self, index: usize) -> Option<CatalogItem> {
        let item = self.catalog.get(index)?.clone();
        self.state.lock().await.select(item.clone());
        self.send_event(KioskEvent::Selected {
            index,
            item: item.clone(),
        })
        .await;
        Some(item)
    }

    /// Submits the current selection. Guarded: a missing selection or a
    /// non-connected transport is a gated no-op, not a transport call. On
    /// success the selection is cleared; on failure it is retained so the
    /// user can retry manually.
    pub async fn submit(&self) -> SubmitOutcome {
        let (selection, connected) = {
            let state = self.state.lock().await;
            (state.selection().cloned(), state.is_connected())
        };
        let Some(item) = selection else {
            let block = SubmitBlock::NoSelection;
            self.send_event(KioskEvent::OrderBlocked(block)).await;
            return SubmitOutcome::Blocked(block);
        };
        if !connected {
            let block = SubmitBlock::NotConnected;
            self.send_event(KioskEvent::OrderBlocked(block)).await;
            return SubmitOutcome::Blocked(block);
        }

        let order = OrderMessage::new(&item, &self.config.order.customer);
        let payload = match order.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to encode order: {err}");
                let reason = err.to_string();
                self.send_event(KioskEvent::OrderFailed {
                    reason: reason.clone(),
                })
                .await;
                return SubmitOutcome::Failed { reason };
            }
        };

        match self
            .transport
            .publish_order(&self.config.order.topic, payload)
            .await
        {
            Ok(()) => {
                {
                    let mut state = self.state.lock().await;
                    state.clear_selection();
                    state.record_order();
                }
                ORDERS_PUBLISHED_COUNTER.increment(1);
                info!(drink = %order.drink, "order published");
                self.send_event(KioskEvent::OrderPlaced {
                    drink: order.drink.clone(),
                })
                .await;
                SubmitOutcome::Published(order)
            }
            Err(err) => {
                self.state.lock().await.record_publish_failure();
                PUBLISH_FAILURES_COUNTER.increment(1);
                warn!("failed to publish order: {err}");
                let reason = err.to_string();
                self.send_event(KioskEvent::OrderFailed {
                    reason: reason.clone(),
                })
                .await;
                SubmitOutcome::Failed { reason }
            }
        }
    }

    /// Reads commands from stdin until `quit` or end of input. Runs on the
    /// same event loop as the connection monitor; every mutation happens on
    /// a discrete command turn.
    pub async fn run_input_loop(&self) -> Result<()> {
        self.print_help();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            match input {
                "q" | "quit" | "exit" => break,
                "m" | "menu" => self.send_event(KioskEvent::MenuRequested).await,
                "o" | "order" => {
                    self.submit().await;
                }
                "s" | "status" => self.print_status().await,
                "h" | "help" => self.print_help(),
                other => {
                    if let Ok(n) = other.parse::<usize>() {
                        if n == 0 || self.select(n - 1).await.is_none() {
                            println!("No item {n} on the menu.");
                        }
                    } else {
                        println!("Unrecognized input {other:?} (type \"help\").");
                    }
                }
            }
        }
        Ok(())
    }

    async fn print_status(&self) {
        let snapshot = {
            let state = self.state.lock().await;
            HealthStatus::snapshot(&state, self.catalog.len())
        };
        println!("{}", snapshot.to_json());
    }

    fn print_help(&self) {
        println!("Type an item number to select it, then \"order\" to place the order.");
        println!("Commands: <number>, order, menu, status, help, quit");
    }

    async fn send_event(&self, event: KioskEvent) {
        if let Err(err) = self.events.send(event).await {
            warn!("dropping kiosk event: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use crate::error::KioskError;
    use crate::events::{EventReceiver, create_event_channel};
    use crate::state::shared_state;
    use async_trait::async_trait;
    use clap::Parser;
    use tokio::sync::Mutex;

    struct RecordingTransport {
        calls: Mutex<Vec<(String, Vec<u8>)>>,
        fail: bool,
    }

    impl RecordingTransport {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl OrderTransport for RecordingTransport {
        async fn publish_order(&self, topic: &str, payload: Vec<u8>) -> Result<(), KioskError> {
            self.calls.lock().await.push((topic.to_string(), payload));
            if self.fail {
                Err(KioskError::Publish("simulated broker failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn menu() -> Arc<Vec<CatalogItem>> {
        Arc::new(vec![
            CatalogItem {
                name: "Espresso".to_string(),
                image: "e.png".to_string(),
                price: "2.50".to_string(),
            },
            CatalogItem {
                name: "Latte".to_string(),
                image: "l.png".to_string(),
                price: "3.00".to_string(),
            },
        ])
    }

    fn test_kiosk(
        transport: Arc<RecordingTransport>,
    ) -> (Kiosk, SharedKioskState, EventReceiver) {
        let args = Args::parse_from(["drink-kiosk", "--name", "mehdi"]);
        let config = Arc::new(Config::from_args(&args).unwrap());
        let state = shared_state();
        let (tx, rx) = create_event_channel();
        let kiosk = Kiosk::new(config, menu(), state.clone(), transport, tx);
        (kiosk, state, rx)
    }

    #[tokio::test]
    async fn submit_without_selection_is_blocked() {
        let transport = Arc::new(RecordingTransport::ok());
        let (kiosk, state, _rx) = test_kiosk(transport.clone());
        state.lock().await.mark_connected();

        let outcome = kiosk.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Blocked(SubmitBlock::NoSelection)
        ));
        assert!(transport.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn submit_while_disconnected_is_blocked() {
        let transport = Arc::new(RecordingTransport::ok());
        let (kiosk, state, _rx) = test_kiosk(transport.clone());

        kiosk.select(0).await.unwrap();
        let outcome = kiosk.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Blocked(SubmitBlock::NotConnected)
        ));
        assert!(transport.calls.lock().await.is_empty());
        assert_eq!(state.lock().await.selection().unwrap().name, "Espresso");
    }

    #[tokio::test]
    async fn successful_submit_publishes_once_and_clears_selection() {
        let transport = Arc::new(RecordingTransport::ok());
        let (kiosk, state, _rx) = test_kiosk(transport.clone());
        state.lock().await.mark_connected();

        kiosk.select(1).await.unwrap();
        let outcome = kiosk.submit().await;
        let SubmitOutcome::Published(order) = outcome else {
            panic!("expected a published order");
        };
        assert_eq!(order.drink, "Latte");
        assert_eq!(order.name, "mehdi");

        let calls = transport.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "github/static/drink_orders");
        let payload: serde_json::Value = serde_json::from_slice(&calls[0].1).unwrap();
        assert_eq!(payload["drink"], "Latte");
        assert!(payload["timestamp"].is_string());

        assert!(state.lock().await.selection().is_none());
        assert_eq!(state.lock().await.orders_published, 1);
    }

    #[tokio::test]
    async fn failed_publish_retains_selection() {
        let transport = Arc::new(RecordingTransport::failing());
        let (kiosk, state, _rx) = test_kiosk(transport.clone());
        state.lock().await.mark_connected();

        kiosk.select(0).await.unwrap();
        let outcome = kiosk.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(transport.calls.lock().await.len(), 1);
        assert_eq!(state.lock().await.selection().unwrap().name, "Espresso");
        assert_eq!(state.lock().await.publish_failures, 1);
    }

    #[tokio::test]
    async fn selecting_twice_keeps_only_the_second_item() {
        let transport = Arc::new(RecordingTransport::ok());
        let (kiosk, state, mut rx) = test_kiosk(transport);

        kiosk.select(0).await.unwrap();
        kiosk.select(1).await.unwrap();
        assert_eq!(state.lock().await.selection().unwrap().name, "Latte");

        let mut selected_indexes = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let KioskEvent::Selected { index, .. } = event {
                selected_indexes.push(index);
            }
        }
        assert_eq!(selected_indexes, vec![0, 1]);
    }

    #[tokio::test]
    async fn selecting_out_of_range_is_none() {
        let transport = Arc::new(RecordingTransport::ok());
        let (kiosk, state, _rx) = test_kiosk(transport);
        assert!(kiosk.select(5).await.is_none());
        assert!(state.lock().await.selection().is_none());
    }

    #[tokio::test]
    async fn blocked_submits_report_through_the_event_channel() {
        let transport = Arc::new(RecordingTransport::ok());
        let (kiosk, _state, mut rx) = test_kiosk(transport);

        kiosk.submit().await;
        let mut saw_block = false;
        while let Ok(event) = rx.try_recv() {
            if let KioskEvent::OrderBlocked(block) = event {
                assert_eq!(block, SubmitBlock::NoSelection);
                saw_block = true;
            }
        }
        assert!(saw_block);
    }
}
