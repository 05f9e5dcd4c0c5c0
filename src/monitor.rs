// file: src/monitor.rs
// description: observes the MQTT connection lifecycle and reflects it into kiosk state

use crate::{
    config::Config,
    error::KioskError,
    events::{EventSender, KioskEvent},
    monitoring::{CONNECTED_GAUGE, RECONNECT_COUNTER},
    state::SharedKioskState,
};
use anyhow::Result;
use rumqttc::{ConnectionError, Event, EventLoop, Outgoing, Packet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, trace, warn};

const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// Drives the MQTT event loop and maps its lifecycle events onto the shared
/// connection status. Purely reactive: dialing and re-dialing are the client
/// library's job, this component only paces retries and reports transitions.
pub struct ConnectionMonitor {
    config: Arc<Config>,
    state: SharedKioskState,
    events: EventSender,
    eventloop: EventLoop,
}

impl ConnectionMonitor {
    pub fn new(
        config: Arc<Config>,
        state: SharedKioskState,
        events: EventSender,
        eventloop: EventLoop,
    ) -> Self {
        Self {
            config,
            state,
            events,
            eventloop,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            match self.eventloop.poll().await {
                Ok(event) => self.handle_event(event).await,
                Err(err) => self.handle_connection_error(err).await?,
            }
        }
    }

    async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Incoming(Packet::ConnAck(ack)) => {
                info!(code = ?ack.code, "connected to MQTT broker");
                let session_id = {
                    let mut state = self.state.lock().await;
                    state.mark_connected();
                    state.session_id.clone()
                };
                CONNECTED_GAUGE.set(1.0);
                self.send_event(KioskEvent::Connected { session_id }).await;
            }
            Event::Incoming(Packet::PubAck(ack)) => {
                debug!(packet_id = ack.pkid, "order delivery acknowledged");
                self.send_event(KioskEvent::DeliveryConfirmed {
                    packet_id: ack.pkid,
                })
                .await;
            }
            Event::Incoming(Packet::Disconnect) => {
                warn!("broker closed the connection");
                self.state.lock().await.mark_closed();
                CONNECTED_GAUGE.set(0.0);
                self.send_event(KioskEvent::Disconnected).await;
            }
            Event::Incoming(Packet::PingResp) => {
                trace!("keep-alive pong");
            }
            Event::Incoming(packet) => {
                trace!(?packet, "ignoring incoming packet");
            }
            Event::Outgoing(Outgoing::Publish(pkid)) => {
                debug!(pkid, "order handed to transport");
            }
            Event::Outgoing(outgoing) => {
                trace!(?outgoing, "outgoing packet");
            }
        }
    }

    async fn handle_connection_error(&mut self, err: ConnectionError) -> Result<()> {
        error!("MQTT connection error: {err}");
        let attempt = {
            let mut state = self.state.lock().await;
            state.mark_error();
            state.increment_reconnect()
        };
        CONNECTED_GAUGE.set(0.0);
        RECONNECT_COUNTER.increment(1);
        self.send_event(KioskEvent::ConnectionError {
            reason: err.to_string(),
        })
        .await;

        let max = self.config.broker.max_reconnects;
        if max > 0 && attempt >= max {
            error!("maximum reconnection attempts ({max}) reached");
            return Err(KioskError::MaxReconnectsExceeded.into());
        }

        let delay = reconnect_delay(self.config.broker.reconnect_delay, attempt);
        warn!("reconnecting in {}s (attempt {attempt})", delay.as_secs());
        self.send_event(KioskEvent::Reconnecting {
            attempt,
            delay_secs: delay.as_secs(),
        })
        .await;
        sleep(delay).await;
        self.state.lock().await.mark_connecting();
        Ok(())
    }

    async fn send_event(&self, event: KioskEvent) {
        if let Err(err) = self.events.send(event).await {
            warn!("dropping kiosk event: {err}");
        }
    }
}

/// Doubles the base delay per attempt, capped, plus random jitter so a fleet
/// of kiosks does not re-dial in lockstep.
fn reconnect_delay(base: Duration, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(4);
    let scaled = base.saturating_mul(1u32 << exp).min(MAX_RECONNECT_DELAY);
    let jitter_ms = fastrand::u64(0..=base.as_millis() as u64 / 2);
    scaled + Duration::from_millis(jitter_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_from_the_base() {
        let base = Duration::from_secs(5);
        let first = reconnect_delay(base, 1);
        assert!(first >= base);
        assert!(first <= base + base / 2);

        let third = reconnect_delay(base, 3);
        assert!(third >= base * 4);
        assert!(third <= base * 4 + base / 2);
    }

    #[test]
    fn delay_is_capped() {
        let base = Duration::from_secs(30);
        let late = reconnect_delay(base, 20);
        assert!(late <= MAX_RECONNECT_DELAY + base / 2);
    }
}
