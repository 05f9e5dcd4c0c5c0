// file: src/transport.rs
// description: publish capability over the external MQTT client
// reference: https://docs.rs/rumqttc/latest/rumqttc/

use crate::config::Config;
use crate::error::KioskError;
use async_trait::async_trait;
use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS, Transport};
use tracing::debug;

/// The delivery seam the kiosk controller depends on. The production
/// implementation hands the payload to the MQTT client; tests substitute a
/// recording double.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn publish_order(&self, topic: &str, payload: Vec<u8>) -> Result<(), KioskError>;
}

pub struct MqttTransport {
    client: AsyncClient,
}

#[async_trait]
impl OrderTransport for MqttTransport {
    async fn publish_order(&self, topic: &str, payload: Vec<u8>) -> Result<(), KioskError> {
        debug!(topic, bytes = payload.len(), "publishing order");
        self.client
            .publish(topic, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(KioskError::Client)
    }
}

// Requests queued towards the event loop before backpressure kicks in.
const REQUEST_CHANNEL_CAPACITY: usize = 16;

/// Builds the MQTT client for the configured broker. The returned event
/// loop must be polled (see `ConnectionMonitor`) for the connection to make
/// progress; reconnect dialing is the client library's own responsibility.
pub fn connect(config: &Config) -> Result<(MqttTransport, EventLoop), KioskError> {
    // For websocket transports rumqttc expects the full URL as the broker
    // address and ignores the port argument.
    let default_port = if config.broker.url.scheme() == "wss" { 443 } else { 80 };
    let port = config.broker.url.port().unwrap_or(default_port);

    let mut options = MqttOptions::new(
        config.broker.client_id.clone(),
        config.broker.url.as_str(),
        port,
    );
    match config.broker.url.scheme() {
        "ws" => options.set_transport(Transport::Ws),
        "wss" => options.set_transport(Transport::wss_with_default_config()),
        other => return Err(KioskError::UnsupportedScheme(other.to_string())),
    };
    options.set_keep_alive(config.broker.keep_alive);

    let (client, eventloop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);
    Ok((MqttTransport { client }, eventloop))
}
