use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("catalog read error: {0}")]
    CatalogLoad(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    CatalogParse(String),

    #[error("MQTT connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    #[error("JSON serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported broker URL scheme: {0} (expected ws or wss)")]
    UnsupportedScheme(String),

    #[error("maximum reconnection attempts exceeded")]
    MaxReconnectsExceeded,

    #[error("metrics server error: {0}")]
    MetricsError(String),
}
