/// file: src/config.rs
/// description: typed runtime configuration built from CLI arguments
use crate::cli::Args;
use crate::error::KioskError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub broker: BrokerConfig,
    pub order: OrderConfig,
    pub catalog: CatalogConfig,
    pub metrics: MetricsConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub url: Url,
    pub client_id: String,
    pub keep_alive: Duration,
    pub reconnect_delay: Duration,
    pub max_reconnects: u32,
}

#[derive(Debug, Clone)]
pub struct OrderConfig {
    pub topic: String,
    pub customer: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colored: bool,
    pub quiet: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self, KioskError> {
        let url = Url::parse(&args.url)?;
        match url.scheme() {
            "ws" | "wss" => {}
            other => return Err(KioskError::UnsupportedScheme(other.to_string())),
        }

        let client_id = args
            .client_id
            .clone()
            .unwrap_or_else(|| format!("kiosk-{}", uuid::Uuid::new_v4()));

        Ok(Config {
            broker: BrokerConfig {
                url,
                client_id,
                keep_alive: Duration::from_secs(args.keep_alive),
                reconnect_delay: Duration::from_secs(args.reconnect_delay),
                max_reconnects: args.max_reconnects,
            },
            order: OrderConfig {
                topic: args.topic.clone(),
                customer: args.name.clone(),
            },
            catalog: CatalogConfig {
                path: PathBuf::from(&args.catalog),
            },
            metrics: MetricsConfig {
                enabled: args.metrics,
                port: args.metrics_port,
            },
            ui: UiConfig {
                colored: !args.no_color,
                quiet: args.quiet,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_the_public_broker() {
        let args = Args::parse_from(["drink-kiosk"]);
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.broker.url.scheme(), "wss");
        assert_eq!(config.order.topic, "github/static/drink_orders");
        assert_eq!(config.catalog.path, PathBuf::from("drinks.csv"));
        assert!(config.broker.client_id.starts_with("kiosk-"));
    }

    #[test]
    fn non_websocket_scheme_is_rejected() {
        let args = Args::parse_from(["drink-kiosk", "--url", "https://example.com/mqtt"]);
        let err = Config::from_args(&args).unwrap_err();
        assert!(matches!(err, KioskError::UnsupportedScheme(_)));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let args = Args::parse_from(["drink-kiosk", "--url", "not a url"]);
        assert!(Config::from_args(&args).is_err());
    }
}
