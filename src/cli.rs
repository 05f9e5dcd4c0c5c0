use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "drink-kiosk",
    about = "terminal drink-ordering kiosk publishing orders to an MQTT broker",
    version
)]
pub struct Args {
    /// MQTT broker endpoint URL (ws:// or wss://)
    #[arg(short, long, default_value = "wss://broker.hivemq.com:8884/mqtt")]
    pub url: String,

    /// Topic that orders are published to
    #[arg(short, long, default_value = "github/static/drink_orders")]
    pub topic: String,

    /// Path to the comma-delimited catalog file
    #[arg(short, long, default_value = "drinks.csv")]
    pub catalog: String,

    /// Customer name carried in the order payload
    #[arg(short, long, default_value = "anonymous")]
    pub name: String,

    /// MQTT client id (defaults to a random kiosk-<uuid>)
    #[arg(long)]
    pub client_id: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,

    /// Enable metrics server
    #[arg(long)]
    pub metrics: bool,

    /// Metrics server port
    #[arg(long, default_value = "9090")]
    pub metrics_port: u16,

    /// MQTT keep-alive interval in seconds
    #[arg(long, default_value = "30")]
    pub keep_alive: u64,

    /// Base reconnection delay in seconds
    #[arg(long, default_value = "5")]
    pub reconnect_delay: u64,

    /// Maximum number of reconnection attempts (0 for unlimited)
    #[arg(long, default_value = "0")]
    pub max_reconnects: u32,

    /// Disable colored output (useful for piping to files)
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode - status lines only for errors
    #[arg(long)]
    pub quiet: bool,
}
