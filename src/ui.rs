/// file: src/ui.rs
/// description: ui presentation layer that handles events from the kiosk
use crate::{
    catalog::CatalogItem,
    events::{EventReceiver, KioskEvent},
    formatter::{Colors, MenuFormatter},
    order::SubmitBlock,
};
use std::sync::Arc;
use tracing::{debug, info};

pub struct UIController {
    event_receiver: EventReceiver,
    menu_formatter: MenuFormatter,
    catalog: Arc<Vec<CatalogItem>>,
    selected: Option<usize>,
    quiet_mode: bool,
}

pub struct UIOptions {
    pub colored: bool,
    pub quiet: bool,
}

impl UIController {
    pub fn new(
        event_receiver: EventReceiver,
        catalog: Arc<Vec<CatalogItem>>,
        options: UIOptions,
    ) -> Self {
        Self {
            event_receiver,
            menu_formatter: MenuFormatter::new(options.colored),
            catalog,
            selected: None,
            quiet_mode: options.quiet,
        }
    }

    pub async fn run(&mut self) {
        self.print_startup_banner();
        while let Some(event) = self.event_receiver.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }
    }

    fn handle_event(&mut self, event: KioskEvent) -> bool {
        match event {
            KioskEvent::Starting => {
                info!("kiosk starting...");
            }
            KioskEvent::CatalogLoaded { count } => {
                self.print_status("MENU", &format!("{count} drinks available"));
                self.menu_formatter.print_menu(&self.catalog, self.selected);
            }
            KioskEvent::CatalogFailed { reason } => {
                debug!("catalog load failure: {reason}");
                self.print_error("MENU", "Error loading drink menu.");
            }
            KioskEvent::Connecting { url } => {
                self.print_status("CONNECTING", &url);
            }
            KioskEvent::Connected { session_id } => {
                debug!(%session_id, "broker session established");
                self.print_status("CONNECTED", "Ready to take orders!");
            }
            KioskEvent::ConnectionError { reason } => {
                self.print_error(
                    "CONNECTION ERROR",
                    &format!("Error connecting to MQTT broker: {reason}"),
                );
            }
            KioskEvent::Disconnected => {
                self.print_error(
                    "DISCONNECTED",
                    "Disconnected from MQTT broker. Attempting to reconnect...",
                );
            }
            KioskEvent::Reconnecting {
                attempt,
                delay_secs,
            } => {
                self.print_reconnect_info(delay_secs, attempt);
            }
            KioskEvent::MenuRequested => {
                self.menu_formatter.print_menu(&self.catalog, self.selected);
            }
            KioskEvent::Selected { index, item } => {
                self.selected = Some(index);
                self.menu_formatter.print_menu(&self.catalog, self.selected);
                self.print_status(
                    "SELECTED",
                    &format!("Selected: {} - {}", item.name, item.price_display()),
                );
            }
            KioskEvent::OrderBlocked(block) => match block {
                SubmitBlock::NoSelection => self.print_status("ORDER", block.message()),
                SubmitBlock::NotConnected => self.print_error("ORDER", block.message()),
            },
            KioskEvent::OrderPlaced { drink } => {
                self.selected = None;
                self.menu_formatter.print_menu(&self.catalog, self.selected);
                self.print_status(
                    "ORDER OK",
                    &format!("Order for \"{drink}\" placed successfully!"),
                );
            }
            KioskEvent::OrderFailed { reason } => {
                debug!("publish failure: {reason}");
                self.print_error("ORDER FAILED", "Order failed! (MQTT error)");
            }
            KioskEvent::DeliveryConfirmed { packet_id } => {
                debug!(packet_id, "broker acknowledged delivery");
            }
            KioskEvent::Stopping => {
                self.print_status("STOPPING", "Kiosk shutting down");
                return false;
            }
        }

        true
    }

    fn print_startup_banner(&self) {
        if self.quiet_mode {
            return;
        }

        println!();
        println!(
            "{}{}== DRINK KIOSK v{} =={}",
            Colors::BOLD,
            Colors::BRIGHT_CYAN,
            env!("CARGO_PKG_VERSION"),
            Colors::RESET
        );
        println!();
    }

    fn print_status(&self, status: &str, message: &str) {
        if self.quiet_mode {
            return;
        }

        let (color, symbol) = match status {
            "CONNECTING" => (Colors::BRIGHT_YELLOW, "*"),
            "CONNECTED" | "ORDER OK" => (Colors::BRIGHT_GREEN, "+"),
            "SELECTED" => (Colors::BRIGHT_CYAN, ">"),
            "MENU" => (Colors::BRIGHT_MAGENTA, "~"),
            "STOPPING" => (Colors::BRIGHT_MAGENTA, "!"),
            _ => (Colors::WHITE, "-"),
        };

        println!(
            "{}{}[{}]{} {} {}{}{}",
            Colors::BOLD,
            color,
            status,
            Colors::RESET,
            symbol,
            Colors::WHITE,
            message,
            Colors::RESET
        );
    }

    fn print_error(&self, error_type: &str, message: &str) {
        println!(
            "{}{}[{}]{} ! {}{}{}",
            Colors::BOLD,
            Colors::BRIGHT_RED,
            error_type,
            Colors::RESET,
            Colors::RED,
            message,
            Colors::RESET
        );
    }

    fn print_reconnect_info(&self, delay_secs: u64, attempt: u32) {
        println!(
            "{}{}[RECONNECTING]{} > Attempt {} in {}s...",
            Colors::BOLD,
            Colors::BRIGHT_YELLOW,
            Colors::RESET,
            attempt,
            delay_secs
        );
    }
}
