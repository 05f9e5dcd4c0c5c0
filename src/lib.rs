//! Terminal drink-ordering kiosk. Loads a drink catalog from a
//! comma-delimited file, renders a selectable menu, and publishes each
//! placed order as a JSON message to an MQTT broker over WebSockets.

/// Drink catalog model and CSV loading.
pub mod catalog;
/// Command-line argument definitions.
pub mod cli;
/// Runtime configuration model.
pub mod config;
/// Error types used across the crate.
pub mod error;
/// Event bus messages between kiosk logic and UI.
pub mod events;
/// Terminal output formatters.
pub mod formatter;
/// Kiosk controller - selection and order submission.
pub mod kiosk;
/// MQTT connection lifecycle observer.
pub mod monitor;
/// Metrics and health status structures.
pub mod monitoring;
/// Outgoing order message and submission outcomes.
pub mod order;
/// Shared kiosk state.
pub mod state;
/// Tracing/logging initialization.
pub mod tracing_setup;
/// Publish capability over the external MQTT client.
pub mod transport;
/// UI controller and presentation loop.
pub mod ui;

/// Primary crate error type.
pub use error::KioskError;
