// file: src/order.rs
// description: outgoing order message and submission outcomes

use crate::catalog::CatalogItem;
use crate::error::KioskError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The message published for one order. Constructed fresh per submission,
/// never persisted. The timestamp serializes as an ISO-8601 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMessage {
    pub drink: String,
    pub name: String,
    pub timestamp: DateTime<Utc>,
}

impl OrderMessage {
    pub fn new(item: &CatalogItem, customer: &str) -> Self {
        Self {
            drink: item.name.clone(),
            name: customer.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn to_payload(&self) -> Result<Vec<u8>, KioskError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Why a submission was refused before touching the transport. Not a fault,
/// just a gated no-op with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlock {
    NoSelection,
    NotConnected,
}

impl SubmitBlock {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitBlock::NoSelection => "Please select a drink first.",
            SubmitBlock::NotConnected => "Cannot order: Not connected to MQTT broker.",
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The order was handed to the transport.
    Published(OrderMessage),
    /// A precondition failed; no transport call was made.
    Blocked(SubmitBlock),
    /// The transport refused the order; the selection is retained so the
    /// user can retry manually.
    Failed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CatalogItem {
        CatalogItem {
            name: "Espresso".to_string(),
            image: "e.png".to_string(),
            price: "2.50".to_string(),
        }
    }

    #[test]
    fn payload_carries_drink_name_and_customer() {
        let order = OrderMessage::new(&item(), "mehdi");
        let payload = order.to_payload().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["drink"], "Espresso");
        assert_eq!(value["name"], "mehdi");
    }

    #[test]
    fn timestamp_serializes_as_iso8601() {
        let order = OrderMessage::new(&item(), "mehdi");
        let value = serde_json::to_value(&order).unwrap();
        let raw = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(raw).is_ok());
    }

    #[test]
    fn block_messages_name_the_failed_precondition() {
        assert_eq!(
            SubmitBlock::NoSelection.message(),
            "Please select a drink first."
        );
        assert_eq!(
            SubmitBlock::NotConnected.message(),
            "Cannot order: Not connected to MQTT broker."
        );
    }
}
