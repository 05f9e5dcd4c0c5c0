/// file: src/events.rs
/// description: event system to decouple kiosk logic from UI presentation
use crate::catalog::CatalogItem;
use crate::order::SubmitBlock;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum KioskEvent {
    Starting,
    CatalogLoaded { count: usize },
    CatalogFailed { reason: String },
    Connecting { url: String },
    Connected { session_id: String },
    ConnectionError { reason: String },
    Disconnected,
    Reconnecting { attempt: u32, delay_secs: u64 },
    MenuRequested,
    Selected { index: usize, item: CatalogItem },
    OrderBlocked(SubmitBlock),
    OrderPlaced { drink: String },
    OrderFailed { reason: String },
    DeliveryConfirmed { packet_id: u16 },
    Stopping,
}

// Bounded so a wedged terminal cannot grow the queue without limit. Event
// volume here is user-interaction scale, not market-data scale.
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub type EventSender = mpsc::Sender<KioskEvent>;
pub type EventReceiver = mpsc::Receiver<KioskEvent>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}
