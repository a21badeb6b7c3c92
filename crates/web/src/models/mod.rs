//! Domain models and view types.

pub mod chat;
pub mod session;
pub mod shipment;
pub mod user;

pub use chat::{ChatMessage, ChatMessageView};
pub use session::{CurrentUser, keys as session_keys};
pub use shipment::{Shipment, ShipmentView, TrackingUpdate, TrackingUpdateView};
pub use user::User;
