//! Real-time messaging integration.
//!
//! Two halves:
//! - [`channel`] - channel-name parsing and the access gate (pure logic,
//!   no I/O, unit-testable without a session store or network)
//! - [`client`] - signs channel-authorization tokens and posts trigger
//!   events to the provider's REST API

pub mod channel;
pub mod client;
mod error;

pub use channel::{ChannelGrant, ChannelName, GateDenied, PresenceData, authorize};
pub use client::{ChannelAuth, RealtimeClient};
pub use error::RealtimeError;
