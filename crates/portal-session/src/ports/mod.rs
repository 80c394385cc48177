//! Ports module for the session core
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::SessionApi;
pub use outbound::AuthGateway;
