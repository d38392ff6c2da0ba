// mutectl-api: Async Rust client for the MuteDeck local control API

pub mod client;
pub mod error;
pub mod status;
pub mod transport;

pub use client::ControllerClient;
pub use error::{Error, Operation};
pub use status::StatusRecord;
pub use transport::TransportConfig;
