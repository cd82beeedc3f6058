// nmsops-api: Async Rust client for the nmsops device-management backend

pub mod client;
pub mod credentials;
pub mod devices;
pub mod discovery;
pub mod error;
pub mod telemetry;
pub mod transport;
pub mod types;

pub use client::NmsClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
