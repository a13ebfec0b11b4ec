// labres-api: Async Rust client for the laboratory reservation service

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ReservationClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{CreateReservationRequest, ReservationResponse, WireId};
