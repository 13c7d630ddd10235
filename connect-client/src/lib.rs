//! Client for the contact-center management API
//!
//! [`ConnectClient`] validates request shapes, serializes them and hands
//! them to a [`Transport`]. Error payloads come back as typed
//! [`connect_core::ConnectFault`] values.

pub mod client;
pub mod error;
pub mod telemetry;
pub mod transport;

pub use client::ConnectClient;
pub use error::{ConnectError, ConnectResult, TelemetryError};
pub use telemetry::{init_tracing, TelemetryConfig};
pub use transport::{OperationCall, Transport, TransportError, TransportResponse};

pub use connect_core::{SdkConfig, ValidationMode};
