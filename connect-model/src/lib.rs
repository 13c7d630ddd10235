//! Connect Model - Request, Result and Value Shapes
//!
//! One shape per object in the service's wire schema, grouped by API area.
//! Every request implements [`Operation`], which names the service
//! operation and its result shape; list-style requests additionally
//! implement [`PaginatedOperation`], requests with a client token
//! [`IdempotentOperation`].

pub mod constraints;
pub mod contact;
pub mod evaluation;
pub mod hierarchy;
pub mod metrics;
pub mod operation;
pub mod queue;
pub mod resources;
pub mod tagging;
pub mod user;

pub use operation::{IdempotentOperation, Operation, PaginatedOperation};

// Re-export core types for convenience
pub use connect_core::{
    ConnectFault, Double, ModelError, Timestamp, Validate, ValidationError,
};
