//! Connect Core - Shared Primitives
//!
//! Building blocks every model shape is made of. This crate contains no
//! shapes of its own, only the pieces they are generated from:
//! - `shape!` / `wire_enum!` declarative generators
//! - wire value types (`Timestamp`, `Double`, `Sensitive`)
//! - debug-string formatting for shapes
//! - the unique-key guard used by map fields
//! - client-side constraint checks
//! - service fault decoding
//! - SDK configuration

pub mod config;
pub mod display;
pub mod error;
pub mod fault;
pub mod macros;
pub mod map;
pub mod validation;
pub mod value;

pub use config::{SdkConfig, ValidationMode};
pub use display::{FieldDisplay, ShapeWriter};
pub use error::{ConfigError, ModelError, ValidationError};
pub use fault::{decode_fault, sanitize_error_code, ConnectFault, ERROR_TYPE_HEADER};
pub use map::insert_unique;
pub use validation::{KnownValue, Validate};
pub use value::{Double, Sensitive, Timestamp, REDACTED};
