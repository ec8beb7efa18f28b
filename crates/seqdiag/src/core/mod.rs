//! Core building blocks shared by the diagram builder
//!
//! The line buffer and error latch are independent primitives; the remaining
//! modules hold configuration, error types, token sets and output helpers.

mod buffer;
mod config;
mod error;
mod latch;
pub mod logging;
mod markdown;
mod types;

pub use buffer::*;
pub use config::*;
pub use error::*;
pub use latch::*;
pub use logging::*;
pub use markdown::*;
pub use types::*;
