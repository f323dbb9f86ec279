//! Common types and utilities for enbsim
//!
//! This crate provides the shared error type, logging setup and the
//! transport-layer address representation used across enbsim crates.

pub mod error;
pub mod logging;
pub mod transport_address;

pub use error::Error;
pub use logging::{
    init_logging, log_nas_message, log_protocol_message, Direction, HexDump, LogOutput,
};
pub use transport_address::TransportAddress;
