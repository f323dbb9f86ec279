//! Logging infrastructure for enbsim
//!
//! Configures the `tracing` subscriber and provides helpers for logging
//! NAS payloads relayed to the subscriber.

use std::fmt;

use tracing_subscriber::EnvFilter;

/// Destination of formatted log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// Standard output
    #[default]
    Stdout,
    /// The libtest capture buffer, shown only for failing tests
    TestHarness,
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter` when set. Returns false
/// if a subscriber was already installed, in which case nothing changes.
///
/// # Example
///
/// ```
/// use enbsim_common::logging::{init_logging, LogOutput};
///
/// // Default to info, but trace bearer reconfiguration
/// init_logging("info,enbsim_bearer=trace", LogOutput::Stdout);
/// ```
pub fn init_logging(default_filter: &str, output: LogOutput) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);
    match output {
        LogOutput::Stdout => builder.try_init(),
        LogOutput::TestHarness => builder.with_test_writer().try_init(),
    }
    .is_ok()
}

/// Protocol direction for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Received from the peer
    Rx,
    /// Sent to the peer
    Tx,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Log a protocol payload at debug level, with a hex dump at trace level.
///
/// # Example
///
/// ```
/// use enbsim_common::logging::{log_protocol_message, Direction};
///
/// let pdu = [0x27, 0x8a, 0x11];
/// log_protocol_message("NAS", Direction::Tx, "Activate Default EPS Bearer", 0x46, &pdu);
/// ```
pub fn log_protocol_message(
    protocol: &str,
    direction: Direction,
    msg_type: &str,
    rnti: u16,
    data: &[u8],
) {
    tracing::debug!(
        protocol = protocol,
        direction = %direction,
        msg_type = msg_type,
        rnti = rnti,
        len = data.len(),
        "{} {} rnti=0x{:x}",
        direction,
        msg_type,
        rnti
    );
    tracing::trace!(protocol = protocol, hex = %HexDump(data), "{} payload", protocol);
}

/// Log a NAS payload carried over RRC
pub fn log_nas_message(direction: Direction, msg_type: &str, rnti: u16, data: &[u8]) {
    log_protocol_message("NAS", direction, msg_type, rnti, data);
}

/// Wrapper for compact hex formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
