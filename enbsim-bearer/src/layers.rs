//! Interfaces to the lower layers
//!
//! The bearer handler drives four independently-addressed layers. Every call
//! is a synchronous, non-blocking update of an in-memory table. The layers are
//! shared by all subscriber sessions, so implementations take `&self` and
//! serialize concurrent calls internally.

use std::net::Ipv4Addr;

use crate::ids::Lcid;
use crate::layer_config::{PdcpBearerConfig, RlcConfig, SchedBearerConfig};

/// RLC (link layer) bearer management
pub trait RlcInterface: Send + Sync {
    /// Creates or reconfigures the RLC entity of a logical channel
    fn add_bearer(&self, rnti: u16, lcid: Lcid, config: &RlcConfig);
}

/// PDCP (header compression / ciphering layer) bearer management
pub trait PdcpInterface: Send + Sync {
    /// Creates or reconfigures the PDCP entity of a logical channel
    fn add_bearer(&self, rnti: u16, lcid: Lcid, config: &PdcpBearerConfig);
}

/// MAC scheduler bearer management
pub trait MacInterface: Send + Sync {
    /// Sets the scheduling direction and group of a logical channel
    fn configure_bearer(&self, rnti: u16, lcid: Lcid, config: &SchedBearerConfig);

    /// Signals that the dedicated configuration is active for the subscriber
    fn enable_dedicated_config(&self, rnti: u16, enabled: bool);
}

/// GTP-U tunnel management
pub trait GtpuInterface: Send + Sync {
    /// Registers the S1-U tunnel of a bearer and returns the local (inbound) TEID
    fn register_bearer(&self, rnti: u16, lcid: Lcid, peer_addr: Ipv4Addr, teid_out: u32) -> u32;

    /// Removes the S1-U tunnel of a bearer
    fn remove_bearer(&self, rnti: u16, lcid: Lcid);
}

/// Borrowed handles to the four layers used by a bearer handler
#[derive(Clone, Copy)]
pub struct BearerLayers<'a> {
    /// RLC layer
    pub rlc: &'a dyn RlcInterface,
    /// PDCP layer
    pub pdcp: &'a dyn PdcpInterface,
    /// MAC scheduler
    pub mac: &'a dyn MacInterface,
    /// GTP-U layer
    pub gtpu: &'a dyn GtpuInterface,
}

impl<'a> BearerLayers<'a> {
    /// Bundles the layer handles
    pub fn new(
        rlc: &'a dyn RlcInterface,
        pdcp: &'a dyn PdcpInterface,
        mac: &'a dyn MacInterface,
        gtpu: &'a dyn GtpuInterface,
    ) -> Self {
        Self {
            rlc,
            pdcp,
            mac,
            gtpu,
        }
    }
}

impl std::fmt::Debug for BearerLayers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerLayers").finish_non_exhaustive()
    }
}
