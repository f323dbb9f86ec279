//! E-RAB records
//!
//! An E-RAB is admitted by the core network with its QoS parameters and the
//! S1-U transport endpoint (3GPP TS 36.413 `E-RABToBeSetupItem`).

use bytes::Bytes;
use enbsim_common::TransportAddress;

use crate::ids::{erab_to_drb, erab_to_lcid, DrbId, ErabId, Lcid};

/// Allocation and retention priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRetentionPriority {
    /// Priority level (1-15, 1 is highest)
    pub priority_level: u8,
    /// Whether the bearer may pre-empt others
    pub pre_emption_capability: bool,
    /// Whether the bearer may be pre-empted
    pub pre_emption_vulnerability: bool,
}

impl Default for AllocationRetentionPriority {
    fn default() -> Self {
        Self {
            priority_level: 15,
            pre_emption_capability: false,
            pre_emption_vulnerability: true,
        }
    }
}

/// Bit rates of a GBR bearer, in bits per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GbrQosInformation {
    /// Maximum bit rate downlink
    pub max_bitrate_dl: u64,
    /// Maximum bit rate uplink
    pub max_bitrate_ul: u64,
    /// Guaranteed bit rate downlink
    pub guaranteed_bitrate_dl: u64,
    /// Guaranteed bit rate uplink
    pub guaranteed_bitrate_ul: u64,
}

/// E-RAB level QoS parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErabQosParams {
    /// QoS class identifier
    pub qci: u8,
    /// Allocation and retention priority
    pub arp: AllocationRetentionPriority,
    /// GBR information, `None` for non-GBR bearers
    pub gbr: Option<GbrQosInformation>,
}

impl ErabQosParams {
    /// Non-GBR parameters with default ARP
    pub fn non_gbr(qci: u8) -> Self {
        Self {
            qci,
            ..Default::default()
        }
    }
}

/// An admitted E-RAB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErabRecord {
    /// E-RAB id
    pub id: ErabId,
    /// QoS parameters
    pub qos: ErabQosParams,
    /// S1-U transport address of the core network endpoint
    pub address: TransportAddress,
    /// TEID used towards the core network
    pub teid_out: u32,
    /// Local TEID assigned by GTP-U
    pub teid_in: u32,
    /// NAS PDU waiting to be delivered with the next reconfiguration
    pub nas_pdu: Option<Bytes>,
}

impl ErabRecord {
    /// DRB carrying this E-RAB
    pub fn drb_id(&self) -> DrbId {
        erab_to_drb(self.id)
    }

    /// Logical channel carrying this E-RAB
    pub fn lcid(&self) -> Lcid {
        erab_to_lcid(self.id)
    }

    /// Returns true if a NAS PDU is buffered
    pub fn has_pending_nas_pdu(&self) -> bool {
        self.nas_pdu.is_some()
    }
}
