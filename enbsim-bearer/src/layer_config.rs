//! Per-layer bearer configuration
//!
//! Configuration objects handed to RLC, PDCP and the MAC scheduler when a
//! radio bearer is created. The RLC and PDCP parameter sets double as the
//! provisioned per-QCI profile in the [`QciTable`](crate::config::QciTable).
//!
//! Default values follow 3GPP TS 36.331 Section 9.2.1 (default SRB
//! configuration).

use serde::{Deserialize, Serialize};

/// Either the 3GPP default value or an explicit configuration.
///
/// Mirrors the ASN.1 `CHOICE { explicitValue, defaultValue }` used for SRB
/// RLC and logical channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultOr<T> {
    /// Use the value defined in TS 36.331
    #[default]
    DefaultValue,
    /// Use the given value
    Explicit(T),
}

impl<T: Clone> DefaultOr<T> {
    /// Resolves to the explicit value, or computes the default.
    pub fn resolve(&self, default: impl FnOnce() -> T) -> T {
        match self {
            DefaultOr::DefaultValue => default(),
            DefaultOr::Explicit(value) => value.clone(),
        }
    }
}

// ============================================================================
// RLC
// ============================================================================

/// RLC UM sequence number field length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UmSnFieldLength {
    /// 5-bit SN
    Size5,
    /// 10-bit SN
    #[default]
    Size10,
}

/// RLC acknowledged mode parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlcAmConfig {
    /// t-PollRetransmit in milliseconds
    pub t_poll_retx_ms: u16,
    /// pollPDU, `None` for infinity
    #[serde(default)]
    pub poll_pdu: Option<u16>,
    /// pollByte in kilobytes, `None` for infinity
    #[serde(default)]
    pub poll_byte_kb: Option<u32>,
    /// maxRetxThreshold
    pub max_retx_threshold: u8,
    /// t-Reordering in milliseconds
    pub t_reordering_ms: u16,
    /// t-StatusProhibit in milliseconds
    pub t_status_prohibit_ms: u16,
}

impl Default for RlcAmConfig {
    fn default() -> Self {
        Self {
            t_poll_retx_ms: 45,
            poll_pdu: None,
            poll_byte_kb: None,
            max_retx_threshold: 4,
            t_reordering_ms: 35,
            t_status_prohibit_ms: 0,
        }
    }
}

/// RLC unacknowledged mode parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RlcUmConfig {
    /// SN field length (both directions)
    #[serde(default)]
    pub sn_field_length: UmSnFieldLength,
    /// t-Reordering in milliseconds
    pub t_reordering_ms: u16,
}

/// RLC entity configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RlcConfig {
    /// Transparent mode
    Tm,
    /// Unacknowledged mode
    Um(RlcUmConfig),
    /// Acknowledged mode
    Am(RlcAmConfig),
}

impl RlcConfig {
    /// Default RLC configuration for SRB1 and SRB2 (AM).
    ///
    /// SRB1 and SRB2 share the same default; the id only selects the bearer.
    pub fn srb_default(_srb_id: u8) -> Self {
        RlcConfig::Am(RlcAmConfig::default())
    }

    /// Fallback configuration for a DRB that does not carry an explicit one.
    pub fn drb_default() -> Self {
        RlcConfig::Am(RlcAmConfig::default())
    }

    /// Returns true for acknowledged mode
    pub fn is_am(&self) -> bool {
        matches!(self, RlcConfig::Am(_))
    }
}

// ============================================================================
// PDCP
// ============================================================================

/// PDCP sequence number length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdcpSnLength {
    /// 5 bits (SRBs)
    Len5,
    /// 7 bits (DRB on RLC UM)
    Len7,
    /// 12 bits (DRB default)
    Len12,
    /// 15 bits (extended)
    Len15,
}

/// PDCP parameters carried per DRB in the RRC message (`PDCP-Config`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PdcpConfig {
    /// discardTimer in milliseconds, `None` for infinity
    #[serde(default)]
    pub discard_timer_ms: Option<u16>,
    /// statusReportRequired (DRBs mapped on RLC AM)
    #[serde(default)]
    pub status_report_required: bool,
    /// PDCP SN size for DRBs mapped on RLC UM
    #[serde(default)]
    pub um_sn_length: Option<PdcpSnLength>,
}

/// Radio bearer type as seen by PDCP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioBearerType {
    /// Signalling radio bearer
    Srb,
    /// Data radio bearer
    Drb,
}

/// PDCP entity configuration handed to the ciphering layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdcpBearerConfig {
    /// SRB or DRB identity
    pub bearer_id: u8,
    /// Bearer type
    pub rb_type: RadioBearerType,
    /// Sequence number length
    pub sn_length: PdcpSnLength,
    /// Discard timer in milliseconds, `None` for infinity
    pub discard_timer_ms: Option<u16>,
    /// Whether PDCP status reports are sent on re-establishment
    pub status_report_required: bool,
}

impl PdcpBearerConfig {
    /// PDCP configuration for an SRB (5-bit SN, control plane).
    pub fn srb(srb_id: u8) -> Self {
        Self {
            bearer_id: srb_id,
            rb_type: RadioBearerType::Srb,
            sn_length: PdcpSnLength::Len5,
            discard_timer_ms: None,
            status_report_required: false,
        }
    }

    /// PDCP configuration for a DRB.
    ///
    /// Uses the per-DRB parameters from the message when present, otherwise
    /// the class default (12-bit SN, no discard timer).
    pub fn drb(drb_id: u8, pdcp_cfg: Option<&PdcpConfig>) -> Self {
        let mut cfg = Self {
            bearer_id: drb_id,
            rb_type: RadioBearerType::Drb,
            sn_length: PdcpSnLength::Len12,
            discard_timer_ms: None,
            status_report_required: false,
        };
        if let Some(pdcp) = pdcp_cfg {
            cfg.sn_length = pdcp.um_sn_length.unwrap_or(PdcpSnLength::Len12);
            cfg.discard_timer_ms = pdcp.discard_timer_ms;
            cfg.status_report_required = pdcp.status_report_required;
        }
        cfg
    }
}

// ============================================================================
// MAC logical channel / scheduler
// ============================================================================

/// Uplink logical channel parameters (`LogicalChannelConfig.ul-SpecificParameters`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalChannelConfig {
    /// Logical channel priority (1-16, lower is higher priority)
    pub priority: u8,
    /// Prioritized bit rate in kbps, `None` for infinity
    #[serde(default)]
    pub prioritized_bit_rate_kbps: Option<u32>,
    /// Bucket size duration in milliseconds
    pub bucket_size_duration_ms: u16,
    /// Logical channel group (0-3), used as the scheduling group
    pub logical_channel_group: u8,
}

impl LogicalChannelConfig {
    /// Default logical channel configuration for SRB1 (priority 1) and SRB2 (priority 3).
    pub fn srb_default(srb_id: u8) -> Self {
        Self {
            priority: if srb_id == 1 { 1 } else { 3 },
            prioritized_bit_rate_kbps: None,
            bucket_size_duration_ms: 300,
            logical_channel_group: 0,
        }
    }
}

/// Scheduler bearer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BearerDirection {
    /// Uplink only
    Uplink,
    /// Downlink only
    Downlink,
    /// Both directions
    Both,
    /// Bearer not scheduled
    #[default]
    Disabled,
}

/// Scheduler bearer configuration record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedBearerConfig {
    /// Scheduled direction
    pub direction: BearerDirection,
    /// Scheduling (logical channel) group
    pub group: u8,
}

impl SchedBearerConfig {
    /// Bidirectional bearer in the given group
    pub fn both(group: u8) -> Self {
        Self {
            direction: BearerDirection::Both,
            group,
        }
    }

    /// Disabled bearer
    pub fn disabled() -> Self {
        Self::default()
    }
}
