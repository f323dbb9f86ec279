//! Test fixtures and configuration helpers
//!
//! Provides QCI table YAML, transport addresses and pre-built E-RAB setup
//! requests.

use std::net::Ipv4Addr;

use bytes::Bytes;
use enbsim_bearer::{BearerError, BearerHandler, ErabId, ErabQosParams};
use enbsim_common::TransportAddress;

/// QCI table with QCI 7 on RLC UM and QCI 9 on RLC AM
pub const QCI_TABLE_YAML: &str = r#"
qci:
  - qci: 7
    rlc:
      mode: um
      sn_field_length: size10
      t_reordering_ms: 45
    pdcp:
      discard_timer_ms: 100
      um_sn_length: len12
    logical_channel:
      priority: 13
      bucket_size_duration_ms: 100
      logical_channel_group: 2
  - qci: 9
    rlc:
      mode: am
      t_poll_retx_ms: 120
      poll_pdu: 64
      poll_byte_kb: 750
      max_retx_threshold: 16
      t_reordering_ms: 50
      t_status_prohibit_ms: 50
    pdcp:
      discard_timer_ms: 150
      status_report_required: true
    logical_channel:
      priority: 11
      bucket_size_duration_ms: 100
      logical_channel_group: 3
"#;

/// Serving gateway S1-U address used by default
pub fn sgw_address() -> TransportAddress {
    TransportAddress::from_ipv4(Ipv4Addr::new(172, 16, 0, 10))
}

/// A 128-bit transport address, which the bearer handler rejects
pub fn ipv6_address() -> TransportAddress {
    let mut data = vec![0u8; 16];
    data[0] = 0x20;
    data[1] = 0x01;
    data[15] = 0x01;
    TransportAddress::from_bytes(data, 128).unwrap_or_default()
}

/// NAS PDU tagged with the E-RAB id so tests can tell payloads apart
pub fn sample_nas_pdu(erab_id: ErabId) -> Bytes {
    Bytes::from(vec![0x27, 0x1f, 0x00, erab_id, 0x52])
}

/// S1AP E-RAB setup item
#[derive(Debug, Clone)]
pub struct ErabRequest {
    pub erab_id: ErabId,
    pub qos: ErabQosParams,
    pub address: TransportAddress,
    pub teid_out: u32,
    pub nas_pdu: Option<Bytes>,
}

impl ErabRequest {
    /// Non-GBR request towards [`sgw_address`]
    pub fn new(erab_id: ErabId, qci: u8) -> Self {
        Self {
            erab_id,
            qos: ErabQosParams::non_gbr(qci),
            address: sgw_address(),
            teid_out: 0x1000 + u32::from(erab_id),
            nas_pdu: None,
        }
    }

    pub fn with_nas_pdu(mut self) -> Self {
        self.nas_pdu = Some(sample_nas_pdu(self.erab_id));
        self
    }

    pub fn with_address(mut self, address: TransportAddress) -> Self {
        self.address = address;
        self
    }

    pub fn apply(&self, handler: &mut BearerHandler<'_>) -> Result<(), BearerError> {
        handler.setup_erab(
            self.erab_id,
            &self.qos,
            &self.address,
            self.teid_out,
            self.nas_pdu.clone(),
        )
    }
}
