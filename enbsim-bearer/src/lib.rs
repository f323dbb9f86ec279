//! Radio bearer lifecycle management for the enbsim eNB control plane
//!
//! Translates E-RAB admission requests from the core network into SRB/DRB
//! entries of RRC dedicated configurations (3GPP TS 36.331) and keeps the RLC,
//! PDCP, MAC scheduler and GTP-U layers consistent across incremental
//! reconfigurations.
//!
//! A reconfiguration cycle runs in three steps: bearers are admitted with
//! [`BearerHandler::setup_erab`] and [`BearerHandler::setup_srb`], the delta is
//! rendered into an outgoing message with [`BearerHandler::render_into`] or
//! [`BearerHandler::prepare_reconfiguration`], and [`BearerHandler::commit`]
//! configures the scheduler once the peer confirms.
//!
//! # Example
//!
//! ```
//! use std::net::Ipv4Addr;
//!
//! use enbsim_bearer::layers::{GtpuInterface, MacInterface, PdcpInterface, RlcInterface};
//! use enbsim_bearer::layer_config::{PdcpBearerConfig, RlcConfig, SchedBearerConfig};
//! use enbsim_bearer::{
//!     BearerHandler, BearerLayers, ErabQosParams, QciTable, RrcConnectionReconfiguration,
//! };
//! use enbsim_common::TransportAddress;
//!
//! struct NoopLayers;
//!
//! impl RlcInterface for NoopLayers {
//!     fn add_bearer(&self, _: u16, _: u8, _: &RlcConfig) {}
//! }
//! impl PdcpInterface for NoopLayers {
//!     fn add_bearer(&self, _: u16, _: u8, _: &PdcpBearerConfig) {}
//! }
//! impl MacInterface for NoopLayers {
//!     fn configure_bearer(&self, _: u16, _: u8, _: &SchedBearerConfig) {}
//!     fn enable_dedicated_config(&self, _: u16, _: bool) {}
//! }
//! impl GtpuInterface for NoopLayers {
//!     fn register_bearer(&self, _: u16, _: u8, _: Ipv4Addr, _: u32) -> u32 {
//!         0x100
//!     }
//!     fn remove_bearer(&self, _: u16, _: u8) {}
//! }
//!
//! let table = QciTable::default();
//! let noop = NoopLayers;
//! let mut handler = BearerHandler::new(0x46, &table, BearerLayers::new(&noop, &noop, &noop, &noop));
//!
//! let addr = TransportAddress::from_ipv4(Ipv4Addr::new(10, 0, 0, 1));
//! handler.setup_erab(5, &ErabQosParams::non_gbr(9), &addr, 0x1234, None).unwrap();
//!
//! let mut reconf = RrcConnectionReconfiguration::default();
//! handler.prepare_reconfiguration(&mut reconf);
//! assert_eq!(reconf.rr_cfg_ded.drbs_to_add()[0].drb_id, 1);
//!
//! handler.commit();
//! assert!(handler.pending().is_empty());
//! ```

pub mod config;
pub mod diff;
pub mod erab;
pub mod error;
pub mod handler;
pub mod ids;
pub mod layer_config;
pub mod layers;
pub mod manager;
pub mod message;
pub mod pending;
pub mod sync;


pub use config::{
    load_qci_config, load_qci_config_from_str, validate_qci_config, ConfigValidationError,
    QciConfig, QciTable, QciTableConfig, MAX_NOF_QCI,
};
pub use diff::{BearerSnapshot, BearerUpdate};
pub use erab::{AllocationRetentionPriority, ErabQosParams, ErabRecord, GbrQosInformation};
pub use error::{BearerError, IdentifierKind};
pub use handler::BearerHandler;
pub use ids::{DrbId, ErabId, Lcid, SrbId};
pub use layers::{BearerLayers, GtpuInterface, MacInterface, PdcpInterface, RlcInterface};
pub use manager::BearerContextManager;
pub use message::{
    DedicatedConfigMessage, DrbToAddMod, RadioResourceConfigDedicated,
    RrcConnectionReconfiguration, RrcConnectionReconfigurationComplete,
    RrcConnectionReestablishment, RrcConnectionSetup, SrbToAddMod,
};
pub use pending::PendingChanges;
