//! QCI profile configuration
//!
//! Each admitted E-RAB selects a provisioned per-QCI profile that fixes its
//! RLC mode, PDCP parameters and uplink logical channel configuration. The
//! profiles are read from YAML and checked before a [`QciTable`] is built.
//!
//! # Example
//!
//! ```
//! use enbsim_bearer::config::{load_qci_config_from_str, QciTable};
//!
//! let yaml = r#"
//! qci:
//!   - qci: 9
//!     rlc: { mode: am, t_poll_retx_ms: 80, max_retx_threshold: 32, t_reordering_ms: 80, t_status_prohibit_ms: 35 }
//!     pdcp: { discard_timer_ms: 150, status_report_required: true }
//!     logical_channel: { priority: 11, prioritized_bit_rate_kbps: 8, bucket_size_duration_ms: 50, logical_channel_group: 3 }
//! "#;
//! let config = load_qci_config_from_str(yaml).unwrap();
//! let table = QciTable::from_config(&config).unwrap();
//! assert!(table.get(9).is_ok());
//! assert!(table.get(7).is_err());
//! ```

use std::collections::HashSet;
use std::path::Path;

use enbsim_common::Error as CommonError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::BearerError;
use crate::layer_config::{
    LogicalChannelConfig, PdcpConfig, PdcpSnLength, RlcAmConfig, RlcConfig, RlcUmConfig,
    UmSnFieldLength,
};

/// Number of QCI slots in the table (QCI 0-9)
pub const MAX_NOF_QCI: usize = 10;

/// Provisioned profile for one QCI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QciConfig {
    /// QoS class identifier
    pub qci: u8,
    /// RLC configuration for DRBs of this class
    pub rlc: RlcConfig,
    /// PDCP parameters for DRBs of this class
    #[serde(default)]
    pub pdcp: PdcpConfig,
    /// Uplink logical channel parameters
    pub logical_channel: LogicalChannelConfig,
}

/// QCI table configuration as loaded from YAML
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QciTableConfig {
    /// Provisioned QCI profiles
    #[serde(default)]
    pub qci: Vec<QciConfig>,
}

/// Errors found while validating a QCI table configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// QCI value outside the table
    #[error("Invalid QCI: {0} (table holds QCI 0-{max})", max = MAX_NOF_QCI - 1)]
    InvalidQci(u8),

    /// The same QCI is provisioned twice
    #[error("Duplicate QCI: {0}")]
    DuplicateQci(u8),

    /// Logical channel group outside 0-3
    #[error("Invalid logical channel group {group} for QCI {qci}")]
    InvalidLogicalChannelGroup {
        /// Offending QCI
        qci: u8,
        /// Configured group
        group: u8,
    },

    /// Logical channel priority outside 1-16
    #[error("Invalid logical channel priority {priority} for QCI {qci}")]
    InvalidPriority {
        /// Offending QCI
        qci: u8,
        /// Configured priority
        priority: u8,
    },
}

/// Loads a QCI table configuration from a YAML file.
///
/// Only parses the file; call [`validate_qci_config`] or
/// [`QciTable::from_config`] afterwards.
pub fn load_qci_config<P: AsRef<Path>>(path: P) -> Result<QciTableConfig, CommonError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    load_qci_config_from_str(&contents)
}

/// Loads a QCI table configuration from a YAML string.
pub fn load_qci_config_from_str(yaml: &str) -> Result<QciTableConfig, CommonError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Validates a QCI table configuration.
pub fn validate_qci_config(config: &QciTableConfig) -> Result<(), ConfigValidationError> {
    let mut seen = HashSet::new();
    for entry in &config.qci {
        if usize::from(entry.qci) >= MAX_NOF_QCI {
            return Err(ConfigValidationError::InvalidQci(entry.qci));
        }
        if !seen.insert(entry.qci) {
            return Err(ConfigValidationError::DuplicateQci(entry.qci));
        }
        let lc = &entry.logical_channel;
        if lc.logical_channel_group > 3 {
            return Err(ConfigValidationError::InvalidLogicalChannelGroup {
                qci: entry.qci,
                group: lc.logical_channel_group,
            });
        }
        if !(1..=16).contains(&lc.priority) {
            return Err(ConfigValidationError::InvalidPriority {
                qci: entry.qci,
                priority: lc.priority,
            });
        }
    }
    Ok(())
}

/// Runtime QCI table indexed by QCI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QciTable {
    entries: [Option<QciConfig>; MAX_NOF_QCI],
}

impl QciTable {
    /// Creates a table with no provisioned classes
    pub fn empty() -> Self {
        Self {
            entries: Default::default(),
        }
    }

    /// Builds a table from a loaded configuration, validating it first
    pub fn from_config(config: &QciTableConfig) -> Result<Self, CommonError> {
        validate_qci_config(config).map_err(|e| CommonError::Config(e.to_string()))?;
        let mut table = Self::empty();
        for entry in &config.qci {
            table.entries[usize::from(entry.qci)] = Some(entry.clone());
        }
        Ok(table)
    }

    /// Looks up the profile of a QCI.
    ///
    /// Fails with [`BearerError::UnconfiguredQosClass`] when the QCI is
    /// outside the table or not provisioned.
    pub fn get(&self, qci: u8) -> Result<&QciConfig, BearerError> {
        self.entries
            .get(usize::from(qci))
            .and_then(Option::as_ref)
            .ok_or(BearerError::UnconfiguredQosClass { qci })
    }

    /// Returns true if the QCI has a provisioned profile
    pub fn is_configured(&self, qci: u8) -> bool {
        self.get(qci).is_ok()
    }

    /// Returns the provisioned QCIs in ascending order
    pub fn configured_qcis(&self) -> Vec<u8> {
        self.entries.iter().flatten().map(|e| e.qci).collect()
    }
}

impl Default for QciTable {
    /// QCI 7 on RLC UM and QCI 9 on RLC AM.
    fn default() -> Self {
        let mut table = Self::empty();
        table.entries[7] = Some(QciConfig {
            qci: 7,
            rlc: RlcConfig::Um(RlcUmConfig {
                sn_field_length: UmSnFieldLength::Size10,
                t_reordering_ms: 45,
            }),
            pdcp: PdcpConfig {
                discard_timer_ms: Some(100),
                status_report_required: false,
                um_sn_length: Some(PdcpSnLength::Len12),
            },
            logical_channel: LogicalChannelConfig {
                priority: 13,
                prioritized_bit_rate_kbps: None,
                bucket_size_duration_ms: 100,
                logical_channel_group: 2,
            },
        });
        table.entries[9] = Some(QciConfig {
            qci: 9,
            rlc: RlcConfig::Am(RlcAmConfig {
                t_poll_retx_ms: 120,
                poll_pdu: Some(64),
                poll_byte_kb: Some(750),
                max_retx_threshold: 16,
                t_reordering_ms: 50,
                t_status_prohibit_ms: 50,
            }),
            pdcp: PdcpConfig {
                discard_timer_ms: Some(150),
                status_report_required: true,
                um_sn_length: None,
            },
            logical_channel: LogicalChannelConfig {
                priority: 11,
                prioritized_bit_rate_kbps: None,
                bucket_size_duration_ms: 100,
                logical_channel_group: 3,
            },
        });
        table
    }
}
