//! RRC dedicated-configuration message views
//!
//! Logical content of the `RadioResourceConfigDedicated` section carried by
//! `RRCConnectionSetup`, `RRCConnectionReestablishment` and
//! `RRCConnectionReconfiguration` (3GPP TS 36.331). Encoding is done
//! elsewhere; these types only hold what the bearer handler fills in.
//!
//! Each `Option<Vec<_>>` list models an ASN.1 optional list. The bearer
//! handler only sets it to `Some` when the list is non-empty.

use bytes::Bytes;

use crate::ids::{drb_to_lcid, DrbId, Lcid, SrbId};
use crate::layer_config::{DefaultOr, LogicalChannelConfig, PdcpConfig, RlcConfig};

/// `SRB-ToAddMod`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrbToAddMod {
    /// SRB identity (1 or 2)
    pub srb_id: SrbId,
    /// RLC configuration, `None` keeps the current one
    pub rlc_cfg: Option<DefaultOr<RlcConfig>>,
    /// Logical channel configuration, `None` keeps the current one
    pub lc_ch_cfg: Option<DefaultOr<LogicalChannelConfig>>,
}

impl SrbToAddMod {
    /// SRB entry using the default RLC and logical channel configuration
    pub fn with_defaults(srb_id: SrbId) -> Self {
        Self {
            srb_id,
            rlc_cfg: Some(DefaultOr::DefaultValue),
            lc_ch_cfg: Some(DefaultOr::DefaultValue),
        }
    }

    /// RLC configuration to apply, resolving the default value
    pub fn rlc_config(&self) -> RlcConfig {
        let default = || RlcConfig::srb_default(self.srb_id);
        match &self.rlc_cfg {
            Some(cfg) => cfg.resolve(default),
            None => default(),
        }
    }

    /// Scheduling group taken from the logical channel group
    pub fn scheduling_group(&self) -> u8 {
        self.lc_ch_cfg.as_ref().map_or(0, |cfg| {
            cfg.resolve(|| LogicalChannelConfig::srb_default(self.srb_id))
                .logical_channel_group
        })
    }

    /// Applies the present fields of `update` on top of this entry
    pub fn merge_from(&mut self, update: &SrbToAddMod) {
        if update.rlc_cfg.is_some() {
            self.rlc_cfg.clone_from(&update.rlc_cfg);
        }
        if update.lc_ch_cfg.is_some() {
            self.lc_ch_cfg.clone_from(&update.lc_ch_cfg);
        }
    }
}

/// `DRB-ToAddMod`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrbToAddMod {
    /// DRB identity
    pub drb_id: DrbId,
    /// EPS bearer identity (the E-RAB id)
    pub eps_bearer_id: Option<u8>,
    /// Logical channel identity
    pub lc_ch_id: Option<Lcid>,
    /// Uplink logical channel configuration
    pub lc_ch_cfg: Option<LogicalChannelConfig>,
    /// PDCP parameters
    pub pdcp_cfg: Option<PdcpConfig>,
    /// RLC configuration
    pub rlc_cfg: Option<RlcConfig>,
}

impl DrbToAddMod {
    /// DRB entry with no optional fields present
    pub fn new(drb_id: DrbId) -> Self {
        Self {
            drb_id,
            eps_bearer_id: None,
            lc_ch_id: None,
            lc_ch_cfg: None,
            pdcp_cfg: None,
            rlc_cfg: None,
        }
    }

    /// Logical channel of the DRB; falls back to the fixed DRB mapping
    pub fn lcid(&self) -> Lcid {
        self.lc_ch_id.unwrap_or_else(|| drb_to_lcid(self.drb_id))
    }

    /// Scheduling group taken from the logical channel group, 0 if absent
    pub fn scheduling_group(&self) -> u8 {
        self.lc_ch_cfg
            .as_ref()
            .map_or(0, |lc| lc.logical_channel_group)
    }

    /// Applies the present fields of `update` on top of this entry
    pub fn merge_from(&mut self, update: &DrbToAddMod) {
        if update.eps_bearer_id.is_some() {
            self.eps_bearer_id = update.eps_bearer_id;
        }
        if update.lc_ch_id.is_some() {
            self.lc_ch_id = update.lc_ch_id;
        }
        if update.lc_ch_cfg.is_some() {
            self.lc_ch_cfg.clone_from(&update.lc_ch_cfg);
        }
        if update.pdcp_cfg.is_some() {
            self.pdcp_cfg.clone_from(&update.pdcp_cfg);
        }
        if update.rlc_cfg.is_some() {
            self.rlc_cfg.clone_from(&update.rlc_cfg);
        }
    }
}

/// `RadioResourceConfigDedicated` bearer lists
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RadioResourceConfigDedicated {
    /// `srb-ToAddModList`
    pub srb_to_add_mod_list: Option<Vec<SrbToAddMod>>,
    /// `drb-ToAddModList`
    pub drb_to_add_mod_list: Option<Vec<DrbToAddMod>>,
    /// `drb-ToReleaseList`
    pub drb_to_release_list: Option<Vec<DrbId>>,
}

impl RadioResourceConfigDedicated {
    /// Returns true if any bearer list is present
    pub fn has_bearer_changes(&self) -> bool {
        self.srb_to_add_mod_list.is_some()
            || self.drb_to_add_mod_list.is_some()
            || self.drb_to_release_list.is_some()
    }

    /// DRB entries of the add-or-modify list, empty when absent
    pub fn drbs_to_add(&self) -> &[DrbToAddMod] {
        self.drb_to_add_mod_list.as_deref().unwrap_or_default()
    }
}

/// A message carrying a dedicated radio resource configuration.
///
/// Setup, reestablishment and reconfiguration all funnel into the same
/// bearer update through this trait.
pub trait DedicatedConfigMessage {
    /// Message name used in logs
    const NAME: &'static str;

    /// Whether the message carries `drb-ToReleaseList`
    const CARRIES_DRB_RELEASE: bool = false;

    /// Whether the message carries `dedicatedInfoNASList`
    const CARRIES_NAS_LIST: bool = false;

    /// Returns the dedicated configuration section for filling
    fn dedicated_config_mut(&mut self) -> &mut RadioResourceConfigDedicated;
}

/// `RRCConnectionSetup`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RrcConnectionSetup {
    /// RRC transaction identifier (0-3)
    pub rrc_transaction_id: u8,
    /// Dedicated radio resource configuration
    pub rr_cfg_ded: RadioResourceConfigDedicated,
}

/// `RRCConnectionReestablishment`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RrcConnectionReestablishment {
    /// RRC transaction identifier (0-3)
    pub rrc_transaction_id: u8,
    /// Dedicated radio resource configuration
    pub rr_cfg_ded: RadioResourceConfigDedicated,
}

/// `RRCConnectionReconfiguration`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RrcConnectionReconfiguration {
    /// RRC transaction identifier (0-3)
    pub rrc_transaction_id: u8,
    /// Whether `radioResourceConfigDedicated` is present
    pub rr_cfg_ded_present: bool,
    /// Dedicated radio resource configuration
    pub rr_cfg_ded: RadioResourceConfigDedicated,
    /// `dedicatedInfoNASList`, in DRB add-or-modify list order
    pub dedicated_nas_list: Option<Vec<Bytes>>,
}

/// `RRCConnectionReconfigurationComplete`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RrcConnectionReconfigurationComplete {
    /// RRC transaction identifier of the acknowledged reconfiguration
    pub rrc_transaction_id: u8,
}

impl DedicatedConfigMessage for RrcConnectionSetup {
    const NAME: &'static str = "RRCConnectionSetup";

    fn dedicated_config_mut(&mut self) -> &mut RadioResourceConfigDedicated {
        &mut self.rr_cfg_ded
    }
}

impl DedicatedConfigMessage for RrcConnectionReestablishment {
    const NAME: &'static str = "RRCConnectionReestablishment";

    fn dedicated_config_mut(&mut self) -> &mut RadioResourceConfigDedicated {
        &mut self.rr_cfg_ded
    }
}

impl DedicatedConfigMessage for RrcConnectionReconfiguration {
    const NAME: &'static str = "RRCConnectionReconfiguration";
    const CARRIES_DRB_RELEASE: bool = true;
    const CARRIES_NAS_LIST: bool = true;

    fn dedicated_config_mut(&mut self) -> &mut RadioResourceConfigDedicated {
        &mut self.rr_cfg_ded
    }
}
