//! Bearer diff engine
//!
//! Renders the pending bearer changes into the dedicated configuration of an
//! outgoing RRC message. Each setup is rendered once: an entry leaves the
//! message after it was sent, until the bearer is set up again. The
//! last-applied [`BearerSnapshot`] is advanced as soon as the message is
//! filled in, before the peer acknowledges it.
//!
//! A DRB whose E-RAB still buffers a NAS PDU stays unsent when the message
//! has no NAS list, so the next reconfiguration carries the DRB together with
//! its payload.
//!
//! RLC and PDCP are configured for every rendered bearer right away so the
//! access layers are ready when the peer applies the configuration. The
//! scheduler follows on confirmation, see [`crate::sync`].
//!
//! Removing DRBs from RLC/PDCP is not supported: a pending release of a DRB
//! the peer holds is rejected with [`BearerError::UnsupportedOperation`] and
//! the DRB stays configured, including in the scheduler on the next commit.

use std::collections::BTreeMap;

use enbsim_common::{log_nas_message, Direction};
use tracing::{debug, error};

use crate::error::BearerError;
use crate::handler::BearerHandler;
use crate::ids::{drb_to_erab, DrbId, ErabId, SrbId};
use crate::layer_config::{PdcpBearerConfig, RlcConfig};
use crate::message::{
    DedicatedConfigMessage, DrbToAddMod, RrcConnectionReconfiguration, SrbToAddMod,
};

/// SRBs and DRBs the peer was last configured with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerSnapshot {
    srbs: BTreeMap<SrbId, SrbToAddMod>,
    drbs: BTreeMap<DrbId, DrbToAddMod>,
}

impl BearerSnapshot {
    /// Returns the configuration of a DRB
    pub fn drb(&self, drb_id: DrbId) -> Option<&DrbToAddMod> {
        self.drbs.get(&drb_id)
    }

    /// Returns true if the peer holds the DRB
    pub fn contains_drb(&self, drb_id: DrbId) -> bool {
        self.drbs.contains_key(&drb_id)
    }

    /// SRB ids in ascending order
    pub fn srb_ids(&self) -> Vec<SrbId> {
        self.srbs.keys().copied().collect()
    }

    /// DRB ids in ascending order
    pub fn drb_ids(&self) -> Vec<DrbId> {
        self.drbs.keys().copied().collect()
    }

    /// Adds or merges the given SRBs
    pub fn apply_srb_diff(&mut self, srbs: &[SrbToAddMod]) {
        for srb in srbs {
            self.srbs
                .entry(srb.srb_id)
                .and_modify(|current| current.merge_from(srb))
                .or_insert_with(|| srb.clone());
        }
    }

    /// Adds or merges the given DRBs
    pub fn apply_drb_diff(&mut self, drbs: &[DrbToAddMod]) {
        for drb in drbs {
            self.drbs
                .entry(drb.drb_id)
                .and_modify(|current| current.merge_from(drb))
                .or_insert_with(|| drb.clone());
        }
    }
}

/// Summary of one rendered bearer update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerUpdate {
    /// SRBs rendered into the message
    pub srbs: Vec<SrbId>,
    /// DRBs rendered into the add-or-modify list
    pub drbs: Vec<DrbId>,
    /// Release requests that were dropped
    pub rejected: Vec<BearerError>,
}

impl BearerUpdate {
    /// Returns true if nothing was rendered or rejected
    pub fn is_empty(&self) -> bool {
        self.srbs.is_empty() && self.drbs.is_empty() && self.rejected.is_empty()
    }
}

fn non_empty<T>(list: Vec<T>) -> Option<Vec<T>> {
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

fn erab_of(drb: &DrbToAddMod) -> ErabId {
    drb.eps_bearer_id.unwrap_or_else(|| drb_to_erab(drb.drb_id))
}

impl BearerHandler<'_> {
    /// Renders the unsent bearer changes into `msg` and advances the snapshot.
    ///
    /// Works for setup, reestablishment and reconfiguration alike. Pending
    /// releases are only resolved for reconfiguration; for the other
    /// messages they stay queued. A reconfiguration rendered here must be
    /// followed by [`attach_pending_payloads`](Self::attach_pending_payloads).
    pub fn render_into<M: DedicatedConfigMessage>(&mut self, msg: &mut M) -> BearerUpdate {
        let mut update = BearerUpdate::default();
        if M::CARRIES_DRB_RELEASE {
            self.reject_releases(&mut update.rejected);
        }

        let srbs: Vec<SrbToAddMod> = self.pending.unsent_srbs().cloned().collect();
        let drbs: Vec<DrbToAddMod> = self.pending.unsent_drbs().cloned().collect();

        for srb in &srbs {
            self.pending.mark_srb_sent(srb.srb_id);
        }
        for drb in &drbs {
            let buffered = self
                .erabs
                .get(&erab_of(drb))
                .is_some_and(|erab| erab.has_pending_nas_pdu());
            if M::CARRIES_NAS_LIST || !buffered {
                self.pending.mark_drb_sent(drb.drb_id);
            } else {
                debug!(
                    "rnti=0x{:x} DRB {} waits for a message with a NAS list",
                    self.rnti, drb.drb_id
                );
            }
        }

        self.snapshot.apply_srb_diff(&srbs);
        self.snapshot.apply_drb_diff(&drbs);

        for srb in &srbs {
            self.layers
                .rlc
                .add_bearer(self.rnti, srb.srb_id, &srb.rlc_config());
            self.layers
                .pdcp
                .add_bearer(self.rnti, srb.srb_id, &PdcpBearerConfig::srb(srb.srb_id));
        }
        for drb in &drbs {
            let rlc_cfg = drb.rlc_cfg.clone().unwrap_or_else(RlcConfig::drb_default);
            self.layers.rlc.add_bearer(self.rnti, drb.lcid(), &rlc_cfg);
            self.layers.pdcp.add_bearer(
                self.rnti,
                drb.lcid(),
                &PdcpBearerConfig::drb(drb.drb_id, drb.pdcp_cfg.as_ref()),
            );
        }

        update.srbs = srbs.iter().map(|s| s.srb_id).collect();
        update.drbs = drbs.iter().map(|d| d.drb_id).collect();

        let ded = msg.dedicated_config_mut();
        ded.srb_to_add_mod_list = non_empty(srbs);
        ded.drb_to_add_mod_list = non_empty(drbs);

        debug!(
            "rnti=0x{:x} {}: srbs={:?} drbs={:?} rejected={}",
            self.rnti,
            M::NAME,
            update.srbs,
            update.drbs,
            update.rejected.len()
        );
        update
    }

    /// Drops every pending release. The peer keeps the DRB, so its entry is
    /// queued again for the scheduler without being re-sent.
    fn reject_releases(&mut self, rejected: &mut Vec<BearerError>) {
        let releases: Vec<DrbId> = self.pending.releases().collect();
        for drb_id in releases {
            let err = BearerError::UnsupportedOperation(format!(
                "removing DRB {drb_id} is not supported"
            ));
            error!("rnti=0x{:x} {}", self.rnti, err);
            self.pending.cancel_release(drb_id);
            if let Some(drb) = self.snapshot.drb(drb_id) {
                self.pending.restore_drb(drb.clone());
            }
            rejected.push(err);
        }
    }

    /// Moves buffered NAS PDUs into the reconfiguration's NAS list.
    ///
    /// PDUs are appended in the order of the DRB add-or-modify list. DRBs whose
    /// E-RAB has nothing buffered add no entry. Returns the number attached.
    pub fn attach_pending_payloads(&mut self, msg: &mut RrcConnectionReconfiguration) -> usize {
        let mut nas_pdus = Vec::new();
        for drb in msg.rr_cfg_ded.drbs_to_add() {
            let erab_id = erab_of(drb);
            match self.erabs.get_mut(&erab_id).and_then(|e| e.nas_pdu.take()) {
                Some(pdu) => {
                    log_nas_message(Direction::Tx, "DedicatedInfoNAS", self.rnti, &pdu);
                    nas_pdus.push(pdu);
                }
                None => debug!(
                    "Not adding NAS message to connection reconfiguration. E-RAB id {}",
                    erab_id
                ),
            }
        }

        let attached = nas_pdus.len();
        if attached > 0 {
            msg.dedicated_nas_list
                .get_or_insert_with(Vec::new)
                .extend(nas_pdus);
        }
        attached
    }

    /// Fills a reconfiguration: bearer lists, the dedicated config presence
    /// flag and pending NAS PDUs.
    pub fn prepare_reconfiguration(&mut self, msg: &mut RrcConnectionReconfiguration) -> BearerUpdate {
        let update = self.render_into(msg);
        msg.rr_cfg_ded_present = msg.rr_cfg_ded.has_bearer_changes();
        self.attach_pending_payloads(msg);
        update
    }
}
