//! Pending bearer changes
//!
//! Bearers queued for addition or release since the last confirmed
//! reconfiguration. The sets are ordered by bearer identity, which is also the
//! order in which they are rendered into RRC messages.
//!
//! A DRB is never queued for both add-or-modify and release: the most recent
//! request wins and cancels the other.
//!
//! Every setup marks its entry unsent. Rendering takes the unsent entries and
//! clears their marks, while the entries themselves stay queued until the
//! scheduler is updated on commit.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::ids::{DrbId, SrbId};
use crate::message::{DrbToAddMod, SrbToAddMod};

/// Bearer changes accumulated between two confirmed reconfigurations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    srbs_to_add: BTreeMap<SrbId, SrbToAddMod>,
    drbs_to_add: BTreeMap<DrbId, DrbToAddMod>,
    drbs_to_release: BTreeSet<DrbId>,
    unsent_srbs: BTreeSet<SrbId>,
    unsent_drbs: BTreeSet<DrbId>,
}

impl PendingChanges {
    /// Creates an empty set of changes
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an SRB, replacing any entry with the same id
    pub fn add_srb(&mut self, srb: SrbToAddMod) {
        self.unsent_srbs.insert(srb.srb_id);
        self.srbs_to_add.insert(srb.srb_id, srb);
    }

    /// Queues a DRB for add-or-modify, cancelling a pending release of it
    pub fn add_drb(&mut self, drb: DrbToAddMod) {
        if self.drbs_to_release.remove(&drb.drb_id) {
            debug!("DRB {} setup cancels its pending release", drb.drb_id);
        }
        self.unsent_drbs.insert(drb.drb_id);
        self.drbs_to_add.insert(drb.drb_id, drb);
    }

    /// Re-queues a DRB entry the peer already holds, without marking it unsent
    pub fn restore_drb(&mut self, drb: DrbToAddMod) {
        self.drbs_to_add.entry(drb.drb_id).or_insert(drb);
    }

    /// Queues a DRB release, cancelling a pending add-or-modify of it
    pub fn release_drb(&mut self, drb_id: DrbId) {
        self.cancel_drb(drb_id);
        self.drbs_to_release.insert(drb_id);
    }

    /// Drops a queued add-or-modify of a DRB. Returns true if it was queued.
    pub fn cancel_drb(&mut self, drb_id: DrbId) -> bool {
        self.unsent_drbs.remove(&drb_id);
        let cancelled = self.drbs_to_add.remove(&drb_id).is_some();
        if cancelled {
            debug!("DRB {} release cancels its pending setup", drb_id);
        }
        cancelled
    }

    /// Drops a queued release. Returns true if it was queued.
    pub fn cancel_release(&mut self, drb_id: DrbId) -> bool {
        self.drbs_to_release.remove(&drb_id)
    }

    /// Queued SRBs in id order
    pub fn srbs(&self) -> impl Iterator<Item = &SrbToAddMod> {
        self.srbs_to_add.values()
    }

    /// Queued DRB adds in id order
    pub fn drbs(&self) -> impl Iterator<Item = &DrbToAddMod> {
        self.drbs_to_add.values()
    }

    /// Queued SRBs not yet rendered into any message
    pub fn unsent_srbs(&self) -> impl Iterator<Item = &SrbToAddMod> {
        self.srbs_to_add
            .values()
            .filter(|srb| self.unsent_srbs.contains(&srb.srb_id))
    }

    /// Queued DRB adds not yet rendered into any message
    pub fn unsent_drbs(&self) -> impl Iterator<Item = &DrbToAddMod> {
        self.drbs_to_add
            .values()
            .filter(|drb| self.unsent_drbs.contains(&drb.drb_id))
    }

    /// Clears the unsent mark of an SRB
    pub fn mark_srb_sent(&mut self, srb_id: SrbId) {
        self.unsent_srbs.remove(&srb_id);
    }

    /// Clears the unsent mark of a DRB
    pub fn mark_drb_sent(&mut self, drb_id: DrbId) {
        self.unsent_drbs.remove(&drb_id);
    }

    /// Queued DRB releases in id order
    pub fn releases(&self) -> impl Iterator<Item = DrbId> + '_ {
        self.drbs_to_release.iter().copied()
    }

    /// Returns the queued add-or-modify entry of a DRB
    pub fn drb(&self, drb_id: DrbId) -> Option<&DrbToAddMod> {
        self.drbs_to_add.get(&drb_id)
    }

    /// Returns true if the DRB is queued for release
    pub fn is_release_pending(&self, drb_id: DrbId) -> bool {
        self.drbs_to_release.contains(&drb_id)
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.srbs_to_add.is_empty() && self.drbs_to_add.is_empty() && self.drbs_to_release.is_empty()
    }

    /// Clears all queued changes and their marks
    pub fn clear(&mut self) {
        self.srbs_to_add.clear();
        self.drbs_to_add.clear();
        self.drbs_to_release.clear();
        self.unsent_srbs.clear();
        self.unsent_drbs.clear();
    }
}
