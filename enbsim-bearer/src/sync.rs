//! Layer synchronizer
//!
//! Once the peer confirms a reconfiguration, the scheduler is told about every
//! bearer that changed and the pending sets are cleared. The snapshot was
//! already advanced when the message was rendered and is left alone here.

use tracing::{debug, info};

use crate::handler::BearerHandler;
use crate::ids::{drb_to_lcid, Lcid};
use crate::layer_config::SchedBearerConfig;
use crate::message::RrcConnectionReconfigurationComplete;

impl BearerHandler<'_> {
    /// Pushes the pending changes to the scheduler and clears them.
    ///
    /// SRBs and added DRBs are scheduled in their logical channel group
    /// (group 0 for the default SRB configuration). Released DRBs are
    /// disabled on LCID DRB + 2.
    /// The dedicated configuration is then signalled as enabled, even when
    /// nothing was pending.
    pub fn commit(&mut self) {
        let mut updates: Vec<(Lcid, SchedBearerConfig)> = Vec::new();
        updates.extend(
            self.pending
                .srbs()
                .map(|srb| (srb.srb_id, SchedBearerConfig::both(srb.scheduling_group()))),
        );
        updates.extend(
            self.pending
                .releases()
                .map(|drb_id| (drb_to_lcid(drb_id), SchedBearerConfig::disabled())),
        );
        updates.extend(
            self.pending
                .drbs()
                .map(|drb| (drb.lcid(), SchedBearerConfig::both(drb.scheduling_group()))),
        );

        for (lcid, config) in &updates {
            self.layers.mac.configure_bearer(self.rnti, *lcid, config);
            self.sched_bearers.insert(*lcid, *config);
            debug!(
                "rnti=0x{:x} scheduler LCID {} -> {:?} group {}",
                self.rnti, lcid, config.direction, config.group
            );
        }
        self.layers.mac.enable_dedicated_config(self.rnti, true);

        info!(
            "rnti=0x{:x} committed {} scheduler bearer update(s)",
            self.rnti,
            updates.len()
        );
        self.pending.clear();
    }

    /// Handles `RRCConnectionReconfigurationComplete` from the peer
    pub fn handle_reconfiguration_complete(&mut self, msg: &RrcConnectionReconfigurationComplete) {
        debug!(
            "rnti=0x{:x} RRCConnectionReconfigurationComplete transaction={}",
            self.rnti, msg.rrc_transaction_id
        );
        self.commit();
    }
}
