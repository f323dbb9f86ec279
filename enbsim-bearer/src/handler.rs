//! Per-subscriber bearer handler
//!
//! [`BearerHandler`] is the bearer registry of one subscriber. It admits
//! SRBs and E-RABs, derives their DRB and logical channel, and queues them
//! until the next RRC message is rendered (see [`crate::diff`]) and
//! confirmed (see [`crate::sync`]).
//!
//! The handler is driven from a single control-plane context and does no
//! internal locking. The QCI table and the layer handles are borrowed and
//! must outlive it.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use bytes::Bytes;
use enbsim_common::{HexDump, TransportAddress};
use tracing::{debug, error, info, warn};

use crate::config::QciTable;
use crate::diff::BearerSnapshot;
use crate::erab::{ErabQosParams, ErabRecord};
use crate::error::{BearerError, IdentifierKind};
use crate::ids::{erab_to_drb, erab_to_lcid, is_valid_erab_id, is_valid_srb_id, ErabId, Lcid, SrbId};
use crate::layer_config::SchedBearerConfig;
use crate::layers::BearerLayers;
use crate::message::{DrbToAddMod, SrbToAddMod};
use crate::pending::PendingChanges;

/// Bearer registry and reconfiguration state of one subscriber
#[derive(Debug)]
pub struct BearerHandler<'a> {
    pub(crate) rnti: u16,
    pub(crate) qci_table: &'a QciTable,
    pub(crate) layers: BearerLayers<'a>,
    /// Admitted E-RABs indexed by E-RAB id
    pub(crate) erabs: BTreeMap<ErabId, ErabRecord>,
    pub(crate) pending: PendingChanges,
    /// What the peer was last sent
    pub(crate) snapshot: BearerSnapshot,
    /// Scheduler bearer table indexed by LCID
    pub(crate) sched_bearers: BTreeMap<Lcid, SchedBearerConfig>,
}

impl<'a> BearerHandler<'a> {
    /// Creates an empty handler for the subscriber with the given RNTI
    pub fn new(rnti: u16, qci_table: &'a QciTable, layers: BearerLayers<'a>) -> Self {
        Self {
            rnti,
            qci_table,
            layers,
            erabs: BTreeMap::new(),
            pending: PendingChanges::new(),
            snapshot: BearerSnapshot::default(),
            sched_bearers: BTreeMap::new(),
        }
    }

    /// Subscriber RNTI
    pub fn rnti(&self) -> u16 {
        self.rnti
    }

    /// Returns the record of an admitted E-RAB
    pub fn erab(&self, erab_id: ErabId) -> Option<&ErabRecord> {
        self.erabs.get(&erab_id)
    }

    /// Iterates admitted E-RABs in id order
    pub fn erabs(&self) -> impl Iterator<Item = &ErabRecord> {
        self.erabs.values()
    }

    /// Number of admitted E-RABs
    pub fn erab_count(&self) -> usize {
        self.erabs.len()
    }

    /// Changes queued since the last confirmed reconfiguration
    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    /// Bearers the peer was last configured with
    pub fn last_applied(&self) -> &BearerSnapshot {
        &self.snapshot
    }

    /// Scheduler bearer table, indexed by LCID
    pub fn sched_bearers(&self) -> &BTreeMap<Lcid, SchedBearerConfig> {
        &self.sched_bearers
    }

    /// Queues SRB1 or SRB2 with the default RLC and logical channel config.
    ///
    /// Setting up the same SRB twice queues it once.
    pub fn setup_srb(&mut self, srb_id: SrbId) -> Result<(), BearerError> {
        if !is_valid_srb_id(srb_id) {
            error!("Invalid SRB id={}", srb_id);
            return Err(BearerError::InvalidIdentifier {
                kind: IdentifierKind::Srb,
                id: srb_id,
            });
        }
        self.pending.add_srb(SrbToAddMod::with_defaults(srb_id));
        debug!("rnti=0x{:x} SRB{} queued", self.rnti, srb_id);
        Ok(())
    }

    /// Admits an E-RAB and queues its DRB.
    ///
    /// The S1-U tunnel is registered with GTP-U right away so that uplink data
    /// can flow before the reconfiguration completes. A failed setup leaves
    /// the handler untouched.
    pub fn setup_erab(
        &mut self,
        erab_id: ErabId,
        qos: &ErabQosParams,
        address: &TransportAddress,
        teid_out: u32,
        nas_pdu: Option<Bytes>,
    ) -> Result<(), BearerError> {
        if !is_valid_erab_id(erab_id) {
            error!("E-RAB id={} is invalid", erab_id);
            return Err(BearerError::InvalidIdentifier {
                kind: IdentifierKind::Erab,
                id: erab_id,
            });
        }
        let drb_id = erab_to_drb(erab_id);
        let lcid = erab_to_lcid(erab_id);

        let qci_table = self.qci_table;
        let qci_cfg = qci_table.get(qos.qci).map_err(|e| {
            error!("Invalid QCI={} for E-RAB id={}, DRB id={}: {}", qos.qci, erab_id, drb_id, e);
            e
        })?;

        let Some(peer_addr) = address.to_number().map(Ipv4Addr::from) else {
            let err = BearerError::UnsupportedAddressLength {
                bits: address.bit_length(),
            };
            error!("E-RAB id={}: {}", erab_id, err);
            return Err(err);
        };

        let drb = DrbToAddMod {
            drb_id,
            eps_bearer_id: Some(erab_id),
            lc_ch_id: Some(lcid),
            lc_ch_cfg: Some(qci_cfg.logical_channel.clone()),
            pdcp_cfg: Some(qci_cfg.pdcp.clone()),
            rlc_cfg: Some(qci_cfg.rlc.clone()),
        };

        let teid_in = self
            .layers
            .gtpu
            .register_bearer(self.rnti, lcid, peer_addr, teid_out);

        let nas_pdu = nas_pdu.filter(|pdu| !pdu.is_empty());
        if let Some(pdu) = &nas_pdu {
            debug!(
                rnti = self.rnti,
                erab_id = erab_id,
                hex = %HexDump(pdu),
                "setup_erab nas_pdu -> erab_info ({} bytes)",
                pdu.len()
            );
        }

        self.erabs.insert(
            erab_id,
            ErabRecord {
                id: erab_id,
                qos: *qos,
                address: address.clone(),
                teid_out,
                teid_in,
                nas_pdu,
            },
        );
        self.pending.add_drb(drb);

        info!(
            "rnti=0x{:x} E-RAB id={} admitted on DRB {} LCID {} (QCI {}, teid_in=0x{:x})",
            self.rnti, erab_id, drb_id, lcid, qos.qci, teid_in
        );
        Ok(())
    }

    /// Releases an E-RAB and queues the release of its DRB.
    ///
    /// The S1-U tunnel is removed immediately. It stays removed even when the
    /// DRB release is later rejected on reconfiguration and the DRB keeps its
    /// RLC, PDCP and scheduler configuration; downlink data for it is dropped
    /// by GTP-U from then on.
    ///
    /// If the peer was never sent the DRB, its pending setup is cancelled and
    /// no release is queued.
    ///
    /// An unknown E-RAB is logged and reported as
    /// [`BearerError::UnknownBearer`]; nothing is changed.
    pub fn release_erab(&mut self, erab_id: ErabId) -> Result<ErabRecord, BearerError> {
        let Some(record) = self.erabs.remove(&erab_id) else {
            let err = BearerError::UnknownBearer {
                rnti: self.rnti,
                erab_id,
            };
            warn!("{}", err);
            return Err(err);
        };

        self.layers.gtpu.remove_bearer(self.rnti, record.lcid());
        if record.has_pending_nas_pdu() {
            debug!("E-RAB id={} released with undelivered NAS PDU", erab_id);
        }
        let drb_id = record.drb_id();
        if self.snapshot.contains_drb(drb_id) {
            self.pending.release_drb(drb_id);
        } else {
            self.pending.cancel_drb(drb_id);
            debug!("DRB {} was never sent, no release queued", drb_id);
        }

        info!("rnti=0x{:x} E-RAB id={} released", self.rnti, erab_id);
        Ok(record)
    }

    /// Releases all E-RABs of the subscriber. Returns how many were released.
    pub fn release_erabs(&mut self) -> usize {
        let erab_ids: Vec<ErabId> = self.erabs.keys().copied().collect();
        let mut released = 0;
        for erab_id in erab_ids {
            match self.release_erab(erab_id) {
                Ok(_) => released += 1,
                Err(e) => debug!("{}", e),
            }
        }
        released
    }
}
