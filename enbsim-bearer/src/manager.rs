//! Bearer context manager
//!
//! Keeps one [`BearerHandler`] per subscriber RNTI. All handlers share the
//! same QCI table and layer handles.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::QciTable;
use crate::handler::BearerHandler;
use crate::layers::BearerLayers;

/// Bearer handlers of all subscribers served by the cell
#[derive(Debug)]
pub struct BearerContextManager<'a> {
    qci_table: &'a QciTable,
    layers: BearerLayers<'a>,
    /// Handlers indexed by RNTI
    contexts: HashMap<u16, BearerHandler<'a>>,
}

impl<'a> BearerContextManager<'a> {
    /// Creates a manager with no subscribers
    pub fn new(qci_table: &'a QciTable, layers: BearerLayers<'a>) -> Self {
        Self {
            qci_table,
            layers,
            contexts: HashMap::new(),
        }
    }

    /// Creates the bearer context of a subscriber.
    ///
    /// An existing context with the same RNTI is replaced without releasing
    /// its E-RABs.
    pub fn create_ue(&mut self, rnti: u16) -> &mut BearerHandler<'a> {
        let handler = BearerHandler::new(rnti, self.qci_table, self.layers);
        debug!("rnti=0x{:x} bearer context created", rnti);
        match self.contexts.entry(rnti) {
            Entry::Occupied(mut entry) => {
                entry.insert(handler);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(handler),
        }
    }

    /// Tries to find the bearer context of a subscriber
    pub fn try_find_ue(&self, rnti: u16) -> Option<&BearerHandler<'a>> {
        self.contexts.get(&rnti)
    }

    /// Tries to find the bearer context of a subscriber for modification
    pub fn try_find_ue_mut(&mut self, rnti: u16) -> Option<&mut BearerHandler<'a>> {
        self.contexts.get_mut(&rnti)
    }

    /// Finds the bearer context of a subscriber, creating it if missing
    pub fn find_or_create_ue(&mut self, rnti: u16) -> &mut BearerHandler<'a> {
        let (qci_table, layers) = (self.qci_table, self.layers);
        self.contexts
            .entry(rnti)
            .or_insert_with(|| BearerHandler::new(rnti, qci_table, layers))
    }

    /// Releases all E-RABs of a subscriber and removes its context.
    ///
    /// Returns the removed context if it existed.
    pub fn delete_ue(&mut self, rnti: u16) -> Option<BearerHandler<'a>> {
        let mut handler = self.contexts.remove(&rnti)?;
        let released = handler.release_erabs();
        info!("rnti=0x{:x} bearer context deleted, {} E-RAB(s) released", rnti, released);
        Some(handler)
    }

    /// Returns the number of subscriber contexts
    pub fn count(&self) -> usize {
        self.contexts.len()
    }

    /// Returns true if there are no subscriber contexts
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Returns all RNTIs in ascending order
    pub fn rntis(&self) -> Vec<u16> {
        let mut rntis: Vec<u16> = self.contexts.keys().copied().collect();
        rntis.sort_unstable();
        rntis
    }
}
