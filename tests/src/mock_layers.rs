//! Mock lower layers for integration testing
//!
//! Each mock keeps the table a real layer would hold, keyed by
//! `(rnti, lcid)`, so tests can check the end state of all four layers after
//! a reconfiguration cycle. The mocks are shared between subscriber sessions
//! and serialize access with a `Mutex`.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use enbsim_bearer::layer_config::{PdcpBearerConfig, RlcConfig, SchedBearerConfig};
use enbsim_bearer::{BearerLayers, GtpuInterface, Lcid, MacInterface, PdcpInterface, RlcInterface};

type BearerKey = (u16, Lcid);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock RLC layer
#[derive(Debug, Default)]
pub struct MockRlc {
    bearers: Mutex<HashMap<BearerKey, RlcConfig>>,
    add_count: AtomicUsize,
}

impl MockRlc {
    pub fn bearer(&self, rnti: u16, lcid: Lcid) -> Option<RlcConfig> {
        lock(&self.bearers).get(&(rnti, lcid)).cloned()
    }

    pub fn bearer_count(&self, rnti: u16) -> usize {
        lock(&self.bearers).keys().filter(|(r, _)| *r == rnti).count()
    }

    /// Number of `add_bearer` calls, including reconfigurations
    pub fn add_count(&self) -> usize {
        self.add_count.load(Ordering::SeqCst)
    }
}

impl RlcInterface for MockRlc {
    fn add_bearer(&self, rnti: u16, lcid: Lcid, config: &RlcConfig) {
        lock(&self.bearers).insert((rnti, lcid), config.clone());
        self.add_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock PDCP layer
#[derive(Debug, Default)]
pub struct MockPdcp {
    bearers: Mutex<HashMap<BearerKey, PdcpBearerConfig>>,
}

impl MockPdcp {
    pub fn bearer(&self, rnti: u16, lcid: Lcid) -> Option<PdcpBearerConfig> {
        lock(&self.bearers).get(&(rnti, lcid)).cloned()
    }

    pub fn bearer_count(&self, rnti: u16) -> usize {
        lock(&self.bearers).keys().filter(|(r, _)| *r == rnti).count()
    }
}

impl PdcpInterface for MockPdcp {
    fn add_bearer(&self, rnti: u16, lcid: Lcid, config: &PdcpBearerConfig) {
        lock(&self.bearers).insert((rnti, lcid), config.clone());
    }
}

/// Mock MAC scheduler
#[derive(Debug, Default)]
pub struct MockMac {
    bearers: Mutex<HashMap<BearerKey, SchedBearerConfig>>,
    dedicated_config: Mutex<HashMap<u16, bool>>,
    configure_count: AtomicUsize,
}

impl MockMac {
    pub fn bearer(&self, rnti: u16, lcid: Lcid) -> Option<SchedBearerConfig> {
        lock(&self.bearers).get(&(rnti, lcid)).copied()
    }

    pub fn is_dedicated_config_enabled(&self, rnti: u16) -> bool {
        lock(&self.dedicated_config).get(&rnti).copied().unwrap_or(false)
    }

    /// Number of `configure_bearer` calls
    pub fn configure_count(&self) -> usize {
        self.configure_count.load(Ordering::SeqCst)
    }
}

impl MacInterface for MockMac {
    fn configure_bearer(&self, rnti: u16, lcid: Lcid, config: &SchedBearerConfig) {
        lock(&self.bearers).insert((rnti, lcid), *config);
        self.configure_count.fetch_add(1, Ordering::SeqCst);
    }

    fn enable_dedicated_config(&self, rnti: u16, enabled: bool) {
        lock(&self.dedicated_config).insert(rnti, enabled);
    }
}

/// Tunnel registered with the mock GTP-U layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTunnel {
    pub peer_addr: Ipv4Addr,
    pub teid_out: u32,
    pub teid_in: u32,
}

/// Mock GTP-U layer allocating inbound TEIDs from a counter
#[derive(Debug)]
pub struct MockGtpu {
    tunnels: Mutex<HashMap<BearerKey, MockTunnel>>,
    next_teid: AtomicU32,
}

impl Default for MockGtpu {
    fn default() -> Self {
        Self {
            tunnels: Mutex::new(HashMap::new()),
            next_teid: AtomicU32::new(0x100),
        }
    }
}

impl MockGtpu {
    pub fn tunnel(&self, rnti: u16, lcid: Lcid) -> Option<MockTunnel> {
        lock(&self.tunnels).get(&(rnti, lcid)).copied()
    }

    pub fn tunnel_count(&self) -> usize {
        lock(&self.tunnels).len()
    }
}

impl GtpuInterface for MockGtpu {
    fn register_bearer(&self, rnti: u16, lcid: Lcid, peer_addr: Ipv4Addr, teid_out: u32) -> u32 {
        let teid_in = self.next_teid.fetch_add(1, Ordering::SeqCst);
        lock(&self.tunnels).insert(
            (rnti, lcid),
            MockTunnel {
                peer_addr,
                teid_out,
                teid_in,
            },
        );
        teid_in
    }

    fn remove_bearer(&self, rnti: u16, lcid: Lcid) {
        lock(&self.tunnels).remove(&(rnti, lcid));
    }
}

/// All four mock layers
#[derive(Debug, Default)]
pub struct MockLayers {
    pub rlc: MockRlc,
    pub pdcp: MockPdcp,
    pub mac: MockMac,
    pub gtpu: MockGtpu,
}

impl MockLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrowed layer handles for a bearer handler
    pub fn layers(&self) -> BearerLayers<'_> {
        BearerLayers::new(&self.rlc, &self.pdcp, &self.mac, &self.gtpu)
    }
}
