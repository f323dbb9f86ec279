//! Multiple UE scenario integration tests
//!
//! Subscribers keep independent bearer state while sharing one QCI table and
//! one set of layers. Sessions driven from different threads must not
//! interfere.

use std::thread;

use enbsim_bearer::{
    BearerContextManager, BearerHandler, QciTable, RrcConnectionReconfiguration,
    RrcConnectionReconfigurationComplete, RrcConnectionSetup,
};
use integration_tests::{
    assert_drb_configured, init_test_logging, sample_nas_pdu, ErabRequest, MockLayers,
};

fn run_attach(handler: &mut BearerHandler<'_>, erab_ids: &[u8]) -> RrcConnectionReconfiguration {
    handler.setup_srb(1).unwrap();
    handler.render_into(&mut RrcConnectionSetup::default());
    handler.setup_srb(2).unwrap();
    for &erab_id in erab_ids {
        ErabRequest::new(erab_id, 9)
            .with_nas_pdu()
            .apply(handler)
            .unwrap();
    }
    let mut reconf = RrcConnectionReconfiguration::default();
    handler.prepare_reconfiguration(&mut reconf);
    handler.handle_reconfiguration_complete(&RrcConnectionReconfigurationComplete::default());
    reconf
}

#[test]
fn test_subscribers_are_independent() {
    init_test_logging();
    let table = QciTable::default();
    let mocks = MockLayers::new();
    let mut manager = BearerContextManager::new(&table, mocks.layers());

    run_attach(manager.create_ue(0x46), &[5, 6]);
    run_attach(manager.create_ue(0x47), &[5]);

    assert_eq!(manager.rntis(), vec![0x46, 0x47]);
    assert_eq!(manager.try_find_ue(0x46).unwrap().erab_count(), 2);
    assert_eq!(manager.try_find_ue(0x47).unwrap().erab_count(), 1);
    assert_drb_configured(&mocks, 0x46, 2, 4);
    assert!(mocks.rlc.bearer(0x47, 4).is_none());

    manager.delete_ue(0x46);
    assert!(mocks.gtpu.tunnel(0x46, 3).is_none());
    assert!(mocks.gtpu.tunnel(0x47, 3).is_some());
    assert_eq!(manager.count(), 1);
}

#[test]
fn test_concurrent_sessions_share_layers() {
    init_test_logging();
    let table = QciTable::default();
    let mocks = MockLayers::new();
    let rntis: Vec<u16> = (0x100..0x110).collect();

    let reconfs: Vec<(u16, RrcConnectionReconfiguration)> = thread::scope(|s| {
        let workers: Vec<_> = rntis
            .iter()
            .map(|&rnti| {
                let (table, mocks) = (&table, &mocks);
                s.spawn(move || {
                    let mut handler = BearerHandler::new(rnti, table, mocks.layers());
                    (rnti, run_attach(&mut handler, &[5, 6, 7]))
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .collect()
    });

    assert_eq!(mocks.gtpu.tunnel_count(), rntis.len() * 3);
    let mut teids = std::collections::HashSet::new();
    for (rnti, reconf) in &reconfs {
        let drbs: Vec<u8> = reconf.rr_cfg_ded.drbs_to_add().iter().map(|d| d.drb_id).collect();
        assert_eq!(drbs, vec![1, 2, 3]);
        assert_eq!(
            reconf.dedicated_nas_list,
            Some(vec![sample_nas_pdu(5), sample_nas_pdu(6), sample_nas_pdu(7)])
        );
        for (drb_id, lcid) in [(1, 3), (2, 4), (3, 5)] {
            assert_drb_configured(&mocks, *rnti, drb_id, lcid);
            assert!(teids.insert(mocks.gtpu.tunnel(*rnti, lcid).unwrap().teid_in));
        }
        assert!(mocks.mac.is_dedicated_config_enabled(*rnti));
    }
}
