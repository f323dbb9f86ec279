//! Identifier mapping integration tests
//!
//! E-RAB, DRB and logical channel identities as seen through the public API.

use std::collections::HashSet;

use enbsim_bearer::ids::{drb_to_erab, drb_to_lcid, erab_to_drb, erab_to_lcid, MIN_ERAB_ID};
use enbsim_bearer::{BearerError, BearerHandler, IdentifierKind, QciTable, MAX_NOF_QCI};
use integration_tests::{init_test_logging, ipv6_address, ErabRequest, MockLayers};

/// Every valid E-RAB id maps to a DRB and back, and no two share an LCID
#[test]
fn test_mapping_is_bijective() {
    let mut lcids = HashSet::new();
    for erab_id in MIN_ERAB_ID..=u8::MAX {
        let drb_id = erab_to_drb(erab_id);
        assert_eq!(drb_to_erab(drb_id), erab_id);
        assert_eq!(drb_to_lcid(drb_id), erab_to_lcid(erab_id));
        assert!(lcids.insert(erab_to_lcid(erab_id)));
    }
    assert_eq!(lcids.len(), usize::from(u8::MAX - MIN_ERAB_ID) + 1);
}

#[test]
fn test_first_erab_lands_on_drb1_lcid3() {
    init_test_logging();
    let table = QciTable::default();
    let mocks = MockLayers::new();
    let mut handler = BearerHandler::new(0x46, &table, mocks.layers());

    ErabRequest::new(5, 9).apply(&mut handler).unwrap();

    let record = handler.erab(5).unwrap();
    assert_eq!(record.drb_id(), 1);
    assert_eq!(record.lcid(), 3);
    let drb = handler.pending().drb(1).unwrap();
    assert_eq!(drb.lcid(), 3);
    assert_eq!(drb.eps_bearer_id, Some(5));
}

#[test]
fn test_qci_outside_table_rejected() {
    init_test_logging();
    let table = QciTable::default();
    let mocks = MockLayers::new();
    let mut handler = BearerHandler::new(0x46, &table, mocks.layers());

    for qci in [MAX_NOF_QCI as u8, 42, u8::MAX] {
        assert_eq!(
            ErabRequest::new(5, qci).apply(&mut handler),
            Err(BearerError::UnconfiguredQosClass { qci })
        );
    }
    assert_eq!(handler.erab_count(), 0);
    assert_eq!(mocks.gtpu.tunnel_count(), 0);
}

#[test]
fn test_reserved_erab_ids_rejected() {
    let table = QciTable::default();
    let mocks = MockLayers::new();
    let mut handler = BearerHandler::new(0x46, &table, mocks.layers());

    for erab_id in 0..MIN_ERAB_ID {
        assert_eq!(
            ErabRequest::new(erab_id, 9).apply(&mut handler),
            Err(BearerError::InvalidIdentifier {
                kind: IdentifierKind::Erab,
                id: erab_id,
            })
        );
    }
    assert!(handler.pending().is_empty());
}

#[test]
fn test_address_wider_than_ipv4_rejected() {
    let table = QciTable::default();
    let mocks = MockLayers::new();
    let mut handler = BearerHandler::new(0x46, &table, mocks.layers());

    assert_eq!(
        ErabRequest::new(5, 9)
            .with_address(ipv6_address())
            .apply(&mut handler),
        Err(BearerError::UnsupportedAddressLength { bits: 128 })
    );
    assert_eq!(mocks.gtpu.tunnel_count(), 0);
    assert!(handler.erab(5).is_none());
}
