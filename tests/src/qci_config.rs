//! QCI configuration integration tests

use std::fs;

use enbsim_bearer::layer_config::RlcConfig;
use enbsim_bearer::{
    load_qci_config, load_qci_config_from_str, validate_qci_config, BearerError, BearerHandler,
    ConfigValidationError, QciTable, RrcConnectionReconfiguration,
};
use enbsim_common::Error;
use integration_tests::{init_test_logging, ErabRequest, MockLayers, TestResult, QCI_TABLE_YAML};

#[test]
fn test_yaml_table_matches_builtin_default() -> TestResult {
    let config = load_qci_config_from_str(QCI_TABLE_YAML)?;
    validate_qci_config(&config)?;
    let table = QciTable::from_config(&config)?;

    assert_eq!(table.configured_qcis(), vec![7, 9]);
    assert_eq!(table, QciTable::default());
    Ok(())
}

#[test]
fn test_load_from_file() -> TestResult {
    let path = std::env::temp_dir().join(format!("enbsim-qci-{}.yaml", std::process::id()));
    fs::write(&path, QCI_TABLE_YAML)?;
    let loaded = load_qci_config(&path);
    fs::remove_file(&path)?;

    let table = QciTable::from_config(&loaded?)?;
    assert!(matches!(table.get(9)?.rlc, RlcConfig::Am(_)));
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let result = load_qci_config("/nonexistent/enbsim/qci.yaml");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_yaml() {
    let result = load_qci_config_from_str("qci: [ { qci: 9, rlc: { mode: bogus } } ]");
    assert!(matches!(result, Err(Error::YamlParse(_))));
}

#[test]
fn test_validation_rejects_duplicates() -> TestResult {
    let mut config = load_qci_config_from_str(QCI_TABLE_YAML)?;
    let mut dup = config.qci[1].clone();
    dup.logical_channel.priority = 5;
    config.qci.push(dup);

    assert_eq!(
        validate_qci_config(&config),
        Err(ConfigValidationError::DuplicateQci(9))
    );
    assert!(matches!(QciTable::from_config(&config), Err(Error::Config(_))));
    Ok(())
}

/// A table without QCI 9 rejects E-RABs of that class
#[test]
fn test_custom_table_drives_admission() -> TestResult {
    init_test_logging();
    let yaml = r#"
qci:
  - qci: 5
    rlc:
      mode: am
      t_poll_retx_ms: 80
      max_retx_threshold: 32
      t_reordering_ms: 80
      t_status_prohibit_ms: 60
    logical_channel:
      priority: 2
      bucket_size_duration_ms: 50
      logical_channel_group: 1
"#;
    let table = QciTable::from_config(&load_qci_config_from_str(yaml)?)?;
    let mocks = MockLayers::new();
    let mut handler = BearerHandler::new(0x46, &table, mocks.layers());

    assert_eq!(
        ErabRequest::new(5, 9).apply(&mut handler),
        Err(BearerError::UnconfiguredQosClass { qci: 9 })
    );
    ErabRequest::new(5, 5).apply(&mut handler)?;
    handler.prepare_reconfiguration(&mut RrcConnectionReconfiguration::default());
    handler.commit();

    assert_eq!(mocks.mac.bearer(0x46, 3).map(|s| s.group), Some(1));
    assert_eq!(mocks.pdcp.bearer(0x46, 3).map(|p| p.discard_timer_ms), Some(None));
    Ok(())
}
