//! # Configuration Tests
//!
//! Defaults, JSON deserialization and validation.

use pretty_assertions::assert_eq;
use tinyrv_core::FuType;
use tinyrv_core::common::ConfigError;
use tinyrv_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.pipeline.rob_size, 16);
    assert_eq!(config.pipeline.rs_size, 8);
    assert_eq!(config.pipeline.branch_predictor, BranchPredictor::GShare);
    assert_eq!(config.pipeline.mispredict_penalty, 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_gshare_and_latency_defaults() {
    let gshare = GShareConfig::default();
    assert_eq!(gshare.table_bits, 8);
    assert_eq!(gshare.history_bits, 8);
    assert_eq!(gshare.btb_update, BtbUpdatePolicy::OnTaken);

    let latency = LatencyConfig::default();
    assert_eq!(latency.of(FuType::Alu), 1);
    assert_eq!(latency.of(FuType::Lsu), 3);
    assert_eq!(latency.of(FuType::Csr), 2);
}

#[test]
fn test_empty_json_is_default() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let json = r#"{
        "pipeline": {
            "rs_size": 2,
            "branch_predictor": "None",
            "gshare": { "btb_update": "OnCorrectPrediction" },
            "latency": { "csr": 9 }
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.pipeline.rob_size, 16);
    assert_eq!(config.pipeline.rs_size, 2);
    assert_eq!(config.pipeline.branch_predictor, BranchPredictor::None);
    assert_eq!(config.pipeline.gshare.btb_update, BtbUpdatePolicy::OnCorrectPrediction);
    assert_eq!(config.pipeline.gshare.table_bits, 8);
    assert_eq!(config.pipeline.latency.csr, 9);
    assert_eq!(config.pipeline.latency.alu, 1);
}

#[test]
fn test_predictor_aliases() {
    for name in ["GShare", "GSHARE", "Gshare"] {
        let p: BranchPredictor = serde_json::from_str(&format!("\"{name}\"")).unwrap();
        assert_eq!(p, BranchPredictor::GShare);
    }
}

#[test]
fn test_roundtrip_through_json() {
    let mut config = Config::default();
    config.pipeline.rob_size = 3;
    config.general.max_cycles = Some(500);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let mut config = Config::default();
    config.pipeline.rob_size = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroSize { name: "rob_size" }));
}

#[test]
fn test_validate_rejects_zero_latency() {
    let mut config = Config::default();
    config.pipeline.latency.lsu = 0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroLatency { unit: FuType::Lsu })
    );
}

#[test]
fn test_validate_rejects_out_of_range_predictor() {
    let mut config = Config::default();
    config.pipeline.gshare.table_bits = 17;
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "gshare.table_bits = 17 is outside 1..=16");

    config.pipeline.gshare.table_bits = 8;
    config.pipeline.gshare.history_bits = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { name: "gshare.history_bits", .. })
    ));
}
