//! Artifact loading from disk: encoders, scalers, checksums, missing files.

use spendsense::artifacts::{sha256_hex, ArtifactLoader};
use spendsense::config::{ArtifactsConfig, ModelConfig};
use spendsense::features::{CATEGORY, CLASSIFICATION_FEATURES, PAYMENT_METHOD, REGRESSION_FEATURES};
use spendsense::scaling::ScalerParams;
use spendsense::{GatewayError, InferenceGateway, OnnxPredictor};
use std::fs;
use std::path::Path;

const ENCODERS: &str = r#"{
    "Category": { "classes": ["Entertainment", "Groceries", "Rent"] },
    "Payment Method": { "classes": ["Cash", "Credit Card"] }
}"#;

const SCALER_REG: &str = r#"{
    "kind": "standard",
    "feature_names": ["Category", "Payment Method", "Month", "Year"],
    "mean": [1.0, 0.5, 6.5, 2023.5],
    "scale": [0.8, 0.5, 3.45, 0.5]
}"#;

const SCALER_CLS: &str = r#"{
    "kind": "min_max",
    "feature_names": ["Month", "Total Spent"],
    "min": [-0.0909, 0.0],
    "scale": [0.0909, 0.0002]
}"#;

fn write_all(dir: &Path) {
    fs::write(dir.join("label_encoders.json"), ENCODERS).unwrap();
    fs::write(dir.join("scaler_reg.json"), SCALER_REG).unwrap();
    fs::write(dir.join("scaler_cls.json"), SCALER_CLS).unwrap();
}

fn config_for(dir: &Path) -> ArtifactsConfig {
    ArtifactsConfig {
        dir: dir.to_path_buf(),
        ..ArtifactsConfig::default()
    }
}

fn artifact_of(err: GatewayError) -> String {
    match err {
        GatewayError::ArtifactLoad { artifact, .. } => artifact,
        other => panic!("expected artifact load error, got {other:?}"),
    }
}

#[test]
fn encoders_load_in_fitted_order() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let config = config_for(dir.path());
    let encoders = ArtifactLoader::new(&config).load_encoders().unwrap();

    assert_eq!(encoders.encode(CATEGORY, "Entertainment").unwrap(), 0);
    assert_eq!(encoders.encode(CATEGORY, "Rent").unwrap(), 2);
    assert_eq!(encoders.encode(PAYMENT_METHOD, "Credit Card").unwrap(), 1);
    assert_eq!(encoders.get(CATEGORY).unwrap().decode(1).unwrap(), "Groceries");
}

#[test]
fn encoders_missing_a_field_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    fs::write(
        dir.path().join("label_encoders.json"),
        r#"{ "Category": { "classes": ["Rent"] } }"#,
    )
    .unwrap();
    let config = config_for(dir.path());
    let err = ArtifactLoader::new(&config).load_encoders().unwrap_err();
    assert_eq!(artifact_of(err), "label_encoders.json");
}

#[test]
fn duplicate_classes_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("label_encoders.json"),
        r#"{ "Category": { "classes": ["Rent", "Rent"] }, "Payment Method": { "classes": ["Cash"] } }"#,
    )
    .unwrap();
    let config = config_for(dir.path());
    assert!(ArtifactLoader::new(&config).load_encoders().is_err());
}

#[test]
fn scalers_load_with_their_kind() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let config = config_for(dir.path());
    let loader = ArtifactLoader::new(&config);

    let reg = loader.load_scaler("scaler_reg.json", &REGRESSION_FEATURES).unwrap();
    assert!(matches!(reg.params(), ScalerParams::Standard { .. }));
    let cls = loader.load_scaler("scaler_cls.json", &CLASSIFICATION_FEATURES).unwrap();
    assert!(matches!(cls.params(), ScalerParams::MinMax { .. }));
}

#[test]
fn scaler_fitted_on_other_columns_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let config = config_for(dir.path());
    let err = ArtifactLoader::new(&config)
        .load_scaler("scaler_cls.json", &REGRESSION_FEATURES)
        .unwrap_err();
    assert_eq!(artifact_of(err), "scaler_cls.json");
}

#[test]
fn malformed_scaler_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scaler_reg.json"), r#"{ "kind": "standard", "mean": [1.0] }"#).unwrap();
    let config = config_for(dir.path());
    let err = ArtifactLoader::new(&config)
        .load_scaler("scaler_reg.json", &REGRESSION_FEATURES)
        .unwrap_err();
    assert_eq!(artifact_of(err), "scaler_reg.json");
}

#[test]
fn checksum_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let mut config = config_for(dir.path());
    config
        .checksums
        .insert("label_encoders.json".to_string(), "00".repeat(32));
    let err = ArtifactLoader::new(&config).load_encoders().unwrap_err();
    assert!(err.to_string().contains("checksum mismatch"));
}

#[test]
fn matching_checksum_is_accepted_in_any_case() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let mut config = config_for(dir.path());
    let digest = sha256_hex(ENCODERS.as_bytes()).to_uppercase();
    config.checksums.insert("label_encoders.json".to_string(), digest);
    assert!(ArtifactLoader::new(&config).load_encoders().is_ok());
}

#[test]
fn missing_model_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let config = config_for(dir.path());
    let err = match InferenceGateway::from_config(&config) {
        Ok(_) => panic!("gateway started without models"),
        Err(e) => e,
    };
    assert_eq!(artifact_of(err), "spendsense_spending_predictor.onnx");
}

#[test]
fn empty_directory_fails_on_first_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let err = match InferenceGateway::from_config(&config) {
        Ok(_) => panic!("gateway started without artifacts"),
        Err(e) => e,
    };
    assert_eq!(artifact_of(err), "label_encoders.json");
}

#[test]
fn sha256_hex_is_lowercase_hex() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn onnx_missing_model_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let model = ModelConfig::new("spending.onnx");
    let err = match OnnxPredictor::load(&dir.path().join("spending.onnx"), &model) {
        Ok(_) => panic!("loaded a model that does not exist"),
        Err(e) => e,
    };
    assert_eq!(artifact_of(err), "spending.onnx");
}

#[test]
fn onnx_corrupt_model_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    fs::write(dir.path().join("spendsense_spending_predictor.onnx"), b"not an onnx graph").unwrap();
    let config = config_for(dir.path());
    let err = match InferenceGateway::from_config(&config) {
        Ok(_) => panic!("gateway started on a corrupt model"),
        Err(e) => e,
    };
    assert_eq!(artifact_of(err), "spendsense_spending_predictor.onnx");
}

#[test]
fn encoder_set_debug_lists_fields() {
    let dir = tempfile::tempdir().unwrap();
    write_all(dir.path());
    let config = config_for(dir.path());
    let encoders = ArtifactLoader::new(&config).load_encoders().unwrap();
    let shown = format!("{:?}", encoders);
    assert!(shown.contains("Category"));
    assert!(shown.contains("Payment Method"));
}
