//! Gateway configuration: where the fitted artifacts live and how to log.

use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Env var naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "SPENDSENSE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "spendsense.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Serialized models, encoders and scalers
    pub artifacts: ArtifactsConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory the file names below are resolved against
    pub dir: PathBuf,
    pub spending_model: ModelConfig,
    pub overspend_model: ModelConfig,
    pub label_encoders: String,
    pub scaler_reg: String,
    pub scaler_cls: String,
    /// Expected SHA-256 (lowercase hex) per artifact file name
    pub checksums: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub file: String,
    /// Input tensor name; first model input when unset
    #[serde(default)]
    pub input: Option<String>,
    /// Output tensor name; a `label` output or the first output when unset
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl ModelConfig {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            input: None,
            output: None,
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            spending_model: ModelConfig::new("spendsense_spending_predictor.onnx"),
            overspend_model: ModelConfig::new("spendsense_overspend_classifier.onnx"),
            label_encoders: "label_encoders.json".to_string(),
            scaler_reg: "scaler_reg.json".to_string(),
            scaler_cls: "scaler_cls.json".to_string(),
            checksums: BTreeMap::new(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl ArtifactsConfig {
    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl GatewayConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> GatewayResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str::<GatewayConfig>(&data)
            .map_err(|e| GatewayError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Path from the explicit flag, then `SPENDSENSE_CONFIG`, then `spendsense.json`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
