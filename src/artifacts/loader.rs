//! Reads artifacts from the configured directory, verifying optional SHA-256 checksums.
//! Any failure is fatal: there is no partial-availability mode.

use super::Artifacts;
use crate::config::ArtifactsConfig;
use crate::encoding::EncoderSet;
use crate::error::{GatewayError, GatewayResult};
use crate::features::{CATEGORY, PAYMENT_METHOD};
use crate::model::OnnxPredictor;
use crate::scaling::{FeatureScaler, Transform};
use sha2::{Digest, Sha256};
use tracing::info;

pub fn sha256_hex(data: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(data);
    format!("{:x}", h.finalize())
}

pub struct ArtifactLoader<'a> {
    config: &'a ArtifactsConfig,
}

impl<'a> ArtifactLoader<'a> {
    pub fn new(config: &'a ArtifactsConfig) -> Self {
        Self { config }
    }

    /// Read `file` from the artifacts dir and check it against the configured digest.
    fn read(&self, file: &str) -> GatewayResult<Vec<u8>> {
        let path = self.config.path_of(file);
        let data = std::fs::read(&path)
            .map_err(|e| GatewayError::artifact(file, format!("{}: {}", path.display(), e)))?;
        let digest = sha256_hex(&data);
        if let Some(expected) = self.config.checksums.get(file) {
            if !expected.eq_ignore_ascii_case(&digest) {
                return Err(GatewayError::artifact(
                    file,
                    format!("checksum mismatch (expected {}, got {})", expected, digest),
                ));
            }
        }
        info!(artifact = %file, sha256 = %digest, bytes = data.len(), "artifact read");
        Ok(data)
    }

    fn read_str(&self, file: &str) -> GatewayResult<String> {
        String::from_utf8(self.read(file)?).map_err(|e| GatewayError::artifact(file, e))
    }

    /// Encoders for every categorical field. Both `Category` and `Payment Method` must be present.
    pub fn load_encoders(&self) -> GatewayResult<EncoderSet> {
        let file = &self.config.label_encoders;
        let data = self.read_str(file)?;
        let encoders = EncoderSet::from_json(&data).map_err(|e| GatewayError::artifact(file, e))?;
        for field in [CATEGORY, PAYMENT_METHOD] {
            let enc = encoders
                .get(field)
                .map_err(|_| GatewayError::artifact(file, format!("missing encoder for `{}`", field)))?;
            if enc.classes().is_empty() {
                return Err(GatewayError::artifact(file, format!("encoder `{}` has no classes", field)));
            }
        }
        Ok(encoders)
    }

    /// Scaler fitted on exactly `expected` features.
    pub fn load_scaler(&self, file: &str, expected: &[&str]) -> GatewayResult<FeatureScaler> {
        let data = self.read_str(file)?;
        let scaler = FeatureScaler::from_json(&data).map_err(|e| GatewayError::artifact(file, e))?;
        if scaler.dim() != expected.len() {
            return Err(GatewayError::artifact(
                file,
                format!("fitted on {} features, expected {}", scaler.dim(), expected.len()),
            ));
        }
        if let Some(names) = scaler.feature_names() {
            if !names.iter().map(String::as_str).eq(expected.iter().copied()) {
                return Err(GatewayError::artifact(
                    file,
                    format!("fitted on {:?}, expected {:?}", names, expected),
                ));
            }
        }
        Ok(scaler)
    }

    fn load_model(&self, model: &crate::config::ModelConfig) -> GatewayResult<OnnxPredictor> {
        // Digest check before handing the file to the runtime.
        self.read(&model.file)?;
        OnnxPredictor::load(&self.config.path_of(&model.file), model)
    }

    pub fn load(&self) -> GatewayResult<Artifacts> {
        use crate::features::{CLASSIFICATION_FEATURES, REGRESSION_FEATURES};

        let encoders = self.load_encoders()?;
        let scaler_reg = self.load_scaler(&self.config.scaler_reg, &REGRESSION_FEATURES)?;
        let scaler_cls = self.load_scaler(&self.config.scaler_cls, &CLASSIFICATION_FEATURES)?;
        let spending_model = self.load_model(&self.config.spending_model)?;
        let overspend_model = self.load_model(&self.config.overspend_model)?;

        info!(dir = %self.config.dir.display(), "all artifacts loaded");
        Ok(Artifacts::new(
            spending_model,
            overspend_model,
            encoders,
            scaler_reg,
            scaler_cls,
        ))
    }
}

