//! Standard and min-max scalers with the fitted parameters of their training run.

use super::Transform;
use crate::error::{GatewayError, GatewayResult};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParams {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerRepr", into = "ScalerRepr")]
pub struct FeatureScaler {
    /// Column names seen at fit time, when recorded
    feature_names: Option<Vec<String>>,
    params: ScalerParams,
}

#[derive(Serialize, Deserialize)]
struct ScalerRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    params: ScalerParams,
}

impl FeatureScaler {
    pub fn new(feature_names: Option<Vec<String>>, params: ScalerParams) -> GatewayResult<Self> {
        let (a, b) = match &params {
            ScalerParams::Standard { mean, scale } => (mean, scale),
            ScalerParams::MinMax { min, scale } => (min, scale),
        };
        if a.len() != b.len() {
            return Err(GatewayError::Scaling(format!(
                "parameter lengths differ ({} vs {})",
                a.len(),
                b.len()
            )));
        }
        if a.iter().chain(b).any(|v| !v.is_finite()) {
            return Err(GatewayError::Scaling("non-finite scaler parameter".into()));
        }
        if matches!(params, ScalerParams::Standard { .. }) && b.iter().any(|s| *s == 0.0) {
            return Err(GatewayError::Scaling("zero standard deviation".into()));
        }
        if let Some(names) = &feature_names {
            if names.len() != a.len() {
                return Err(GatewayError::Scaling(format!(
                    "{} feature names for {} parameters",
                    names.len(),
                    a.len()
                )));
            }
        }
        Ok(Self { feature_names, params })
    }

    /// Standardization fitted on named columns.
    pub fn standard(names: &[&str], mean: Vec<f64>, scale: Vec<f64>) -> GatewayResult<Self> {
        Self::new(
            Some(names.iter().map(|n| (*n).to_string()).collect()),
            ScalerParams::Standard { mean, scale },
        )
    }

    /// Pass-through scaler for `names`.
    pub fn identity(names: &[&str]) -> Self {
        Self {
            feature_names: Some(names.iter().map(|n| (*n).to_string()).collect()),
            params: ScalerParams::Standard {
                mean: vec![0.0; names.len()],
                scale: vec![1.0; names.len()],
            },
        }
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    pub fn params(&self) -> &ScalerParams {
        &self.params
    }

    pub fn from_json(data: &str) -> GatewayResult<Self> {
        Ok(serde_json::from_str(data)?)
    }

    fn check(&self, features: &FeatureVector) -> GatewayResult<()> {
        if features.dim() != self.dim() {
            return Err(GatewayError::Scaling(format!(
                "expected {} features, got {}",
                self.dim(),
                features.dim()
            )));
        }
        if let Some(expected) = &self.feature_names {
            if *expected != features.names {
                return Err(GatewayError::Scaling(format!(
                    "feature order {:?} does not match fitted order {:?}",
                    features.names, expected
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<ScalerRepr> for FeatureScaler {
    type Error = GatewayError;

    fn try_from(repr: ScalerRepr) -> Result<Self, Self::Error> {
        Self::new(repr.feature_names, repr.params)
    }
}

impl From<FeatureScaler> for ScalerRepr {
    fn from(s: FeatureScaler) -> Self {
        Self {
            feature_names: s.feature_names,
            params: s.params,
        }
    }
}

impl Transform for FeatureScaler {
    fn dim(&self) -> usize {
        match &self.params {
            ScalerParams::Standard { mean, .. } => mean.len(),
            ScalerParams::MinMax { min, .. } => min.len(),
        }
    }

    fn transform(&self, features: &FeatureVector) -> GatewayResult<Vec<f32>> {
        self.check(features)?;
        let x = features.as_slice();
        let out = match &self.params {
            ScalerParams::Standard { mean, scale } => x
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(v, (m, s))| ((v - m) / s) as f32)
                .collect(),
            ScalerParams::MinMax { min, scale } => x
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(v, (lo, s))| (v * s + lo) as f32)
                .collect(),
        };
        Ok(out)
    }
}
