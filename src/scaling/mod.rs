//! Fitted numeric transforms applied before a model sees a feature vector.

mod scaler;

pub use scaler::{FeatureScaler, ScalerParams};

use crate::error::GatewayResult;
use crate::features::FeatureVector;

/// Capability of a fitted feature scaler.
pub trait Transform: Send + Sync {
    /// Number of features the scaler was fitted on.
    fn dim(&self) -> usize;

    /// Scale `features`; dimensionality and order must match the fit.
    fn transform(&self, features: &FeatureVector) -> GatewayResult<Vec<f32>>;
}
