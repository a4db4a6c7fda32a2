//! Opaque pre-trained predictors behind a single call contract.

mod onnx;

pub use onnx::OnnxPredictor;

use crate::error::GatewayResult;

/// Capability of a fitted model: scaled feature vector in, one scalar out.
pub trait Predict: Send + Sync {
    fn predict(&self, features: &[f32]) -> GatewayResult<f64>;
}
