//! The five fitted artifacts the gateway runs on, loaded once at startup.

mod loader;

pub use loader::{sha256_hex, ArtifactLoader};

use crate::encoding::EncoderSet;
use crate::model::Predict;
use crate::scaling::Transform;

/// Immutable process-wide model state, handed to the gateway at construction.
pub struct Artifacts {
    pub spending_model: Box<dyn Predict>,
    pub overspend_model: Box<dyn Predict>,
    pub encoders: EncoderSet,
    pub scaler_reg: Box<dyn Transform>,
    pub scaler_cls: Box<dyn Transform>,
}

impl Artifacts {
    pub fn new(
        spending_model: impl Predict + 'static,
        overspend_model: impl Predict + 'static,
        encoders: EncoderSet,
        scaler_reg: impl Transform + 'static,
        scaler_cls: impl Transform + 'static,
    ) -> Self {
        Self {
            spending_model: Box::new(spending_model),
            overspend_model: Box::new(overspend_model),
            encoders,
            scaler_reg: Box::new(scaler_reg),
            scaler_cls: Box::new(scaler_cls),
        }
    }
}
