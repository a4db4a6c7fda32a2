//! Inference gateway: validate → encode → assemble frame → scale → predict.

use crate::artifacts::{ArtifactLoader, Artifacts};
use crate::config::ArtifactsConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::features::{classification_frame, regression_frame, TransactionInput, CATEGORY, PAYMENT_METHOD};
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Dollar amount. Displays with two decimals, e.g. `$150.00`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub f64);

impl Amount {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

pub struct InferenceGateway {
    artifacts: Artifacts,
}

impl InferenceGateway {
    pub fn new(artifacts: Artifacts) -> Self {
        Self { artifacts }
    }

    /// Load every artifact from `config`; fails if any one of them is unusable.
    pub fn from_config(config: &ArtifactsConfig) -> GatewayResult<Self> {
        Ok(Self::new(ArtifactLoader::new(config).load()?))
    }

    /// Known labels for a categorical field, in code order.
    pub fn classes(&self, field: &str) -> GatewayResult<&[String]> {
        Ok(self.artifacts.encoders.get(field)?.classes())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.artifacts.encoders.fields()
    }

    /// Predicted future spend for the transaction's category, payment method and date.
    pub fn predict_future_spend(&self, tx: &TransactionInput) -> GatewayResult<Amount> {
        tx.validate()?;

        let encoders = &self.artifacts.encoders;
        let category_code = encoders.encode(CATEGORY, &tx.category)?;
        let payment_code = encoders.encode(PAYMENT_METHOD, &tx.payment_method)?;

        let frame = regression_frame(category_code, payment_code, tx);
        let scaled = self.artifacts.scaler_reg.transform(&frame)?;
        let predicted = self.artifacts.spending_model.predict(&scaled)?;
        if !predicted.is_finite() {
            return Err(GatewayError::Prediction(format!(
                "spending model returned non-finite value {}",
                predicted
            )));
        }

        debug!(
            category_code,
            payment_code,
            month = tx.month(),
            year = tx.year(),
            predicted,
            "future spend predicted"
        );
        Ok(Amount(predicted))
    }

    /// Overspend risk from the transaction's month and amount.
    pub fn predict_overspend_risk(&self, tx: &TransactionInput) -> GatewayResult<RiskLevel> {
        tx.validate()?;

        let frame = classification_frame(tx);
        let scaled = self.artifacts.scaler_cls.transform(&frame)?;
        let class = self.artifacts.overspend_model.predict(&scaled)?;
        let level = RiskLevel::from_class(class)?;

        debug!(month = tx.month(), amount = tx.amount, %level, "overspend risk classified");
        Ok(level)
    }
}
