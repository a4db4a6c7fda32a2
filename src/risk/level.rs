use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Safe,
    HighRisk,
}

impl RiskLevel {
    /// `0 → Safe`, `1 → HighRisk`. Anything else is a model contract violation.
    pub fn from_class(label: f64) -> GatewayResult<Self> {
        if label == 0.0 {
            Ok(RiskLevel::Safe)
        } else if label == 1.0 {
            Ok(RiskLevel::HighRisk)
        } else {
            Err(GatewayError::Prediction(format!(
                "classifier returned unexpected class {}",
                label
            )))
        }
    }

    pub fn class(self) -> u8 {
        match self {
            RiskLevel::Safe => 0,
            RiskLevel::HighRisk => 1,
        }
    }

    pub fn is_high(self) -> bool {
        self == RiskLevel::HighRisk
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Safe => "safe",
            RiskLevel::HighRisk => "high_risk",
        })
    }
}
