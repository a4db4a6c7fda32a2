//! Transaction input and the ordered feature frames fed to the scalers.

mod pipeline;
mod transaction;

pub use pipeline::{
    classification_frame, regression_frame, CATEGORY, CLASSIFICATION_FEATURES, MONTH,
    PAYMENT_METHOD, REGRESSION_FEATURES, TOTAL_SPENT, YEAR,
};
pub use transaction::TransactionInput;

use serde::{Deserialize, Serialize};

/// Ordered, named numeric features for a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            names: pairs.iter().map(|(n, _)| (*n).to_string()).collect(),
            values: pairs.iter().map(|(_, v)| *v).collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
