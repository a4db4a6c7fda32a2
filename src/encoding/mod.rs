//! Categorical encoding: fitted label ↔ integer code mappings, one per field.

mod label;

pub use label::{EncoderSet, LabelEncoder};

use crate::error::GatewayResult;

/// Capability of a fitted categorical encoder.
pub trait Encode: Send + Sync {
    /// Known labels in code order.
    fn classes(&self) -> &[String];

    /// Code of `label`; fails for labels outside the fitted vocabulary.
    fn encode(&self, label: &str) -> GatewayResult<i64>;

    fn decode(&self, code: i64) -> GatewayResult<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes().get(i))
            .map(String::as_str)
            .ok_or_else(|| crate::GatewayError::Encoding(format!("unknown code {}", code)))
    }
}
