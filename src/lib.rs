//! SpendSense: inference gateway over pre-trained spending models.
//!
//! Modular structure:
//! - [`features`]: Transaction input and ordered feature frames
//! - [`encoding`]: Fitted label encoders for categorical fields
//! - [`scaling`]: Fitted feature scalers
//! - [`model`]: ONNX predictor behind the `Predict` capability
//! - [`artifacts`]: One-shot artifact loading with checksum verification
//! - [`risk`]: Overspend risk levels
//! - [`gateway`]: Future spend and overspend risk operations
//! - [`report`]: Request boundary and user-facing outcomes
//! - [`logging`]: Structured logging

pub mod config;
pub mod error;
pub mod features;
pub mod encoding;
pub mod scaling;
pub mod model;
pub mod artifacts;
pub mod risk;
pub mod gateway;
pub mod report;
pub mod logging;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use features::{FeatureVector, TransactionInput};
pub use encoding::{Encode, EncoderSet, LabelEncoder};
pub use scaling::{FeatureScaler, Transform};
pub use model::{OnnxPredictor, Predict};
pub use artifacts::{ArtifactLoader, Artifacts};
pub use risk::RiskLevel;
pub use gateway::{Amount, InferenceGateway};
pub use report::Report;
pub use logging::StructuredLogger;
