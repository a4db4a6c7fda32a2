//! Deterministic stand-ins for the fitted artifacts.

#![allow(dead_code)]

use spendsense::features::{CATEGORY, CLASSIFICATION_FEATURES, PAYMENT_METHOD, REGRESSION_FEATURES};
use spendsense::{Artifacts, EncoderSet, FeatureScaler, GatewayResult, InferenceGateway, LabelEncoder, Predict};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const CATEGORIES: [&str; 5] = ["Entertainment", "Groceries", "Rent", "Transport", "Utilities"];
pub const PAYMENT_METHODS: [&str; 3] = ["Cash", "Credit Card", "Debit Card"];

/// Predictor backed by a plain function that counts its invocations.
pub struct StubPredictor {
    calls: Arc<AtomicUsize>,
    f: fn(&[f32]) -> f64,
}

impl StubPredictor {
    pub fn new(f: fn(&[f32]) -> f64) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: calls.clone(),
                f,
            },
            calls,
        )
    }
}

impl Predict for StubPredictor {
    fn predict(&self, features: &[f32]) -> GatewayResult<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.f)(features))
    }
}

/// Linear in every feature, so any change to the frame changes the output.
pub fn linear_spend(x: &[f32]) -> f64 {
    x.iter().enumerate().map(|(i, v)| f64::from(*v) * (i as f64 + 1.0)).sum::<f64>() + 50.0
}

/// Raw `[month, total_spent]` in (identity scaler): high risk above $4000.
pub fn threshold_classifier(x: &[f32]) -> f64 {
    if x[1] > 4000.0 {
        1.0
    } else {
        0.0
    }
}

pub fn encoders() -> EncoderSet {
    EncoderSet::new()
        .with(CATEGORY, LabelEncoder::new(CATEGORIES).unwrap())
        .with(PAYMENT_METHOD, LabelEncoder::new(PAYMENT_METHODS).unwrap())
}

pub struct Harness {
    pub gateway: InferenceGateway,
    pub spend_calls: Arc<AtomicUsize>,
    pub risk_calls: Arc<AtomicUsize>,
}

pub fn harness_with(spend: fn(&[f32]) -> f64, risk: fn(&[f32]) -> f64) -> Harness {
    let (spending_model, spend_calls) = StubPredictor::new(spend);
    let (overspend_model, risk_calls) = StubPredictor::new(risk);
    let artifacts = Artifacts::new(
        spending_model,
        overspend_model,
        encoders(),
        FeatureScaler::identity(&REGRESSION_FEATURES),
        FeatureScaler::identity(&CLASSIFICATION_FEATURES),
    );
    Harness {
        gateway: InferenceGateway::new(artifacts),
        spend_calls,
        risk_calls,
    }
}

pub fn harness() -> Harness {
    harness_with(linear_spend, threshold_classifier)
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
