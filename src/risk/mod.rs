//! Overspend risk levels produced from the classifier's class label.

mod level;

pub use level::RiskLevel;
