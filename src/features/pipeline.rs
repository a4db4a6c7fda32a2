//! Feature frames: transaction → ordered named vector matching what each scaler was fitted on.

use super::{FeatureVector, TransactionInput};

pub const CATEGORY: &str = "Category";
pub const PAYMENT_METHOD: &str = "Payment Method";
pub const MONTH: &str = "Month";
pub const YEAR: &str = "Year";
pub const TOTAL_SPENT: &str = "Total Spent";

/// Column order of the spending regressor.
pub const REGRESSION_FEATURES: [&str; 4] = [CATEGORY, PAYMENT_METHOD, MONTH, YEAR];
/// Column order of the overspend classifier. Category and payment method are not used.
pub const CLASSIFICATION_FEATURES: [&str; 2] = [MONTH, TOTAL_SPENT];

/// `[categoryCode, paymentCode, month, year]`
pub fn regression_frame(category_code: i64, payment_code: i64, tx: &TransactionInput) -> FeatureVector {
    FeatureVector::from_pairs(&[
        (CATEGORY, category_code as f64),
        (PAYMENT_METHOD, payment_code as f64),
        (MONTH, f64::from(tx.month())),
        (YEAR, f64::from(tx.year())),
    ])
}

/// `[month, amount]`
pub fn classification_frame(tx: &TransactionInput) -> FeatureVector {
    FeatureVector::from_pairs(&[(MONTH, f64::from(tx.month())), (TOTAL_SPENT, tx.amount)])
}
