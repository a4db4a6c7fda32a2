//! A single user-supplied transaction.

use crate::error::{GatewayError, GatewayResult};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub category: String,
    /// Amount spent in dollars
    pub amount: f64,
    pub payment_method: String,
    /// Transaction date; today when omitted
    #[serde(default = "today")]
    pub date: NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl TransactionInput {
    pub fn new(
        category: impl Into<String>,
        amount: f64,
        payment_method: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            category: category.into(),
            amount,
            payment_method: payment_method.into(),
            date,
        }
    }

    /// Month of the transaction date, 1-12.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Shared precondition of both predictions: a finite, strictly positive amount.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.amount.is_finite() && self.amount > 0.0 {
            Ok(())
        } else {
            Err(GatewayError::Validation("invalid amount".to_string()))
        }
    }
}
