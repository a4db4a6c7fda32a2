//! Request boundary: runs one operation, converts its result (or error) into a
//! user-facing report. Validation failures become warnings; nothing here panics.

use crate::error::{GatewayError, GatewayResult};
use crate::features::TransactionInput;
use crate::gateway::{Amount, InferenceGateway};
use crate::logging::StructuredLogger;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{error, info_span, warn};
use uuid::Uuid;

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount.";
pub const HIGH_RISK_MESSAGE: &str = "High Risk of Overspending Detected!";
pub const SAFE_MESSAGE: &str = "Your Spending Is Safe";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    PredictSpend,
    CheckRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    /// High overspend risk
    Alert,
    /// The request failed
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub request_id: Uuid,
    pub operation: Operation,
    pub tone: Tone,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
}

impl Report {
    fn new(request_id: Uuid, operation: Operation, tone: Tone, message: impl Into<String>) -> Self {
        Self {
            request_id,
            operation,
            tone,
            message: message.into(),
            amount: None,
            risk: None,
        }
    }

    pub fn from_spend(request_id: Uuid, result: GatewayResult<Amount>) -> Self {
        match result {
            Ok(amount) => Report {
                amount: Some(amount),
                ..Self::new(
                    request_id,
                    Operation::PredictSpend,
                    Tone::Success,
                    format!("Estimated Future Spend: {}", amount),
                )
            },
            Err(e) => Self::from_error(request_id, Operation::PredictSpend, &e),
        }
    }

    pub fn from_risk(request_id: Uuid, result: GatewayResult<RiskLevel>) -> Self {
        match result {
            Ok(level) => {
                let (tone, message) = match level {
                    RiskLevel::HighRisk => (Tone::Alert, HIGH_RISK_MESSAGE),
                    RiskLevel::Safe => (Tone::Success, SAFE_MESSAGE),
                };
                Report {
                    risk: Some(level),
                    ..Self::new(request_id, Operation::CheckRisk, tone, message)
                }
            }
            Err(e) => Self::from_error(request_id, Operation::CheckRisk, &e),
        }
    }

    pub fn from_error(request_id: Uuid, operation: Operation, err: &GatewayError) -> Self {
        if err.is_validation() {
            warn!(%request_id, ?operation, error = %err, "request rejected");
            Self::new(request_id, operation, Tone::Warning, INVALID_AMOUNT_MESSAGE)
        } else {
            error!(%request_id, ?operation, error = %err, "request failed");
            Self::new(request_id, operation, Tone::Error, err.to_string())
        }
    }

    /// True when the request failed for a reason other than invalid input.
    pub fn is_failure(&self) -> bool {
        self.tone == Tone::Error
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.tone {
            Tone::Success => "ok",
            Tone::Warning => "warn",
            Tone::Alert => "alert",
            Tone::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Run PredictFutureSpend as one request.
pub fn predict_spend(gateway: &InferenceGateway, tx: &TransactionInput) -> Report {
    let request_id = Uuid::new_v4();
    let _span = info_span!("predict_spend", %request_id).entered();
    Report::from_spend(request_id, gateway.predict_future_spend(tx))
}

/// Run PredictOverspendRisk as one request.
pub fn check_risk(gateway: &InferenceGateway, tx: &TransactionInput) -> Report {
    let request_id = Uuid::new_v4();
    let _span = info_span!("check_risk", %request_id).entered();
    Report::from_risk(request_id, gateway.predict_overspend_risk(tx))
}

/// Run one operation as one request.
pub fn run_operation(gateway: &InferenceGateway, operation: Operation, tx: &TransactionInput) -> Report {
    match operation {
        Operation::PredictSpend => predict_spend(gateway, tx),
        Operation::CheckRisk => check_risk(gateway, tx),
    }
}

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-blank input lines
    pub lines: usize,
    pub reports: usize,
    /// Reports with `Tone::Error`
    pub failures: usize,
}

impl BatchSummary {
    pub fn is_failure(&self) -> bool {
        self.failures > 0
    }
}

fn parse_line(raw: &[u8]) -> GatewayResult<Option<TransactionInput>> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| GatewayError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?
        .trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Run `operations` for every newline-delimited JSON transaction in `reader`.
/// A line that is not UTF-8 or not a transaction yields one error report per
/// operation; the batch always continues. Only reader and `emit` I/O errors abort.
pub fn run_batch(
    gateway: &InferenceGateway,
    mut reader: impl BufRead,
    operations: &[Operation],
    mut emit: impl FnMut(&Report) -> io::Result<()>,
) -> io::Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut buf = Vec::new();
    let mut lineno = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;
        let reports: Vec<Report> = match parse_line(&buf) {
            Ok(None) => continue,
            Ok(Some(tx)) => operations.iter().map(|op| run_operation(gateway, *op, &tx)).collect(),
            Err(err) => {
                warn!(line = lineno, error = %err, "skipping malformed transaction");
                operations
                    .iter()
                    .map(|op| Report::from_error(Uuid::new_v4(), *op, &err))
                    .collect()
            }
        };
        summary.lines += 1;
        for report in &reports {
            summary.reports += 1;
            if report.is_failure() {
                summary.failures += 1;
            }
            emit(report)?;
        }
    }
    Ok(summary)
}

/// Writes reports as text or JSON lines and remembers whether any request failed.
pub struct ReportWriter<W: Write> {
    out: W,
    json: bool,
    failed: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            failed: false,
        }
    }

    pub fn emit(&mut self, report: &Report) -> io::Result<()> {
        self.failed |= report.is_failure();
        if self.json {
            StructuredLogger::emit_json(report, &mut self.out)
        } else {
            writeln!(self.out, "{}", report)
        }
    }

    /// Validation warnings do not count; only `Tone::Error` reports do.
    pub fn has_failures(&self) -> bool {
        self.failed
    }

    /// `0` unless a request failed.
    pub fn exit_code(&self) -> ExitCode {
        if self.failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
