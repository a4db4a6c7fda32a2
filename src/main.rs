//! SpendSense entrypoint: loads the fitted artifacts once, then serves one
//! prediction request per invocation (or one per line in batch mode).

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use spendsense::{
    config::GatewayConfig,
    features::{CATEGORY, PAYMENT_METHOD},
    gateway::InferenceGateway,
    logging::StructuredLogger,
    report::{self, Operation, ReportWriter},
    TransactionInput,
};
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Spending forecast and overspend risk from pre-trained models
#[derive(Parser, Debug)]
#[command(name = "spendsense", author, version, about)]
struct Args {
    /// Config file (overrides SPENDSENSE_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Artifacts directory (overrides the config file)
    #[arg(short, long, global = true)]
    artifacts: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Print reports as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the labels each categorical field accepts
    Classes {
        /// Only this field (e.g. "Category", "Payment Method")
        #[arg(long)]
        field: Option<String>,
    },

    /// Estimate future spending for a transaction
    PredictSpend {
        #[arg(long)]
        category: String,
        /// Amount spent in dollars
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        #[arg(long)]
        payment_method: String,
        /// Transaction date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Classify overspending risk for an amount and date
    CheckRisk {
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        payment_method: String,
    },

    /// Run predictions for newline-delimited JSON transactions
    Batch {
        /// Input file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = BatchOperation::Both)]
        operation: BatchOperation,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BatchOperation {
    Spend,
    Risk,
    Both,
}

impl BatchOperation {
    fn operations(self) -> &'static [Operation] {
        match self {
            BatchOperation::Spend => &[Operation::PredictSpend],
            BatchOperation::Risk => &[Operation::CheckRisk],
            BatchOperation::Both => &[Operation::PredictSpend, Operation::CheckRisk],
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run(args: Args) -> Result<ExitCode, BoxError> {
    let config_path = GatewayConfig::resolve_path(args.config.as_deref());
    let mut config = GatewayConfig::load(&config_path)?;
    if let Some(dir) = args.artifacts {
        config.artifacts.dir = dir;
    }
    let level = args.log_level.as_deref().unwrap_or(&config.log.level);
    StructuredLogger::init(config.log.json, level);

    info!(config = %config_path.display(), artifacts = %config.artifacts.dir.display(), "SpendSense starting");
    let gateway = InferenceGateway::from_config(&config.artifacts)?;

    let mut out = ReportWriter::new(std::io::stdout(), args.json);

    match args.command {
        Command::Classes { field } => {
            let fields: Vec<String> = match field {
                Some(f) => vec![f],
                None => vec![CATEGORY.to_string(), PAYMENT_METHOD.to_string()],
            };
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            for f in &fields {
                let classes = gateway.classes(f)?;
                if args.json {
                    let line = serde_json::json!({ "field": f, "classes": classes });
                    StructuredLogger::emit_json(&line, &mut w)?;
                } else {
                    writeln!(w, "{}: {}", f, classes.join(", "))?;
                }
            }
        }
        Command::PredictSpend {
            category,
            amount,
            payment_method,
            date,
        } => {
            let tx = TransactionInput::new(category, amount, payment_method, date.unwrap_or_else(today));
            out.emit(&report::predict_spend(&gateway, &tx))?;
        }
        Command::CheckRisk {
            amount,
            date,
            category,
            payment_method,
        } => {
            let tx = TransactionInput::new(category, amount, payment_method, date.unwrap_or_else(today));
            out.emit(&report::check_risk(&gateway, &tx))?;
        }
        Command::Batch { input, operation } => match input {
            Some(path) => {
                let file = std::fs::File::open(&path)?;
                report::run_batch(&gateway, BufReader::new(file), operation.operations(), |r| out.emit(r))?;
            }
            None => {
                let stdin = std::io::stdin();
                report::run_batch(&gateway, stdin.lock(), operation.operations(), |r| out.emit(r))?;
            }
        },
    }

    Ok(out.exit_code())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "SpendSense failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
