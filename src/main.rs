use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rewardpay::application::engine::{DEFAULT_MAX_BATCH_SIZE, EngineConfig, PayoutEngine};
use rewardpay::domain::address::Address;
use rewardpay::domain::amount::UnitMode;
use rewardpay::domain::ports::AssetId;
use rewardpay::infrastructure::in_memory::InMemoryLedger;
use rewardpay::interfaces::csv::payout_reader::PayoutReader;
use rewardpay::interfaces::csv::report_writer::ReportWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Runs a payout batch from a CSV file against a simulated ledger and writes
/// the per-recipient report to stdout. The real network-backed ledger client
/// lives outside this crate; embedders inject it through the `LedgerClient`
/// port instead of using this binary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payouts CSV file (recipient, amount[, precision])
    input: PathBuf,

    /// Custodial payer account the payouts are drawn from
    #[arg(long, default_value = "11111111111111111111111111111111")]
    payer: String,

    /// Asset identifier to disburse
    #[arg(long, default_value = "REWARD")]
    asset: String,

    /// Asset precision registered on the simulated ledger
    #[arg(long, default_value_t = 9)]
    precision: u32,

    /// Payer balance seeded on the simulated ledger, in minimal units
    #[arg(long, default_value_t = 1_000_000_000_000)]
    payer_balance: u64,

    /// Treat amounts as already being in minimal units (skips precision scaling)
    #[arg(long)]
    raw_units: bool,

    /// Maximum number of transfers accepted per batch
    #[arg(long, default_value_t = DEFAULT_MAX_BATCH_SIZE)]
    max_batch_size: usize,

    /// Emit the report as JSON instead of CSV
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let payer = Address::parse(&cli.payer).into_diagnostic()?;
    let asset = AssetId::new(&cli.asset);
    let ledger = Arc::new(
        InMemoryLedger::new()
            .with_precision(asset.clone(), cli.precision)
            .with_balance(payer.clone(), cli.payer_balance),
    );

    let unit_mode = if cli.raw_units {
        UnitMode::AlreadyMinimal
    } else {
        UnitMode::ScaledByPrecision
    };
    let config = EngineConfig::new(payer, asset)
        .with_unit_mode(unit_mode)
        .with_max_batch_size(cli.max_batch_size);
    let engine = PayoutEngine::new(ledger, config);

    // A malformed request list is a caller error: fail the run instead of
    // starting a partial batch.
    let file = File::open(cli.input).into_diagnostic()?;
    let requests = PayoutReader::new(file)
        .requests()
        .collect::<std::result::Result<Vec<_>, _>>()
        .into_diagnostic()?;

    let result = engine.execute_batch(&requests).await.into_diagnostic()?;

    let stdout = io::stdout();
    if cli.json {
        serde_json::to_writer_pretty(stdout.lock(), &result).into_diagnostic()?;
        println!();
    } else {
        let mut writer = ReportWriter::new(stdout.lock());
        writer.write_report(&result).into_diagnostic()?;
    }

    Ok(())
}
