#![allow(dead_code)]

use rewardpay::application::engine::{EngineConfig, PayoutEngine};
use rewardpay::domain::address::Address;
use rewardpay::domain::ports::AssetId;
use rewardpay::infrastructure::in_memory::InMemoryLedger;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::Arc;

pub const PAYER: &str = "11111111111111111111111111111111";
pub const ALICE: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
pub const BOB: &str = "22222222222222222222222222222222";
pub const CAROL: &str = "3333333333333333333333333333333333333333";

pub const ASSET: &str = "REWARD";

/// Builds an engine over a simulated ledger seeded with the payer balance
/// (in minimal units) and the asset precision.
pub fn seeded_engine(balance_units: u64, precision: u32) -> (Arc<InMemoryLedger>, PayoutEngine) {
    let ledger = Arc::new(
        InMemoryLedger::new()
            .with_precision(AssetId::new(ASSET), precision)
            .with_balance(Address::parse(PAYER).unwrap(), balance_units),
    );
    let config = EngineConfig::new(Address::parse(PAYER).unwrap(), AssetId::new(ASSET));
    let engine = PayoutEngine::new(ledger.clone(), config);
    (ledger, engine)
}

/// Writes a `recipient, amount` payout CSV for the CLI tests.
pub fn write_payouts_csv(path: &Path, rows: &[(&str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["recipient", "amount"])?;
    for (recipient, amount) in rows {
        wtr.write_record([*recipient, *amount])?;
    }
    wtr.flush()?;
    Ok(())
}
