use crate::domain::address::Address;
use crate::domain::ports::{AssetId, LedgerClientArc};

/// Result of the advisory pre-flight balance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceCheck {
    Sufficient { available: u64 },
    Insufficient { available: u64 },
    /// The balance could not be read. The transfer proceeds anyway; the
    /// ledger itself is the authority on overdrafts at submission time.
    Unknown,
}

/// Pre-flight check that the payer can cover a transfer.
///
/// Advisory only: the snapshot may be stale by submission time, and a failed
/// query fails open rather than blocking the payout. A known-short balance is
/// still a hard reject, since submitting a transfer that cannot settle only
/// wastes a ledger round trip.
pub struct BalanceGuard {
    ledger: LedgerClientArc,
}

impl BalanceGuard {
    pub fn new(ledger: LedgerClientArc) -> Self {
        Self { ledger }
    }

    pub async fn check_sufficient(
        &self,
        payer: &Address,
        asset: &AssetId,
        required_units: u64,
    ) -> BalanceCheck {
        match self.ledger.account_holdings(payer, asset).await {
            Ok(available) if available >= required_units => {
                BalanceCheck::Sufficient { available }
            }
            Ok(available) => BalanceCheck::Insufficient { available },
            Err(err) => {
                tracing::warn!(
                    payer = %payer,
                    asset = %asset,
                    error = %err,
                    "balance query unavailable, proceeding with transfer attempt"
                );
                BalanceCheck::Unknown
            }
        }
    }
}
