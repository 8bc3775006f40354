use crate::application::balance::{BalanceCheck, BalanceGuard};
use crate::domain::address::Address;
use crate::domain::amount::{Amount, UnitMode};
use crate::domain::payout::{BatchResult, PayoutOutcome, PayoutRequest};
use crate::domain::ports::{AssetId, LedgerClientArc, SettlementReference};
use crate::error::{PayoutError, Result};

/// Production bound on the number of transfers per batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Engine configuration, resolved once at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The custodial account payouts are drawn from.
    pub payer: Address,
    /// The asset being disbursed.
    pub asset: AssetId,
    pub unit_mode: UnitMode,
    pub max_batch_size: usize,
}

impl EngineConfig {
    pub fn new(payer: Address, asset: AssetId) -> Self {
        Self {
            payer,
            asset,
            unit_mode: UnitMode::ScaledByPrecision,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    pub fn with_unit_mode(mut self, unit_mode: UnitMode) -> Self {
        self.unit_mode = unit_mode;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}

/// The payout engine: validates, converts, guards and submits transfers
/// against an injected [`crate::domain::ports::LedgerClient`].
///
/// Batches run strictly sequentially. The payer account carries a single
/// on-ledger sequencing cursor, so concurrent submissions from the same payer
/// would race on it; one in-flight transfer at a time sidesteps that. The
/// engine does not serialize *across* concurrent batch invocations against
/// the same payer; callers that run batches in parallel must put a
/// single-writer queue in front of the payer account.
pub struct PayoutEngine {
    ledger: LedgerClientArc,
    guard: BalanceGuard,
    config: EngineConfig,
}

impl PayoutEngine {
    pub fn new(ledger: LedgerClientArc, config: EngineConfig) -> Self {
        Self {
            guard: BalanceGuard::new(ledger.clone()),
            ledger,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Executes one payout end to end.
    ///
    /// Failure points, in order: address validation, amount validation,
    /// precision resolution, balance guard, account resolution, submission.
    /// A failure at any step is final for this request; retry policy belongs
    /// to the caller.
    pub async fn execute_single(&self, request: &PayoutRequest) -> Result<SettlementReference> {
        tracing::info!(
            recipient = %request.recipient,
            amount = %request.amount,
            "starting payout"
        );

        let recipient = Address::parse(&request.recipient)?;
        let amount = Amount::new(request.amount)?;
        let units = self.resolve_minimal_units(&amount, request.precision).await?;

        match self
            .guard
            .check_sufficient(&self.config.payer, &self.config.asset, units)
            .await
        {
            BalanceCheck::Insufficient { available } => {
                return Err(PayoutError::InsufficientFunds {
                    available,
                    required: units,
                });
            }
            // Fail-open: an unreadable balance does not block the payout.
            BalanceCheck::Sufficient { .. } | BalanceCheck::Unknown => {}
        }

        let from = self
            .ledger
            .resolve_holding_account(&self.config.payer, &self.config.asset)
            .await?;
        let to = self
            .ledger
            .resolve_holding_account(&recipient, &self.config.asset)
            .await?;

        let reference = self
            .ledger
            .submit_transfer(&from, &to, &self.config.asset, units)
            .await?;

        tracing::info!(
            reference = %reference,
            recipient = %recipient,
            amount = %amount,
            "payout settled"
        );
        Ok(reference)
    }

    /// Executes a batch of payouts strictly sequentially, one outcome per
    /// request, input order preserved.
    ///
    /// A failed request is converted into its outcome and never aborts the
    /// remaining requests. The call itself only fails on a batch-size bound
    /// violation, before any request is touched.
    pub async fn execute_batch(&self, requests: &[PayoutRequest]) -> Result<BatchResult> {
        if requests.is_empty() || requests.len() > self.config.max_batch_size {
            return Err(PayoutError::BatchSize {
                given: requests.len(),
                max: self.config.max_batch_size,
            });
        }

        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            match self.execute_single(request).await {
                Ok(reference) => {
                    outcomes.push(PayoutOutcome::settled(request, reference.to_string()));
                }
                Err(err) => {
                    tracing::error!(
                        recipient = %request.recipient,
                        amount = %request.amount,
                        error = %err,
                        "payout failed"
                    );
                    outcomes.push(PayoutOutcome::failed(request, err.to_string()));
                }
            }
        }

        let result = BatchResult::new(outcomes);
        tracing::info!(
            total = result.total_requested(),
            successful = result.success_count(),
            failed = result.failure_count(),
            "batch payout completed"
        );
        Ok(result)
    }

    /// Converts the request amount to minimal units according to the unit
    /// mode. In scaled mode the asset precision comes from the request when
    /// it carries one, otherwise from a ledger lookup; a failed lookup is a
    /// hard error, never a silent default.
    async fn resolve_minimal_units(&self, amount: &Amount, precision: Option<u32>) -> Result<u64> {
        let units = match self.config.unit_mode {
            UnitMode::AlreadyMinimal => amount.as_minimal_units()?,
            UnitMode::ScaledByPrecision => {
                let precision = match precision {
                    Some(p) => p,
                    None => self.ledger.asset_precision(&self.config.asset).await?,
                };
                amount.to_minimal_units(precision)?
            }
        };

        // A positive amount can still floor to zero units; transferring
        // nothing is a caller bug, not a payout.
        if units == 0 {
            return Err(PayoutError::InvalidAmount(format!(
                "amount {amount} is below one minimal unit"
            )));
        }
        Ok(units)
    }
}
