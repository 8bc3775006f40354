use crate::domain::address::Address;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifies an asset (token / mint) on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to an asset-holding account, as resolved by the ledger
/// client. The engine never inspects it, only passes it back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountHandle(String);

impl AccountHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque ledger confirmation that a transfer was recorded
/// (e.g. a transaction signature).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReference(String);

impl SettlementReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettlementReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The engine's window onto the external ledger.
///
/// Implementations own the connection and the payer's signing identity
/// (submission is signed inside the client, not by the engine). Every method
/// is a network boundary and may fail; the engine maps each failure to the
/// step it occurred in.
///
/// Expected failure kinds per method:
/// - `asset_precision`: `PrecisionLookup` when the asset is unknown or the
///   lookup cannot complete.
/// - `account_holdings`: `QueryUnavailable` when the balance cannot be read.
/// - `resolve_holding_account`: `AccountSetup` when the holding account can
///   neither be found nor created.
/// - `submit_transfer`: `Settlement` carrying the ledger's error text
///   verbatim.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Number of decimal places of the asset's minimal unit.
    async fn asset_precision(&self, asset: &AssetId) -> Result<u32>;

    /// Current holdings of `owner` for `asset`, in minimal units.
    /// Advisory: the value may be stale by the time a transfer is submitted.
    async fn account_holdings(&self, owner: &Address, asset: &AssetId) -> Result<u64>;

    /// Finds or creates the asset-holding account for `owner`.
    async fn resolve_holding_account(
        &self,
        owner: &Address,
        asset: &AssetId,
    ) -> Result<AccountHandle>;

    /// Submits a transfer and waits for settlement confirmation.
    async fn submit_transfer(
        &self,
        from: &AccountHandle,
        to: &AccountHandle,
        asset: &AssetId,
        minimal_units: u64,
    ) -> Result<SettlementReference>;
}

pub type LedgerClientArc = Arc<dyn LedgerClient>;
