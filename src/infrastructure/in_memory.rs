use crate::domain::address::Address;
use crate::domain::ports::{AccountHandle, AssetId, LedgerClient, SettlementReference};
use crate::error::{PayoutError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// One transfer accepted by the simulated ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedTransfer {
    pub from: AccountHandle,
    pub to: AccountHandle,
    pub asset: AssetId,
    pub minimal_units: u64,
    pub reference: SettlementReference,
}

#[derive(Default)]
struct LedgerState {
    precisions: HashMap<AssetId, u32>,
    balances: HashMap<Address, u64>,
    accounts: HashMap<AccountHandle, Address>,
    submissions: Vec<SubmittedTransfer>,
    next_sequence: u64,
    balance_query_unavailable: bool,
    failing_recipients: HashSet<Address>,
    unresolvable_owners: HashSet<Address>,
}

/// A simulated ledger backing the CLI's dry-run mode and the test suites.
///
/// Keeps one balance per owner (assets share it, which is enough for a
/// simulation), hands out deterministic settlement references, and enforces
/// overdraft rejection at submission time exactly like the real ledger would.
/// Failure injection hooks let tests exercise the engine's outage and
/// rejection paths.
///
/// The lock is never held across an await point.
#[derive(Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(self, asset: AssetId, precision: u32) -> Self {
        self.state.write().unwrap().precisions.insert(asset, precision);
        self
    }

    pub fn with_balance(self, owner: Address, minimal_units: u64) -> Self {
        self.state.write().unwrap().balances.insert(owner, minimal_units);
        self
    }

    /// Makes every subsequent balance query fail with `QueryUnavailable`.
    pub fn set_balance_query_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().balance_query_unavailable = unavailable;
    }

    /// Makes submissions crediting `recipient` fail with `Settlement`.
    pub fn fail_submissions_to(&self, recipient: Address) {
        self.state.write().unwrap().failing_recipients.insert(recipient);
    }

    /// Makes holding-account resolution for `owner` fail with `AccountSetup`.
    pub fn fail_account_setup_for(&self, owner: Address) {
        self.state.write().unwrap().unresolvable_owners.insert(owner);
    }

    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.state
            .read()
            .unwrap()
            .balances
            .get(owner)
            .copied()
            .unwrap_or(0)
    }

    pub fn submissions(&self) -> Vec<SubmittedTransfer> {
        self.state.read().unwrap().submissions.clone()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn asset_precision(&self, asset: &AssetId) -> Result<u32> {
        self.state
            .read()
            .unwrap()
            .precisions
            .get(asset)
            .copied()
            .ok_or_else(|| PayoutError::PrecisionLookup(format!("asset {asset} not found")))
    }

    async fn account_holdings(&self, owner: &Address, _asset: &AssetId) -> Result<u64> {
        let state = self.state.read().unwrap();
        if state.balance_query_unavailable {
            return Err(PayoutError::QueryUnavailable(
                "simulated balance query outage".to_string(),
            ));
        }
        // An owner with no holdings yet simply has a zero balance.
        Ok(state.balances.get(owner).copied().unwrap_or(0))
    }

    async fn resolve_holding_account(
        &self,
        owner: &Address,
        asset: &AssetId,
    ) -> Result<AccountHandle> {
        let mut state = self.state.write().unwrap();
        if state.unresolvable_owners.contains(owner) {
            return Err(PayoutError::AccountSetup(format!(
                "could not resolve holding account for {owner}"
            )));
        }
        let handle = AccountHandle::new(format!("{owner}:{asset}"));
        state.accounts.insert(handle.clone(), owner.clone());
        Ok(handle)
    }

    async fn submit_transfer(
        &self,
        from: &AccountHandle,
        to: &AccountHandle,
        asset: &AssetId,
        minimal_units: u64,
    ) -> Result<SettlementReference> {
        let mut state = self.state.write().unwrap();

        let payer = state
            .accounts
            .get(from)
            .cloned()
            .ok_or_else(|| PayoutError::Settlement(format!("unknown source account {}", from.as_str())))?;
        let recipient = state
            .accounts
            .get(to)
            .cloned()
            .ok_or_else(|| PayoutError::Settlement(format!("unknown target account {}", to.as_str())))?;

        if state.failing_recipients.contains(&recipient) {
            return Err(PayoutError::Settlement(format!(
                "simulated settlement failure for {recipient}"
            )));
        }

        // The authoritative overdraft check; the engine's balance guard is
        // only advisory.
        let available = state.balances.get(&payer).copied().unwrap_or(0);
        if available < minimal_units {
            return Err(PayoutError::Settlement(format!(
                "transfer would overdraw account: available {available}, required {minimal_units}"
            )));
        }

        state.next_sequence += 1;
        let reference = SettlementReference::new(format!("sim-{:016x}", state.next_sequence));

        *state.balances.entry(payer).or_insert(0) -= minimal_units;
        *state.balances.entry(recipient).or_insert(0) += minimal_units;
        state.submissions.push(SubmittedTransfer {
            from: from.clone(),
            to: to.clone(),
            asset: asset.clone(),
            minimal_units,
            reference: reference.clone(),
        });

        Ok(reference)
    }
}
