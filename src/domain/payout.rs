use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A single requested transfer: who gets paid and how much.
///
/// Amounts are interpreted according to the engine's unit mode. `precision`
/// overrides the ledger's per-asset precision lookup when present; it is
/// ignored in raw-unit mode.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PayoutRequest {
    pub recipient: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

impl PayoutRequest {
    pub fn new(recipient: impl Into<String>, amount: Decimal) -> Self {
        Self {
            recipient: recipient.into(),
            amount,
            precision: None,
        }
    }
}

/// The result of one payout attempt.
///
/// Exactly one of `reference` / `error` is populated, matching `success`.
/// The constructors are the only way to build one, so the invariant holds
/// for every value in circulation.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PayoutOutcome {
    pub recipient: String,
    pub amount: Decimal,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PayoutOutcome {
    pub fn settled(request: &PayoutRequest, reference: String) -> Self {
        Self {
            recipient: request.recipient.clone(),
            amount: request.amount,
            success: true,
            reference: Some(reference),
            error: None,
        }
    }

    pub fn failed(request: &PayoutRequest, reason: String) -> Self {
        Self {
            recipient: request.recipient.clone(),
            amount: request.amount,
            success: false,
            reference: None,
            error: Some(reason),
        }
    }
}

/// Ordered outcomes of one batch, one per input request, input order
/// preserved. Summary counts are derived from the outcome list on demand so
/// they can never drift from it.
#[derive(Debug, PartialEq, Clone)]
pub struct BatchResult {
    outcomes: Vec<PayoutOutcome>,
}

impl BatchResult {
    pub fn new(outcomes: Vec<PayoutOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[PayoutOutcome] {
        &self.outcomes
    }

    pub fn total_requested(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }
}

impl Serialize for BatchResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BatchResult", 4)?;
        state.serialize_field("totalRequested", &self.total_requested())?;
        state.serialize_field("successful", &self.success_count())?;
        state.serialize_field("failed", &self.failure_count())?;
        state.serialize_field("results", &self.outcomes)?;
        state.end()
    }
}
