use crate::error::{PayoutError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest per-asset precision the converter supports. `10^18` is the largest
/// power of ten that still fits the minimal-unit representation.
pub const MAX_PRECISION: u32 = 18;

/// How request amounts relate to the ledger's minimal accounting unit.
///
/// Resolved once when the engine is constructed; never inferred per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitMode {
    /// Amounts are human-facing decimals and must be scaled by the asset's
    /// precision (looked up from the ledger unless the request carries one).
    ScaledByPrecision,
    /// Amounts are already expressed in minimal units; precision lookup is
    /// skipped entirely and fractional amounts are rejected.
    AlreadyMinimal,
}

/// A strictly positive payout amount.
///
/// Wraps `rust_decimal::Decimal` so unit conversion stays in scaled-integer
/// arithmetic; binary floats silently drift for pairs like (0.29, 2).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PayoutError::InvalidAmount(format!(
                "amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts this amount to minimal units: `floor(amount * 10^precision)`.
    ///
    /// Exact for precisions 0 through [`MAX_PRECISION`]; fractional remainder
    /// below the minimal unit is truncated.
    pub fn to_minimal_units(&self, precision: u32) -> Result<u64> {
        if precision > MAX_PRECISION {
            return Err(PayoutError::PrecisionLookup(format!(
                "asset precision {precision} exceeds supported maximum {MAX_PRECISION}"
            )));
        }

        let scale = Decimal::from(10u64.pow(precision));
        let scaled = self.0.checked_mul(scale).ok_or_else(|| {
            PayoutError::InvalidAmount(format!(
                "amount {} overflows at precision {precision}",
                self.0
            ))
        })?;

        scaled.trunc().to_u64().ok_or_else(|| {
            PayoutError::InvalidAmount(format!(
                "amount {} does not fit the minimal-unit range at precision {precision}",
                self.0
            ))
        })
    }

    /// Interprets this amount as a minimal-unit count directly
    /// ([`UnitMode::AlreadyMinimal`]). Fractional values are rejected rather
    /// than truncated: in raw-unit mode a fraction is a caller bug.
    pub fn as_minimal_units(&self) -> Result<u64> {
        if self.0.fract() != Decimal::ZERO {
            return Err(PayoutError::InvalidAmount(format!(
                "fractional amount {} not allowed in raw-unit mode",
                self.0
            )));
        }
        self.0.to_u64().ok_or_else(|| {
            PayoutError::InvalidAmount(format!("amount {} does not fit the minimal-unit range", self.0))
        })
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PayoutError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
