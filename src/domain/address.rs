use crate::error::{PayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The base-58 alphabet used by ledger account identifiers.
/// Excludes the visually ambiguous characters `0`, `O`, `I` and `l`.
const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const MIN_LEN: usize = 32;
const MAX_LEN: usize = 44;

/// Returns true if `address` is a syntactically valid ledger account
/// identifier: 32 to 44 characters drawn from the base-58 alphabet.
///
/// Purely syntactic; says nothing about whether the account exists on chain.
pub fn is_valid_address(address: &str) -> bool {
    (MIN_LEN..=MAX_LEN).contains(&address.len())
        && address.bytes().all(|b| BASE58_ALPHABET.contains(&b))
}

/// A ledger account identifier that has passed syntactic validation.
///
/// Constructed only through [`Address::parse`], so holding one is proof the
/// string was well-formed at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(address: &str) -> Result<Self> {
        if is_valid_address(address) {
            Ok(Self(address.to_string()))
        } else {
            Err(PayoutError::InvalidAddress(address.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = PayoutError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        // System-program style: 32 characters, all from the alphabet
        assert!(is_valid_address("11111111111111111111111111111111"));
        // Typical 44-character account key
        assert!(is_valid_address(
            "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T"
        ));
    }

    #[test]
    fn test_invalid_length() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("bad"));
        // 31 characters: one short
        assert!(!is_valid_address("1111111111111111111111111111111"));
        // 45 characters: one long
        assert!(!is_valid_address(&"1".repeat(45)));
    }

    #[test]
    fn test_excluded_characters() {
        // '0', 'O', 'I' and 'l' are not in the base-58 alphabet
        assert!(!is_valid_address("0000000000000000000000000000000O"));
        assert!(!is_valid_address("Il1Il1Il1Il1Il1Il1Il1Il1Il1Il1Il"));
        assert!(!is_valid_address("111111111111111111111111111111+1"));
    }

    #[test]
    fn test_parse_round_trip() {
        let addr = Address::parse("11111111111111111111111111111111").unwrap();
        assert_eq!(addr.as_str(), "11111111111111111111111111111111");

        assert!(matches!(
            Address::parse("not-an-address"),
            Err(PayoutError::InvalidAddress(_))
        ));
    }
}
