//! Decimal token amounts.
//!
//! Every monetary or vote value in the genesis tree is stored as a base-10
//! string of rau (the smallest unit of the native token). This module converts
//! those strings to [`U256`] on demand.

use crate::error::{ConfigError, ConfigResult};
use alloy_primitives::U256;

/// Number of rau in one whole token (10^18).
pub const RAU_PER_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Converts a whole-token amount into rau.
///
/// # Example
///
/// ```rust
/// use meridian_genesis::amount::tokens_to_rau;
///
/// assert_eq!(tokens_to_rau(16).to_string(), "16000000000000000000");
/// ```
pub fn tokens_to_rau(tokens: u64) -> U256 {
    U256::from(tokens) * RAU_PER_TOKEN
}

/// Parses a decimal amount string.
///
/// Only ASCII digits are accepted: no sign, no `0x` prefix, no separators and
/// no empty string. `field` names the config entry in the returned error.
pub fn parse_amount(field: &str, value: &str) -> ConfigResult<U256> {
    let invalid = || ConfigError::InvalidAmount {
        field: field.to_string(),
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    U256::from_str_radix(value, 10).map_err(|_| invalid())
}

/// Sums `amounts`, failing instead of wrapping or saturating on overflow.
pub fn checked_sum(
    field: &'static str,
    amounts: impl IntoIterator<Item = U256>,
) -> ConfigResult<U256> {
    amounts
        .into_iter()
        .try_fold(U256::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| ConfigError::InvalidParameter {
            field,
            reason: "sum exceeds 2^256 - 1".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        let value = parse_amount("rewarding.blockReward", "16000000000000000000").unwrap();
        assert_eq!(value, tokens_to_rau(16));
        assert_eq!(parse_amount("x", "0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for bad in ["", "-1", "+1", "0x10", "1_000", "1.5", " 1", "not-a-number"] {
            assert!(
                matches!(parse_amount("x", bad), Err(ConfigError::InvalidAmount { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_amount_overflow() {
        let too_big = format!("{}0", U256::MAX);
        assert!(parse_amount("x", &too_big).is_err());
        assert_eq!(parse_amount("x", &U256::MAX.to_string()).unwrap(), U256::MAX);
    }

    #[test]
    fn test_checked_sum() {
        let sum = checked_sum("x", [tokens_to_rau(1), tokens_to_rau(2)]).unwrap();
        assert_eq!(sum, tokens_to_rau(3));
        assert_eq!(checked_sum("x", []).unwrap(), U256::ZERO);
        assert_eq!(checked_sum("x", [U256::MAX, U256::ZERO]).unwrap(), U256::MAX);
    }

    #[test]
    fn test_checked_sum_overflow() {
        assert!(matches!(
            checked_sum("account.initBalances", [U256::MAX, U256::from(1u64)]),
            Err(ConfigError::InvalidParameter { field: "account.initBalances", .. })
        ));
    }

    #[test]
    fn test_error_names_field() {
        let err = parse_amount("poll.voteThreshold", "abc").unwrap_err();
        assert!(err.to_string().contains("poll.voteThreshold"));
    }
}
