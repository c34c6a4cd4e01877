//! Address strings in the genesis tree.
//!
//! Addresses are written as `0x` followed by 40 hex digits. Mixed case is
//! accepted; the checksum is not enforced.

use crate::error::{ConfigError, ConfigResult};
use alloy_primitives::Address;

const ADDRESS_HEX_LEN: usize = 40;

/// Decodes an address string. `field` names the config entry in the error.
pub fn parse_address(field: &str, value: &str) -> ConfigResult<Address> {
    let invalid = || ConfigError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    };

    // alloy also accepts a missing prefix; genesis files must carry it
    let prefixed = value
        .strip_prefix("0x")
        .is_some_and(|digits| digits.len() == ADDRESS_HEX_LEN);
    if !prefixed {
        return Err(invalid());
    }

    value.parse::<Address>().map_err(|_| invalid())
}

/// Like [`parse_address`], but an empty string means "no address".
pub fn parse_optional_address(field: &str, value: &str) -> ConfigResult<Option<Address>> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_address(field, value).map(Some)
}

/// Lowercase `0x`-prefixed form used as the canonical string encoding.
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}
