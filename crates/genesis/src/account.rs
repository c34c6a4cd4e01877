//! Initial account balances.

use crate::address::{format_address, parse_address};
use crate::amount::{checked_sum, parse_amount};
use crate::error::{ConfigError, ConfigResult, ValidationErrors};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Account protocol configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Account {
    /// Address to initial balance (rau, decimal) before the first block.
    ///
    /// Iteration order is unspecified; every consumer sorts the keys.
    #[serde(rename = "initBalances")]
    pub init_balance_map: HashMap<String, String>,
}

impl Account {
    /// Address strings of the initial balance map in ascending order.
    pub fn sorted_addresses(&self) -> Vec<&String> {
        let mut addrs: Vec<&String> = self.init_balance_map.keys().collect();
        addrs.sort();
        addrs
    }

    /// Accounts with an initial balance and their amounts.
    ///
    /// Both vectors have the same length and are ordered by ascending address
    /// string; `amounts[i]` is the balance of `addresses[i]`.
    pub fn init_balances(&self) -> ConfigResult<(Vec<Address>, Vec<U256>)> {
        let sorted = self.sorted_addresses();
        let mut addrs = Vec::with_capacity(sorted.len());
        let mut amounts = Vec::with_capacity(sorted.len());

        for addr_str in sorted {
            let field = format!("account.initBalances[{addr_str}]");
            addrs.push(parse_address(&field, addr_str)?);
            amounts.push(parse_amount(&field, &self.init_balance_map[addr_str])?);
        }

        Ok((addrs, amounts))
    }

    /// Sum of all initial balances.
    ///
    /// Fails with [`ConfigError::InvalidParameter`] if the sum overflows.
    pub fn total_init_balance(&self) -> ConfigResult<U256> {
        let (_, amounts) = self.init_balances()?;
        checked_sum("account.initBalances", amounts)
    }

    /// Inserts an initial balance keyed by the canonical address string.
    pub fn set_init_balance(&mut self, address: &Address, amount: U256) {
        self.init_balance_map
            .insert(format_address(address), amount.to_string());
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        let mut seen = HashSet::new();
        for addr_str in self.sorted_addresses() {
            let field = format!("account.initBalances[{addr_str}]");
            errors.check(parse_address(&field, addr_str));
            errors.check(parse_amount(&field, &self.init_balance_map[addr_str]));

            if !seen.insert(addr_str.to_lowercase()) {
                errors.push(ConfigError::DuplicateAccount(addr_str.clone()));
            }
        }

        // entry defects are reported above
        if let Ok((_, amounts)) = self.init_balances() {
            errors.check(checked_sum("account.initBalances", amounts));
        }
    }
}
