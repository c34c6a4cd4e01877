//! Test network genesis.
//!
//! Test networks start from the production defaults with every early-era rule
//! active and a fixed set of funded identities, the first `num_delegates` of
//! which are genesis delegates.

use crate::address::format_address;
use crate::amount::tokens_to_rau;
use crate::genesis::Genesis;
use crate::poll::Delegate;
use alloy_primitives::{keccak256, Address};

/// Size of the deterministic test identity set.
pub const TEST_IDENTITY_COUNT: usize = 30;

/// Initial balance, in whole tokens, of every test identity.
pub const TEST_IDENTITY_BALANCE_TOKENS: u64 = 100_000_000;

/// Address of the `index`-th test identity.
///
/// Derived as the last 20 bytes of `keccak256("meridian-test-identity-{index}")`,
/// so it is stable across processes and platforms.
pub fn test_identity(index: usize) -> Address {
    let digest = keccak256(format!("meridian-test-identity-{index}"));
    Address::from_slice(&digest[12..])
}

/// The full test identity set, in index order.
pub fn test_identities() -> Vec<Address> {
    (0..TEST_IDENTITY_COUNT).map(test_identity).collect()
}

impl Genesis {
    /// Default genesis with the test overlay applied.
    pub fn for_tests() -> Self {
        let mut genesis = Self::default();
        genesis.apply_test_overlay(&test_identities());
        genesis
    }

    /// Funds `identities` and registers the first `num_delegates` of them as
    /// delegates with equal votes. Pacific is moved to height 0.
    ///
    /// Applying the overlay again with the same identities leaves the tree
    /// unchanged.
    pub fn apply_test_overlay(&mut self, identities: &[Address]) {
        self.blockchain.pacific_block_height = 0;

        let balance = tokens_to_rau(TEST_IDENTITY_BALANCE_TOKENS).to_string();
        let num_delegates = usize::try_from(self.blockchain.num_delegates).unwrap_or(usize::MAX);

        for (i, identity) in identities.iter().enumerate() {
            let addr = format_address(identity);
            self.account
                .init_balance_map
                .insert(addr.clone(), balance.clone());

            let registered = self
                .poll
                .delegates
                .iter()
                .any(|d| d.operator_addr_str == addr);
            if i < num_delegates && !registered {
                self.poll.delegates.push(Delegate {
                    operator_addr_str: addr.clone(),
                    reward_addr_str: addr,
                    votes_str: balance.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identities_are_distinct_and_stable() {
        let ids = test_identities();
        assert_eq!(ids.len(), TEST_IDENTITY_COUNT);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), TEST_IDENTITY_COUNT);
        assert_eq!(ids, test_identities());
        assert_eq!(ids[3], test_identity(3));
    }
}
