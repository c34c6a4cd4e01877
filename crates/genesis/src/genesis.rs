//! The genesis configuration root.
//!
//! Genesis is the network-wide chain configuration. Every node taking part in
//! the same network must use exactly the same genesis; [`Genesis::hash`] is
//! how nodes check that they do.

use crate::account::Account;
use crate::blockchain::Blockchain;
use crate::error::{ConfigError, ConfigResult, ValidationErrors};
use crate::poll::Poll;
use crate::rewarding::Rewarding;
use crate::staking::Staking;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Root of the genesis configuration.
///
/// [`Genesis::default`] holds the production parameters. Use
/// [`Genesis::load`](crate::Genesis::load) to apply an overlay file and
/// [`Genesis::for_tests`](crate::Genesis::for_tests) for test networks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Genesis {
    /// Blockchain parameters and the fork schedule
    pub blockchain: Blockchain,

    /// Initial account balances
    pub account: Account,

    /// Delegate selection parameters
    pub poll: Poll,

    /// Reward amounts and eligibility
    pub rewarding: Rewarding,

    /// Native staking parameters
    pub staking: Staking,
}

impl Genesis {
    /// Validate every derived value in the tree.
    ///
    /// Parses each amount and address string once and checks structural
    /// limits, collecting all defects into a single
    /// [`ConfigError::Invalid`]. A tree that passes never returns an error
    /// from its accessors.
    pub fn validate(&self) -> ConfigResult<()> {
        debug!("Validating genesis configuration");

        let mut errors = ValidationErrors::default();
        self.blockchain.collect_errors(&mut errors);
        self.account.collect_errors(&mut errors);
        self.poll.collect_errors(&mut errors);
        self.rewarding.collect_errors(&mut errors);
        self.staking.collect_errors(&mut errors);

        if !errors.is_empty() {
            for defect in errors.iter() {
                error!("Genesis defect: {}", defect);
            }
            return Err(ConfigError::Invalid(errors));
        }

        debug!(
            "Genesis validation passed: {} initial balances, {} delegates, {} bootstrap candidates",
            self.account.init_balance_map.len(),
            self.poll.delegates.len(),
            self.staking.bootstrap_candidates.len()
        );
        Ok(())
    }
}
