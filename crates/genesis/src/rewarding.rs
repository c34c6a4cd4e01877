//! Rewarding protocol parameters.

use crate::address::parse_address;
use crate::amount::{parse_amount, tokens_to_rau};
use crate::error::{ConfigResult, ValidationErrors};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Rewarding protocol configuration. Amounts are rau in decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rewarding {
    /// Initial balance of the rewarding fund
    #[serde(rename = "initBalance")]
    pub init_balance_str: String,

    /// Block reward
    #[serde(rename = "blockReward")]
    pub block_reward_str: String,

    /// Block reward from the Dardanelles height on
    #[serde(rename = "dardanellesBlockReward")]
    pub dardanelles_block_reward_str: String,

    /// Epoch reward
    #[serde(rename = "epochReward")]
    pub epoch_reward_str: String,

    /// Epoch reward from the Aleutian height on
    #[serde(rename = "aleutianEpochReward")]
    pub aleutian_epoch_reward_str: String,

    /// Number of top candidates sharing the epoch reward
    #[serde(rename = "numDelegatesForEpochReward")]
    pub num_delegates_for_epoch_reward: u64,

    /// Addresses excluded from the epoch reward
    #[serde(rename = "exemptAddrsFromEpochReward")]
    pub exempt_addr_strs_from_epoch_reward: Vec<String>,

    /// Foundation (bootstrap) bonus per epoch
    #[serde(rename = "foundationBonus")]
    pub foundation_bonus_str: String,

    /// Number of top candidates receiving the foundation bonus
    #[serde(rename = "numDelegatesForFoundationBonus")]
    pub num_delegates_for_foundation_bonus: u64,

    /// Last epoch the foundation bonus is granted
    #[serde(rename = "foundationBonusLastEpoch")]
    pub foundation_bonus_last_epoch: u64,

    /// First epoch of the second foundation bonus period
    #[serde(rename = "foundationBonusP2StartEpoch")]
    pub foundation_bonus_p2_start_epoch: u64,

    /// Last epoch of the second foundation bonus period
    #[serde(rename = "foundationBonusP2EndEpoch")]
    pub foundation_bonus_p2_end_epoch: u64,

    /// Productivity percentage a delegate must reach to avoid probation
    #[serde(rename = "productivityThreshold")]
    pub productivity_threshold: u64,
}

impl Default for Rewarding {
    fn default() -> Self {
        Self {
            init_balance_str: tokens_to_rau(200_000_000).to_string(),
            block_reward_str: tokens_to_rau(16).to_string(),
            dardanelles_block_reward_str: tokens_to_rau(8).to_string(),
            epoch_reward_str: tokens_to_rau(12_500).to_string(),
            aleutian_epoch_reward_str: tokens_to_rau(18_750).to_string(),
            num_delegates_for_epoch_reward: 100,
            exempt_addr_strs_from_epoch_reward: Vec::new(),
            foundation_bonus_str: tokens_to_rau(80).to_string(),
            num_delegates_for_foundation_bonus: 36,
            foundation_bonus_last_epoch: 8_760,
            foundation_bonus_p2_start_epoch: 9_698,
            foundation_bonus_p2_end_epoch: 18_458,
            productivity_threshold: 0,
        }
    }
}

impl Rewarding {
    /// Initial balance of the rewarding fund.
    pub fn init_balance(&self) -> ConfigResult<U256> {
        parse_amount("rewarding.initBalance", &self.init_balance_str)
    }

    /// Reward per block before the Dardanelles fork.
    pub fn block_reward(&self) -> ConfigResult<U256> {
        parse_amount("rewarding.blockReward", &self.block_reward_str)
    }

    /// Block reward after the Dardanelles fork.
    pub fn dardanelles_block_reward(&self) -> ConfigResult<U256> {
        parse_amount("rewarding.dardanellesBlockReward", &self.dardanelles_block_reward_str)
    }

    /// Reward per epoch before the Aleutian fork.
    pub fn epoch_reward(&self) -> ConfigResult<U256> {
        parse_amount("rewarding.epochReward", &self.epoch_reward_str)
    }

    /// Epoch reward after the Aleutian fork.
    pub fn aleutian_epoch_reward(&self) -> ConfigResult<U256> {
        parse_amount("rewarding.aleutianEpochReward", &self.aleutian_epoch_reward_str)
    }

    /// Foundation bonus granted per epoch.
    pub fn foundation_bonus(&self) -> ConfigResult<U256> {
        parse_amount("rewarding.foundationBonus", &self.foundation_bonus_str)
    }

    /// Addresses excluded from the epoch reward.
    pub fn exempt_addrs_from_epoch_reward(&self) -> ConfigResult<Vec<Address>> {
        self.exempt_addr_strs_from_epoch_reward
            .iter()
            .enumerate()
            .map(|(i, s)| parse_address(&format!("rewarding.exemptAddrsFromEpochReward[{i}]"), s))
            .collect()
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.check(self.init_balance());
        errors.check(self.block_reward());
        errors.check(self.dardanelles_block_reward());
        errors.check(self.epoch_reward());
        errors.check(self.aleutian_epoch_reward());
        errors.check(self.foundation_bonus());

        for (i, s) in self.exempt_addr_strs_from_epoch_reward.iter().enumerate() {
            errors.check(parse_address(
                &format!("rewarding.exemptAddrsFromEpochReward[{i}]"),
                s,
            ));
        }
    }
}
