//! Native staking parameters.

use crate::address::{parse_address, parse_optional_address};
use crate::amount::{parse_amount, tokens_to_rau};
use crate::error::{ConfigError, ConfigResult, ValidationErrors};
use crate::serde_helpers;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Staking protocol configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Staking {
    /// Vote weight formula constants
    #[serde(rename = "voteWeightCalConsts")]
    pub vote_weight_cal_consts: VoteWeightCalConsts,

    /// Candidate registration constants
    #[serde(rename = "registrationConsts")]
    pub registration_consts: RegistrationConsts,

    /// Delay between unstaking and withdrawal
    #[serde(rename = "withdrawWaitingPeriod", with = "serde_helpers::duration")]
    pub withdraw_waiting_period: Duration,

    /// Minimum amount of a stake bucket (rau, decimal)
    #[serde(rename = "minStakeAmount")]
    pub min_stake_amount: String,

    /// Candidates registered at genesis
    #[serde(rename = "bootstrapCandidates")]
    pub bootstrap_candidates: Vec<BootstrapCandidate>,
}

impl Default for Staking {
    fn default() -> Self {
        Self {
            vote_weight_cal_consts: VoteWeightCalConsts::default(),
            registration_consts: RegistrationConsts::default(),
            withdraw_waiting_period: Duration::from_secs(3 * 24 * 60 * 60),
            min_stake_amount: tokens_to_rau(100).to_string(),
            bootstrap_candidates: Vec::new(),
        }
    }
}

impl Staking {
    /// Fee charged for registering a candidate.
    pub fn registration_fee(&self) -> ConfigResult<U256> {
        parse_amount("staking.registrationConsts.fee", &self.registration_consts.fee)
    }

    /// Minimum self-stake of a registered candidate.
    pub fn min_self_stake(&self) -> ConfigResult<U256> {
        parse_amount(
            "staking.registrationConsts.minSelfStake",
            &self.registration_consts.min_self_stake,
        )
    }

    /// Minimum stake bucket amount.
    pub fn min_stake_amount(&self) -> ConfigResult<U256> {
        parse_amount("staking.minStakeAmount", &self.min_stake_amount)
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        self.vote_weight_cal_consts.collect_errors(errors);
        errors.check(self.registration_fee());
        errors.check(self.min_self_stake());
        errors.check(self.min_stake_amount());

        for (i, candidate) in self.bootstrap_candidates.iter().enumerate() {
            candidate.collect_errors(i, errors);
        }
    }
}

/// Constants of the vote weight formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoteWeightCalConsts {
    /// Weight of the logarithm of the stake duration
    #[serde(rename = "durationLg")]
    pub duration_lg: f64,
    /// Bonus factor for auto-staked buckets
    #[serde(rename = "autoStake")]
    pub auto_stake: f64,
    /// Bonus factor for self-staked buckets
    #[serde(rename = "selfStake")]
    pub self_stake: f64,
}

impl Default for VoteWeightCalConsts {
    fn default() -> Self {
        Self {
            duration_lg: 1.2,
            auto_stake: 1.0,
            self_stake: 1.06,
        }
    }
}

impl VoteWeightCalConsts {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        let consts = [
            ("staking.voteWeightCalConsts.durationLg", self.duration_lg),
            ("staking.voteWeightCalConsts.autoStake", self.auto_stake),
            ("staking.voteWeightCalConsts.selfStake", self.self_stake),
        ];
        for (field, value) in consts {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::InvalidFloat { field, value });
            }
        }
    }
}

/// Candidate registration constants (rau, decimal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationConsts {
    /// Registration fee (rau, decimal)
    #[serde(rename = "fee")]
    pub fee: String,
    /// Minimum self-stake of a candidate (rau, decimal)
    #[serde(rename = "minSelfStake")]
    pub min_self_stake: String,
}

impl Default for RegistrationConsts {
    fn default() -> Self {
        Self {
            fee: tokens_to_rau(100).to_string(),
            min_self_stake: tokens_to_rau(1_200_000).to_string(),
        }
    }
}

// =============================================================================
// Bootstrap Candidate
// =============================================================================

/// A staking candidate created at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BootstrapCandidate {
    /// Owner of the candidate
    #[serde(rename = "ownerAddress")]
    pub owner_address: String,
    /// Address operating the candidate node
    #[serde(rename = "operatorAddress")]
    pub operator_address: String,
    /// May be empty
    #[serde(rename = "rewardAddress", default)]
    pub reward_address: String,
    /// Candidate name, must not be empty
    #[serde(rename = "name")]
    pub name: String,
    /// Self-staked amount (rau, decimal)
    #[serde(rename = "selfStakingTokens")]
    pub self_staking_tokens: String,
}

impl BootstrapCandidate {
    /// Owner of the candidate.
    pub fn owner_address(&self) -> ConfigResult<Address> {
        parse_address("staking.bootstrapCandidates.ownerAddress", &self.owner_address)
    }

    /// Operator of the candidate.
    pub fn operator_address(&self) -> ConfigResult<Address> {
        parse_address(
            "staking.bootstrapCandidates.operatorAddress",
            &self.operator_address,
        )
    }

    /// Reward recipient, `None` when unset.
    pub fn reward_address(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address(
            "staking.bootstrapCandidates.rewardAddress",
            &self.reward_address,
        )
    }

    /// Amount the candidate stakes on itself.
    pub fn self_staking_tokens(&self) -> ConfigResult<U256> {
        parse_amount(
            "staking.bootstrapCandidates.selfStakingTokens",
            &self.self_staking_tokens,
        )
    }

    fn collect_errors(&self, index: usize, errors: &mut ValidationErrors) {
        let field = |name: &str| format!("staking.bootstrapCandidates[{index}].{name}");
        errors.check(parse_address(&field("ownerAddress"), &self.owner_address));
        errors.check(parse_address(&field("operatorAddress"), &self.operator_address));
        errors.check(parse_optional_address(&field("rewardAddress"), &self.reward_address));
        errors.check(parse_amount(&field("selfStakingTokens"), &self.self_staking_tokens));

        if self.name.is_empty() {
            errors.push(ConfigError::InvalidParameter {
                field: "staking.bootstrapCandidates.name",
                reason: format!("candidate {index} has an empty name"),
            });
        }
    }
}
