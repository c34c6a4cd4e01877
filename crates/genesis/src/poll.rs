//! Delegate selection (poll protocol) parameters.

use crate::address::{parse_address, parse_optional_address};
use crate::amount::{checked_sum, parse_amount};
use crate::error::{ConfigError, ConfigResult, ValidationErrors};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Source of the delegate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PollMode {
    /// Fixed delegate list for the lifetime of the chain
    LifeLong,
    /// Gravity chain votes mixed with governance
    GovernanceMix,
    /// Gravity chain votes mixed with native staking
    NativeMix,
    /// Delegates elected by a consortium committee contract
    Consortium,
}

/// Poll protocol configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Poll {
    /// How the delegate set is selected
    #[serde(rename = "pollMode")]
    pub poll_mode: PollMode,

    /// Read votes from the gravity chain
    #[serde(rename = "enableGravityChainVoting")]
    pub enable_gravity_chain_voting: bool,

    /// Gravity chain height holding the initial poll result
    #[serde(rename = "gravityChainStartHeight")]
    pub gravity_chain_start_height: u64,

    /// Gravity chain height after which the poll is no longer needed
    #[serde(rename = "gravityChainCeilingHeight")]
    pub gravity_chain_ceiling_height: u64,

    /// Gravity chain height interval between delegate pulls
    #[serde(rename = "gravityChainHeightInterval")]
    pub gravity_chain_height_interval: u64,

    /// Register contract address (may be empty)
    #[serde(rename = "registerContractAddress")]
    pub register_contract_address: String,

    /// Staking contract address (may be empty)
    #[serde(rename = "stakingContractAddress")]
    pub staking_contract_address: String,

    /// Native staking contract address (may be empty)
    #[serde(rename = "nativeStakingContractAddress")]
    pub native_staking_contract_address: String,

    /// Native staking contract bytecode, hex encoded
    #[serde(rename = "nativeStakingContractCode")]
    pub native_staking_contract_code: String,

    /// Consortium committee contract bytecode, hex encoded
    #[serde(rename = "consortiumCommitteeContractCode")]
    pub consortium_committee_contract_code: String,

    /// Minimum votes (rau, decimal)
    #[serde(rename = "voteThreshold")]
    pub vote_threshold: String,

    /// Minimum score (decimal)
    #[serde(rename = "scoreThreshold")]
    pub score_threshold: String,

    /// Minimum self-staking votes (rau, decimal)
    #[serde(rename = "selfStakingThreshold")]
    pub self_staking_threshold: String,

    /// Genesis delegates with votes
    #[serde(rename = "delegates")]
    pub delegates: Vec<Delegate>,

    /// Probation length in epochs once productivity drops below threshold
    #[serde(rename = "probationEpochPeriod")]
    pub probation_epoch_period: u64,

    /// Probation intensity in [0, 100], 100 being hard probation
    #[serde(rename = "probationIntensityRate")]
    pub probation_intensity_rate: u32,

    /// Max cached unproductive delegate records (>= probation epoch period)
    #[serde(rename = "unproductiveDelegateMaxCacheSize")]
    pub unproductive_delegate_max_cache_size: u64,

    /// System staking contract address
    #[serde(rename = "systemStakingContractAddress")]
    pub system_staking_contract_address: String,

    /// Height the system staking contract was deployed at
    #[serde(rename = "systemStakingContractHeight")]
    pub system_staking_contract_height: u64,

    /// System SGD contract address (may be empty)
    #[serde(rename = "systemSGDContractAddress")]
    pub system_sgd_contract_address: String,

    /// Height the system SGD contract was deployed at
    #[serde(rename = "systemSGDContractHeight")]
    pub system_sgd_contract_height: u64,
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            poll_mode: PollMode::NativeMix,
            enable_gravity_chain_voting: true,
            gravity_chain_start_height: 0,
            gravity_chain_ceiling_height: 10_199_000,
            gravity_chain_height_interval: 0,
            register_contract_address: String::new(),
            staking_contract_address: String::new(),
            native_staking_contract_address: String::new(),
            native_staking_contract_code: String::new(),
            consortium_committee_contract_code: String::new(),
            vote_threshold: "0".to_string(),
            score_threshold: "0".to_string(),
            self_staking_threshold: "0".to_string(),
            delegates: Vec::new(),
            probation_epoch_period: 6,
            probation_intensity_rate: 90,
            unproductive_delegate_max_cache_size: 20,
            system_staking_contract_address: "0x68db92a6a78a39dcaff1745da9e89e230ef49d3d"
                .to_string(),
            system_staking_contract_height: 24_486_464,
            system_sgd_contract_address: String::new(),
            system_sgd_contract_height: 0,
        }
    }
}

impl Poll {
    /// Minimum votes for a candidate to be ranked.
    pub fn vote_threshold(&self) -> ConfigResult<U256> {
        parse_amount("poll.voteThreshold", &self.vote_threshold)
    }

    /// Minimum score for a candidate to become a delegate.
    pub fn score_threshold(&self) -> ConfigResult<U256> {
        parse_amount("poll.scoreThreshold", &self.score_threshold)
    }

    /// Minimum self-stake of a delegate.
    pub fn self_staking_threshold(&self) -> ConfigResult<U256> {
        parse_amount("poll.selfStakingThreshold", &self.self_staking_threshold)
    }

    /// Gravity chain register contract, `None` if unset.
    pub fn register_contract_address(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address("poll.registerContractAddress", &self.register_contract_address)
    }

    /// Gravity chain staking contract, `None` if unset.
    pub fn staking_contract_address(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address("poll.stakingContractAddress", &self.staking_contract_address)
    }

    /// Native staking contract, `None` if unset.
    pub fn native_staking_contract_address(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address(
            "poll.nativeStakingContractAddress",
            &self.native_staking_contract_address,
        )
    }

    /// System staking contract, `None` if unset.
    pub fn system_staking_contract_address(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address(
            "poll.systemStakingContractAddress",
            &self.system_staking_contract_address,
        )
    }

    /// System SGD contract, `None` if unset.
    pub fn system_sgd_contract_address(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address("poll.systemSGDContractAddress", &self.system_sgd_contract_address)
    }

    /// Decoded native staking contract bytecode (empty if unset).
    pub fn native_staking_contract_code(&self) -> ConfigResult<Vec<u8>> {
        decode_code("poll.nativeStakingContractCode", &self.native_staking_contract_code)
    }

    /// Decoded consortium committee contract bytecode (empty if unset).
    pub fn consortium_committee_contract_code(&self) -> ConfigResult<Vec<u8>> {
        decode_code(
            "poll.consortiumCommitteeContractCode",
            &self.consortium_committee_contract_code,
        )
    }

    /// Sum of the votes of all genesis delegates.
    ///
    /// Fails with [`ConfigError::InvalidParameter`] if the sum overflows.
    pub fn total_delegate_votes(&self) -> ConfigResult<U256> {
        let votes = self
            .delegates
            .iter()
            .map(Delegate::votes)
            .collect::<ConfigResult<Vec<U256>>>()?;
        checked_sum("poll.delegates.votes", votes)
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.check(self.vote_threshold());
        errors.check(self.score_threshold());
        errors.check(self.self_staking_threshold());
        errors.check(self.register_contract_address());
        errors.check(self.staking_contract_address());
        errors.check(self.native_staking_contract_address());
        errors.check(self.system_staking_contract_address());
        errors.check(self.system_sgd_contract_address());
        errors.check(self.native_staking_contract_code());
        errors.check(self.consortium_committee_contract_code());

        for (i, delegate) in self.delegates.iter().enumerate() {
            delegate.collect_errors(i, errors);
        }
        if self.delegates.iter().all(|d| d.votes().is_ok()) {
            errors.check(self.total_delegate_votes());
        }

        if self.probation_intensity_rate > 100 {
            errors.push(ConfigError::InvalidParameter {
                field: "poll.probationIntensityRate",
                reason: format!("must be <= 100, got {}", self.probation_intensity_rate),
            });
        }
        if self.probation_epoch_period > self.unproductive_delegate_max_cache_size {
            errors.push(ConfigError::InvalidParameter {
                field: "poll.probationEpochPeriod",
                reason: format!(
                    "{} exceeds unproductive delegate cache size {}",
                    self.probation_epoch_period, self.unproductive_delegate_max_cache_size
                ),
            });
        }
    }
}

fn decode_code(field: &str, code: &str) -> ConfigResult<Vec<u8>> {
    let digits = code.strip_prefix("0x").unwrap_or(code);
    hex::decode(digits).map_err(|_| ConfigError::InvalidHex {
        field: field.to_string(),
    })
}

// =============================================================================
// Delegate
// =============================================================================

/// A genesis delegate with its votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Delegate {
    /// Address operating the node
    #[serde(rename = "operatorAddr")]
    pub operator_addr_str: String,

    /// Address receiving block rewards; empty means no rewardee
    #[serde(rename = "rewardAddr", default)]
    pub reward_addr_str: String,

    /// Votes (rau, decimal), used for ranking and epoch reward split
    #[serde(rename = "votes")]
    pub votes_str: String,
}

impl Delegate {
    /// Address operating the delegate node.
    pub fn operator_addr(&self) -> ConfigResult<Address> {
        parse_address("poll.delegates.operatorAddr", &self.operator_addr_str)
    }

    /// Reward recipient, `None` when the delegate has no rewardee.
    pub fn reward_addr(&self) -> ConfigResult<Option<Address>> {
        parse_optional_address("poll.delegates.rewardAddr", &self.reward_addr_str)
    }

    /// Votes of the delegate.
    pub fn votes(&self) -> ConfigResult<U256> {
        parse_amount("poll.delegates.votes", &self.votes_str)
    }

    fn collect_errors(&self, index: usize, errors: &mut ValidationErrors) {
        let field = |name: &str| format!("poll.delegates[{index}].{name}");
        errors.check(parse_address(&field("operatorAddr"), &self.operator_addr_str));
        errors.check(parse_optional_address(&field("rewardAddr"), &self.reward_addr_str));
        errors.check(parse_amount(&field("votes"), &self.votes_str));
    }
}
