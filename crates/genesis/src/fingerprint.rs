//! Canonical genesis fingerprint.
//!
//! The fingerprint covers a fixed subset of the genesis tree, encoded as an
//! RLP list and hashed with Keccak256:
//!
//! ```text
//! [version,
//!  [timestamp, blockGasLimit, actionGasLimit, blockIntervalNanos,
//!   numSubEpochs, numDelegates, numCandidateDelegates, timeBasedRotation],
//!  [[address...], [balance...]],
//!  [enableGravityChainVoting, gravityChainStartHeight, registerContractAddress,
//!   stakingContractAddress, voteThreshold, scoreThreshold, selfStakingThreshold,
//!   [[operatorAddr, rewardAddr, votes]...]],
//!  [initBalance, blockReward, epochReward, numDelegatesForEpochReward,
//!   foundationBonus, numDelegatesForFoundationBonus, foundationBonusLastEpoch,
//!   productivityThreshold]]
//! ```
//!
//! Initial balances are sorted by address string. Fork heights and every field
//! added after the first release are left out, so scheduling a new fork does
//! not change the fingerprint of an existing network.

use crate::account::Account;
use crate::blockchain::Blockchain;
use crate::error::{ConfigError, ConfigResult};
use crate::genesis::Genesis;
use crate::poll::Poll;
use crate::rewarding::Rewarding;
use alloy_primitives::{keccak256, B256};
use rlp::RlpStream;
use tracing::warn;

/// Version of the canonical encoding, first item of the encoded list.
pub const GENESIS_HASH_VERSION: u8 = 1;

impl Genesis {
    /// Fingerprint of this genesis.
    ///
    /// Two nodes with different fingerprints run incompatible networks.
    pub fn hash(&self) -> B256 {
        keccak256(self.canonical_bytes())
    }

    /// Canonical encoding of the fingerprinted subset.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut stream = RlpStream::new_list(5);
        stream.append(&GENESIS_HASH_VERSION);
        append_blockchain(&mut stream, &self.blockchain);
        append_account(&mut stream, &self.account);
        append_poll(&mut stream, &self.poll);
        append_rewarding(&mut stream, &self.rewarding);
        stream.out().to_vec()
    }

    /// Checks a peer's fingerprint against ours.
    pub fn verify_peer_hash(&self, remote: B256) -> ConfigResult<()> {
        let local = self.hash();
        if local != remote {
            warn!("Peer genesis hash {} does not match local {}", remote, local);
            return Err(ConfigError::GenesisMismatch { local, remote });
        }
        Ok(())
    }
}

fn append_blockchain(stream: &mut RlpStream, chain: &Blockchain) {
    let interval_nanos = u64::try_from(chain.block_interval.as_nanos()).unwrap_or(u64::MAX);

    stream.begin_list(8);
    // two's complement, so pre-epoch timestamps stay distinct
    stream.append(&(chain.timestamp as u64));
    stream.append(&chain.block_gas_limit);
    stream.append(&chain.action_gas_limit);
    stream.append(&interval_nanos);
    stream.append(&chain.num_sub_epochs);
    stream.append(&chain.num_delegates);
    stream.append(&chain.num_candidate_delegates);
    stream.append(&chain.time_based_rotation);
}

fn append_account(stream: &mut RlpStream, account: &Account) {
    let addrs = account.sorted_addresses();

    stream.begin_list(2);
    stream.begin_list(addrs.len());
    for addr in &addrs {
        stream.append(*addr);
    }
    stream.begin_list(addrs.len());
    for addr in &addrs {
        stream.append(&account.init_balance_map[*addr]);
    }
}

fn append_poll(stream: &mut RlpStream, poll: &Poll) {
    stream.begin_list(8);
    stream.append(&poll.enable_gravity_chain_voting);
    stream.append(&poll.gravity_chain_start_height);
    stream.append(&poll.register_contract_address);
    stream.append(&poll.staking_contract_address);
    stream.append(&poll.vote_threshold);
    stream.append(&poll.score_threshold);
    stream.append(&poll.self_staking_threshold);

    stream.begin_list(poll.delegates.len());
    for delegate in &poll.delegates {
        stream.begin_list(3);
        stream.append(&delegate.operator_addr_str);
        stream.append(&delegate.reward_addr_str);
        stream.append(&delegate.votes_str);
    }
}

fn append_rewarding(stream: &mut RlpStream, rewarding: &Rewarding) {
    stream.begin_list(8);
    stream.append(&rewarding.init_balance_str);
    stream.append(&rewarding.block_reward_str);
    stream.append(&rewarding.epoch_reward_str);
    stream.append(&rewarding.num_delegates_for_epoch_reward);
    stream.append(&rewarding.foundation_bonus_str);
    stream.append(&rewarding.num_delegates_for_foundation_bonus);
    stream.append(&rewarding.foundation_bonus_last_epoch);
    stream.append(&rewarding.productivity_threshold);
}
