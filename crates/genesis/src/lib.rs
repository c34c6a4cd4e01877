//! # Meridian Genesis
//!
//! This crate holds the network-wide genesis configuration of a Meridian chain:
//! the parameter set every node must share bit for bit, the block heights at
//! which protocol upgrades activate, and the fingerprint nodes compare to make
//! sure they agree on both.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meridian_genesis::{Fork, Genesis, GenesisClock};
//!
//! // Production defaults, optionally overridden by a TOML/JSON overlay
//! let genesis = Genesis::load("genesis.toml")?;
//!
//! // Fork gates are evaluated on every block and action
//! if genesis.blockchain.is_okhotsk(height) { /* London EVM */ }
//! assert!(genesis.blockchain.is_active(Fork::Pacific, height));
//!
//! // Economic parameters are stored as decimal strings and parsed on demand
//! let reward = genesis.rewarding.block_reward()?;
//!
//! // Peers must present the same fingerprint
//! genesis.verify_peer_hash(remote_hash)?;
//!
//! // Share the genesis time with subsystems that do not need the full tree
//! let clock = GenesisClock::from_genesis(&genesis);
//! ```
//!
//! ## Sections
//!
//! - `blockchain` - Gas limits, block interval, epochs and the fork schedule
//! - `account` - Initial balances
//! - `poll` - Delegate selection and genesis delegates
//! - `rewarding` - Block, epoch and foundation rewards
//! - `staking` - Vote weights, registration and bootstrap candidates

#![warn(missing_docs)]

mod account;
mod blockchain;
mod clock;
mod error;
mod fingerprint;
mod genesis;
mod loader;
mod poll;
mod rewarding;
mod serde_helpers;
mod staking;

/// Address string parsing and formatting
pub mod address;
/// Decimal rau amounts
pub mod amount;
/// Test network identities and overlay
pub mod testnet;

pub use account::*;
pub use blockchain::*;
pub use clock::*;
pub use error::*;
pub use fingerprint::GENESIS_HASH_VERSION;
pub use genesis::*;
pub use poll::*;
pub use rewarding::*;
pub use staking::*;

/// Re-export alloy primitives for convenience
pub use alloy_primitives::{Address, B256, U256};
