//! Blockchain-level genesis parameters and the fork activation schedule.
//!
//! Every protocol upgrade is gated by a block height stored in [`Blockchain`].
//! A fork is active at `height` iff `height >= activation_height`; gates are
//! independent of each other and the order of their heights is a deployment
//! convention that is not enforced here.
//!
//! # Example
//!
//! ```rust
//! use meridian_genesis::{Blockchain, Fork};
//!
//! let chain = Blockchain::default();
//! assert!(!chain.is_pacific(432_000));
//! assert!(chain.is_pacific(432_001));
//! assert!(chain.is_active(Fork::Pacific, 432_001));
//! assert!(!chain.is_to_be_enabled(u64::MAX - 1));
//! ```

use crate::error::{ConfigError, ValidationErrors};
use crate::serde_helpers;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Height used for forks that are not scheduled yet.
pub const UNSCHEDULED_HEIGHT: u64 = u64::MAX;

/// Blockchain level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blockchain {
    /// Unix timestamp (seconds) of the genesis block
    #[serde(rename = "timestamp")]
    pub timestamp: i64,

    /// Total gas that may be consumed in a block
    #[serde(rename = "blockGasLimit")]
    pub block_gas_limit: u64,

    /// Per action gas limit cap
    #[serde(rename = "actionGasLimit")]
    pub action_gas_limit: u64,

    /// Interval between two blocks
    #[serde(rename = "blockInterval", with = "serde_helpers::duration")]
    pub block_interval: Duration,

    /// Number of sub epochs in one epoch of block production
    #[serde(rename = "numSubEpochs")]
    pub num_sub_epochs: u64,

    /// Number of sub epochs per epoch from the Dardanelles height on
    #[serde(rename = "dardanellesNumSubEpochs")]
    pub dardanelles_num_sub_epochs: u64,

    /// Number of delegates producing blocks in one epoch
    #[serde(rename = "numDelegates")]
    pub num_delegates: u64,

    /// Number of candidates that may be selected as delegates
    #[serde(rename = "numCandidateDelegates")]
    pub num_candidate_delegates: u64,

    /// Rotate delegates' time slots on block height
    #[serde(rename = "timeBasedRotation")]
    pub time_based_rotation: bool,

    /// Pacific: first protocol revision after launch
    #[serde(rename = "pacificHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub pacific_block_height: u64,

    /// Aleutian: bloom filter of all events in the block header
    #[serde(rename = "aleutianHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub aleutian_block_height: u64,

    /// Bering: EVM upgrade
    #[serde(rename = "beringHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub bering_block_height: u64,

    /// Cook: native staking
    #[serde(rename = "cookHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub cook_block_height: u64,

    /// Dardanelles: 5s block interval
    #[serde(rename = "dardanellesHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub dardanelles_block_height: u64,

    /// Daytona: gas fix for reading the native staking contract
    #[serde(rename = "daytonaBlockHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub daytona_block_height: u64,

    /// Easter: probation for slashing
    #[serde(rename = "easterHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub easter_block_height: u64,

    /// Migration window ahead of Fairbank
    #[serde(rename = "fbkMigrationHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub fbk_migration_block_height: u64,

    /// Fairbank: native staking v2
    #[serde(rename = "fairbankHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub fairbank_block_height: u64,

    /// Greenland: recent block meta and rewarding/staking bucket pool in state
    #[serde(rename = "greenlandHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub greenland_block_height: u64,

    /// Hawaii: EVM block hash, revert messages and staking fixes
    #[serde(rename = "hawaiiHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub hawaii_block_height: u64,

    /// Iceland: chainID opcode and EVM Istanbul
    #[serde(rename = "icelandHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub iceland_block_height: u64,

    /// Jutland: extended EVM error codes
    #[serde(rename = "jutlandHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub jutland_block_height: u64,

    /// Kamchatka: EVM snapshot order fix and extended foundation bonus
    #[serde(rename = "kamchatkaHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub kamchatka_block_height: u64,

    /// Lord Howe: recovery of contracts affected by snapshot order
    #[serde(rename = "lordHoweHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub lord_howe_block_height: u64,

    /// Midway: chain ID handling and receipt index fixes
    #[serde(rename = "midwayHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub midway_block_height: u64,

    /// Newfoundland: correct chain ID, legacy address check, web3 staking
    #[serde(rename = "newfoundlandHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub newfoundland_block_height: u64,

    /// Okhotsk: London EVM
    #[serde(rename = "okhotskHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub okhotsk_block_height: u64,

    /// Palau: rewarding actions via web3
    #[serde(rename = "palauHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub palau_block_height: u64,

    /// Quebec: strict chain ID and liquid staking
    #[serde(rename = "quebecHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub quebec_block_height: u64,

    /// Redsea: Bellatrix EVM and contract staking vote weights
    #[serde(rename = "redseaHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub redsea_block_height: u64,

    /// Sumatra: Shanghai EVM
    #[serde(rename = "sumatraHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub sumatra_block_height: u64,

    /// Gate for work-in-progress features, unscheduled by default
    #[serde(rename = "toBeEnabledHeight", deserialize_with = "serde_helpers::height::deserialize")]
    pub to_be_enabled_block_height: u64,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self {
            timestamp: 1_546_329_600, // 2019-01-01T08:00:00Z
            block_gas_limit: 20_000_000,
            action_gas_limit: 5_000_000,
            block_interval: Duration::from_secs(10),
            num_sub_epochs: 2,
            dardanelles_num_sub_epochs: 30,
            num_delegates: 24,
            num_candidate_delegates: 36,
            time_based_rotation: false,
            pacific_block_height: 432_001,
            aleutian_block_height: 864_001,
            bering_block_height: 1_512_001,
            cook_block_height: 1_641_601,
            dardanelles_block_height: 1_816_201,
            daytona_block_height: 3_238_921,
            easter_block_height: 4_478_761,
            fbk_migration_block_height: 5_157_001,
            fairbank_block_height: 5_165_641,
            greenland_block_height: 6_544_441,
            hawaii_block_height: 11_267_641,
            iceland_block_height: 12_289_321,
            jutland_block_height: 13_685_401,
            kamchatka_block_height: 13_816_441,
            lord_howe_block_height: 13_979_161,
            midway_block_height: 16_509_241,
            newfoundland_block_height: 17_662_681,
            okhotsk_block_height: 21_542_761,
            palau_block_height: 22_991_401,
            quebec_block_height: 24_838_201,
            redsea_block_height: 26_704_441,
            sumatra_block_height: 36_704_441,
            to_be_enabled_block_height: UNSCHEDULED_HEIGHT,
        }
    }
}

// =============================================================================
// Fork Schedule
// =============================================================================

macro_rules! fork_schedule {
    ($(
        $(#[$meta:meta])*
        $variant:ident => $field:ident, $gate:ident, $label:literal;
    )+) => {
        /// A named protocol upgrade activated at a configured block height.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Fork {
            $( $(#[$meta])* $variant, )+
        }

        impl Fork {
            /// Every fork, in deployment order.
            pub const ALL: &'static [Fork] = &[$(Fork::$variant),+];

            /// Human readable fork name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Fork::$variant => $label,)+
                }
            }
        }

        impl Blockchain {
            /// Activation height configured for `fork`.
            pub const fn fork_height(&self, fork: Fork) -> u64 {
                match fork {
                    $(Fork::$variant => self.$field,)+
                }
            }

            $(
                #[doc = concat!("Whether the ", $label, " fork is active at `height`.")]
                #[inline]
                pub const fn $gate(&self, height: u64) -> bool {
                    height >= self.$field
                }
            )+
        }
    };
}

fork_schedule! {
    /// Pacific
    Pacific => pacific_block_height, is_pacific, "Pacific";
    /// Aleutian
    Aleutian => aleutian_block_height, is_aleutian, "Aleutian";
    /// Bering
    Bering => bering_block_height, is_bering, "Bering";
    /// Cook
    Cook => cook_block_height, is_cook, "Cook";
    /// Dardanelles
    Dardanelles => dardanelles_block_height, is_dardanelles, "Dardanelles";
    /// Daytona
    Daytona => daytona_block_height, is_daytona, "Daytona";
    /// Easter
    Easter => easter_block_height, is_easter, "Easter";
    /// Fairbank migration
    FbkMigration => fbk_migration_block_height, is_fbk_migration, "FbkMigration";
    /// Fairbank
    Fairbank => fairbank_block_height, is_fairbank, "Fairbank";
    /// Greenland
    Greenland => greenland_block_height, is_greenland, "Greenland";
    /// Hawaii
    Hawaii => hawaii_block_height, is_hawaii, "Hawaii";
    /// Iceland
    Iceland => iceland_block_height, is_iceland, "Iceland";
    /// Jutland
    Jutland => jutland_block_height, is_jutland, "Jutland";
    /// Kamchatka
    Kamchatka => kamchatka_block_height, is_kamchatka, "Kamchatka";
    /// Lord Howe
    LordHowe => lord_howe_block_height, is_lord_howe, "LordHowe";
    /// Midway
    Midway => midway_block_height, is_midway, "Midway";
    /// Newfoundland
    Newfoundland => newfoundland_block_height, is_newfoundland, "Newfoundland";
    /// Okhotsk
    Okhotsk => okhotsk_block_height, is_okhotsk, "Okhotsk";
    /// Palau
    Palau => palau_block_height, is_palau, "Palau";
    /// Quebec
    Quebec => quebec_block_height, is_quebec, "Quebec";
    /// Redsea
    Redsea => redsea_block_height, is_redsea, "Redsea";
    /// Sumatra
    Sumatra => sumatra_block_height, is_sumatra, "Sumatra";
    /// Placeholder gate for unreleased features
    ToBeEnabled => to_be_enabled_block_height, is_to_be_enabled, "ToBeEnabled";
}

impl Blockchain {
    /// Whether `fork` is active at `height`.
    #[inline]
    pub const fn is_active(&self, fork: Fork, height: u64) -> bool {
        height >= self.fork_height(fork)
    }

    /// Forks active at `height`, in deployment order.
    pub fn active_forks(&self, height: u64) -> impl Iterator<Item = Fork> + '_ {
        Fork::ALL
            .iter()
            .copied()
            .filter(move |fork| self.is_active(*fork, height))
    }

    /// Pairs of adjacent forks whose heights go backwards.
    ///
    /// Unscheduled forks are skipped. The schedule is still usable when this
    /// is non-empty; each gate is evaluated on its own.
    pub fn out_of_order_forks(&self) -> Vec<(Fork, Fork)> {
        let scheduled: Vec<Fork> = Fork::ALL
            .iter()
            .copied()
            .filter(|fork| self.fork_height(*fork) != UNSCHEDULED_HEIGHT)
            .collect();

        scheduled
            .windows(2)
            .filter(|pair| self.fork_height(pair[0]) > self.fork_height(pair[1]))
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        if self.block_interval.is_zero() {
            errors.push(ConfigError::InvalidParameter {
                field: "blockchain.blockInterval",
                reason: "must be positive".to_string(),
            });
        }
        if self.num_sub_epochs == 0 {
            errors.push(ConfigError::InvalidParameter {
                field: "blockchain.numSubEpochs",
                reason: "must be positive".to_string(),
            });
        }
        if self.num_delegates == 0 {
            errors.push(ConfigError::InvalidParameter {
                field: "blockchain.numDelegates",
                reason: "must be positive".to_string(),
            });
        }
        if self.action_gas_limit > self.block_gas_limit {
            errors.push(ConfigError::InvalidParameter {
                field: "blockchain.actionGasLimit",
                reason: format!(
                    "{} exceeds block gas limit {}",
                    self.action_gas_limit, self.block_gas_limit
                ),
            });
        }

        for (earlier, later) in self.out_of_order_forks() {
            warn!(
                "Fork {} at height {} is scheduled after {} at height {}",
                earlier.name(),
                self.fork_height(earlier),
                later.name(),
                self.fork_height(later)
            );
        }
    }
}
