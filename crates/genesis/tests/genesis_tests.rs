//! Tests for the genesis tree, its accessors and the validation pass

use meridian_genesis::amount::tokens_to_rau;
use meridian_genesis::testnet::{test_identities, TEST_IDENTITY_COUNT};
use meridian_genesis::{
    BootstrapCandidate, ConfigError, Delegate, Genesis, PollMode, U256,
};
use std::time::Duration;

const ADDR_A: &str = "0x1234567890123456789012345678901234567890";
const ADDR_B: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

fn invalid_fields(genesis: &Genesis) -> Vec<String> {
    match genesis.validate() {
        Err(ConfigError::Invalid(errors)) => errors.iter().map(|e| e.to_string()).collect(),
        other => panic!("expected aggregated validation error, got {other:?}"),
    }
}

#[test]
fn test_default_genesis() {
    let genesis = Genesis::default();
    assert_eq!(genesis.blockchain.timestamp, 1_546_329_600);
    assert_eq!(genesis.blockchain.block_gas_limit, 20_000_000);
    assert_eq!(genesis.blockchain.action_gas_limit, 5_000_000);
    assert_eq!(genesis.blockchain.block_interval, Duration::from_secs(10));
    assert_eq!(genesis.blockchain.num_delegates, 24);
    assert_eq!(genesis.blockchain.num_candidate_delegates, 36);
    assert_eq!(genesis.blockchain.pacific_block_height, 432_001);
    assert_eq!(genesis.blockchain.to_be_enabled_block_height, u64::MAX);
    assert!(genesis.account.init_balance_map.is_empty());
    assert_eq!(genesis.poll.poll_mode, PollMode::NativeMix);
    assert!(genesis.poll.delegates.is_empty());
    assert_eq!(
        genesis.staking.withdraw_waiting_period,
        Duration::from_secs(3 * 24 * 3600)
    );
}

#[test]
fn test_default_genesis_is_valid() {
    assert!(Genesis::default().validate().is_ok());
    assert!(Genesis::for_tests().validate().is_ok());
}

#[test]
fn test_default_builder_is_pure() {
    assert_eq!(Genesis::default(), Genesis::default());
}

#[test]
fn test_reward_accessors() {
    let rewarding = Genesis::default().rewarding;

    let expected = U256::from(16u64) * U256::from(10u64).pow(U256::from(18u64));
    assert_eq!(rewarding.block_reward().unwrap(), expected);
    assert_eq!(rewarding.block_reward_str, "16000000000000000000");

    assert_eq!(rewarding.init_balance().unwrap(), tokens_to_rau(200_000_000));
    assert_eq!(rewarding.dardanelles_block_reward().unwrap(), tokens_to_rau(8));
    assert_eq!(rewarding.epoch_reward().unwrap(), tokens_to_rau(12_500));
    assert_eq!(rewarding.aleutian_epoch_reward().unwrap(), tokens_to_rau(18_750));
    assert_eq!(rewarding.foundation_bonus().unwrap(), tokens_to_rau(80));
    assert!(rewarding.exempt_addrs_from_epoch_reward().unwrap().is_empty());
}

#[test]
fn test_invalid_block_reward() {
    let mut genesis = Genesis::default();
    genesis.rewarding.block_reward_str = "not-a-number".to_string();

    assert!(matches!(
        genesis.rewarding.block_reward(),
        Err(ConfigError::InvalidAmount { .. })
    ));

    let defects = invalid_fields(&genesis);
    assert_eq!(defects.len(), 1);
    assert!(defects[0].contains("rewarding.blockReward"));
}

#[test]
fn test_validation_aggregates_defects() {
    let mut genesis = Genesis::default();
    genesis.rewarding.block_reward_str = "-16".to_string();
    genesis.poll.delegates.push(Delegate {
        operator_addr_str: "bogus".to_string(),
        reward_addr_str: String::new(),
        votes_str: "1".to_string(),
    });
    genesis.staking.vote_weight_cal_consts.self_stake = f64::NAN;
    genesis.poll.probation_intensity_rate = 101;

    let defects = invalid_fields(&genesis);
    assert_eq!(defects.len(), 4, "{defects:?}");
    assert!(defects.iter().any(|d| d.contains("poll.delegates[0].operatorAddr")));
    assert!(defects.iter().any(|d| d.contains("selfStake")));
    assert!(defects.iter().any(|d| d.contains("probationIntensityRate")));
}

#[test]
fn test_structural_validation() {
    let mut genesis = Genesis::default();
    genesis.blockchain.action_gas_limit = genesis.blockchain.block_gas_limit + 1;
    genesis.blockchain.block_interval = Duration::ZERO;
    genesis.poll.probation_epoch_period = 21;

    let defects = invalid_fields(&genesis);
    assert_eq!(defects.len(), 3, "{defects:?}");
}

#[test]
fn test_init_balances_sorted() {
    let mut genesis = Genesis::default();
    let map = &mut genesis.account.init_balance_map;
    map.insert(ADDR_B.to_string(), "200".to_string());
    map.insert(ADDR_A.to_string(), "100".to_string());
    map.insert(
        "0x0000000000000000000000000000000000000001".to_string(),
        "1".to_string(),
    );

    let (addrs, amounts) = genesis.account.init_balances().unwrap();
    assert_eq!(addrs.len(), 3);
    assert_eq!(addrs.len(), amounts.len());

    let addr_strs: Vec<String> = addrs
        .iter()
        .map(meridian_genesis::address::format_address)
        .collect();
    let mut sorted = addr_strs.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(addr_strs, sorted);

    for (addr, amount) in addr_strs.iter().zip(&amounts) {
        let stored = &genesis.account.init_balance_map[addr];
        assert_eq!(amount.to_string(), *stored);
    }
    assert_eq!(genesis.account.total_init_balance().unwrap(), U256::from(301u64));
}

#[test]
fn test_init_balances_bad_entry() {
    let mut genesis = Genesis::default();
    genesis
        .account
        .init_balance_map
        .insert(ADDR_A.to_string(), "1.5".to_string());
    assert!(matches!(
        genesis.account.init_balances(),
        Err(ConfigError::InvalidAmount { .. })
    ));
}

#[test]
fn test_total_init_balance_overflow() {
    let mut genesis = Genesis::default();
    let map = &mut genesis.account.init_balance_map;
    map.insert(ADDR_A.to_string(), U256::MAX.to_string());
    map.insert(ADDR_B.to_string(), "1".to_string());

    assert!(genesis.account.init_balances().is_ok());
    assert!(matches!(
        genesis.account.total_init_balance(),
        Err(ConfigError::InvalidParameter { field: "account.initBalances", .. })
    ));

    let defects = invalid_fields(&genesis);
    assert_eq!(defects.len(), 1, "{defects:?}");
    assert!(defects[0].contains("account.initBalances"));
}

#[test]
fn test_total_delegate_votes_overflow() {
    let mut genesis = Genesis::default();
    for (addr, votes) in [(ADDR_A, U256::MAX.to_string()), (ADDR_B, "1".to_string())] {
        genesis.poll.delegates.push(Delegate {
            operator_addr_str: addr.to_string(),
            reward_addr_str: String::new(),
            votes_str: votes,
        });
    }

    assert!(matches!(
        genesis.poll.total_delegate_votes(),
        Err(ConfigError::InvalidParameter { field: "poll.delegates.votes", .. })
    ));
    assert_eq!(invalid_fields(&genesis).len(), 1);

    genesis.poll.delegates[1].votes_str = "0".to_string();
    assert_eq!(genesis.poll.total_delegate_votes().unwrap(), U256::MAX);
    assert!(genesis.validate().is_ok());
}

#[test]
fn test_duplicate_account_differing_case() {
    let mut genesis = Genesis::default();
    let map = &mut genesis.account.init_balance_map;
    map.insert(ADDR_B.to_string(), "1".to_string());
    map.insert(ADDR_B.to_uppercase().replace("0X", "0x"), "2".to_string());

    let defects = invalid_fields(&genesis);
    assert_eq!(defects.len(), 1);
    assert!(defects[0].contains("Duplicate"));
}

#[test]
fn test_delegate_accessors() {
    let delegate = Delegate {
        operator_addr_str: ADDR_A.to_string(),
        reward_addr_str: String::new(),
        votes_str: "42".to_string(),
    };
    assert_eq!(
        meridian_genesis::address::format_address(&delegate.operator_addr().unwrap()),
        ADDR_A
    );
    assert_eq!(delegate.reward_addr().unwrap(), None);
    assert_eq!(delegate.votes().unwrap(), U256::from(42u64));

    let with_reward = Delegate {
        reward_addr_str: ADDR_B.to_string(),
        ..delegate
    };
    assert!(with_reward.reward_addr().unwrap().is_some());
}

#[test]
fn test_poll_accessors() {
    let poll = Genesis::default().poll;
    assert_eq!(poll.vote_threshold().unwrap(), U256::ZERO);
    assert_eq!(poll.register_contract_address().unwrap(), None);
    assert!(poll.system_staking_contract_address().unwrap().is_some());
    assert!(poll.native_staking_contract_code().unwrap().is_empty());

    let mut poll = poll;
    poll.native_staking_contract_code = "0x6080".to_string();
    assert_eq!(poll.native_staking_contract_code().unwrap(), vec![0x60, 0x80]);
    poll.consortium_committee_contract_code = "xyz".to_string();
    assert!(matches!(
        poll.consortium_committee_contract_code(),
        Err(ConfigError::InvalidHex { .. })
    ));
}

#[test]
fn test_staking_accessors() {
    let staking = Genesis::default().staking;
    assert_eq!(staking.registration_fee().unwrap(), tokens_to_rau(100));
    assert_eq!(staking.min_self_stake().unwrap(), tokens_to_rau(1_200_000));
    assert_eq!(staking.min_stake_amount().unwrap(), tokens_to_rau(100));
    assert!((staking.vote_weight_cal_consts.duration_lg - 1.2).abs() < f64::EPSILON);
}

#[test]
fn test_bootstrap_candidate() {
    let candidate = BootstrapCandidate {
        owner_address: ADDR_A.to_string(),
        operator_address: ADDR_B.to_string(),
        reward_address: String::new(),
        name: "alpha".to_string(),
        self_staking_tokens: tokens_to_rau(1_200_000).to_string(),
    };
    assert!(candidate.owner_address().is_ok());
    assert!(candidate.operator_address().is_ok());
    assert_eq!(candidate.reward_address().unwrap(), None);
    assert_eq!(candidate.self_staking_tokens().unwrap(), tokens_to_rau(1_200_000));

    let mut genesis = Genesis::default();
    genesis.staking.bootstrap_candidates.push(candidate.clone());
    assert!(genesis.validate().is_ok());

    genesis.staking.bootstrap_candidates.push(BootstrapCandidate {
        name: String::new(),
        ..candidate
    });
    assert_eq!(invalid_fields(&genesis).len(), 1);
}

// =============================================================================
// Test overlay
// =============================================================================

#[test]
fn test_overlay_delegates() {
    let genesis = Genesis::for_tests();
    let num_delegates = genesis.blockchain.num_delegates as usize;

    assert_eq!(genesis.poll.delegates.len(), num_delegates);
    assert_eq!(genesis.blockchain.pacific_block_height, 0);
    assert_eq!(genesis.account.init_balance_map.len(), TEST_IDENTITY_COUNT);

    let votes = genesis.poll.delegates[0].votes().unwrap();
    assert_eq!(votes, tokens_to_rau(100_000_000));
    for delegate in &genesis.poll.delegates {
        assert_eq!(delegate.votes().unwrap(), votes);
        assert_eq!(delegate.operator_addr_str, delegate.reward_addr_str);
        assert_eq!(genesis.account.init_balance_map[&delegate.operator_addr_str], delegate.votes_str);
    }
    assert_eq!(
        genesis.poll.total_delegate_votes().unwrap(),
        votes * U256::from(num_delegates)
    );
}

#[test]
fn test_overlay_follows_identity_order() {
    let genesis = Genesis::for_tests();
    let identities = test_identities();
    for (delegate, identity) in genesis.poll.delegates.iter().zip(&identities) {
        assert_eq!(delegate.operator_addr().unwrap(), *identity);
    }
}

#[test]
fn test_overlay_is_idempotent() {
    assert_eq!(Genesis::for_tests(), Genesis::for_tests());

    let mut genesis = Genesis::for_tests();
    genesis.apply_test_overlay(&test_identities());
    assert_eq!(genesis, Genesis::for_tests());
}

#[test]
fn test_overlay_respects_num_delegates() {
    let mut genesis = Genesis::default();
    genesis.blockchain.num_delegates = 4;
    genesis.apply_test_overlay(&test_identities());
    assert_eq!(genesis.poll.delegates.len(), 4);
    assert_eq!(genesis.account.init_balance_map.len(), TEST_IDENTITY_COUNT);
}
