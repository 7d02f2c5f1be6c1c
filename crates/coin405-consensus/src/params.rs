//! Per-network consensus parameter bundles.
//!
//! Four fully-populated bundles (main, test, dev, regtest), each an immutable
//! baseline. Dev and regtest accept a small set of trusted runtime overrides;
//! everything else is data. There is no behavioral polymorphism between
//! networks, only value differences, so `select` is a pure function from a
//! network id and typed overrides to a parameter value.

use crate::deployments::{Deployment, DeploymentId, DeploymentRegistry, VoteThreshold};
use crate::error::{ParamsError, ParamsResult};
use crate::genesis;
use crate::llmq::{
    LlmqProfile, LlmqType, LLMQ_100_67_MAINNET, LLMQ_100_67_TESTNET, LLMQ_20_60, LLMQ_20_85,
    LLMQ_3_60, LLMQ_400_60, LLMQ_400_85, LLMQ_50_60,
};
use crate::rewards::{FounderPayment, FutureRewardShare, SmartnodeCollaterals};
use crate::schedule::{HeightSchedule, HEIGHT_NEVER};
use coin405_primitives::script::OP_CHECKSIG;
use coin405_primitives::{Amount, Block, Hash256, Script, COIN};
use num_bigint::BigUint;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NetworkId {
    Main,
    Test,
    Dev,
    Regtest,
}

impl NetworkId {
    pub fn name(self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Test => "test",
            NetworkId::Dev => "dev",
            NetworkId::Regtest => "regtest",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkId {
    type Err = ParamsError;

    fn from_str(s: &str) -> ParamsResult<NetworkId> {
        match s {
            "main" => Ok(NetworkId::Main),
            "test" => Ok(NetworkId::Test),
            "dev" => Ok(NetworkId::Dev),
            "regtest" => Ok(NetworkId::Regtest),
            other => Err(ParamsError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Smartnode/budget/superblock start heights, overridable on test chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetOverride {
    pub smartnode_start: u32,
    pub budget_start: u32,
    pub superblock_start: u32,
}

impl FromStr for BudgetOverride {
    type Err = ParamsError;

    /// Parse `<smartnodeStart>:<budgetStart>:<superblockStart>`.
    fn from_str(s: &str) -> ParamsResult<BudgetOverride> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 3 {
            return Err(ParamsError::config(
                "budget_params",
                format!(
                    "expected <smartnode>:<budget>:<superblock>, got {} field(s)",
                    fields.len()
                ),
            ));
        }
        let parse = |field: &'static str, raw: &str| -> ParamsResult<u32> {
            raw.parse().map_err(|_| {
                ParamsError::config(field, format!("'{}' is not a valid height", raw))
            })
        };
        Ok(BudgetOverride {
            smartnode_start: parse("smartnode_start", fields[0])?,
            budget_start: parse("budget_start", fields[1])?,
            superblock_start: parse("superblock_start", fields[2])?,
        })
    }
}

/// Typed runtime overrides, parsed at the process boundary. Accepted only on
/// dev and regtest networks.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub budget: Option<BudgetOverride>,
    pub minimum_difficulty_blocks: Option<u32>,
    pub high_subsidy_blocks: Option<u32>,
    pub high_subsidy_factor: Option<u32>,
    /// Name of the profile whose role should back chain locks.
    pub chain_locks_role: Option<String>,
    /// Name of the profile whose role should back instant-send locks.
    pub instant_send_role: Option<String>,
    /// Devnet name embedded in the derived devnet genesis.
    pub devnet_name: Option<String>,
}

impl Overrides {
    pub fn is_empty(&self) -> bool {
        self.budget.is_none()
            && self.minimum_difficulty_blocks.is_none()
            && self.high_subsidy_blocks.is_none()
            && self.high_subsidy_factor.is_none()
            && self.chain_locks_role.is_none()
            && self.instant_send_role.is_none()
            && self.devnet_name.is_none()
    }
}

/// Named protocol rules that are unconditionally on for a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolRules {
    pub bip34: bool,
    pub bip65: bool,
    pub bip66: bool,
    pub bip147: bool,
    pub csv: bool,
    pub dip0001: bool,
    pub dip0003: bool,
    pub dip0008: bool,
}

impl ProtocolRules {
    pub const fn all_enabled() -> ProtocolRules {
        ProtocolRules {
            bip34: true,
            bip65: true,
            bip66: true,
            bip147: true,
            csv: true,
            dip0001: true,
            dip0003: true,
            dip0008: true,
        }
    }
}

/// The full per-network rule bundle. Immutable after selection; the live
/// quorum-profile map derived from `llmqs` is owned by the quorum selector,
/// not by this value.
#[derive(Debug, Clone)]
pub struct ConsensusParams {
    pub network: NetworkId,

    // Identity.
    pub genesis: Block,
    pub genesis_hash: Hash256,
    pub devnet_genesis: Option<Block>,
    pub devnet_genesis_hash: Option<Hash256>,
    pub min_chain_work: BigUint,
    pub assume_valid: Hash256,
    pub message_start: [u8; 4],
    pub default_port: u16,

    // Monetary.
    pub subsidy_halving_interval: u32,
    pub initial_subsidy: Amount,
    pub premine_subsidy: Amount,
    pub premine_height: u32,
    pub high_subsidy_blocks: u32,
    pub high_subsidy_factor: u32,
    pub founder_payment: FounderPayment,
    pub future_reward_share: FutureRewardShare,

    // Smartnode and governance cadence.
    pub smartnode_payments_start_block: u32,
    pub smartnode_payments_increase_block: u32,
    pub smartnode_payments_increase_period: u32,
    pub smartnode_payment_fixed_block: u32,
    pub smartnode_minimum_confirmations: u32,
    pub instant_send_confirmations_required: u32,
    pub instant_send_keep_lock: u32,
    pub budget_payments_start_block: u32,
    pub budget_payments_cycle_blocks: u32,
    pub budget_payments_window_blocks: u32,
    pub superblock_start_block: u32,
    pub superblock_start_hash: Hash256,
    pub superblock_cycle: u32,
    pub governance_min_quorum: u32,
    pub governance_filter_elements: u32,
    pub collaterals: SmartnodeCollaterals,
    pub future_fork_block: u32,

    // Proof of work.
    pub pow_limit: BigUint,
    pub pow_target_timespan: u32,
    pub pow_target_spacing: u32,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    pub pow_dgw_height: u32,
    pub dgw_blocks_avg: u32,
    pub minimum_difficulty_blocks: u32,
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub rules: ProtocolRules,

    // Deployments and quorums.
    pub deployments: DeploymentRegistry,
    pub llmqs: BTreeMap<LlmqType, LlmqProfile>,
    pub llmq_chain_locks: LlmqType,
    pub llmq_instant_send: LlmqType,
    pub llmq_platform: LlmqType,
}

impl ConsensusParams {
    /// Resolve a profile name against the network's role assignments,
    /// returning the role the profile backs.
    pub fn resolve_quorum_role(&self, profile_name: &str) -> ParamsResult<LlmqType> {
        self.llmqs
            .iter()
            .find(|(_, profile)| profile.name == profile_name)
            .map(|(role, _)| *role)
            .ok_or_else(|| ParamsError::UnknownQuorumRole(profile_name.to_string()))
    }
}

/// Select one of the four hard-coded bundles. Overrides are accepted only
/// for dev and regtest.
pub fn select(network: NetworkId, overrides: &Overrides) -> ParamsResult<ConsensusParams> {
    match network {
        NetworkId::Main | NetworkId::Test => {
            if !overrides.is_empty() {
                return Err(ParamsError::config(
                    "overrides",
                    format!("runtime overrides are not accepted on the {} network", network),
                ));
            }
            if network == NetworkId::Main {
                ConsensusParams::main()
            } else {
                ConsensusParams::test()
            }
        }
        NetworkId::Dev => ConsensusParams::dev(overrides),
        NetworkId::Regtest => ConsensusParams::regtest(overrides),
    }
}

const GENESIS_TIMESTAMP: &str = "Error 405: Profit Not Found - but the memes were priceless";
const GENESIS_OUTPUT_KEY_HEX: &str = "04a0ce42f7d39022ab7a2c1d8418f2ad1960f70f9137bac9d0f74d2a3c0b15c567a15d096b4fd1f8b98a90b6a0c7ad719f8d92be7c3c00759222af1abcf4f5976dd9da2bf0fd6a94ae8eac893667d4480b41eaf9c572cca5f8d7b3cc3dba938c";
const GENESIS_REWARD: Amount = 5000 * COIN;
const GENESIS_MERKLE_ROOT: &str =
    "7a4b1fc5aa80ec3f2bf6edb718b713230186c13ff16363dc4a554485e9465023";

const MAIN_GENESIS_HASH: &str =
    "00039464a7cb49b4aa22829b0c68ab650ef6120da1da4884c6f902973854481e";
const TEST_GENESIS_HASH: &str =
    "001a1ff65b06a4e7f913d8bd7481c02ecaae9a35046c437a9987176a0195553f";
const REGTEST_GENESIS_HASH: &str =
    "5a708e0936b085686b8ee3a86a3799b3d04e17e334d5157c8ccef227ce97daa2";

const POW_LIMIT_MAIN: &[u8] = b"00ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const POW_LIMIT_PERMISSIVE: &[u8] =
    b"7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

fn base_genesis(time: u32, nonce: u32, bits: u32) -> Block {
    let key = hex::decode(GENESIS_OUTPUT_KEY_HEX).expect("genesis output key literal");
    let output_script = Script::new().push_data(&key).push_opcode(OP_CHECKSIG);
    genesis::build_genesis(GENESIS_TIMESTAMP, output_script, time, nonce, bits, 4, GENESIS_REWARD)
}

/// Build and defend an embedded genesis: the nonce must verify as-is and the
/// resulting hash and merkle root must match the expected constants.
fn checked_genesis(time: u32, nonce: u32, bits: u32, expected_hash: &str) -> ParamsResult<Block> {
    let block = base_genesis(time, nonce, bits);
    genesis::verify_genesis_pow(&block)?;

    let expected = Hash256::from_hex(expected_hash).expect("genesis hash literal");
    let hash = block.hash();
    if hash != expected {
        return Err(ParamsError::GenesisIntegrity(format!(
            "genesis hash mismatch: computed {}, expected {}",
            hash, expected
        )));
    }
    let merkle = Hash256::from_hex(GENESIS_MERKLE_ROOT).expect("genesis merkle literal");
    if block.header.merkle_root != merkle {
        return Err(ParamsError::GenesisIntegrity(format!(
            "genesis merkle root mismatch: computed {}, expected {}",
            block.header.merkle_root, merkle
        )));
    }
    Ok(block)
}

fn founder_forever_5pct(start_height: u32, address: Option<&'static str>) -> ParamsResult<FounderPayment> {
    Ok(FounderPayment::new(
        HeightSchedule::new(vec![(HEIGHT_NEVER, 5)])?,
        start_height,
        address,
    ))
}

impl ConsensusParams {
    /// Main network.
    pub fn main() -> ParamsResult<ConsensusParams> {
        let genesis = checked_genesis(1_762_628_736, 852, 0x2000_1fff, MAIN_GENESIS_HASH)?;
        let genesis_hash = genesis.hash();

        let mut deployments = DeploymentRegistry::new();
        // v17 voted in a single 4032-block round with one grace round; its
        // historical activation height is recorded to skip recomputation.
        deployments.add(Deployment {
            id: DeploymentId::V17,
            bit: 0,
            round_size: 4032,
            start_height: 419_328,
            voting_period_rounds: 1,
            max_voting_rounds: 3,
            grace_period_rounds: 1,
            force_active: false,
            miner_threshold: VoteThreshold::new(80, 60, 5),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: Some(427_392),
        });
        deployments.add(Deployment {
            id: DeploymentId::RoundVoting,
            bit: 1,
            round_size: 720,
            start_height: 905_760,
            voting_period_rounds: 7,
            max_voting_rounds: 365,
            grace_period_rounds: 7,
            force_active: false,
            miner_threshold: VoteThreshold::new(85, 85, 1),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });

        let mut llmqs = BTreeMap::new();
        llmqs.insert(LlmqType::Llmq50_60, LLMQ_3_60);
        llmqs.insert(LlmqType::Llmq400_60, LLMQ_20_60);
        llmqs.insert(LlmqType::Llmq400_85, LLMQ_20_85);
        llmqs.insert(LlmqType::Llmq100_67, LLMQ_100_67_MAINNET);

        Ok(ConsensusParams {
            network: NetworkId::Main,
            genesis,
            genesis_hash,
            devnet_genesis: None,
            devnet_genesis_hash: None,
            min_chain_work: BigUint::from(0u32),
            assume_valid: Hash256::ZERO,
            message_start: [0x34, 0x30, 0x35, 0x4d],
            default_port: 10_226,

            subsidy_halving_interval: 1_051_200,
            initial_subsidy: 1927 * COIN,
            premine_subsidy: 20_000_000 * COIN,
            premine_height: 1,
            high_subsidy_blocks: 0,
            high_subsidy_factor: 1,
            founder_payment: founder_forever_5pct(250, None)?,
            future_reward_share: FutureRewardShare::new(0.8, 0.2, 0.0)?,

            smartnode_payments_start_block: 5_761,
            smartnode_payments_increase_block: 158_000,
            smartnode_payments_increase_period: 576 * 30,
            smartnode_payment_fixed_block: 6_800,
            smartnode_minimum_confirmations: 15,
            instant_send_confirmations_required: 6,
            instant_send_keep_lock: 24,
            budget_payments_start_block: HEIGHT_NEVER,
            budget_payments_cycle_blocks: 16_616,
            budget_payments_window_blocks: 100,
            superblock_start_block: HEIGHT_NEVER,
            superblock_start_hash: Hash256::from_hex(
                "0000000000020cb27c7ef164d21003d5d20cdca2f54dd9a9ca6d45f4d47f8aa3",
            )
            .expect("superblock hash literal"),
            superblock_cycle: 16_616,
            governance_min_quorum: 10,
            governance_filter_elements: 20_000,
            collaterals: SmartnodeCollaterals::new(
                HeightSchedule::new(vec![
                    (88_720, 110_000 * COIN),
                    (132_720, 150_000 * COIN),
                    (176_720, 190_000 * COIN),
                    (220_720, 240_000 * COIN),
                    (264_720, 280_000 * COIN),
                    (HEIGHT_NEVER, 350_000 * COIN),
                ])?,
                HeightSchedule::new(vec![(5_761, 0), (HEIGHT_NEVER, 20)])?,
            ),
            future_fork_block: 420_420,

            pow_limit: BigUint::parse_bytes(POW_LIMIT_MAIN, 16).expect("pow limit literal"),
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 2 * 60,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            pow_dgw_height: 60,
            dgw_blocks_avg: 60,
            minimum_difficulty_blocks: 0,
            rule_change_activation_threshold: 1_916,
            miner_confirmation_window: 2_016,
            rules: ProtocolRules::all_enabled(),

            deployments,
            llmqs,
            llmq_chain_locks: LlmqType::Llmq400_60,
            llmq_instant_send: LlmqType::Llmq50_60,
            llmq_platform: LlmqType::Llmq100_67,
        })
    }

    /// Test network.
    pub fn test() -> ParamsResult<ConsensusParams> {
        let genesis = checked_genesis(1_762_629_036, 1_575, 0x2000_1fff, TEST_GENESIS_HASH)?;
        let genesis_hash = genesis.hash();

        let mut deployments = DeploymentRegistry::new();
        deployments.add(Deployment {
            id: DeploymentId::V17,
            bit: 0,
            round_size: 1_440,
            start_height: 25_920,
            voting_period_rounds: 7,
            max_voting_rounds: 365,
            grace_period_rounds: 7,
            force_active: false,
            miner_threshold: VoteThreshold::new(95, 85, 5),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });
        deployments.add(Deployment {
            id: DeploymentId::RoundVoting,
            bit: 1,
            round_size: 1_440,
            start_height: 27_360,
            voting_period_rounds: 7,
            max_voting_rounds: 365,
            grace_period_rounds: 7,
            force_active: false,
            miner_threshold: VoteThreshold::new(85, 85, 1),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });
        deployments.add(Deployment {
            id: DeploymentId::Quorums200_8,
            bit: 2,
            round_size: 1_440,
            start_height: 79_200,
            voting_period_rounds: 3,
            max_voting_rounds: 365,
            grace_period_rounds: 2,
            force_active: false,
            miner_threshold: VoteThreshold::new(85, 85, 1),
            node_threshold: VoteThreshold::new(85, 85, 1),
            fixed_activation_height: None,
        });

        let mut llmqs = BTreeMap::new();
        llmqs.insert(LlmqType::Llmq50_60, LLMQ_3_60);
        llmqs.insert(LlmqType::Llmq400_60, LLMQ_20_60);
        llmqs.insert(LlmqType::Llmq400_85, LLMQ_20_85);
        llmqs.insert(LlmqType::Llmq100_67, LLMQ_100_67_TESTNET);

        Ok(ConsensusParams {
            network: NetworkId::Test,
            genesis,
            genesis_hash,
            devnet_genesis: None,
            devnet_genesis_hash: None,
            min_chain_work: BigUint::from(0u32),
            assume_valid: Hash256::ZERO,
            message_start: [0x34, 0x30, 0x35, 0x54],
            default_port: 10_230,

            subsidy_halving_interval: 210_240,
            initial_subsidy: 1000 * COIN,
            premine_subsidy: 0,
            premine_height: 0,
            high_subsidy_blocks: 0,
            high_subsidy_factor: 1,
            founder_payment: founder_forever_5pct(100, Some("rghjACzPtVAN2wydgDbn9Jq1agREu6rH1e"))?,
            future_reward_share: FutureRewardShare::new(0.8, 0.2, 0.0)?,

            smartnode_payments_start_block: 1_000,
            smartnode_payments_increase_block: 4_030,
            smartnode_payments_increase_period: 10,
            smartnode_payment_fixed_block: 1,
            smartnode_minimum_confirmations: 1,
            instant_send_confirmations_required: 2,
            instant_send_keep_lock: 6,
            budget_payments_start_block: HEIGHT_NEVER,
            budget_payments_cycle_blocks: 50,
            budget_payments_window_blocks: 10,
            superblock_start_block: HEIGHT_NEVER,
            superblock_start_hash: Hash256::ZERO,
            superblock_cycle: 24,
            governance_min_quorum: 1,
            governance_filter_elements: 500,
            collaterals: SmartnodeCollaterals::new(
                HeightSchedule::new(vec![(HEIGHT_NEVER, 60_000 * COIN)])?,
                HeightSchedule::new(vec![(HEIGHT_NEVER, 20)])?,
            ),
            future_fork_block: 1_000,

            pow_limit: BigUint::parse_bytes(POW_LIMIT_MAIN, 16).expect("pow limit literal"),
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 60,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: false,
            pow_dgw_height: 60,
            dgw_blocks_avg: 60,
            minimum_difficulty_blocks: 0,
            rule_change_activation_threshold: 1_512,
            miner_confirmation_window: 2_016,
            rules: ProtocolRules::all_enabled(),

            deployments,
            llmqs,
            llmq_chain_locks: LlmqType::Llmq400_60,
            llmq_instant_send: LlmqType::Llmq50_60,
            llmq_platform: LlmqType::Llmq100_67,
        })
    }

    /// Dev network. Mines its own genesis (and a devnet genesis chained onto
    /// it when a devnet name is supplied), so no embedded hash is asserted.
    pub fn dev(overrides: &Overrides) -> ParamsResult<ConsensusParams> {
        let genesis = genesis::verify_or_mine_genesis(&base_genesis(1_762_629_336, 564, 0x2000_1fff))?;
        let genesis_hash = genesis.hash();

        let mut deployments = DeploymentRegistry::new();
        deployments.add(Deployment {
            id: DeploymentId::V17,
            bit: 0,
            round_size: 10,
            start_height: 0,
            voting_period_rounds: 10,
            max_voting_rounds: 100,
            grace_period_rounds: 10,
            force_active: false,
            miner_threshold: VoteThreshold::new(95, 95, 5),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });
        deployments.add(Deployment {
            id: DeploymentId::RoundVoting,
            bit: 1,
            round_size: 10,
            start_height: 100,
            voting_period_rounds: 5,
            max_voting_rounds: 10,
            grace_period_rounds: 5,
            force_active: false,
            miner_threshold: VoteThreshold::new(85, 85, 1),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });

        let mut llmqs = BTreeMap::new();
        llmqs.insert(LlmqType::Llmq50_60, LLMQ_50_60);
        llmqs.insert(LlmqType::Llmq400_60, LLMQ_400_60);
        llmqs.insert(LlmqType::Llmq400_85, LLMQ_400_85);
        llmqs.insert(LlmqType::Llmq100_67, LLMQ_100_67_TESTNET);

        let mut params = ConsensusParams {
            network: NetworkId::Dev,
            genesis,
            genesis_hash,
            devnet_genesis: None,
            devnet_genesis_hash: None,
            min_chain_work: BigUint::from(0u32),
            assume_valid: Hash256::ZERO,
            message_start: [0x34, 0x30, 0x35, 0x44],
            default_port: 19_799,

            subsidy_halving_interval: 210_240,
            initial_subsidy: 1000 * COIN,
            premine_subsidy: 0,
            premine_height: 0,
            high_subsidy_blocks: 0,
            high_subsidy_factor: 1,
            founder_payment: founder_forever_5pct(200, Some("yYhBxduZLMnancMkpzvcLFCiTgZRSk8wun"))?,
            future_reward_share: FutureRewardShare::new(0.8, 0.2, 0.0)?,

            smartnode_payments_start_block: 4_010,
            smartnode_payments_increase_block: 4_030,
            smartnode_payments_increase_period: 10,
            smartnode_payment_fixed_block: 1,
            smartnode_minimum_confirmations: 1,
            instant_send_confirmations_required: 2,
            instant_send_keep_lock: 6,
            budget_payments_start_block: 4_100,
            budget_payments_cycle_blocks: 50,
            budget_payments_window_blocks: 10,
            superblock_start_block: 4_200,
            superblock_start_hash: Hash256::ZERO,
            superblock_cycle: 24,
            governance_min_quorum: 1,
            governance_filter_elements: 500,
            collaterals: SmartnodeCollaterals::new(
                HeightSchedule::new(vec![(HEIGHT_NEVER, 60_000 * COIN)])?,
                HeightSchedule::new(vec![(HEIGHT_NEVER, 20)])?,
            ),
            future_fork_block: 1,

            pow_limit: BigUint::parse_bytes(POW_LIMIT_PERMISSIVE, 16).expect("pow limit literal"),
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 2 * 60,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            pow_dgw_height: 60,
            dgw_blocks_avg: 60,
            minimum_difficulty_blocks: 0,
            rule_change_activation_threshold: 1_512,
            miner_confirmation_window: 2_016,
            rules: ProtocolRules::all_enabled(),

            deployments,
            llmqs,
            llmq_chain_locks: LlmqType::Llmq50_60,
            llmq_instant_send: LlmqType::Llmq50_60,
            llmq_platform: LlmqType::Llmq100_67,
        };

        if let Some(blocks) = overrides.minimum_difficulty_blocks {
            params.minimum_difficulty_blocks = blocks;
        }
        if let Some(blocks) = overrides.high_subsidy_blocks {
            params.high_subsidy_blocks = blocks;
        }
        if let Some(factor) = overrides.high_subsidy_factor {
            params.high_subsidy_factor = factor;
        }
        if let Some(budget) = overrides.budget {
            params.apply_budget_override(budget);
        }
        if let Some(name) = &overrides.chain_locks_role {
            params.llmq_chain_locks = params.resolve_quorum_role(name)?;
            info!(role = %name, "chain-lock quorum role overridden");
        }
        if let Some(name) = &overrides.instant_send_role {
            params.llmq_instant_send = params.resolve_quorum_role(name)?;
            info!(role = %name, "instant-send quorum role overridden");
        }
        if let Some(name) = &overrides.devnet_name {
            if name.is_empty() {
                return Err(ParamsError::config("devnet_name", "devnet name is empty"));
            }
            let devnet = genesis::find_devnet_genesis(&params.genesis, name, GENESIS_REWARD)?;
            params.devnet_genesis_hash = Some(devnet.hash());
            params.devnet_genesis = Some(devnet);
        }

        Ok(params)
    }

    /// Regression-test network.
    pub fn regtest(overrides: &Overrides) -> ParamsResult<ConsensusParams> {
        if overrides.chain_locks_role.is_some()
            || overrides.instant_send_role.is_some()
            || overrides.devnet_name.is_some()
        {
            return Err(ParamsError::config(
                "overrides",
                "quorum-role and devnet overrides apply to the dev network only",
            ));
        }

        let genesis = checked_genesis(1_762_629_636, 5, 0x207f_ffff, REGTEST_GENESIS_HASH)?;
        let genesis_hash = genesis.hash();

        let mut deployments = DeploymentRegistry::new();
        deployments.add(Deployment {
            id: DeploymentId::V17,
            bit: 0,
            round_size: 10,
            start_height: 0,
            voting_period_rounds: 10,
            max_voting_rounds: 100,
            grace_period_rounds: 10,
            force_active: false,
            miner_threshold: VoteThreshold::new(95, 95, 5),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });
        deployments.add(Deployment {
            id: DeploymentId::RoundVoting,
            bit: 1,
            round_size: 10,
            start_height: 100,
            voting_period_rounds: 10,
            max_voting_rounds: 100,
            grace_period_rounds: 10,
            force_active: false,
            miner_threshold: VoteThreshold::new(95, 95, 5),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });

        let mut llmqs = BTreeMap::new();
        llmqs.insert(LlmqType::Llmq50_60, LLMQ_50_60);
        llmqs.insert(LlmqType::Llmq400_60, LLMQ_400_60);
        llmqs.insert(LlmqType::Llmq400_85, LLMQ_400_85);
        llmqs.insert(LlmqType::Llmq100_67, LLMQ_100_67_TESTNET);

        let mut params = ConsensusParams {
            network: NetworkId::Regtest,
            genesis,
            genesis_hash,
            devnet_genesis: None,
            devnet_genesis_hash: None,
            min_chain_work: BigUint::from(0u32),
            assume_valid: Hash256::ZERO,
            message_start: [0x34, 0x30, 0x35, 0x52],
            default_port: 19_899,

            subsidy_halving_interval: 150,
            initial_subsidy: 50 * COIN,
            premine_subsidy: 0,
            premine_height: 0,
            high_subsidy_blocks: 0,
            high_subsidy_factor: 1,
            founder_payment: founder_forever_5pct(500, Some("yaackz5YDLnFuuX6gGzEs9EMRQGfqmNYjc"))?,
            future_reward_share: FutureRewardShare::new(0.8, 0.2, 0.0)?,

            smartnode_payments_start_block: 240,
            smartnode_payments_increase_block: 350,
            smartnode_payments_increase_period: 10,
            smartnode_payment_fixed_block: 1,
            smartnode_minimum_confirmations: 1,
            instant_send_confirmations_required: 2,
            instant_send_keep_lock: 6,
            budget_payments_start_block: HEIGHT_NEVER,
            budget_payments_cycle_blocks: 50,
            budget_payments_window_blocks: 10,
            superblock_start_block: HEIGHT_NEVER,
            superblock_start_hash: Hash256::ZERO,
            superblock_cycle: 10,
            governance_min_quorum: 1,
            governance_filter_elements: 100,
            collaterals: SmartnodeCollaterals::new(
                HeightSchedule::new(vec![(HEIGHT_NEVER, 10 * COIN)])?,
                HeightSchedule::new(vec![(240, 0), (HEIGHT_NEVER, 20)])?,
            ),
            future_fork_block: 1,

            pow_limit: BigUint::parse_bytes(POW_LIMIT_PERMISSIVE, 16).expect("pow limit literal"),
            pow_target_timespan: 24 * 60 * 60,
            pow_target_spacing: 2 * 60,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            pow_dgw_height: 60,
            dgw_blocks_avg: 60,
            minimum_difficulty_blocks: 2_000,
            rule_change_activation_threshold: 108,
            miner_confirmation_window: 144,
            rules: ProtocolRules::all_enabled(),

            deployments,
            llmqs,
            llmq_chain_locks: LlmqType::Llmq50_60,
            llmq_instant_send: LlmqType::Llmq50_60,
            llmq_platform: LlmqType::Llmq100_67,
        };

        if let Some(blocks) = overrides.minimum_difficulty_blocks {
            params.minimum_difficulty_blocks = blocks;
        }
        if let Some(blocks) = overrides.high_subsidy_blocks {
            params.high_subsidy_blocks = blocks;
        }
        if let Some(factor) = overrides.high_subsidy_factor {
            params.high_subsidy_factor = factor;
        }
        if let Some(budget) = overrides.budget {
            params.apply_budget_override(budget);
        }

        Ok(params)
    }

    fn apply_budget_override(&mut self, budget: BudgetOverride) {
        info!(
            smartnode = budget.smartnode_start,
            budget = budget.budget_start,
            superblock = budget.superblock_start,
            "budget parameters overridden"
        );
        self.smartnode_payments_start_block = budget.smartnode_start;
        self.budget_payments_start_block = budget.budget_start;
        self.superblock_start_block = budget.superblock_start;
    }
}
