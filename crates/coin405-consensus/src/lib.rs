//! # coin405-consensus
//!
//! Consensus parameters and chain identity for the 405Coin network family.
//!
//! This crate provides:
//! - per-network parameter bundles (`main`, `test`, `dev`, `regtest`) with
//!   trusted runtime overrides for the development chains
//! - genesis block construction, mining and integrity verification
//! - height-indexed step-function schedules for subsidies, collateral tiers
//!   and founder rewards
//! - the rolling-window deployment voting engine
//! - LLMQ profiles and the census-driven adaptive quorum-size selector
//!
//! Block execution, networking and persistence live elsewhere; this crate
//! supplies the parameters and identity those components consume.

pub mod deployments;
pub mod error;
pub mod genesis;
pub mod llmq;
pub mod params;
pub mod pow;
pub mod quorums;
pub mod rewards;
pub mod schedule;

pub use deployments::{
    BlockIndexView, Deployment, DeploymentId, DeploymentRegistry, DeploymentState, VoteThreshold,
};
pub use error::{ParamsError, ParamsResult};
pub use genesis::{build_genesis, find_devnet_genesis, verify_genesis_pow, verify_or_mine_genesis};
pub use llmq::{LlmqProfile, LlmqType};
pub use params::{select, BudgetOverride, ConsensusParams, NetworkId, Overrides};
pub use pow::{compact_to_target, hash_meets_target, target_to_compact};
pub use quorums::{QuorumCensus, QuorumSelector};
pub use rewards::{block_subsidy, FounderPayment, FutureRewardShare, SmartnodeCollaterals};
pub use schedule::{HeightSchedule, HEIGHT_NEVER};
