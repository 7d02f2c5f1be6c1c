//! Adaptive quorum-size selection driven by the live smartnode census.
//!
//! Networks start small and grow; a 400-member quorum profile is useless
//! with 30 registered smartnodes. The selector swaps the profiles backing
//! the general-purpose and chain-lock roles as the census crosses
//! network-specific floors, with two safety gates: a hysteresis guard that
//! suppresses redundant or out-of-order re-evaluation, and a hard refusal to
//! swap while any live profile is inside its DKG mining window.

use crate::deployments::{BlockIndexView, DeploymentId, DeploymentRegistry};
use crate::llmq::{
    LlmqProfile, LlmqType, LLMQ_10_60, LLMQ_200_2, LLMQ_200_60, LLMQ_200_85, LLMQ_20_60,
    LLMQ_20_85, LLMQ_3_60, LLMQ_400_60, LLMQ_400_85, LLMQ_40_60, LLMQ_40_85, LLMQ_50_60,
    LLMQ_5_60, LLMQ_5_85,
};
use crate::params::NetworkId;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// Ephemeral input for one reconciliation pass. Not persisted.
#[derive(Debug, Clone, Copy)]
pub struct QuorumCensus {
    pub total_smartnode_count: usize,
    pub height: u32,
    /// Diagnostic escape hatch: force the smallest general-purpose profile
    /// regardless of the census.
    pub low_profile_override: bool,
}

/// Suppresses redundant or out-of-order re-evaluation. Mutated only inside
/// the selector's critical section, atomically with the profile swap.
#[derive(Debug, Clone, Copy, Default)]
struct HysteresisGuard {
    last_height: u32,
    last_count: usize,
    last_override: bool,
}

#[derive(Debug)]
struct QuorumState {
    profiles: BTreeMap<LlmqType, LlmqProfile>,
    guard: HysteresisGuard,
}

/// Census floor below which only the tiniest quorums can form.
const VERY_SMALL_FLOOR: usize = 5;
/// Small-network floor on test networks.
const SMALL_FLOOR_TEST: usize = 80;
/// Small-network floor elsewhere.
const SMALL_FLOOR_MAIN: usize = 100;
/// Mid-network floor (both networks, after the testnet switch height).
const MID_FLOOR: usize = 600;
/// Mid-network floor on testnet before the switch height.
const MID_FLOOR_TEST_EARLY: usize = 4000;
/// Height at which testnet moved from the early to the final mid floor.
const TEST_MID_FLOOR_SWITCH_HEIGHT: u32 = 24_280;

/// Owns the only mutable region of the active parameter set: the live
/// quorum-profile map. The guard check, the swap and the guard update all
/// commit under a single write lock, so concurrent reconcilers (block
/// connect and disconnect paths racing) serialize and never double-apply.
#[derive(Debug)]
pub struct QuorumSelector {
    network: NetworkId,
    state: RwLock<QuorumState>,
}

impl QuorumSelector {
    pub fn new(network: NetworkId, baseline: BTreeMap<LlmqType, LlmqProfile>) -> QuorumSelector {
        QuorumSelector {
            network,
            state: RwLock::new(QuorumState {
                profiles: baseline,
                guard: HysteresisGuard::default(),
            }),
        }
    }

    /// The profile currently backing a role.
    pub fn profile(&self, role: LlmqType) -> Option<LlmqProfile> {
        self.state.read().profiles.get(&role).copied()
    }

    /// Snapshot of the live profile map.
    pub fn profiles(&self) -> BTreeMap<LlmqType, LlmqProfile> {
        self.state.read().profiles.clone()
    }

    /// Whether `height` falls inside the DKG mining window of any live
    /// profile.
    pub fn in_any_mining_window(&self, height: u32) -> bool {
        self.state
            .read()
            .profiles
            .values()
            .any(|p| p.in_mining_window(height))
    }

    /// Re-evaluate the profile map against a fresh census.
    ///
    /// The body runs only if the height moved forward, the count or override
    /// actually changed, and no live profile is mid-DKG-window: swapping a
    /// quorum's size parameters during a key generation round in flight
    /// would desynchronize its participants.
    pub fn reconcile(
        &self,
        census: &QuorumCensus,
        deployments: &DeploymentRegistry,
        view: &dyn BlockIndexView,
    ) {
        let mut state = self.state.write();
        let guard = state.guard;
        if census.height <= guard.last_height {
            return;
        }
        if census.total_smartnode_count == guard.last_count
            && census.low_profile_override == guard.last_override
        {
            return;
        }
        if state.profiles.values().any(|p| p.in_mining_window(census.height)) {
            return;
        }

        debug!(
            last_height = guard.last_height,
            height = census.height,
            last_count = guard.last_count,
            count = census.total_smartnode_count,
            "reconciling quorum profiles"
        );

        let is_test = self.network == NetworkId::Test;
        let count = census.total_smartnode_count;

        if count < VERY_SMALL_FLOOR {
            state.profiles.insert(LlmqType::Llmq50_60, LLMQ_3_60);
            if is_test {
                state.profiles.insert(LlmqType::Llmq400_60, LLMQ_5_60);
                state.profiles.insert(LlmqType::Llmq400_85, LLMQ_5_85);
            } else {
                state.profiles.insert(LlmqType::Llmq400_60, LLMQ_20_60);
                state.profiles.insert(LlmqType::Llmq400_85, LLMQ_20_85);
            }
        } else if (is_test && count < SMALL_FLOOR_TEST) || (!is_test && count < SMALL_FLOOR_MAIN) {
            state.profiles.insert(LlmqType::Llmq50_60, LLMQ_10_60);
            state.profiles.insert(LlmqType::Llmq400_60, LLMQ_20_60);
            state.profiles.insert(LlmqType::Llmq400_85, LLMQ_20_85);
        } else if (is_test
            && ((census.height >= TEST_MID_FLOOR_SWITCH_HEIGHT && count < MID_FLOOR)
                || (census.height < TEST_MID_FLOOR_SWITCH_HEIGHT && count < MID_FLOOR_TEST_EARLY)))
            || (!is_test && count < MID_FLOOR)
        {
            state.profiles.insert(LlmqType::Llmq50_60, LLMQ_50_60);
            state.profiles.insert(LlmqType::Llmq400_60, LLMQ_40_60);
            state.profiles.insert(LlmqType::Llmq400_85, LLMQ_40_85);
        } else {
            state.profiles.insert(LlmqType::Llmq50_60, LLMQ_50_60);
            if deployments.is_active(DeploymentId::Quorums200_8, view) {
                state.profiles.insert(LlmqType::Llmq400_60, LLMQ_200_60);
                state.profiles.insert(LlmqType::Llmq400_85, LLMQ_200_85);
            } else {
                state.profiles.insert(LlmqType::Llmq400_60, LLMQ_400_60);
                state.profiles.insert(LlmqType::Llmq400_85, LLMQ_400_85);
            }
        }

        if census.low_profile_override {
            state.profiles.insert(LlmqType::Llmq50_60, LLMQ_200_2);
        }

        state.guard = HysteresisGuard {
            last_height: census.height,
            last_count: census.total_smartnode_count,
            last_override: census.low_profile_override,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployments::{Deployment, VoteThreshold};
    use crate::params::ConsensusParams;

    struct TipView(u32);

    impl BlockIndexView for TipView {
        fn height(&self) -> u32 {
            self.0
        }
        fn miner_support(&self, _bit: u8, _round_start: u32, _round_size: u32) -> u8 {
            0
        }
        fn node_support(&self, _id: DeploymentId, _round_start: u32, _round_size: u32) -> u8 {
            0
        }
    }

    fn main_selector() -> (QuorumSelector, DeploymentRegistry) {
        let params = ConsensusParams::main().unwrap();
        (
            QuorumSelector::new(params.network, params.llmqs.clone()),
            params.deployments.clone(),
        )
    }

    fn census(count: usize, height: u32) -> QuorumCensus {
        QuorumCensus {
            total_smartnode_count: count,
            height,
            low_profile_override: false,
        }
    }

    #[test]
    fn tiny_census_selects_smallest_profiles() {
        let (selector, deployments) = main_selector();
        selector.reconcile(&census(3, 100), &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq50_60).unwrap().name, "llmq_3_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_20_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_85).unwrap().name, "llmq_20_85");
    }

    #[test]
    fn large_census_selects_full_profiles() {
        let (selector, deployments) = main_selector();
        selector.reconcile(&census(650, 100), &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq50_60).unwrap().name, "llmq_50_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_400_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_85).unwrap().name, "llmq_400_85");
    }

    #[test]
    fn non_increasing_height_is_a_no_op() {
        let (selector, deployments) = main_selector();
        selector.reconcile(&census(650, 100), &deployments, &TipView(100));
        let before = selector.profiles();

        // Count changed but height did not advance: suppressed.
        selector.reconcile(&census(651, 100), &deployments, &TipView(100));
        assert_eq!(selector.profiles(), before);

        selector.reconcile(&census(3, 99), &deployments, &TipView(99));
        assert_eq!(selector.profiles(), before);
    }

    #[test]
    fn unchanged_census_is_a_no_op() {
        let (selector, deployments) = main_selector();
        selector.reconcile(&census(650, 100), &deployments, &TipView(100));
        let before = selector.profiles();

        // Same count and override at a later height: suppressed.
        selector.reconcile(&census(650, 200), &deployments, &TipView(200));
        assert_eq!(selector.profiles(), before);
    }

    #[test]
    fn mid_tier_census() {
        let (selector, deployments) = main_selector();
        selector.reconcile(&census(120, 100), &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq50_60).unwrap().name, "llmq_50_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_40_60");
    }

    #[test]
    fn small_tier_census() {
        let (selector, deployments) = main_selector();
        selector.reconcile(&census(50, 100), &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq50_60).unwrap().name, "llmq_10_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_20_60");
    }

    #[test]
    fn testnet_floors_differ() {
        let params = ConsensusParams::test().unwrap();
        let selector = QuorumSelector::new(params.network, params.llmqs.clone());

        // 90 smartnodes: below the main-network floor but above testnet's.
        selector.reconcile(&census(90, 30_000), &params.deployments, &TipView(30_000));
        assert_eq!(selector.profile(LlmqType::Llmq50_60).unwrap().name, "llmq_50_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_40_60");

        // Tiny testnet census picks the 5-member chain-lock profiles.
        let selector = QuorumSelector::new(params.network, params.llmqs.clone());
        selector.reconcile(&census(3, 100), &params.deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_5_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_85).unwrap().name, "llmq_5_85");
    }

    #[test]
    fn testnet_mid_floor_is_height_gated() {
        let params = ConsensusParams::test().unwrap();

        // Before the switch height, 1000 smartnodes still count as mid-tier.
        let selector = QuorumSelector::new(params.network, params.llmqs.clone());
        selector.reconcile(&census(1000, 20_000), &params.deployments, &TipView(20_000));
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_40_60");

        // After it, the same census lands in the full tier.
        let selector = QuorumSelector::new(params.network, params.llmqs.clone());
        selector.reconcile(&census(1000, 30_000), &params.deployments, &TipView(30_000));
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_400_60");
    }

    #[test]
    fn low_profile_override_wins() {
        let (selector, deployments) = main_selector();
        let mut c = census(650, 100);
        c.low_profile_override = true;
        selector.reconcile(&c, &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq50_60).unwrap().name, "llmq_200_2");
        // Other roles still follow the census.
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_400_60");
    }

    #[test]
    fn mining_window_blocks_reconciliation() {
        let (selector, deployments) = main_selector();
        // Main baseline carries interval-24 profiles with window 10..=18;
        // height 12 sits inside it.
        let before = selector.profiles();
        selector.reconcile(&census(650, 12), &deployments, &TipView(12));
        assert_eq!(selector.profiles(), before);

        // Outside every window the same census applies.
        selector.reconcile(&census(650, 100), &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_400_60");
    }

    #[test]
    fn full_tier_consults_the_quorum_upgrade_deployment() {
        let params = ConsensusParams::test().unwrap();
        let selector = QuorumSelector::new(params.network, params.llmqs.clone());

        // Force the upgrade deployment active and present a full-tier census.
        let mut deployments = DeploymentRegistry::new();
        deployments.add(Deployment {
            id: DeploymentId::Quorums200_8,
            bit: 2,
            round_size: 1440,
            start_height: 0,
            voting_period_rounds: 1,
            max_voting_rounds: 365,
            grace_period_rounds: 1,
            force_active: true,
            miner_threshold: VoteThreshold::open(),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        });
        selector.reconcile(&census(700, 30_000), &deployments, &TipView(30_000));
        assert_eq!(selector.profile(LlmqType::Llmq400_60).unwrap().name, "llmq_200_60");
        assert_eq!(selector.profile(LlmqType::Llmq400_85).unwrap().name, "llmq_200_85");
    }

    #[test]
    fn platform_role_is_never_touched() {
        let (selector, deployments) = main_selector();
        let platform_before = selector.profile(LlmqType::Llmq100_67).unwrap();
        selector.reconcile(&census(3, 100), &deployments, &TipView(100));
        assert_eq!(selector.profile(LlmqType::Llmq100_67).unwrap(), platform_before);
    }
}
