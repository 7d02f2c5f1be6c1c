//! Rolling-window feature-activation voting.
//!
//! Each deployment is a named consensus rule change gated by dual-threshold
//! voting: miners signal through block version bits, smartnodes through a
//! separate vote tally. The engine recomputes activation state from the
//! supplied chain view on every query; it holds no per-block state of its
//! own, so queries are safe from read-only contexts.

use std::collections::BTreeMap;

/// Identifies a deployment across the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeploymentId {
    V17,
    RoundVoting,
    Quorums200_8,
}

impl DeploymentId {
    pub fn name(self) -> &'static str {
        match self {
            DeploymentId::V17 => "v17",
            DeploymentId::RoundVoting => "round_voting",
            DeploymentId::Quorums200_8 => "quorums_200_8",
        }
    }
}

/// Pass rule for one constituency (miners or smartnodes).
///
/// A threshold clears within a round either outright at `pass_percent`, or at
/// the lower `fast_percent` sustained over `min_rounds` consecutive rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteThreshold {
    pub pass_percent: u8,
    pub fast_percent: u8,
    pub min_rounds: u32,
}

impl VoteThreshold {
    pub const fn new(pass_percent: u8, fast_percent: u8, min_rounds: u32) -> VoteThreshold {
        VoteThreshold {
            pass_percent,
            fast_percent,
            min_rounds,
        }
    }

    /// A threshold nobody has to clear.
    pub const fn open() -> VoteThreshold {
        VoteThreshold::new(0, 0, 1)
    }
}

/// Chain-state surface the voting engine reads. Implemented by the chain
/// index owner outside this crate. A snapshot must stay internally
/// consistent for the duration of one query; the engine never writes
/// through it.
pub trait BlockIndexView {
    /// Height of the chain tip this snapshot represents.
    fn height(&self) -> u32;

    /// Percentage of blocks signaling `bit` within the voting round starting
    /// at `round_start` and spanning `round_size` blocks.
    fn miner_support(&self, bit: u8, round_start: u32, round_size: u32) -> u8;

    /// Percentage of smartnode votes observed for the deployment over the
    /// same round.
    fn node_support(&self, id: DeploymentId, round_start: u32, round_size: u32) -> u8;
}

/// Lifecycle of a deployment at a given chain height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentState {
    /// Voting has not begun, was abandoned, or never applies.
    Defined,
    /// Voting rounds are in progress.
    Voting,
    /// Both thresholds cleared; the grace period is running.
    LockedIn,
    /// Rules are enforced.
    Active,
    /// Activation was forced by configuration, bypassing voting.
    ForcedActive,
}

impl DeploymentState {
    pub fn is_active(self) -> bool {
        matches!(self, DeploymentState::Active | DeploymentState::ForcedActive)
    }
}

/// A named, independently activatable consensus rule change. Created once at
/// parameter-set construction and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub id: DeploymentId,
    pub bit: u8,
    /// Blocks per signaling round.
    pub round_size: u32,
    pub start_height: u32,
    /// Rounds between threshold evaluations.
    pub voting_period_rounds: u32,
    /// Rounds after which unresolved voting is abandoned.
    pub max_voting_rounds: u32,
    /// Rounds between lock-in and enforcement.
    pub grace_period_rounds: u32,
    /// Activate unconditionally from `start_height`, bypassing voting.
    pub force_active: bool,
    pub miner_threshold: VoteThreshold,
    pub node_threshold: VoteThreshold,
    /// Historically known activation height, short-circuiting recomputation.
    pub fixed_activation_height: Option<u32>,
}

impl Deployment {
    /// Compute the deployment's state as seen from the view's tip height.
    /// Pure over the deployment definition and the supplied chain state.
    pub fn state_at(&self, view: &dyn BlockIndexView) -> DeploymentState {
        let height = view.height();

        if self.force_active {
            return if height >= self.start_height {
                DeploymentState::ForcedActive
            } else {
                DeploymentState::Defined
            };
        }
        if let Some(fixed) = self.fixed_activation_height {
            if height >= fixed {
                return DeploymentState::Active;
            }
        }
        if height < self.start_height {
            return DeploymentState::Defined;
        }

        let completed_rounds = (height - self.start_height) / self.round_size;
        let cadence = self.voting_period_rounds.max(1);

        let mut miner_run = 0u32;
        let mut node_run = 0u32;
        for round in 0..completed_rounds.min(self.max_voting_rounds) {
            let round_start = self.start_height + round * self.round_size;
            let miner = view.miner_support(self.bit, round_start, self.round_size);
            let node = view.node_support(self.id, round_start, self.round_size);
            miner_run = if miner >= self.miner_threshold.fast_percent {
                miner_run + 1
            } else {
                0
            };
            node_run = if node >= self.node_threshold.fast_percent {
                node_run + 1
            } else {
                0
            };

            if (round + 1) % cadence != 0 {
                continue;
            }
            let miner_clears = miner >= self.miner_threshold.pass_percent
                || miner_run >= self.miner_threshold.min_rounds;
            let node_clears = node >= self.node_threshold.pass_percent
                || node_run >= self.node_threshold.min_rounds;
            if miner_clears && node_clears {
                let rounds_to_active = round + 1 + self.grace_period_rounds;
                let active_height = self.start_height + rounds_to_active * self.round_size;
                return if height >= active_height {
                    DeploymentState::Active
                } else {
                    DeploymentState::LockedIn
                };
            }
        }

        if completed_rounds >= self.max_voting_rounds {
            // Voting window exhausted without lock-in.
            DeploymentState::Defined
        } else {
            DeploymentState::Voting
        }
    }

    pub fn is_active(&self, view: &dyn BlockIndexView) -> bool {
        self.state_at(view).is_active()
    }
}

/// All deployments registered for one network, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DeploymentRegistry {
    deployments: BTreeMap<DeploymentId, Deployment>,
}

impl DeploymentRegistry {
    pub fn new() -> DeploymentRegistry {
        DeploymentRegistry::default()
    }

    pub fn add(&mut self, deployment: Deployment) {
        self.deployments.insert(deployment.id, deployment);
    }

    pub fn get(&self, id: DeploymentId) -> Option<&Deployment> {
        self.deployments.get(&id)
    }

    /// Absence of a registration is a normal "not active" result, not an
    /// error.
    pub fn is_active(&self, id: DeploymentId, view: &dyn BlockIndexView) -> bool {
        self.get(id).map(|d| d.is_active(view)).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deployment> {
        self.deployments.values()
    }

    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-support chain view for tests: every round reports the same
    /// miner/node percentages.
    struct FlatView {
        height: u32,
        miner: u8,
        node: u8,
    }

    impl BlockIndexView for FlatView {
        fn height(&self) -> u32 {
            self.height
        }
        fn miner_support(&self, _bit: u8, _round_start: u32, _round_size: u32) -> u8 {
            self.miner
        }
        fn node_support(&self, _id: DeploymentId, _round_start: u32, _round_size: u32) -> u8 {
            self.node
        }
    }

    fn mainnet_style_v17() -> Deployment {
        Deployment {
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
            fixed_activation_height: None,
        }
    }

    #[test]
    fn defined_below_start_height() {
        let d = mainnet_style_v17();
        for height in [0, 100_000, 419_327] {
            let view = FlatView { height, miner: 100, node: 100 };
            assert_eq!(d.state_at(&view), DeploymentState::Defined);
        }
    }

    #[test]
    fn pass_threshold_locks_in_then_grace_then_active() {
        let d = mainnet_style_v17();

        // Mid-first-round: still voting.
        let view = FlatView { height: 419_328 + 100, miner: 85, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Voting);

        // First round complete at 85% miner support: locked in, grace runs.
        let view = FlatView { height: 419_328 + 4032, miner: 85, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::LockedIn);

        // One grace round later the rules are enforced.
        let view = FlatView { height: 427_392, miner: 85, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Active);
        assert!(d.is_active(&view));
    }

    #[test]
    fn sustained_fast_threshold_locks_in() {
        // 70% misses pass_percent (80) but sustains fast_percent (60) for
        // the required 5 consecutive rounds.
        let mut d = mainnet_style_v17();
        d.max_voting_rounds = 10;

        let view = FlatView { height: 419_328 + 4 * 4032, miner: 70, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Voting);

        let view = FlatView { height: 419_328 + 5 * 4032, miner: 70, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::LockedIn);

        let view = FlatView { height: 419_328 + 6 * 4032, miner: 70, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Active);
    }

    #[test]
    fn both_thresholds_must_clear() {
        let mut d = mainnet_style_v17();
        d.node_threshold = VoteThreshold::new(85, 85, 1);

        // Miners clear, nodes do not.
        let view = FlatView { height: 419_328 + 4032, miner: 90, node: 50 };
        assert_eq!(d.state_at(&view), DeploymentState::Voting);

        // Both clear.
        let view = FlatView { height: 419_328 + 4032, miner: 90, node: 90 };
        assert_eq!(d.state_at(&view), DeploymentState::LockedIn);
    }

    #[test]
    fn voting_abandoned_after_max_rounds() {
        let d = mainnet_style_v17();
        let view = FlatView { height: 419_328 + 3 * 4032, miner: 10, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Defined);
        // And it stays that way arbitrarily far out.
        let view = FlatView { height: 10_000_000, miner: 10, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Defined);
    }

    #[test]
    fn forced_deployment_skips_voting() {
        let mut d = mainnet_style_v17();
        d.force_active = true;
        let view = FlatView { height: 419_327, miner: 0, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Defined);
        let view = FlatView { height: 419_328, miner: 0, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::ForcedActive);
        assert!(d.is_active(&view));
    }

    #[test]
    fn fixed_activation_height_short_circuits() {
        let mut d = mainnet_style_v17();
        d.fixed_activation_height = Some(427_392);
        // Zero support everywhere, yet active from the recorded height.
        let view = FlatView { height: 427_391, miner: 0, node: 0 };
        assert!(!d.is_active(&view));
        let view = FlatView { height: 427_392, miner: 0, node: 0 };
        assert!(d.is_active(&view));
    }

    #[test]
    fn evaluation_cadence_respects_voting_period() {
        // With a 7-round cadence, support in round 0 alone cannot lock in
        // before round 7 completes.
        let d = Deployment {
            id: DeploymentId::RoundVoting,
            bit: 1,
            round_size: 720,
            start_height: 27_360,
            voting_period_rounds: 7,
            max_voting_rounds: 365,
            grace_period_rounds: 7,
            force_active: false,
            miner_threshold: VoteThreshold::new(85, 85, 1),
            node_threshold: VoteThreshold::open(),
            fixed_activation_height: None,
        };
        let view = FlatView { height: 27_360 + 6 * 720, miner: 100, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Voting);

        let view = FlatView { height: 27_360 + 7 * 720, miner: 100, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::LockedIn);

        let view = FlatView { height: 27_360 + 14 * 720, miner: 100, node: 0 };
        assert_eq!(d.state_at(&view), DeploymentState::Active);
    }

    #[test]
    fn activation_is_monotonic() {
        let mut d = mainnet_style_v17();
        d.max_voting_rounds = 50;
        let mut was_active = false;
        for height in (419_000..460_000).step_by(97) {
            let view = FlatView { height, miner: 85, node: 0 };
            let active = d.is_active(&view);
            assert!(!was_active || active, "deactivated at height {}", height);
            was_active = active;
        }
        assert!(was_active);
    }

    #[test]
    fn registry_returns_false_for_unregistered() {
        let registry = DeploymentRegistry::new();
        let view = FlatView { height: 1_000_000, miner: 100, node: 100 };
        assert!(!registry.is_active(DeploymentId::Quorums200_8, &view));
    }

    #[test]
    fn registry_dispatches_by_id() {
        let mut registry = DeploymentRegistry::new();
        let mut forced = mainnet_style_v17();
        forced.force_active = true;
        registry.add(forced);
        let view = FlatView { height: 500_000, miner: 0, node: 0 };
        assert!(registry.is_active(DeploymentId::V17, &view));
        assert!(!registry.is_active(DeploymentId::RoundVoting, &view));
    }
}
