//! End-to-end selection scenarios across the parameter core.

use coin405_consensus::deployments::{BlockIndexView, DeploymentId};
use coin405_consensus::llmq::LlmqType;
use coin405_consensus::params::{select, ConsensusParams, NetworkId, Overrides};
use coin405_consensus::quorums::{QuorumCensus, QuorumSelector};

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

fn census(count: usize, height: u32) -> QuorumCensus {
    QuorumCensus {
        total_smartnode_count: count,
        height,
        low_profile_override: false,
    }
}

#[test]
fn selection_then_reconciliation_lifecycle() {
    let params = select(NetworkId::Main, &Overrides::default()).unwrap();
    let selector = QuorumSelector::new(params.network, params.llmqs.clone());

    // A young network: three smartnodes at height 100.
    selector.reconcile(&census(3, 100), &params.deployments, &TipView(100));
    assert_eq!(
        selector.profile(LlmqType::Llmq50_60).unwrap().name,
        "llmq_3_60"
    );

    // The census grows past every floor.
    selector.reconcile(&census(650, 200), &params.deployments, &TipView(200));
    assert_eq!(
        selector.profile(LlmqType::Llmq400_60).unwrap().name,
        "llmq_400_60"
    );

    // Out-of-order feed (a disconnect path replaying an old tip): ignored.
    selector.reconcile(&census(3, 150), &params.deployments, &TipView(150));
    assert_eq!(
        selector.profile(LlmqType::Llmq400_60).unwrap().name,
        "llmq_400_60"
    );
}

#[test]
fn v17_history_is_reproduced_on_main() {
    let params = ConsensusParams::main().unwrap();
    // Zero live support: only the recorded activation height applies.
    assert!(!params.deployments.is_active(DeploymentId::V17, &TipView(427_391)));
    assert!(params.deployments.is_active(DeploymentId::V17, &TipView(427_392)));
    assert!(params.deployments.is_active(DeploymentId::V17, &TipView(1_000_000)));
}

#[test]
fn quorum_upgrade_deployment_is_testnet_only() {
    let main = ConsensusParams::main().unwrap();
    let test = ConsensusParams::test().unwrap();
    assert!(main.deployments.get(DeploymentId::Quorums200_8).is_none());
    assert!(test.deployments.get(DeploymentId::Quorums200_8).is_some());
}

#[test]
fn distinct_devnets_from_one_codebase() {
    let a = ConsensusParams::dev(&Overrides {
        devnet_name: Some("alpha".to_string()),
        ..Default::default()
    })
    .unwrap();
    let b = ConsensusParams::dev(&Overrides {
        devnet_name: Some("beta".to_string()),
        ..Default::default()
    })
    .unwrap();

    // Same base genesis, different chained devnet identities.
    assert_eq!(a.genesis_hash, b.genesis_hash);
    assert_ne!(a.devnet_genesis_hash, b.devnet_genesis_hash);
}
