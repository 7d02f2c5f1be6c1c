//! Process-wide access to the selected parameter set.
//!
//! Core logic takes `&ConsensusParams` (or the selector) by reference; the
//! one "current chain" pointer lives here, in the composition root, and is
//! set exactly once. Re-selecting mid-run is rejected.

use anyhow::{anyhow, Result};
use coin405_consensus::deployments::{BlockIndexView, DeploymentId};
use coin405_consensus::params::ConsensusParams;
use coin405_consensus::quorums::{QuorumCensus, QuorumSelector};
use std::sync::OnceLock;

/// The selected parameter set plus its live quorum selector.
pub struct ChainContext {
    params: ConsensusParams,
    quorums: QuorumSelector,
}

impl ChainContext {
    fn new(params: ConsensusParams) -> ChainContext {
        let quorums = QuorumSelector::new(params.network, params.llmqs.clone());
        ChainContext { params, quorums }
    }

    /// The immutable parameter bundle. Safe for concurrent reads.
    pub fn active_parameters(&self) -> &ConsensusParams {
        &self.params
    }

    /// The live quorum-profile selector.
    pub fn quorums(&self) -> &QuorumSelector {
        &self.quorums
    }

    /// Whether a deployment is active as seen from the supplied chain view.
    pub fn is_deployment_active(&self, id: DeploymentId, view: &dyn BlockIndexView) -> bool {
        self.params.deployments.is_active(id, view)
    }

    /// Feed a fresh smartnode census into the quorum selector.
    pub fn reconcile_quorums(&self, census: &QuorumCensus, view: &dyn BlockIndexView) {
        self.quorums.reconcile(census, &self.params.deployments, view);
    }
}

static ACTIVE: OnceLock<ChainContext> = OnceLock::new();

/// Install the selected parameters as the process-wide context. Selection is
/// one-shot: a second call fails rather than silently re-pointing consumers
/// at a different chain.
pub fn install(params: ConsensusParams) -> Result<&'static ChainContext> {
    let network = params.network;
    match ACTIVE.set(ChainContext::new(params)) {
        Ok(()) => Ok(ACTIVE.get().expect("context was just installed")),
        Err(_) => Err(anyhow!(
            "consensus parameters already selected; refusing to re-select as {}",
            network
        )),
    }
}

/// The installed context, if selection has happened.
pub fn active() -> Option<&'static ChainContext> {
    ACTIVE.get()
}
