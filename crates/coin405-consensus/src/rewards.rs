//! Subsidy and payment schedule helpers.

use crate::error::{ParamsError, ParamsResult};
use crate::params::ConsensusParams;
use crate::schedule::HeightSchedule;
use coin405_primitives::Amount;

/// Block subsidy for the block following `prev_height`.
///
/// The premine subsidy applies at and below the premine height; afterwards
/// the initial subsidy halves every `subsidy_halving_interval` blocks and
/// reaches zero after 64 halvings. Dev networks may multiply the early
/// subsidy through the high-subsidy override.
pub fn block_subsidy(prev_height: u32, params: &ConsensusParams) -> Amount {
    let height = prev_height + 1;
    if params.premine_subsidy > 0 && height <= params.premine_height {
        return params.premine_subsidy;
    }
    let halvings = height / params.subsidy_halving_interval;
    if halvings >= 64 {
        return 0;
    }
    let mut subsidy = params.initial_subsidy >> halvings;
    if height <= params.high_subsidy_blocks {
        subsidy *= params.high_subsidy_factor as Amount;
    }
    subsidy
}

/// Height-scheduled founder/development fee.
#[derive(Debug, Clone)]
pub struct FounderPayment {
    shares: HeightSchedule<u8>,
    start_height: u32,
    address: Option<&'static str>,
}

impl FounderPayment {
    pub fn new(
        shares: HeightSchedule<u8>,
        start_height: u32,
        address: Option<&'static str>,
    ) -> FounderPayment {
        FounderPayment {
            shares,
            start_height,
            address,
        }
    }

    /// The founder share of `block_reward` at `height`; zero before the
    /// schedule starts.
    pub fn payment_at(&self, height: u32, block_reward: Amount) -> Amount {
        if height < self.start_height {
            return 0;
        }
        block_reward * self.shares.value_at(height) as Amount / 100
    }

    pub fn start_height(&self) -> u32 {
        self.start_height
    }

    pub fn address(&self) -> Option<&'static str> {
        self.address
    }
}

/// Collateral tiers and the confirmations required to activate them.
#[derive(Debug, Clone)]
pub struct SmartnodeCollaterals {
    tiers: HeightSchedule<Amount>,
    confirmations: HeightSchedule<u32>,
}

impl SmartnodeCollaterals {
    pub fn new(
        tiers: HeightSchedule<Amount>,
        confirmations: HeightSchedule<u32>,
    ) -> SmartnodeCollaterals {
        SmartnodeCollaterals {
            tiers,
            confirmations,
        }
    }

    pub fn required_collateral(&self, height: u32) -> Amount {
        self.tiers.value_at(height)
    }

    pub fn required_confirmations(&self, height: u32) -> u32 {
        self.confirmations.value_at(height)
    }

    /// Whether `amount` is an acceptable collateral at `height`: the tier in
    /// force, or any earlier tier a still-registered smartnode bonded under.
    pub fn is_valid_collateral(&self, height: u32, amount: Amount) -> bool {
        if self.tiers.value_at(height) == amount {
            return true;
        }
        self.tiers
            .entries()
            .iter()
            .any(|(threshold, tier)| *threshold <= height && *tier == amount)
    }
}

/// How a future-transaction reward splits between constituencies. The three
/// shares must cover the whole reward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FutureRewardShare {
    pub smartnode: f64,
    pub miner: f64,
    pub founder: f64,
}

impl FutureRewardShare {
    pub fn new(smartnode: f64, miner: f64, founder: f64) -> ParamsResult<FutureRewardShare> {
        let sum = smartnode + miner + founder;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ParamsError::config(
                "future_reward_share",
                format!("shares sum to {}, expected 1.0", sum),
            ));
        }
        Ok(FutureRewardShare {
            smartnode,
            miner,
            founder,
        })
    }
}
