//! Long-living masternode quorum (LLMQ) profiles.
//!
//! A role (the key block-processing code asks for) is distinct from the
//! profile currently backing it: the adaptive selector swaps profiles under
//! a role as the smartnode census grows or shrinks.

/// Quorum roles a network assigns profiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LlmqType {
    /// General purpose: instant-send locks, platform signing fallback.
    Llmq50_60,
    /// Chain locks.
    Llmq400_60,
    /// Chain locks, high-security variant.
    Llmq400_85,
    /// Platform quorums.
    Llmq100_67,
}

impl LlmqType {
    pub const ALL: [LlmqType; 4] = [
        LlmqType::Llmq50_60,
        LlmqType::Llmq400_60,
        LlmqType::Llmq400_85,
        LlmqType::Llmq100_67,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LlmqType::Llmq50_60 => "llmq_50_60",
            LlmqType::Llmq400_60 => "llmq_400_60",
            LlmqType::Llmq400_85 => "llmq_400_85",
            LlmqType::Llmq100_67 => "llmq_100_67",
        }
    }
}

/// Size and DKG scheduling parameters for one quorum profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmqProfile {
    pub name: &'static str,
    /// Member count the DKG aims for.
    pub size: u32,
    /// Minimum members for a valid quorum.
    pub min_size: u32,
    /// Signature shares required to recover a threshold signature.
    pub threshold: u32,
    /// Blocks between DKG sessions for this quorum type.
    pub dkg_interval: u32,
    /// Blocks per DKG protocol phase.
    pub dkg_phase_blocks: u32,
    /// First block of the commitment mining window, relative to the interval.
    pub dkg_mining_window_start: u32,
    /// Last block of the commitment mining window, relative to the interval.
    pub dkg_mining_window_end: u32,
    /// Bad votes before a member is marked for exclusion.
    pub dkg_bad_votes_threshold: u32,
    /// Recent quorums kept active for signing sessions.
    pub signing_active_quorum_count: u32,
    /// Old quorum connections kept alive after rotation.
    pub keep_old_connections: u32,
}

impl LlmqProfile {
    /// True while `height` sits inside this profile's DKG commitment mining
    /// window. Swapping sizes inside the window would desynchronize a DKG
    /// round already in flight.
    pub fn in_mining_window(&self, height: u32) -> bool {
        let phase = height % self.dkg_interval;
        phase >= self.dkg_mining_window_start && phase <= self.dkg_mining_window_end
    }
}

pub const LLMQ_3_60: LlmqProfile = LlmqProfile {
    name: "llmq_3_60",
    size: 3,
    min_size: 2,
    threshold: 2,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 2,
    signing_active_quorum_count: 2,
    keep_old_connections: 3,
};

pub const LLMQ_5_60: LlmqProfile = LlmqProfile {
    name: "llmq_5_60",
    size: 5,
    min_size: 4,
    threshold: 3,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 4,
    signing_active_quorum_count: 2,
    keep_old_connections: 3,
};

pub const LLMQ_5_85: LlmqProfile = LlmqProfile {
    name: "llmq_5_85",
    size: 5,
    min_size: 5,
    threshold: 4,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 4,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_10_60: LlmqProfile = LlmqProfile {
    name: "llmq_10_60",
    size: 10,
    min_size: 8,
    threshold: 6,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 8,
    signing_active_quorum_count: 2,
    keep_old_connections: 3,
};

pub const LLMQ_20_60: LlmqProfile = LlmqProfile {
    name: "llmq_20_60",
    size: 20,
    min_size: 15,
    threshold: 12,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 15,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_20_85: LlmqProfile = LlmqProfile {
    name: "llmq_20_85",
    size: 20,
    min_size: 18,
    threshold: 17,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 15,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_40_60: LlmqProfile = LlmqProfile {
    name: "llmq_40_60",
    size: 40,
    min_size: 30,
    threshold: 24,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 30,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_40_85: LlmqProfile = LlmqProfile {
    name: "llmq_40_85",
    size: 40,
    min_size: 35,
    threshold: 34,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 30,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_50_60: LlmqProfile = LlmqProfile {
    name: "llmq_50_60",
    size: 50,
    min_size: 40,
    threshold: 30,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 40,
    signing_active_quorum_count: 24,
    keep_old_connections: 25,
};

pub const LLMQ_200_60: LlmqProfile = LlmqProfile {
    name: "llmq_200_60",
    size: 200,
    min_size: 150,
    threshold: 120,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 150,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_200_85: LlmqProfile = LlmqProfile {
    name: "llmq_200_85",
    size: 200,
    min_size: 175,
    threshold: 170,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 150,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_400_60: LlmqProfile = LlmqProfile {
    name: "llmq_400_60",
    size: 400,
    min_size: 300,
    threshold: 240,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 300,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_400_85: LlmqProfile = LlmqProfile {
    name: "llmq_400_85",
    size: 400,
    min_size: 350,
    threshold: 340,
    dkg_interval: 288,
    dkg_phase_blocks: 4,
    dkg_mining_window_start: 20,
    dkg_mining_window_end: 28,
    dkg_bad_votes_threshold: 300,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

pub const LLMQ_100_67_MAINNET: LlmqProfile = LlmqProfile {
    name: "llmq_100_67",
    size: 100,
    min_size: 80,
    threshold: 67,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 80,
    signing_active_quorum_count: 24,
    keep_old_connections: 25,
};

pub const LLMQ_100_67_TESTNET: LlmqProfile = LlmqProfile {
    name: "llmq_100_67",
    size: 100,
    min_size: 80,
    threshold: 67,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 80,
    signing_active_quorum_count: 4,
    keep_old_connections: 5,
};

/// Diagnostic low profile: a wide member pool with a trivial threshold so
/// quorums form on test rigs with a handful of nodes.
pub const LLMQ_200_2: LlmqProfile = LlmqProfile {
    name: "llmq_200_2",
    size: 200,
    min_size: 2,
    threshold: 2,
    dkg_interval: 24,
    dkg_phase_blocks: 2,
    dkg_mining_window_start: 10,
    dkg_mining_window_end: 18,
    dkg_bad_votes_threshold: 2,
    signing_active_quorum_count: 2,
    keep_old_connections: 3,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mining_window_is_interval_relative() {
        let p = LLMQ_50_60; // interval 24, window 10..=18
        assert!(!p.in_mining_window(0));
        assert!(!p.in_mining_window(9));
        assert!(p.in_mining_window(10));
        assert!(p.in_mining_window(18));
        assert!(!p.in_mining_window(19));
        // Wraps every interval.
        assert!(p.in_mining_window(24 + 10));
        assert!(!p.in_mining_window(24 + 19));
        assert!(p.in_mining_window(10 + 24 * 1000));
    }

    #[test]
    fn profile_invariants() {
        for p in [
            LLMQ_3_60, LLMQ_5_60, LLMQ_5_85, LLMQ_10_60, LLMQ_20_60, LLMQ_20_85,
            LLMQ_40_60, LLMQ_40_85, LLMQ_50_60, LLMQ_200_60, LLMQ_200_85,
            LLMQ_400_60, LLMQ_400_85, LLMQ_100_67_MAINNET, LLMQ_100_67_TESTNET,
            LLMQ_200_2,
        ] {
            assert!(p.threshold <= p.min_size, "{}", p.name);
            assert!(p.min_size <= p.size, "{}", p.name);
            assert!(p.dkg_mining_window_start < p.dkg_mining_window_end, "{}", p.name);
            assert!(p.dkg_mining_window_end < p.dkg_interval, "{}", p.name);
        }
    }

    #[test]
    fn role_names_are_stable() {
        assert_eq!(LlmqType::Llmq50_60.name(), "llmq_50_60");
        assert_eq!(LlmqType::Llmq400_85.name(), "llmq_400_85");
        assert_eq!(LlmqType::ALL.len(), 4);
    }
}
