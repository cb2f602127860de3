//! derive the per level NoC parameters
//!
//! level 0 is the link facing the compute array, higher levels are farther away
//! (buffers, then off-chip).

use serde::{Deserialize, Serialize};

/// number of levels of a fixed configuration
pub const FIXED_LEVELS: usize = 4;
/// number of levels of a top-only sweep configuration
pub const SWEEP_LEVELS: usize = 6;

/// bandwidth of the levels that are not swept, large enough to never be the bottleneck
pub const UNCONSTRAINED_BANDWIDTH: u64 = 70000;
/// latency of the levels that are not swept
pub const UNCONSTRAINED_LATENCY: u64 = 1;

/// # Description
/// the link characteristics of one hierarchy level
/// # Fields
/// * `bandwidth`: transfer units per cycle
/// * `latency`: cycles
/// * `multicast`: whether one transfer may reach several destinations in this level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NocLevel {
    pub bandwidth: u64,
    pub latency: u64,
    pub multicast: bool,
}

impl NocLevel {
    pub fn new(bandwidth: u64, latency: u64, multicast: bool) -> Self {
        NocLevel {
            bandwidth,
            latency,
            multicast,
        }
    }
}

/// # Description
/// - a uniform fabric: every level gets the same bandwidth and `hop_latency * hops` latency
/// - multicast is enabled on every level
pub fn build_fixed(bandwidth: u64, hop_latency: u64, hops: u64) -> [NocLevel; FIXED_LEVELS] {
    [NocLevel::new(bandwidth, hop_latency * hops, true); FIXED_LEVELS]
}

/// # Description
/// - only level 0 carries the swept bandwidth, the hop latency and the given multicast flag
/// - levels 1 to 5 are over provisioned so they never limit the result
pub fn build_sweep_top_only(
    top_bandwidth: u64,
    hop_latency: u64,
    hops: u64,
    multicast: bool,
) -> [NocLevel; SWEEP_LEVELS] {
    let mut levels =
        [NocLevel::new(UNCONSTRAINED_BANDWIDTH, UNCONSTRAINED_LATENCY, true); SWEEP_LEVELS];
    levels[0] = NocLevel::new(top_bandwidth, hop_latency * hops, multicast);
    levels
}
