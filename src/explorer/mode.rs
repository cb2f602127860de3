use serde::{Deserialize, Serialize};

/// # Description
/// how a run explores the design space
/// * `FixedSingle` evaluates one configuration where every NoC level shares the same link
/// * `BandwidthSweepTopOnly` sweeps the compute facing bandwidth, the rest of the hierarchy is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    FixedSingle,
    BandwidthSweepTopOnly,
}

impl Mode {
    /// # Description
    /// - resolve the mode from the two run flags
    /// - the sweep is selected only when both flags are set
    pub fn select(bw_sweep: bool, top_bw_only: bool) -> Self {
        match (bw_sweep, top_bw_only) {
            (true, true) => Mode::BandwidthSweepTopOnly,
            (true, false) | (false, true) | (false, false) => Mode::FixedSingle,
        }
    }
}
