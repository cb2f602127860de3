use crate::{
    explorer::{Mode, RunOutcome, SweepRecord},
    settings::Settings,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DseResult {
    pub settings: Option<Settings>,
    pub mode: Option<Mode>,
    pub outcome: Option<RunOutcome>,
    pub sweep_records: Vec<SweepRecord>,
    pub stats: Option<DseStatistics>,
}

impl DseResult {
    pub fn new() -> Self {
        DseResult {
            settings: None,
            mode: None,
            outcome: None,
            sweep_records: Vec::new(),
            stats: None,
        }
    }
}

impl Default for DseResult {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct DseStatistics {
    pub evaluated_points: usize,
    pub simulation_time: String,
}

impl DseStatistics {
    pub fn new(evaluated_points: usize, elapsed_secs: u64) -> Self {
        let seconds = elapsed_secs % 60;
        let minutes = (elapsed_secs / 60) % 60;
        let hours = (elapsed_secs / 60) / 60;
        DseStatistics {
            evaluated_points,
            simulation_time: format!("{}:{}:{}", hours, minutes, seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_time() {
        let stats = DseStatistics::new(3, 3725);
        assert_eq!(stats.simulation_time, "1:2:5");
        assert_eq!(stats.evaluated_points, 3);
    }
}
