use serde::{Deserialize, Serialize};

use super::engine::AnalysisResult;

/// the result of one sweep point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRecord {
    pub bandwidth: u64,
    pub result: AnalysisResult,
}

/// # Description
/// receives sweep results in enumeration order
pub trait ResultSink {
    fn record(&mut self, record: SweepRecord);
}

/// drops every result
#[derive(Debug, Default)]
pub struct Discard;

impl ResultSink for Discard {
    fn record(&mut self, _record: SweepRecord) {}
}

impl ResultSink for Vec<SweepRecord> {
    fn record(&mut self, record: SweepRecord) {
        self.push(record);
    }
}

/// what to do with the sweep results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultPolicy {
    Collect,
    Discard,
}

impl Default for ResultPolicy {
    fn default() -> Self {
        ResultPolicy::Collect
    }
}
