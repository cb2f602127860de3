//! # Description
//! - this module is the design space exploration core
//! - the main sub module is driver, it ties the other parts together
//! - read driver.rs for more details
//!
//! # Components
//! - mode: pick a fixed run or a top bandwidth sweep from the run flags
//! - noc: derive the per level NoC parameters
//! - configuration: the immutable evaluation point handed to the engine
//! - sweep: the bandwidth points of a sweep
//! - engine: the seam to the external cost analysis engine
//! - sink: where sweep results go
//! - run_log: the run status log
//!

pub(self) mod configuration;
pub(self) mod driver;
pub(self) mod engine;
pub(self) mod mode;
pub(self) mod noc;
pub(self) mod run_log;
pub(self) mod sink;
pub(self) mod sweep;

pub use configuration::{Configuration, DeviceGeometry};
pub use driver::{warn_discarded, Explorer, RunOutcome};
pub use engine::{AnalysisResult, CommandEngine, CostEngine, DryRunEngine, ReportFlags};
pub use mode::Mode;
pub use noc::{
    build_fixed, build_sweep_top_only, NocLevel, FIXED_LEVELS, SWEEP_LEVELS,
    UNCONSTRAINED_BANDWIDTH, UNCONSTRAINED_LATENCY,
};
pub use run_log::RunLog;
pub use sink::{Discard, ResultPolicy, ResultSink, SweepRecord};
pub use sweep::{SweepIter, SweepSpec};
