use enum_as_inner::EnumAsInner;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use super::{
    configuration::Configuration,
    engine::{AnalysisResult, CostEngine},
    mode::Mode,
    noc::{build_fixed, build_sweep_top_only, NocLevel},
    run_log::RunLog,
    sink::{ResultPolicy, ResultSink, SweepRecord},
    sweep::SweepSpec,
};
use crate::{error::DseError, settings::Settings};

/// # Description
/// what a run produced
/// * `Fixed` holds the single analysis result
/// * `Sweep` holds the number of evaluated points, the results went to the sink
#[derive(Debug, Serialize, EnumAsInner)]
pub enum RunOutcome {
    Fixed(AnalysisResult),
    Sweep(usize),
}

/// # Description
/// drives one design space exploration run
/// - resolves the mode once from the sweep flags
/// - builds one configuration per point and hands it to the engine
/// # Fields
/// * `settings`: the validated settings of the run
/// * `engine`: the cost engine, shared with the workers of a parallel sweep
#[derive(Debug)]
pub struct Explorer<'a, E: CostEngine> {
    settings: &'a Settings,
    engine: &'a E,
}

impl<'a, E: CostEngine> Explorer<'a, E> {
    pub fn new(settings: &'a Settings, engine: &'a E) -> Self {
        Explorer { settings, engine }
    }

    /// # Description
    /// - write the run header to the run log
    /// - dispatch on the mode
    /// - the run log is left open, the caller closes it
    pub fn run(
        &self,
        run_log: &mut RunLog,
        sink: &mut dyn ResultSink,
    ) -> Result<RunOutcome, DseError> {
        let mode = self.settings.mode();
        run_log.line(format!("num_pes: {}", self.settings.device.num_pes))?;
        // flags as 0/1
        run_log.line(format!("bw_sweep:{}", self.settings.sweep.bw_sweep as u8))?;
        run_log.line(format!("top_bw_only:{}", self.settings.sweep.top_bw_only as u8))?;
        info!("running in {:?} mode", mode);

        match mode {
            Mode::FixedSingle => Ok(RunOutcome::Fixed(self.run_fixed(run_log)?)),
            Mode::BandwidthSweepTopOnly => {
                let spec = self.settings.sweep_spec()?;
                let points = if self.settings.sweep.parallel {
                    self.run_sweep_parallel(&spec, run_log, sink)?
                } else {
                    self.run_sweep(&spec, run_log, sink)?
                };
                Ok(RunOutcome::Sweep(points))
            }
        }
    }

    /// the configuration of the fixed run
    pub fn fixed_configuration(&self) -> Configuration {
        let noc = &self.settings.noc;
        let levels = build_fixed(self.settings.device.bandwidth, noc.hop_latency, noc.hops);
        self.assemble(&levels)
    }

    /// the configuration of one sweep point
    pub fn sweep_configuration(&self, top_bandwidth: u64) -> Configuration {
        let noc = &self.settings.noc;
        let levels =
            build_sweep_top_only(top_bandwidth, noc.hop_latency, noc.hops, noc.multicast);
        self.assemble(&levels)
    }

    fn assemble(&self, levels: &[NocLevel]) -> Configuration {
        let config = Configuration::assemble(
            &self.settings.dataflow_path,
            &self.settings.hardware_path,
            levels,
            &self.settings.device,
        );
        debug!("assembled: {}", config.summary());
        config
    }

    fn run_fixed(&self, run_log: &mut RunLog) -> Result<AnalysisResult, DseError> {
        let config = self.fixed_configuration();
        run_log.line(format!("config:{}", config.summary()))?;
        self.engine.analyze(&config, self.settings.report)
    }

    /// # Description
    /// evaluate the points one after the other, each point finishes before the next starts
    /// # Return
    /// the number of evaluated points
    pub fn run_sweep(
        &self,
        spec: &SweepSpec,
        run_log: &mut RunLog,
        sink: &mut dyn ResultSink,
    ) -> Result<usize, DseError> {
        let report = self.settings.report.for_sweep_point();
        let mut points = 0;
        for bandwidth in spec.enumerate() {
            info!("evaluating top bandwidth {}", bandwidth);
            run_log.line(format!("sweep_bw:{}", bandwidth))?;
            let config = self.sweep_configuration(bandwidth);
            let result = self.engine.analyze(&config, report)?;
            sink.record(SweepRecord { bandwidth, result });
            points += 1;
        }
        Ok(points)
    }

    /// # Description
    /// - same points and configurations as [`Explorer::run_sweep`], evaluated on a rayon pool
    /// - the sink still sees the records in enumeration order
    /// - the first failing point fails the whole sweep and nothing is recorded
    pub fn run_sweep_parallel(
        &self,
        spec: &SweepSpec,
        run_log: &mut RunLog,
        sink: &mut dyn ResultSink,
    ) -> Result<usize, DseError> {
        let report = self.settings.report.for_sweep_point();
        let bandwidths: Vec<u64> = spec.enumerate().collect();
        for bandwidth in &bandwidths {
            run_log.line(format!("sweep_bw:{}", bandwidth))?;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.sweep.threads)
            .build()?;
        info!(
            "evaluating {} points on {} threads",
            bandwidths.len(),
            pool.current_num_threads()
        );

        let records = pool.install(|| {
            bandwidths
                .par_iter()
                .map(|&bandwidth| {
                    let config = self.sweep_configuration(bandwidth);
                    let result = self.engine.analyze(&config, report)?;
                    Ok(SweepRecord { bandwidth, result })
                })
                .collect::<Result<Vec<_>, DseError>>()
        })?;

        let points = records.len();
        for record in records {
            sink.record(record);
        }
        Ok(points)
    }
}

/// warn when a sweep throws its results away
pub fn warn_discarded(settings: &Settings) {
    if settings.mode() == Mode::BandwidthSweepTopOnly
        && settings.sweep.results == ResultPolicy::Discard
    {
        warn!("sweep results are discarded, only the engine's own reports remain");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::{engine::DryRunEngine, sink::Discard};
    use config::Value;

    fn settings(overrides: Vec<(&str, Value)>) -> Settings {
        Settings::new(
            vec!["configs/default.toml".into()],
            overrides
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_configuration() {
        let settings = settings(vec![]);
        let explorer = Explorer::new(&settings, &DryRunEngine);
        let config = explorer.fixed_configuration();
        assert_eq!(config.noc_levels().len(), 4);
        assert_eq!(config.bandwidths(), vec![settings.device.bandwidth; 4]);
        assert_eq!(
            config.latencies(),
            vec![settings.noc.hop_latency * settings.noc.hops; 4]
        );
    }

    #[test]
    fn test_sweep_configuration() {
        let settings = settings(vec![("noc.multicast", Value::from(false))]);
        let explorer = Explorer::new(&settings, &DryRunEngine);
        let config = explorer.sweep_configuration(42);
        assert_eq!(config.noc_levels().len(), 6);
        assert_eq!(config.bandwidths()[0], 42);
        assert!(!config.multicast_flags()[0]);
        assert_eq!(config.bandwidths()[1..], [70000; 5]);
    }

    #[test]
    fn test_parallel_matches_sequential() -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all("output")?;
        let settings = settings(vec![
            ("sweep.bw_sweep", Value::from(true)),
            ("sweep.top_bw_only", Value::from(true)),
            ("sweep.min_bw", Value::from(4i64)),
            ("sweep.max_bw", Value::from(30i64)),
            ("sweep.tick", Value::from(4i64)),
            ("sweep.threads", Value::from(3i64)),
        ]);
        let explorer = Explorer::new(&settings, &DryRunEngine);
        let spec = settings.sweep_spec()?;

        let mut run_log = RunLog::open("output/test_driver_seq.log")?;
        let mut sequential: Vec<SweepRecord> = Vec::new();
        explorer.run_sweep(&spec, &mut run_log, &mut sequential)?;
        run_log.close()?;

        let mut run_log = RunLog::open("output/test_driver_par.log")?;
        let mut parallel: Vec<SweepRecord> = Vec::new();
        explorer.run_sweep_parallel(&spec, &mut run_log, &mut parallel)?;
        run_log.close()?;

        assert_eq!(sequential.len(), 7);
        assert_eq!(sequential, parallel);
        assert_eq!(
            std::fs::read_to_string("output/test_driver_seq.log")?,
            std::fs::read_to_string("output/test_driver_par.log")?
        );
        Ok(())
    }

    #[test]
    fn test_discard_sink() -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all("output")?;
        let settings = settings(vec![
            ("sweep.bw_sweep", Value::from(true)),
            ("sweep.top_bw_only", Value::from(true)),
        ]);
        let explorer = Explorer::new(&settings, &DryRunEngine);
        let mut run_log = RunLog::open("output/test_driver_discard.log")?;
        let outcome = explorer.run(&mut run_log, &mut Discard)?;
        run_log.close()?;
        assert_eq!(outcome.as_sweep(), Some(&settings.sweep_spec()?.len()));
        Ok(())
    }
}
