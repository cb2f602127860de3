use config::{Config, File, Value};
use serde::{Deserialize, Serialize};
use std::string::String;

use crate::{
    error::DseError,
    explorer::{DeviceGeometry, Mode, ReportFlags, ResultPolicy, SweepSpec},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub dataflow_path: String,
    pub hardware_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_run_log_path")]
    pub run_log_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    pub device: DeviceGeometry,
    pub noc: NocSettings,
    pub sweep: SweepSettings,
    #[serde(default)]
    pub report: ReportFlags,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NocSettings {
    pub hop_latency: u64,
    pub hops: u64,
    #[serde(default = "default_true")]
    pub multicast: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSettings {
    pub bw_sweep: bool,
    #[serde(default)]
    pub top_bw_only: bool,
    pub min_bw: u64,
    pub max_bw: u64,
    pub tick: u64,
    #[serde(default)]
    pub parallel: bool,
    /// 0 lets rayon pick
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub results: ResultPolicy,
}

/// # Description
/// the external analyzer, when `command` is missing the dry run engine is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_run_log_path() -> String {
    "output.log".into()
}

fn default_output_dir() -> String {
    "output".into()
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// # Description
    /// - merge the files in order, later files win
    /// - the overrides are applied on top of every file
    pub fn new(config_path: Vec<String>, overrides: Vec<(String, Value)>) -> Result<Self, DseError> {
        let mut builder = Config::builder();
        for i in config_path {
            builder = builder.add_source(File::with_name(&i));
        }
        for (key, value) in overrides {
            builder = builder.set_override(key, value)?;
        }
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn mode(&self) -> Mode {
        Mode::select(self.sweep.bw_sweep, self.sweep.top_bw_only)
    }

    pub fn log_level(&self) -> Result<log::LevelFilter, DseError> {
        self.log_level.parse().map_err(|_| {
            DseError::InvalidSettings(format!("unknown log_level `{}`", self.log_level))
        })
    }

    pub fn sweep_spec(&self) -> Result<SweepSpec, DseError> {
        SweepSpec::new(self.sweep.min_bw, self.sweep.max_bw, self.sweep.tick)
    }

    /// # Description
    /// reject the inputs the driver cannot run with
    /// - every device scalar must be positive
    /// - the link latency `hop_latency * hops` must fit in u64
    /// - in sweep mode the bounds must form a valid sweep starting above 0
    pub fn validate(&self) -> Result<(), DseError> {
        self.log_level()?;
        let DeviceGeometry {
            num_pes,
            num_simd_lanes,
            bandwidth,
            l1_size,
            l2_size,
            offchip_bandwidth,
        } = self.device;
        for (name, value) in [
            ("num_pes", num_pes),
            ("num_simd_lanes", num_simd_lanes),
            ("bandwidth", bandwidth),
            ("l1_size", l1_size),
            ("l2_size", l2_size),
            ("offchip_bandwidth", offchip_bandwidth),
        ] {
            if value == 0 {
                return Err(DseError::InvalidSettings(format!(
                    "device.{} must be positive",
                    name
                )));
            }
        }
        if self.noc.hop_latency.checked_mul(self.noc.hops).is_none() {
            return Err(DseError::InvalidSettings(
                "noc.hop_latency * noc.hops overflows".into(),
            ));
        }
        if self.mode() == Mode::BandwidthSweepTopOnly {
            self.sweep_spec()?;
            if self.sweep.min_bw == 0 {
                return Err(DseError::InvalidSettings(
                    "sweep.min_bw must be positive".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn test_settings() {
        let settings = super::Settings::new(vec!["configs/default.toml".into()], vec![]).unwrap();
        assert_eq!(settings.mode(), Mode::FixedSingle);
        assert_eq!(settings.log_level().unwrap(), log::LevelFilter::Info);
        // serialize settings to json
        let json = serde_json::to_string_pretty(&settings).unwrap();
        println!("{}", json);
    }

    #[test]
    fn test_settings_merge_and_override() {
        let settings = Settings::new(
            vec![
                "configs/default.toml".into(),
                "configs/optional_configs/sweep.toml".into(),
            ],
            vec![
                ("device.num_pes".into(), Value::from(64i64)),
                ("sweep.tick".into(), Value::from(7i64)),
            ],
        )
        .unwrap();
        assert_eq!(settings.mode(), Mode::BandwidthSweepTopOnly);
        assert_eq!(settings.device.num_pes, 64);
        assert_eq!(settings.sweep.tick, 7);
    }

    #[test]
    fn test_zero_tick_rejected_in_sweep_mode() {
        let result = Settings::new(
            vec![
                "configs/default.toml".into(),
                "configs/optional_configs/sweep.toml".into(),
            ],
            vec![("sweep.tick".into(), Value::from(0i64))],
        );
        assert!(matches!(result, Err(DseError::InvalidSweep { .. })));
    }

    #[test]
    fn test_zero_tick_ignored_in_fixed_mode() {
        let result = Settings::new(
            vec!["configs/default.toml".into()],
            vec![("sweep.tick".into(), Value::from(0i64))],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_zero_device_scalar_rejected() {
        let result = Settings::new(
            vec!["configs/default.toml".into()],
            vec![("device.l2_size".into(), Value::from(0i64))],
        );
        assert!(matches!(result, Err(DseError::InvalidSettings(_))));
    }

    #[test]
    fn test_log_level_off() {
        let settings = Settings::new(
            vec!["configs/default.toml".into()],
            vec![("log_level".into(), Value::from("off"))],
        )
        .unwrap();
        assert_eq!(settings.log_level().unwrap(), log::LevelFilter::Off);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let result = Settings::new(
            vec!["configs/default.toml".into()],
            vec![("log_level".into(), Value::from("loud"))],
        );
        assert!(matches!(result, Err(DseError::InvalidSettings(_))));
    }
}
