use std::{
    io::{ErrorKind, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::configuration::Configuration;
use crate::error::DseError;

/// # Description
/// which reports the engine should produce on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportFlags {
    #[serde(default)]
    pub to_screen: bool,
    #[serde(default)]
    pub to_csv: bool,
    #[serde(default)]
    pub to_log_file: bool,
}

impl ReportFlags {
    /// the flags used for every sweep point: the screen flag is kept, csv is always on, no log file
    pub fn for_sweep_point(&self) -> Self {
        ReportFlags {
            to_screen: self.to_screen,
            to_csv: true,
            to_log_file: false,
        }
    }
}

/// # Description
/// whatever the engine reports for one configuration, kept as json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub report: Value,
}

/// # Description
/// the seam to the external cost analysis engine
/// - one call per configuration, blocking
/// - failures are handed back untouched, the driver does not retry
pub trait CostEngine: Sync {
    fn analyze(
        &self,
        config: &Configuration,
        report: ReportFlags,
    ) -> Result<AnalysisResult, DseError>;
}

fn point_of(config: &Configuration) -> String {
    format!("noc_bw=[{}]", config.bandwidths().iter().join(","))
}

/// # Description
/// - used when no engine command is configured
/// - does no analysis, echoes the configuration back
#[derive(Debug, Default)]
pub struct DryRunEngine;

impl CostEngine for DryRunEngine {
    fn analyze(
        &self,
        config: &Configuration,
        report: ReportFlags,
    ) -> Result<AnalysisResult, DseError> {
        debug!("dry run: {}", config.summary());
        Ok(AnalysisResult {
            report: json!({
                "dry_run": true,
                "configuration": config,
                "report": report,
            }),
        })
    }
}

/// # Description
/// run the external analyzer as a child process
/// # Protocol
/// - one json object `{"configuration": ..., "report": ...}` is written to stdin
/// - stdout is the result, parsed as json when possible, otherwise kept as a string
/// - a non zero exit status is an engine failure
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        CommandEngine {
            program: program.into(),
            args,
        }
    }
}

impl CostEngine for CommandEngine {
    fn analyze(
        &self,
        config: &Configuration,
        report: ReportFlags,
    ) -> Result<AnalysisResult, DseError> {
        let request = serde_json::to_vec(&json!({
            "configuration": config,
            "report": report,
        }))?;
        debug!(
            "running {} {:?} for {}",
            self.program.display(),
            self.args,
            point_of(config)
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DseError::Engine {
                point: point_of(config),
                message: format!("cannot start {}: {}", self.program.display(), e),
            })?;
        if let Some(mut stdin) = child.stdin.take() {
            // an engine that exits early closes the pipe, its exit status tells why
            match stdin.write_all(&request) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }
        let output = child.wait_with_output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(DseError::Engine {
                point: point_of(config),
                message: format!("{}: {}", output.status, stderr.trim()),
            });
        }
        if !stderr.trim().is_empty() {
            warn!("engine stderr: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = serde_json::from_str(&stdout)
            .unwrap_or_else(|_| Value::String(stdout.trim().to_string()));
        Ok(AnalysisResult { report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::{configuration::DeviceGeometry, noc::build_fixed};

    fn config() -> Configuration {
        let geometry = DeviceGeometry {
            num_pes: 16,
            num_simd_lanes: 1,
            bandwidth: 16,
            l1_size: 256,
            l2_size: 1024,
            offchip_bandwidth: 8,
        };
        Configuration::assemble("net.m", "hw.m", &build_fixed(16, 1, 1), &geometry)
    }

    #[test]
    fn test_sweep_point_flags() {
        let flags = ReportFlags {
            to_screen: true,
            to_csv: false,
            to_log_file: true,
        };
        assert_eq!(
            flags.for_sweep_point(),
            ReportFlags {
                to_screen: true,
                to_csv: true,
                to_log_file: false,
            }
        );
    }

    #[test]
    fn test_dry_run_echoes_configuration() -> Result<(), DseError> {
        let result = DryRunEngine.analyze(&config(), ReportFlags::default())?;
        assert_eq!(result.report["dry_run"], json!(true));
        assert_eq!(result.report["configuration"]["geometry"]["num_pes"], json!(16));
        Ok(())
    }

    #[test]
    fn test_command_engine_missing_program() {
        let engine = CommandEngine::new("./definitely/not/an/engine", vec![]);
        let result = engine.analyze(&config(), ReportFlags::default());
        assert!(matches!(result, Err(DseError::Engine { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_engine_reads_stdout() -> Result<(), DseError> {
        // cat echoes the request, which is valid json
        let engine = CommandEngine::new("cat", vec![]);
        let result = engine.analyze(&config(), ReportFlags::default())?;
        assert_eq!(
            result.report["configuration"]["noc_levels"][0]["bandwidth"],
            json!(16)
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_command_engine_failure() {
        let engine = CommandEngine::new("sh", vec!["-c".into(), "exit 3".into()]);
        let result = engine.analyze(&config(), ReportFlags::default());
        assert!(matches!(result, Err(DseError::Engine { .. })));
    }
}
