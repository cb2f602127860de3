use clap::Parser;
use clap_complete::Shell;
use config::Value;

use crate::error::DseError;

/// explore the NoC design space of a DNN accelerator
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// extra settings files merged over configs/default.toml, glob patterns allowed
    pub config_names: Vec<String>,

    /// print a completion script for the given shell and exit
    #[clap(long = "generate", arg_enum)]
    pub generator: Option<Shell>,

    #[clap(long)]
    pub num_pes: Option<i64>,
    /// bandwidth of the fixed configuration
    #[clap(long)]
    pub bandwidth: Option<i64>,
    #[clap(long)]
    pub bw_sweep: Option<bool>,
    #[clap(long)]
    pub top_bw_only: Option<bool>,
    #[clap(long)]
    pub min_bw: Option<i64>,
    #[clap(long)]
    pub max_bw: Option<i64>,
    #[clap(long)]
    pub tick: Option<i64>,
    #[clap(long)]
    pub hop_latency: Option<i64>,
    #[clap(long)]
    pub hops: Option<i64>,
    /// multicast of the swept level
    #[clap(long)]
    pub multicast: Option<bool>,
    #[clap(long)]
    pub dataflow: Option<String>,
    #[clap(long)]
    pub hardware: Option<String>,
}

impl Args {
    /// # Description
    /// - expand every pattern of `config_names`, matches of one pattern are sorted
    /// - a pattern without any match is an error
    pub fn config_files(&self) -> Result<Vec<String>, DseError> {
        let mut files = Vec::new();
        for pattern in &self.config_names {
            let mut matches = glob::glob(pattern)?
                .map(|path| path.map(|p| p.to_string_lossy().into_owned()))
                .collect::<Result<Vec<_>, _>>()?;
            if matches.is_empty() {
                return Err(DseError::NoMatch(pattern.clone()));
            }
            matches.sort();
            files.append(&mut matches);
        }
        Ok(files)
    }

    /// the settings keys set on the command line
    pub fn overrides(&self) -> Vec<(String, Value)> {
        let mut overrides = Vec::new();
        let mut push = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                overrides.push((key.to_string(), value));
            }
        };
        push("device.num_pes", self.num_pes.map(Value::from));
        push("device.bandwidth", self.bandwidth.map(Value::from));
        push("sweep.bw_sweep", self.bw_sweep.map(Value::from));
        push("sweep.top_bw_only", self.top_bw_only.map(Value::from));
        push("sweep.min_bw", self.min_bw.map(Value::from));
        push("sweep.max_bw", self.max_bw.map(Value::from));
        push("sweep.tick", self.tick.map(Value::from));
        push("noc.hop_latency", self.hop_latency.map(Value::from));
        push("noc.hops", self.hops.map(Value::from));
        push("noc.multicast", self.multicast.map(Value::from));
        push("dataflow_path", self.dataflow.clone().map(Value::from));
        push("hardware_path", self.hardware.clone().map(Value::from));
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "noc_dse",
            "--num-pes",
            "64",
            "--bw-sweep",
            "true",
            "--dataflow",
            "net.m",
        ]);
        let keys: Vec<_> = args.overrides().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["device.num_pes", "sweep.bw_sweep", "dataflow_path"]);
    }

    #[test]
    fn test_config_files() -> Result<(), DseError> {
        let args = Args::parse_from(["noc_dse", "configs/optional_configs/*.toml"]);
        let files = args.config_files()?;
        assert!(files.len() >= 2);
        assert!(files.windows(2).all(|w| w[0] <= w[1]));

        let args = Args::parse_from(["noc_dse", "configs/nothing_here_*.toml"]);
        assert!(matches!(args.config_files(), Err(DseError::NoMatch(_))));
        Ok(())
    }
}
