use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::noc::NocLevel;

/// # Description
/// the scalar sizing of the accelerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGeometry {
    pub num_pes: u64,
    pub num_simd_lanes: u64,
    pub bandwidth: u64,
    pub l1_size: u64,
    pub l2_size: u64,
    pub offchip_bandwidth: u64,
}

/// # Description
/// one evaluation point handed to the cost engine
/// - built once by [`Configuration::assemble`] and never changed afterwards
/// - owns all of its data, nothing is shared with the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    dataflow_path: PathBuf,
    hardware_path: PathBuf,
    noc_levels: Vec<NocLevel>,
    geometry: DeviceGeometry,
}

impl Configuration {
    /// # Description
    /// package the NoC levels and the device geometry with the two description files
    /// - the paths are neither opened nor checked, the engine does that
    /// # Example
    /// ```
    /// use noc_dse::explorer::{build_fixed, Configuration, DeviceGeometry};
    /// let geometry = DeviceGeometry {
    ///     num_pes: 64,
    ///     num_simd_lanes: 1,
    ///     bandwidth: 64,
    ///     l1_size: 512,
    ///     l2_size: 4096,
    ///     offchip_bandwidth: 32,
    /// };
    /// let config = Configuration::assemble("net.m", "hw.m", &build_fixed(64, 1, 1), &geometry);
    /// assert_eq!(config.noc_levels().len(), 4);
    /// assert_eq!(config.geometry().num_pes, 64);
    /// ```
    pub fn assemble(
        dataflow_path: impl AsRef<Path>,
        hardware_path: impl AsRef<Path>,
        noc_levels: &[NocLevel],
        geometry: &DeviceGeometry,
    ) -> Self {
        Configuration {
            dataflow_path: dataflow_path.as_ref().to_path_buf(),
            hardware_path: hardware_path.as_ref().to_path_buf(),
            noc_levels: noc_levels.to_vec(),
            geometry: *geometry,
        }
    }

    pub fn dataflow_path(&self) -> &Path {
        &self.dataflow_path
    }

    pub fn hardware_path(&self) -> &Path {
        &self.hardware_path
    }

    pub fn noc_levels(&self) -> &[NocLevel] {
        &self.noc_levels
    }

    pub fn geometry(&self) -> &DeviceGeometry {
        &self.geometry
    }

    pub fn bandwidths(&self) -> Vec<u64> {
        self.noc_levels.iter().map(|l| l.bandwidth).collect()
    }

    pub fn latencies(&self) -> Vec<u64> {
        self.noc_levels.iter().map(|l| l.latency).collect()
    }

    pub fn multicast_flags(&self) -> Vec<bool> {
        self.noc_levels.iter().map(|l| l.multicast).collect()
    }

    /// one line description used by the run log
    pub fn summary(&self) -> String {
        format!(
            "dataflow={} hardware={} pes={} simd={} bw={} l1={} l2={} offchip_bw={} noc_bw=[{}] noc_latency=[{}] noc_mc=[{}]",
            self.dataflow_path.display(),
            self.hardware_path.display(),
            self.geometry.num_pes,
            self.geometry.num_simd_lanes,
            self.geometry.bandwidth,
            self.geometry.l1_size,
            self.geometry.l2_size,
            self.geometry.offchip_bandwidth,
            self.bandwidths().iter().join(","),
            self.latencies().iter().join(","),
            self.multicast_flags().iter().join(","),
        )
    }
}
