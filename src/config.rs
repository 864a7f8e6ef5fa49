//! Simulation parameters, loadable from a TOML file.
//!
//! Every field has a default so a config file only needs to name the values it
//! overrides.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Packets loaded into every station queue when traffic is generated
    pub packets_per_station: usize,
    /// Size of each generated data packet in bytes
    pub packet_size_bytes: u32,
    /// Seed for the backoff random source. `None` draws from entropy.
    pub seed: Option<u64>,
    pub phy: PhyConfig,
    pub contention: ContentionConfig,
    pub round_robin: RoundRobinConfig,
    pub ofdma: OfdmaConfig,
}

/// Modulation and coding parameters of the access point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhyConfig {
    pub bandwidth_mhz: f64,
    pub modulation_order: u32,
    pub coding_rate: f64,
    /// Duration of one backoff / idle slot in microseconds
    pub slot_time_us: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentionConfig {
    /// Number of scheduling ticks per run
    pub iterations: usize,
    /// Backoff values are drawn uniformly from `[0, backoff_window]`
    pub backoff_window: u32,
    /// Probability that foreign traffic holds the medium during an attempt
    pub busy_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoundRobinConfig {
    /// Number of setup / sounding / sweep iterations per run
    pub iterations: usize,
    /// Sub-steps in one round-robin sweep
    pub sweep_budget: u32,
    pub setup_frame_bytes: u32,
    pub csi_frame_bytes: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OfdmaConfig {
    pub sub_channel_widths_mhz: Vec<f64>,
    /// Upper bound on packets a station sends on its sub-channel per round
    pub packets_per_round: usize,
    /// Safety bound for the until-drained loop
    pub max_rounds: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            packets_per_station: 10,
            packet_size_bytes: 1500,
            seed: None,
            phy: PhyConfig::default(),
            contention: ContentionConfig::default(),
            round_robin: RoundRobinConfig::default(),
            ofdma: OfdmaConfig::default(),
        }
    }
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            bandwidth_mhz: 20.0,
            modulation_order: 256,
            coding_rate: 5.0 / 6.0,
            slot_time_us: 9.0,
        }
    }
}

impl Default for ContentionConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            backoff_window: 15,
            busy_probability: 0.0,
        }
    }
}

impl Default for RoundRobinConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            sweep_budget: 15,
            setup_frame_bytes: 64,
            csi_frame_bytes: 200,
        }
    }
}

impl Default for OfdmaConfig {
    fn default() -> Self {
        Self {
            sub_channel_widths_mhz: vec![2.0, 4.0, 10.0, 4.0],
            packets_per_round: 5,
            max_rounds: 100_000,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Same as `Default` but with a fixed backoff seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.packet_size_bytes == 0 {
            return Err(SimError::InvalidConfig("packet_size_bytes must be > 0".into()));
        }
        if !(self.phy.bandwidth_mhz > 0.0) {
            return Err(SimError::InvalidConfig("phy.bandwidth_mhz must be > 0".into()));
        }
        if self.phy.modulation_order < 2 {
            return Err(SimError::InvalidConfig("phy.modulation_order must be >= 2".into()));
        }
        if !(self.phy.coding_rate > 0.0 && self.phy.coding_rate <= 1.0) {
            return Err(SimError::InvalidConfig("phy.coding_rate must be in (0, 1]".into()));
        }
        if self.phy.slot_time_us < 0.0 {
            return Err(SimError::InvalidConfig("phy.slot_time_us must be >= 0".into()));
        }
        if !(0.0..=1.0).contains(&self.contention.busy_probability) {
            return Err(SimError::InvalidConfig(
                "contention.busy_probability must be in [0, 1]".into(),
            ));
        }
        if self.ofdma.sub_channel_widths_mhz.iter().any(|w| !(*w > 0.0)) {
            return Err(SimError::InvalidConfig(
                "ofdma.sub_channel_widths_mhz entries must be > 0".into(),
            ));
        }
        let total: f64 = self.ofdma.sub_channel_widths_mhz.iter().sum();
        if total > self.phy.bandwidth_mhz + f64::EPSILON {
            return Err(SimError::InvalidConfig(format!(
                "sub-channels total {} MHz but the channel is {} MHz",
                total, self.phy.bandwidth_mhz
            )));
        }
        Ok(())
    }
}
