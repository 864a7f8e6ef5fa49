/*
    rate [Mbps] = bandwidth [MHz] * log2(modulation order) * coding rate
    airtime [us] = bits / rate [Mbps]
 */

use crate::config::PhyConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhyParams {
    pub bandwidth_mhz: f64,
    pub modulation_order: u32,
    pub coding_rate: f64,
    pub slot_time_us: f64,
}

impl PhyParams {
    pub fn from_config(config: &PhyConfig) -> PhyParams {
        PhyParams {
            bandwidth_mhz: config.bandwidth_mhz,
            modulation_order: config.modulation_order,
            coding_rate: config.coding_rate,
            slot_time_us: config.slot_time_us,
        }
    }

    fn bits_per_symbol(&self) -> f64 {
        (self.modulation_order as f64).log2()
    }

    /// Capacity bound of the full channel. Independent of offered traffic.
    pub fn max_throughput_mbps(&self) -> f64 {
        self.rate_mbps(self.bandwidth_mhz)
    }

    /// Rate of a slice of the channel with the same modulation and coding.
    pub fn rate_mbps(&self, bandwidth_mhz: f64) -> f64 {
        bandwidth_mhz * self.bits_per_symbol() * self.coding_rate
    }

    pub fn airtime_us(&self, size_bytes: u32) -> f64 {
        airtime_us(size_bytes, self.max_throughput_mbps())
    }
}

pub fn airtime_us(size_bytes: u32, rate_mbps: f64) -> f64 {
    if rate_mbps <= 0.0 {
        return 0.0;
    }
    (size_bytes as f64 * 8.0) / rate_mbps
}
