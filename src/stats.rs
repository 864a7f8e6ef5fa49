//! Reduces station transmission logs into the reported figures.

use std::fmt;

use crate::node::Station;
use crate::policy::Generation;
use crate::theoretical::PhyParams;

/// Mean spacing of a station's transmissions: (last - first) / count.
/// Undefined below two transmissions.
pub fn station_latency_us(times: &[f64]) -> Option<f64> {
    match (times.first(), times.last()) {
        (Some(first), Some(last)) if times.len() > 1 => Some((last - first) / times.len() as f64),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct StatisticsCollector {
    station_count: usize,
    latency_sum_us: f64,
    max_latency_us: f64,
    transmissions: usize,
    bytes_sent: u64,
    backoff_us: f64,
    overhead_us: f64,
}

impl StatisticsCollector {
    pub fn new() -> StatisticsCollector {
        StatisticsCollector::default()
    }

    pub fn observe(&mut self, station: &Station) {
        self.station_count += 1;
        if let Some(latency) = station_latency_us(station.get_transmission_times()) {
            self.latency_sum_us += latency;
            self.max_latency_us = self.max_latency_us.max(latency);
        }
        self.transmissions += station.get_transmission_count();
        self.bytes_sent += station.get_bytes_sent();
        self.backoff_us += station.get_backoff_us();
        self.overhead_us += station.get_overhead_us();
    }

    fn per_station(&self, total: f64) -> f64 {
        if self.station_count == 0 {
            return 0.0;
        }
        total / self.station_count as f64
    }

    /// Averages divide by every observed station, including those with fewer
    /// than two transmissions.
    pub fn finish(
        &self,
        generation: Generation,
        ap_id: &str,
        phy: &PhyParams,
        elapsed_us: f64,
    ) -> Report {
        let achieved = if elapsed_us > 0.0 {
            (self.bytes_sent as f64 * 8.0) / elapsed_us
        } else {
            0.0
        };

        Report {
            generation,
            ap_id: ap_id.to_string(),
            station_count: self.station_count,
            max_throughput_mbps: phy.max_throughput_mbps(),
            achieved_throughput_mbps: achieved,
            average_latency_us: self.per_station(self.latency_sum_us),
            max_latency_us: self.max_latency_us,
            transmissions: self.transmissions,
            bytes_sent: self.bytes_sent,
            mean_backoff_us: self.per_station(self.backoff_us),
            mean_overhead_us: self.per_station(self.overhead_us),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub generation: Generation,
    pub ap_id: String,
    pub station_count: usize,
    /// Static capacity bound, not a measurement.
    pub max_throughput_mbps: f64,
    pub achieved_throughput_mbps: f64,
    pub average_latency_us: f64,
    pub max_latency_us: f64,
    pub transmissions: usize,
    pub bytes_sent: u64,
    pub mean_backoff_us: f64,
    pub mean_overhead_us: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Simulation Results ({}):", self.generation, self.ap_id)?;
        writeln!(f, "Max Theoretical Throughput: {:.2} Mbps", self.max_throughput_mbps)?;
        writeln!(f, "Achieved Throughput: {:.2} Mbps", self.achieved_throughput_mbps)?;
        writeln!(
            f,
            "Average Latency of {} Users: {:.2} microseconds",
            self.station_count, self.average_latency_us
        )?;
        writeln!(
            f,
            "Max Latency of {} Users: {:.2} microseconds",
            self.station_count, self.max_latency_us
        )?;
        write!(
            f,
            "Transmissions: {} ({} bytes), mean backoff {:.2}us, mean overhead {:.2}us",
            self.transmissions, self.bytes_sent, self.mean_backoff_us, self.mean_overhead_us
        )
    }
}
