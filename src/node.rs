use std::fmt;

use crate::error::{Result, SimError};
use crate::packet::{Packet, PacketQueue};

/// A station attached to the access point.
///
/// Owns its packet queue and the log of simulated times at which each of its
/// packets finished transmitting.
#[derive(Debug, Clone)]
pub struct Station {
    id: usize,
    name: String,
    queue: PacketQueue,
    transmission_times: Vec<f64>,
    backoff_us: f64,
    overhead_us: f64,
    bytes_sent: u64,
}

impl Station {
    pub fn new(id: usize) -> Station {
        Station {
            id,
            name: format!("User{}", id),
            queue: PacketQueue::new(),
            transmission_times: Vec::new(),
            backoff_us: 0.0,
            overhead_us: 0.0,
            bytes_sent: 0,
        }
    }

    pub fn get_id(&self) -> usize {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Enqueue `count` data packets created at `now_us`.
    pub fn generate_packets(&mut self, count: usize, size_bytes: u32, now_us: f64) {
        for i in 0..count {
            self.queue.push(Packet::new(format!("Data{}", i), size_bytes, now_us));
        }
    }

    pub fn add_packet(&mut self, packet: Packet) {
        self.queue.push(packet);
    }

    pub fn has_packets(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_packet(&mut self) -> Result<Packet> {
        self.queue
            .pop()
            .ok_or(SimError::NoPacketsAvailable { station: self.id })
    }

    /// Log a completed transmission of `packet` at simulated time `time_us`.
    pub fn record_transmission(&mut self, packet: &Packet, time_us: f64) {
        self.transmission_times.push(time_us);
        self.bytes_sent += packet.size_bytes() as u64;
    }

    pub fn add_backoff(&mut self, us: f64) {
        self.backoff_us += us;
    }

    pub fn add_overhead(&mut self, us: f64) {
        self.overhead_us += us;
    }

    pub fn get_transmission_times(&self) -> &[f64] {
        &self.transmission_times
    }

    pub fn get_transmission_count(&self) -> usize {
        self.transmission_times.len()
    }

    pub fn get_bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    pub fn get_backoff_us(&self) -> f64 {
        self.backoff_us
    }

    pub fn get_overhead_us(&self) -> f64 {
        self.overhead_us
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (pending: {}, sent: {})",
            self.name,
            self.pending(),
            self.get_transmission_count()
        )
    }
}
