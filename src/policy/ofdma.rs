//! OFDMA: the channel is re-partitioned every round and sub-channels are
//! handed out by position. Low-index stations are always served first; those
//! past the sub-channel count wait until earlier stations drain.

use log::{debug, error, warn};

use crate::config::OfdmaConfig;
use crate::theoretical::airtime_us;

use super::Medium;

#[derive(Debug, Clone)]
pub struct Ofdma {
    widths_mhz: Vec<f64>,
    packets_per_round: usize,
    max_rounds: usize,
    rounds: usize,
}

impl Ofdma {
    pub fn new(config: &OfdmaConfig) -> Ofdma {
        Ofdma {
            widths_mhz: config.sub_channel_widths_mhz.clone(),
            packets_per_round: config.packets_per_round,
            max_rounds: config.max_rounds,
            rounds: 0,
        }
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Allocation rounds completed since creation.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// One allocation round. Sub-channels transmit concurrently from the round
    /// start; the clock moves to the end of the busiest one.
    pub fn step(&mut self, medium: &mut Medium<'_>) -> usize {
        if self.widths_mhz.is_empty() {
            warn!("No sub-channels configured, nothing can be scheduled");
            return 0;
        }

        let phy = *medium.ap.phy();
        let start = medium.clock.now();
        let waiting: Vec<usize> = medium
            .connected()
            .into_iter()
            .filter(|idx| medium.stations.get(*idx).map_or(false, |s| s.has_packets()))
            .collect();

        let sub_channels = medium.ap.partition_channel(&self.widths_mhz);
        let mut round_end = start;
        let mut sent = 0;

        for (index, (sub, idx)) in sub_channels.iter_mut().zip(waiting.iter()).enumerate() {
            if let Err(e) = sub.occupy(index, *idx) {
                error!("Allocation error: {}", e);
                continue;
            }
            let station = &mut medium.stations[*idx];
            let rate = phy.rate_mbps(sub.bandwidth_mhz());
            let mut local = start;

            for _ in 0..self.packets_per_round {
                if !station.has_packets() {
                    break;
                }
                match station.next_packet() {
                    Ok(packet) => {
                        local += airtime_us(packet.size_bytes(), rate);
                        station.record_transmission(&packet, local);
                        sent += 1;
                    }
                    Err(e) => {
                        error!("Transmission error: {}", e);
                        break;
                    }
                }
            }
            round_end = round_end.max(local);
        }

        let allocated = waiting.len().min(self.widths_mhz.len());
        medium.ap.release_sub_channels();
        medium.clock.advance_to(round_end);
        self.rounds += 1;

        debug!(
            "OFDMA round {}: {} stations allocated, {} starved, {} packets",
            self.rounds,
            allocated,
            waiting.len() - allocated,
            sent
        );
        sent
    }
}
