//! CSMA/CA-style contention: first station to find the medium free wins it.

use log::{debug, error, trace};
use rand::Rng;

use crate::channel::Holder;
use crate::config::ContentionConfig;

use super::Medium;

#[derive(Debug, Clone)]
pub struct Contention {
    iterations: usize,
    busy_probability: f64,
    backoffs: u64,
}

impl Contention {
    pub fn new(config: &ContentionConfig) -> Contention {
        Contention {
            iterations: config.iterations,
            busy_probability: config.busy_probability,
            backoffs: 0,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Failed acquisitions so far.
    pub fn backoffs(&self) -> u64 {
        self.backoffs
    }

    /// One tick: every connected station gets one attempt, in list order.
    pub fn step(&mut self, medium: &mut Medium<'_>) -> usize {
        let mut sent = 0;
        for idx in medium.connected() {
            if self.attempt(medium, idx) {
                sent += 1;
            }
        }
        sent
    }

    fn attempt(&mut self, medium: &mut Medium<'_>, idx: usize) -> bool {
        let phy = *medium.ap.phy();
        let station = match medium.stations.get_mut(idx) {
            Some(station) => station,
            None => return false,
        };
        if !station.has_packets() {
            return false;
        }

        // Foreign traffic only occupies the medium for the duration of this attempt.
        let foreign = self.busy_probability > 0.0
            && medium.rng.gen_bool(self.busy_probability)
            && medium.ap.channel_mut().acquire(Holder::External).is_ok();

        let channel = medium.ap.channel_mut();
        let sent = match channel.acquire(Holder::Station(idx)) {
            Err(_) => {
                let slots = channel.sample_backoff(&mut *medium.rng);
                station.add_backoff(slots as f64 * phy.slot_time_us);
                self.backoffs += 1;
                debug!("{} deferred by {} slots", station.get_name(), slots);
                false
            }
            Ok(()) => {
                let sent = match station.next_packet() {
                    Ok(packet) => {
                        let now = medium.clock.advance(phy.airtime_us(packet.size_bytes()));
                        station.record_transmission(&packet, now);
                        trace!("{} sent {} at {:.2}us", station.get_name(), packet.payload_id(), now);
                        true
                    }
                    Err(e) => {
                        error!("Transmission error: {}", e);
                        false
                    }
                };
                channel.release();
                sent
            }
        };

        if foreign {
            medium.ap.channel_mut().release();
        }
        sent
    }
}
