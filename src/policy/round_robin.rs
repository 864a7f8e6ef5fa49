//! Multi-user scheduled access: sounding overhead, then a bounded round-robin sweep.

use log::{debug, error};

use crate::config::RoundRobinConfig;

use super::Medium;

#[derive(Debug, Clone)]
pub struct RoundRobin {
    iterations: usize,
    sweep_budget: u32,
    setup_frame_bytes: u32,
    csi_frame_bytes: u32,
    cursor: usize,
    overhead_us: f64,
}

impl RoundRobin {
    pub fn new(config: &RoundRobinConfig) -> RoundRobin {
        RoundRobin {
            iterations: config.iterations,
            sweep_budget: config.sweep_budget,
            setup_frame_bytes: config.setup_frame_bytes,
            csi_frame_bytes: config.csi_frame_bytes,
            cursor: 0,
            overhead_us: 0.0,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Airtime spent on setup broadcasts and CSI collection.
    pub fn overhead_us(&self) -> f64 {
        self.overhead_us
    }

    pub fn step(&mut self, medium: &mut Medium<'_>) -> usize {
        let connected = medium.connected();
        self.broadcast_setup(medium);
        self.collect_channel_state(medium, &connected);
        self.sweep(medium, &connected)
    }

    fn broadcast_setup(&mut self, medium: &mut Medium<'_>) {
        let cost = medium.ap.phy().airtime_us(self.setup_frame_bytes);
        medium.clock.advance(cost);
        self.overhead_us += cost;
    }

    /// Every connected station reports CSI; total cost is linear in station count.
    fn collect_channel_state(&mut self, medium: &mut Medium<'_>, connected: &[usize]) {
        let cost = medium.ap.phy().airtime_us(self.csi_frame_bytes) * connected.len() as f64;
        medium.clock.advance(cost);
        self.overhead_us += cost;
        for idx in connected {
            if let Some(station) = medium.stations.get_mut(*idx) {
                station.add_overhead(cost);
            }
        }
    }

    /// Runs the whole budget even when every queue is empty.
    fn sweep(&mut self, medium: &mut Medium<'_>, connected: &[usize]) -> usize {
        let phy = *medium.ap.phy();
        let mut sent = 0;
        let mut idle = 0;

        for _ in 0..self.sweep_budget {
            if self.cursor >= connected.len() {
                self.cursor = 0;
            }
            let station = connected
                .get(self.cursor)
                .and_then(|idx| medium.stations.get_mut(*idx));

            match station {
                Some(station) if station.has_packets() => match station.next_packet() {
                    Ok(packet) => {
                        let now = medium.clock.advance(phy.airtime_us(packet.size_bytes()));
                        station.record_transmission(&packet, now);
                        sent += 1;
                    }
                    Err(e) => error!("Transmission error: {}", e),
                },
                _ => {
                    medium.clock.advance(phy.slot_time_us);
                    idle += 1;
                }
            }
            self.cursor += 1;
        }

        debug!("Round-robin sweep: {} sent, {} idle sub-steps", sent, idle);
        sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::policy::test_util::{rng, setup};
    use crate::policy::SimClock;

    fn config_with_budget(budget: u32) -> Config {
        let mut config = Config::default();
        config.round_robin.sweep_budget = budget;
        config
    }

    #[test]
    fn one_cycle_serves_each_station_once() {
        let config = config_with_budget(4);
        let (mut ap, mut stations) = setup(&config, 4, 10);
        let mut clock = SimClock::new();
        let mut rng = rng();
        let mut policy = RoundRobin::new(&config.round_robin);

        let mut medium = Medium {
            ap: &mut ap,
            stations: &mut stations,
            clock: &mut clock,
            rng: &mut rng,
        };
        assert_eq!(policy.step(&mut medium), 4);
        assert!(stations.iter().all(|s| s.get_transmission_count() == 1));
    }

    #[test]
    fn cursor_persists_across_sweeps() {
        let config = config_with_budget(5);
        let (mut ap, mut stations) = setup(&config, 3, 10);
        let mut clock = SimClock::new();
        let mut rng = rng();
        let mut policy = RoundRobin::new(&config.round_robin);

        let mut medium = Medium {
            ap: &mut ap,
            stations: &mut stations,
            clock: &mut clock,
            rng: &mut rng,
        };
        policy.step(&mut medium);
        policy.step(&mut medium);
        let counts: Vec<usize> = medium
            .stations
            .iter()
            .map(|s| s.get_transmission_count())
            .collect();

        // 10 sub-steps over 3 stations: 4, 3, 3
        assert_eq!(counts, vec![4, 3, 3]);
        let max = counts.iter().max().unwrap();
        let min = counts.iter().min().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn empty_queues_still_burn_the_budget() {
        let config = config_with_budget(15);
        let (mut ap, mut stations) = setup(&config, 2, 0);
        let mut clock = SimClock::new();
        let mut rng = rng();
        let mut policy = RoundRobin::new(&config.round_robin);

        let mut medium = Medium {
            ap: &mut ap,
            stations: &mut stations,
            clock: &mut clock,
            rng: &mut rng,
        };
        assert_eq!(policy.step(&mut medium), 0);

        let phy = *ap.phy();
        let expected = phy.airtime_us(64) + 2.0 * phy.airtime_us(200) + 15.0 * phy.slot_time_us;
        assert!((clock.now() - expected).abs() < 1e-6);
        assert_eq!(policy.cursor(), 1);
    }

    #[test]
    fn csi_overhead_scales_with_station_count() {
        let config = config_with_budget(1);
        let (mut ap, mut stations) = setup(&config, 5, 1);
        let mut clock = SimClock::new();
        let mut rng = rng();
        let mut policy = RoundRobin::new(&config.round_robin);

        let mut medium = Medium {
            ap: &mut ap,
            stations: &mut stations,
            clock: &mut clock,
            rng: &mut rng,
        };
        policy.step(&mut medium);

        let csi = ap.phy().airtime_us(200);
        assert!(stations.iter().all(|s| (s.get_overhead_us() - 5.0 * csi).abs() < 1e-9));
        let setup_cost = ap.phy().airtime_us(64);
        assert!((policy.overhead_us() - (setup_cost + 5.0 * csi)).abs() < 1e-9);
    }
}
