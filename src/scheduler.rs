use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::access_point::AccessPoint;
use crate::node::Station;
use crate::policy::{AccessPolicy, Medium, RunBound, SimClock};

/// Drives one access policy against an access point and its station arena.
pub struct ArbitrationEngine {
    access_point: AccessPoint,
    stations: Vec<Station>,
    policy: AccessPolicy,
    clock: SimClock,
    rng: StdRng,
    steps_taken: usize,
    transmissions: usize,
}

impl ArbitrationEngine {
    /// Every station in `stations` is connected to the access point.
    pub fn new(
        mut access_point: AccessPoint,
        stations: Vec<Station>,
        policy: AccessPolicy,
        seed: Option<u64>,
    ) -> ArbitrationEngine {
        for idx in 0..stations.len() {
            access_point.connect(idx);
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        ArbitrationEngine {
            access_point,
            stations,
            policy,
            clock: SimClock::new(),
            rng,
            steps_taken: 0,
            transmissions: 0,
        }
    }

    pub fn access_point(&self) -> &AccessPoint {
        &self.access_point
    }

    pub fn access_point_mut(&mut self) -> &mut AccessPoint {
        &mut self.access_point
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn stations_mut(&mut self) -> &mut [Station] {
        &mut self.stations
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Transmissions granted across all runs.
    pub fn transmissions(&self) -> usize {
        self.transmissions
    }

    fn has_pending(&self) -> bool {
        self.access_point
            .connected()
            .iter()
            .any(|idx| self.stations.get(*idx).map_or(false, Station::has_packets))
    }

    fn more_work(&self) -> bool {
        match self.policy.bound() {
            RunBound::Fixed(n) => self.steps_taken < n,
            RunBound::UntilDrained { max_rounds } => {
                if !self.has_pending() {
                    return false;
                }
                if self.steps_taken >= max_rounds {
                    warn!("Stopped after {} rounds with packets still queued", max_rounds);
                    return false;
                }
                true
            }
        }
    }

    /// Runs one policy step if the bound allows it. Returns whether another
    /// step may follow.
    pub fn handle_next_step(&mut self) -> bool {
        if !self.more_work() {
            return false;
        }

        let mut medium = Medium {
            ap: &mut self.access_point,
            stations: &mut self.stations,
            clock: &mut self.clock,
            rng: &mut self.rng,
        };
        let sent = self.policy.step(&mut medium);
        self.steps_taken += 1;
        self.transmissions += sent;

        if sent == 0 && matches!(self.policy.bound(), RunBound::UntilDrained { .. }) && self.has_pending() {
            warn!("{} made no progress with packets still queued, stopping", self.policy);
            return false;
        }
        true
    }

    /// A fresh pass over whatever is queued now. Running again without new
    /// traffic sends nothing.
    pub fn run(&mut self) {
        self.steps_taken = 0;
        let before = self.transmissions;
        info!(
            "{}: {} policy over {} stations",
            self.access_point.get_id(),
            self.policy,
            self.stations.len()
        );

        let mut more_steps = true;
        while more_steps {
            more_steps = self.handle_next_step();
        }

        debug!("{} steps, clock at {:.2}us", self.steps_taken, self.clock.now());
        info!(
            "{}: {} transmissions this run",
            self.access_point.get_id(),
            self.transmissions - before
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Holder;
    use crate::config::Config;
    use crate::policy::Generation;

    fn engine(generation: Generation, count: usize, packets: usize, config: &Config) -> ArbitrationEngine {
        let stations = (0..count)
            .map(|i| {
                let mut station = Station::new(i);
                station.generate_packets(packets, config.packet_size_bytes, 0.0);
                station
            })
            .collect();
        ArbitrationEngine::new(
            AccessPoint::new("AP1", config),
            stations,
            AccessPolicy::for_generation(generation, config),
            Some(9),
        )
    }

    #[test]
    fn never_sends_more_than_queued() {
        let config = Config::default();
        for generation in Generation::ALL {
            let mut engine = engine(generation, 7, 10, &config);
            engine.run();
            assert!(engine.stations().iter().all(|s| s.get_transmission_count() <= 10));
            assert!(engine.stations().iter().all(|s| !s.has_packets()), "{}", generation);
            assert_eq!(engine.transmissions(), 70);
        }
    }

    #[test]
    fn second_run_sends_nothing() {
        let config = Config::default();
        for generation in Generation::ALL {
            let mut engine = engine(generation, 3, 10, &config);
            engine.run();
            let first = engine.transmissions();
            engine.run();
            assert_eq!(engine.transmissions(), first, "{}", generation);
        }
    }

    #[test]
    fn contention_leaves_channel_free() {
        let config = Config::default();
        let mut engine = engine(Generation::Wifi4, 10, 10, &config);
        engine.run();
        assert!(engine.access_point().channel().is_free());
        assert_eq!(engine.access_point().channel().grants(), 100);
    }

    #[test]
    fn held_channel_blocks_contention() {
        let config = Config::default();
        let mut engine = engine(Generation::Wifi4, 2, 10, &config);
        engine
            .access_point_mut()
            .channel_mut()
            .acquire(Holder::External)
            .unwrap();
        engine.run();

        assert_eq!(engine.transmissions(), 0);
        assert!(engine.stations().iter().all(|s| s.get_backoff_us() > 0.0));
    }

    #[test]
    fn ofdma_without_sub_channels_terminates() {
        let mut config = Config::default();
        config.ofdma.sub_channel_widths_mhz.clear();
        let mut engine = engine(Generation::Wifi6, 2, 10, &config);
        engine.run();
        assert_eq!(engine.transmissions(), 0);
    }

    #[test]
    fn ofdma_respects_round_limit() {
        let mut config = Config::default();
        config.ofdma.max_rounds = 1;
        let mut engine = engine(Generation::Wifi6, 2, 10, &config);
        engine.run();
        assert_eq!(engine.transmissions(), 10);
    }
}
