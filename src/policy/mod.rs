//! Medium-access policies, one per protocol generation.
//!
//! Every policy works on the same [`Medium`]: the access point, the station
//! arena, the simulated clock and the random source. A policy never owns a
//! station; it addresses stations by their arena index.

use std::fmt;

use rand::rngs::StdRng;

use crate::access_point::AccessPoint;
use crate::config::Config;
use crate::node::Station;

mod contention;
mod ofdma;
mod round_robin;

pub use contention::Contention;
pub use ofdma::Ofdma;
pub use round_robin::RoundRobin;

/// Simulated time in microseconds. Only advanced by modeled airtime.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SimClock {
    now_us: f64,
}

impl SimClock {
    pub fn new() -> SimClock {
        SimClock::default()
    }

    pub fn now(&self) -> f64 {
        self.now_us
    }

    pub fn advance(&mut self, us: f64) -> f64 {
        self.now_us += us;
        self.now_us
    }

    pub fn advance_to(&mut self, us: f64) -> f64 {
        if us > self.now_us {
            self.now_us = us;
        }
        self.now_us
    }
}

/// Everything a policy may touch during one step.
pub struct Medium<'a> {
    pub ap: &'a mut AccessPoint,
    pub stations: &'a mut [Station],
    pub clock: &'a mut SimClock,
    pub rng: &'a mut StdRng,
}

impl Medium<'_> {
    /// Arena indices of connected stations, in connection order.
    pub fn connected(&self) -> Vec<usize> {
        self.ap.connected().to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    Wifi4,
    Wifi5,
    Wifi6,
}

impl Generation {
    pub const ALL: [Generation; 3] = [Generation::Wifi4, Generation::Wifi5, Generation::Wifi6];
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Wifi4 => write!(f, "WiFi4"),
            Generation::Wifi5 => write!(f, "WiFi5"),
            Generation::Wifi6 => write!(f, "WiFi6"),
        }
    }
}

/// How long the engine keeps stepping a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunBound {
    Fixed(usize),
    UntilDrained { max_rounds: usize },
}

#[derive(Debug, Clone)]
pub enum AccessPolicy {
    Contention(Contention),
    RoundRobin(RoundRobin),
    Ofdma(Ofdma),
}

impl AccessPolicy {
    pub fn for_generation(generation: Generation, config: &Config) -> AccessPolicy {
        match generation {
            Generation::Wifi4 => AccessPolicy::Contention(Contention::new(&config.contention)),
            Generation::Wifi5 => AccessPolicy::RoundRobin(RoundRobin::new(&config.round_robin)),
            Generation::Wifi6 => AccessPolicy::Ofdma(Ofdma::new(&config.ofdma)),
        }
    }

    pub fn bound(&self) -> RunBound {
        match self {
            AccessPolicy::Contention(p) => RunBound::Fixed(p.iterations()),
            AccessPolicy::RoundRobin(p) => RunBound::Fixed(p.iterations()),
            AccessPolicy::Ofdma(p) => RunBound::UntilDrained {
                max_rounds: p.max_rounds(),
            },
        }
    }

    /// One tick / iteration / round. Returns the number of packets sent.
    pub fn step(&mut self, medium: &mut Medium<'_>) -> usize {
        match self {
            AccessPolicy::Contention(p) => p.step(medium),
            AccessPolicy::RoundRobin(p) => p.step(medium),
            AccessPolicy::Ofdma(p) => p.step(medium),
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessPolicy::Contention(_) => write!(f, "Contention"),
            AccessPolicy::RoundRobin(_) => write!(f, "MU Round-Robin"),
            AccessPolicy::Ofdma(_) => write!(f, "OFDMA"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use rand::SeedableRng;

    use super::*;

    /// Access point with `count` connected stations holding `packets` each.
    pub fn setup(config: &Config, count: usize, packets: usize) -> (AccessPoint, Vec<Station>) {
        let mut ap = AccessPoint::new("AP-test", config);
        let mut stations = Vec::new();
        for i in 0..count {
            let mut station = Station::new(i);
            station.generate_packets(packets, config.packet_size_bytes, 0.0);
            stations.push(station);
            ap.connect(i);
        }
        (ap, stations)
    }

    pub fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_selects_policy_and_bound() {
        let config = Config::default();
        let p4 = AccessPolicy::for_generation(Generation::Wifi4, &config);
        let p5 = AccessPolicy::for_generation(Generation::Wifi5, &config);
        let p6 = AccessPolicy::for_generation(Generation::Wifi6, &config);

        assert_eq!(p4.bound(), RunBound::Fixed(1000));
        assert_eq!(p5.bound(), RunBound::Fixed(100));
        assert_eq!(p6.bound(), RunBound::UntilDrained { max_rounds: 100_000 });
        assert_eq!(p6.to_string(), "OFDMA");
    }

    #[test]
    fn clock_never_goes_backwards() {
        let mut clock = SimClock::new();
        assert_eq!(clock.advance(5.0), 5.0);
        assert_eq!(clock.advance_to(3.0), 5.0);
        assert_eq!(clock.advance_to(8.0), 8.0);
    }
}
