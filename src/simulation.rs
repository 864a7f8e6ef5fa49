use log::info;

use crate::access_point::AccessPoint;
use crate::config::Config;
use crate::error::Result;
use crate::node::Station;
use crate::policy::{AccessPolicy, Generation};
use crate::scheduler::ArbitrationEngine;
use crate::stats::{Report, StatisticsCollector};

pub const DEFAULT_AP_ID: &str = "AP1";

/// Default configuration and access point id.
pub fn create_simulation(generation: Generation, station_count: usize) -> Result<Simulation> {
    Simulation::new(generation, station_count, DEFAULT_AP_ID, Config::default())
}

/// One access point, its stations and the generation's access policy.
pub struct Simulation {
    generation: Generation,
    config: Config,
    engine: ArbitrationEngine,
}

impl Simulation {
    /// Zero stations is accepted; the report then shows zeros.
    pub fn new(
        generation: Generation,
        station_count: usize,
        ap_id: &str,
        config: Config,
    ) -> Result<Simulation> {
        config.validate()?;

        let stations = (0..station_count).map(Station::new).collect();
        let engine = ArbitrationEngine::new(
            AccessPoint::new(ap_id, &config),
            stations,
            AccessPolicy::for_generation(generation, &config),
            config.seed,
        );

        let mut simulation = Simulation {
            generation,
            config,
            engine,
        };
        simulation.load_traffic();
        info!(
            "Created {} simulation with {} stations on {}",
            generation, station_count, ap_id
        );
        Ok(simulation)
    }

    /// Queue `packets_per_station` fresh packets on every station.
    pub fn load_traffic(&mut self) {
        let now = self.engine.now();
        let count = self.config.packets_per_station;
        let size = self.config.packet_size_bytes;
        for station in self.engine.stations_mut() {
            station.generate_packets(count, size, now);
        }
    }

    pub fn run(&mut self) {
        self.engine.run();
    }

    pub fn report(&self) -> Report {
        let mut collector = StatisticsCollector::new();
        for station in self.engine.stations() {
            collector.observe(station);
        }
        let ap = self.engine.access_point();
        collector.finish(self.generation, ap.get_id(), ap.phy(), self.engine.now())
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &ArbitrationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ArbitrationEngine {
        &mut self.engine
    }
}
