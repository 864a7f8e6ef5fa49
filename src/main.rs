use anyhow::{Context, Result};
use wlan_access_sim::{Config, Generation, Simulation};

const STATION_COUNTS: [usize; 3] = [1, 10, 100];
const AP_ID: &str = "AP1";

fn main() -> Result<()> {
    env_logger::init();
    println!("... WLAN access simulator is started ...");

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => Config::default(),
    };

    for generation in Generation::ALL {
        for station_count in STATION_COUNTS {
            println!("\nSimulation with {} User(s) and 1 AP:", station_count);
            let mut simulation = Simulation::new(generation, station_count, AP_ID, config.clone())?;
            simulation.run();
            println!("{}", simulation.report());
        }
        println!("\n---");
    }
    Ok(())
}
