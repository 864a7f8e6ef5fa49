use wlan_access_sim::{create_simulation, Config, Generation, Simulation};

#[test]
fn single_station_contention_sends_all_ten() {
    let mut simulation = create_simulation(Generation::Wifi4, 1).unwrap();
    simulation.run();

    let station = &simulation.engine().stations()[0];
    assert_eq!(station.get_transmission_count(), 10);
    assert!(!station.has_packets());

    let report = simulation.report();
    assert_eq!(report.transmissions, 10);
    // Ten back-to-back 90us frames: (900 - 90) / 10
    assert!((report.average_latency_us - 81.0).abs() < 1e-6);
    assert_eq!(report.average_latency_us, report.max_latency_us);
}

#[test]
fn zero_stations_report_zeros() {
    for generation in Generation::ALL {
        let mut simulation = create_simulation(generation, 0).unwrap();
        simulation.run();
        let report = simulation.report();

        assert_eq!(report.station_count, 0);
        assert_eq!(report.transmissions, 0);
        assert_eq!(report.average_latency_us, 0.0);
        assert_eq!(report.max_latency_us, 0.0);
        assert!(report.average_latency_us.is_finite());
        assert!(report.max_throughput_mbps > 0.0);
    }
}

#[test]
fn report_is_idempotent() {
    for generation in Generation::ALL {
        let mut simulation = create_simulation(generation, 10).unwrap();
        simulation.run();
        let first = simulation.report();
        let second = simulation.report();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[test]
fn theoretical_throughput_ignores_traffic() {
    let expected = 20.0 * 8.0 * (5.0 / 6.0);
    for (generation, count) in [(Generation::Wifi4, 1), (Generation::Wifi5, 10), (Generation::Wifi6, 100)] {
        let mut simulation = create_simulation(generation, count).unwrap();
        simulation.run();
        assert!((simulation.report().max_throughput_mbps - expected).abs() < 1e-9);
    }
}

#[test]
fn every_generation_drains_default_traffic() {
    for generation in Generation::ALL {
        for count in [1, 10, 100] {
            let mut simulation = create_simulation(generation, count).unwrap();
            simulation.run();
            let stations = simulation.engine().stations();
            assert!(stations.iter().all(|s| s.get_transmission_count() == 10), "{} x{}", generation, count);
        }
    }
}

#[test]
fn ofdma_starvation_is_deterministic() {
    let mut config = Config::default();
    config.ofdma.max_rounds = 1;

    let counts = |config: Config| {
        let mut simulation = Simulation::new(Generation::Wifi6, 8, "AP1", config).unwrap();
        simulation.run();
        simulation
            .engine()
            .stations()
            .iter()
            .map(|s| s.get_transmission_count())
            .collect::<Vec<_>>()
    };

    let first = counts(config.clone());
    assert_eq!(first, vec![5, 5, 5, 5, 0, 0, 0, 0]);
    assert_eq!(first, counts(config));
}

#[test]
fn seeded_contention_under_foreign_traffic_reproduces() {
    let mut config = Config::seeded(2024);
    config.contention.busy_probability = 0.5;
    config.contention.iterations = 5;

    let run = |config: Config| {
        let mut simulation = Simulation::new(Generation::Wifi4, 10, "AP1", config).unwrap();
        simulation.run();
        simulation.report()
    };

    let first = run(config.clone());
    let second = run(config);
    assert_eq!(first, second);
    assert!(first.mean_backoff_us > 0.0);
    assert!(first.transmissions < 50);
}

#[test]
fn round_robin_overhead_is_reported() {
    let mut simulation = create_simulation(Generation::Wifi5, 10).unwrap();
    simulation.run();
    let report = simulation.report();
    assert!(report.mean_overhead_us > 0.0);
    assert_eq!(report.mean_backoff_us, 0.0);
}
