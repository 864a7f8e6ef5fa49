//! Channel-access arbitration simulator for three WLAN generations: CSMA/CA
//! contention (Wi-Fi 4), multi-user round-robin (Wi-Fi 5) and OFDMA
//! sub-channels (Wi-Fi 6), sharing one queue and latency model.

pub mod access_point;
pub mod channel;
pub mod config;
pub mod error;
pub mod node;
pub mod packet;
pub mod policy;
pub mod scheduler;
pub mod simulation;
pub mod stats;
pub mod theoretical;

pub use access_point::AccessPoint;
pub use channel::{Channel, Holder, SubChannel};
pub use config::Config;
pub use error::{Result, SimError};
pub use node::Station;
pub use packet::{Packet, PacketQueue};
pub use policy::{AccessPolicy, Generation, RunBound};
pub use scheduler::ArbitrationEngine;
pub use simulation::{create_simulation, Simulation};
pub use stats::{Report, StatisticsCollector};
