use crate::channel::{Channel, SubChannel};
use crate::config::Config;
use crate::theoretical::PhyParams;

/// The access point: owns the channel and the PHY parameters, and refers to
/// connected stations by their index in the engine's station arena.
#[derive(Debug, Clone)]
pub struct AccessPoint {
    id: String,
    channel: Channel,
    sub_channels: Vec<SubChannel>,
    phy: PhyParams,
    connected: Vec<usize>,
}

impl AccessPoint {
    pub fn new(id: impl Into<String>, config: &Config) -> AccessPoint {
        let phy = PhyParams::from_config(&config.phy);
        AccessPoint {
            id: id.into(),
            channel: Channel::new(phy.bandwidth_mhz, config.contention.backoff_window),
            sub_channels: Vec::new(),
            phy,
            connected: Vec::new(),
        }
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn connect(&mut self, station: usize) {
        if !self.connected.contains(&station) {
            self.connected.push(station);
        }
    }

    pub fn connected(&self) -> &[usize] {
        &self.connected
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut Channel {
        &mut self.channel
    }

    pub fn phy(&self) -> &PhyParams {
        &self.phy
    }

    pub fn max_throughput_mbps(&self) -> f64 {
        self.phy.max_throughput_mbps()
    }

    /// Replace the current sub-channel layout with a fresh, unoccupied one.
    pub fn partition_channel(&mut self, widths_mhz: &[f64]) -> &mut [SubChannel] {
        self.sub_channels = self.channel.partition(widths_mhz);
        &mut self.sub_channels
    }

    pub fn sub_channels(&self) -> &[SubChannel] {
        &self.sub_channels
    }

    pub fn release_sub_channels(&mut self) {
        for sub in self.sub_channels.iter_mut() {
            sub.release();
        }
    }
}
