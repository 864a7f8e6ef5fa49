//! Shared medium model: occupancy, backoff sampling and sub-channel partitioning.

use std::fmt;

use log::trace;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{Result, SimError};

/// Who currently holds the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Holder {
    Station(usize),
    /// Traffic from outside the simulated BSS.
    External,
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Station(id) => write!(f, "station {}", id),
            Holder::External => write!(f, "external traffic"),
        }
    }
}

/// Half-duplex shared medium. At most one holder at a time.
#[derive(Debug, Clone)]
pub struct Channel {
    bandwidth_mhz: f64,
    holder: Option<Holder>,
    backoff: Uniform<u32>,
    grants: u64,
}

impl Channel {
    pub fn new(bandwidth_mhz: f64, backoff_window: u32) -> Channel {
        Channel {
            bandwidth_mhz,
            holder: None,
            backoff: Uniform::new_inclusive(0, backoff_window),
            grants: 0,
        }
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        self.bandwidth_mhz
    }

    pub fn is_free(&self) -> bool {
        self.holder.is_none()
    }

    pub fn holder(&self) -> Option<Holder> {
        self.holder
    }

    pub fn acquire(&mut self, holder: Holder) -> Result<()> {
        if let Some(current) = self.holder {
            trace!("{} found channel held by {}", holder, current);
            return Err(SimError::ChannelBusy);
        }
        self.holder = Some(holder);
        self.grants += 1;
        Ok(())
    }

    pub fn release(&mut self) {
        self.holder = None;
    }

    /// Number of successful acquisitions since creation.
    pub fn grants(&self) -> u64 {
        self.grants
    }

    /// Backoff in slots, uniform over `[0, backoff_window]`.
    pub fn sample_backoff<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.backoff.sample(rng)
    }

    /// Split the channel into independently occupiable slices.
    pub fn partition(&self, widths_mhz: &[f64]) -> Vec<SubChannel> {
        widths_mhz.iter().map(|w| SubChannel::new(*w)).collect()
    }
}

/// OFDMA resource unit: one station at most.
#[derive(Debug, Clone, PartialEq)]
pub struct SubChannel {
    bandwidth_mhz: f64,
    holder: Option<usize>,
}

impl SubChannel {
    pub fn new(bandwidth_mhz: f64) -> SubChannel {
        SubChannel {
            bandwidth_mhz,
            holder: None,
        }
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        self.bandwidth_mhz
    }

    pub fn is_occupied(&self) -> bool {
        self.holder.is_some()
    }

    pub fn holder(&self) -> Option<usize> {
        self.holder
    }

    pub fn occupy(&mut self, index: usize, station: usize) -> Result<()> {
        if self.holder.is_some() {
            return Err(SimError::SubChannelBusy { index });
        }
        self.holder = Some(station);
        Ok(())
    }

    pub fn release(&mut self) {
        self.holder = None;
    }
}
