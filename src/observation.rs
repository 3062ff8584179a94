//! Observation body content
use std::collections::BTreeSet;

use crate::prelude::{Duration, Epoch};

#[cfg(feature = "serde")]
use serde::Serialize;

mod parsing;

/// Running statistics of the number of satellites declared per epoch
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SatellitesPerEpoch {
    pub min: u16,
    pub max: u16,
    /// Sum over all contributing epochs
    sum: u64,
    /// Number of contributing epochs
    pub epochs: usize,
}

impl SatellitesPerEpoch {
    fn new(num_sat: u16) -> Self {
        Self {
            min: num_sat,
            max: num_sat,
            sum: num_sat as u64,
            epochs: 1,
        }
    }

    fn push(&mut self, num_sat: u16) {
        self.min = self.min.min(num_sat);
        self.max = self.max.max(num_sat);
        self.sum += num_sat as u64;
        self.epochs += 1;
    }

    /// Average number of satellites per epoch
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.epochs as f64
    }
}

/// What the observation body actually contains.
/// Timestamps are UTC, truncated to integer seconds.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Observations {
    /// Number of epochs that were decoded
    pub num_epochs: usize,
    /// First decoded [Epoch]
    pub first_epoch: Option<Epoch>,
    /// Last decoded [Epoch]
    pub last_epoch: Option<Epoch>,
    /// First decoded [Epoch]s, in order of appearance, bounded to 100
    pub epochs: Vec<Epoch>,
    /// Observed system codes
    pub constellations: BTreeSet<String>,
    /// Observed satellite identifiers
    pub satellites: BTreeSet<String>,
    /// Satellites per epoch, as declared on epoch lines
    pub sat_per_epoch: Option<SatellitesPerEpoch>,
}

impl Observations {
    /// Returns the [Duration] between first and last epoch
    pub fn duration(&self) -> Option<Duration> {
        Some(self.last_epoch? - self.first_epoch?)
    }

    /// Returns the duration between first and last epoch, in seconds.
    /// Null when no epoch was decoded.
    pub fn duration_seconds(&self) -> f64 {
        self.duration().map(|dt| dt.to_seconds()).unwrap_or(0.0)
    }

    fn push_num_sat(&mut self, num_sat: u16) {
        match &mut self.sat_per_epoch {
            Some(stats) => stats.push(num_sat),
            None => self.sat_per_epoch = Some(SatellitesPerEpoch::new(num_sat)),
        }
    }
}
