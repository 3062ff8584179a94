//! Sampling interval analysis
use itertools::Itertools;

use crate::{constants::IntervalWindow, prelude::Epoch};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Statistics of the interval between successive epochs.
/// Only plausible intervals (within [0.001, 3600] seconds) contribute.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct IntervalSummary {
    /// Shortest interval, in seconds
    pub min_s: f64,
    /// Longest interval, in seconds
    pub max_s: f64,
    /// Average interval, in seconds
    pub mean_s: f64,
    /// Number of intervals that contributed
    pub population: usize,
    /// True when all intervals are within 1% of the average
    pub consistent: bool,
}

impl std::fmt::Display for IntervalSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.consistent {
            write!(f, "{:.3}", self.mean_s)
        } else {
            write!(
                f,
                "{:.3} (range: {:.3}-{:.3})",
                self.mean_s, self.min_s, self.max_s
            )
        }
    }
}

impl IntervalSummary {
    /// Analyzes intervals between successive [Epoch]s, in given order.
    /// Returns None when less than 2 epochs are given, or when
    /// none of the intervals is plausible.
    /// ```
    /// use rnx_probe::prelude::*;
    /// let t0 = Epoch::from_gregorian_utc_at_midnight(2024, 1, 1);
    /// let epochs = (0..10)
    ///     .map(|i| t0 + Duration::from_seconds(30.0 * i as f64))
    ///     .collect::<Vec<_>>();
    /// let summary = IntervalSummary::from_epochs(&epochs)
    ///     .unwrap();
    /// assert!(summary.consistent);
    /// assert_eq!(summary.to_string(), "30.000");
    /// ```
    pub fn from_epochs(epochs: &[Epoch]) -> Option<Self> {
        let intervals = epochs
            .iter()
            .tuple_windows()
            .map(|(ek, ekp1)| (*ekp1 - *ek).to_seconds());
        Self::from_intervals(intervals)
    }

    /// Analyzes intervals expressed in seconds
    pub fn from_intervals<I: IntoIterator<Item = f64>>(intervals: I) -> Option<Self> {
        let (mut min_s, mut max_s, mut sum) = (f64::MAX, f64::MIN, 0.0_f64);
        let mut population = 0;

        for dt in intervals {
            if !(IntervalWindow::MIN_S..=IntervalWindow::MAX_S).contains(&dt) {
                trace!("discarded interval: {}s", dt);
                continue;
            }
            min_s = min_s.min(dt);
            max_s = max_s.max(dt);
            sum += dt;
            population += 1;
        }

        if population == 0 {
            return None;
        }

        let mean_s = sum / population as f64;
        Some(Self {
            min_s,
            max_s,
            mean_s,
            population,
            consistent: max_s - min_s < IntervalWindow::TOLERANCE * mean_s,
        })
    }

    /// Returns true if given (declared) interval differs from
    /// the average interval, as reported (millisecond resolution),
    /// by more than 1% of the declared value.
    pub fn mismatches(&self, declared_s: f64) -> bool {
        let mean_s = (self.mean_s * 1000.0).round() / 1000.0;
        (declared_s - mean_s).abs() > IntervalWindow::TOLERANCE * declared_s
    }
}
