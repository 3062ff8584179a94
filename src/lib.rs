#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

pub mod compression;
pub mod constellation;
pub mod epoch;
pub mod geodetic;
pub mod hardware;
pub mod hatanaka;
pub mod header;
pub mod marker;
pub mod observation;
pub mod reader;
pub mod report;
pub mod sampling;

mod constants;
mod error;

#[cfg(test)]
mod tests;

use std::path::Path;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        compression::Compression,
        error::{ConversionError, Error, ParsingError},
        geodetic::GeodeticPosition,
        hardware::{Antenna, Receiver},
        hatanaka::Hatanaka,
        header::{Header, ObservationTypes},
        marker::GeodeticMarker,
        observation::{Observations, SatellitesPerEpoch},
        reader::{ArchiveDecoder, CompressionSupport, Content, Loader},
        report::Report,
        sampling::IntervalSummary,
        Examination,
    };

    // pub re-export
    pub use gnss::prelude::Constellation;
    pub use hifitime::{Duration, Epoch};
}

use prelude::*;

/// Returns columns `start..end` of given line, counted in characters.
/// Out of range columns are clamped, like text slicing would do.
pub(crate) fn columns(line: &str, start: usize, end: usize) -> &str {
    let offset = |col: usize| {
        line.char_indices()
            .map(|(i, _)| i)
            .nth(col)
            .unwrap_or(line.len())
    };
    let (start, end) = (offset(start), offset(end));
    if start < end {
        &line[start..end]
    } else {
        ""
    }
}

/// Number of columns (characters) in given line
pub(crate) fn width(line: &str) -> usize {
    line.chars().count()
}

/// [Examination] gathers everything we learned from one RINEX file.
/// ```
/// use rnx_probe::prelude::*;
/// let content = "     3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE
///                                                             END OF HEADER
/// > 2024 01 01 00 00  0.0000000  0  1
/// G01  20147683.700
/// > 2024 01 01 00 00 30.0000000  0  1
/// G01  20147688.700";
/// let lines: Vec<&str> = content.lines().collect();
/// let examination = Examination::from_lines(&lines);
/// assert_eq!(examination.header.version.as_deref(), Some("3.04"));
/// assert_eq!(examination.observations.num_epochs, 2);
/// assert_eq!(examination.interval.unwrap().to_string(), "30.000");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Examination {
    /// Metadata declared in the header section
    pub header: Header,
    /// What the observation body actually contains
    pub observations: Observations,
    /// Sampling interval, derived from the retained epochs
    pub interval: Option<IntervalSummary>,
    /// Compression that was undone to read this content
    pub compression: Compression,
}

impl Examination {
    /// Examines decompressed RINEX content, line by line.
    /// This never fails: lines that do not parse are skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let (header, end_of_header) = Header::parse(lines);
        let body_offset = end_of_header.unwrap_or_else(|| {
            warn!("header terminator not found: scanning the whole content");
            0
        });

        let observations = Observations::scan(lines, body_offset);
        let interval = IntervalSummary::from_epochs(&observations.epochs);

        info!(
            "{} epochs, observed systems: {:?}",
            observations.num_epochs, observations.constellations
        );

        Self {
            header,
            observations,
            interval,
            compression: Compression::None,
        }
    }

    /// Loads (with default [Loader]) and examines local file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Loader::default().load(path).map(Self::from_content)
    }

    /// Examines [Content] obtained with a [Loader]
    pub fn from_content(content: Content) -> Self {
        let mut s = Self::from_lines(&content.lines);
        s.compression = content.compression;
        s
    }

    /// Creates a [Report] of this [Examination]
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn columns_slicing() {
        let line = " 21  1  1  0  0  0.0000000  0  8G01G02";
        assert_eq!(columns(line, 1, 3), "21");
        assert_eq!(columns(line, 4, 6), " 1");
        assert_eq!(columns(line, 16, 26), " 0.0000000");
        assert_eq!(columns(line, 36, 80), "G02");
        assert_eq!(columns(line, 80, 90), "");
        assert_eq!(columns(line, 5, 2), "");
    }

    #[test]
    fn columns_are_characters() {
        let line = "é12345";
        assert_eq!(width(line), 6);
        assert_eq!(columns(line, 0, 1), "é");
        assert_eq!(columns(line, 1, 3), "12");
    }
}
