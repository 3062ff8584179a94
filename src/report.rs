//! Plain text report
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    constellation::{system_name, system_names},
    epoch::format_utc,
    prelude::{CompressionSupport, Examination, Loader},
};

const UNKNOWN: &str = "Unknown";

/// Section separator
fn banner(f: &mut Formatter, title: &str) -> FmtResult {
    writeln!(f, "{}", "=".repeat(80))?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(80))
}

/// Text report of an [Examination]. Rendering is deterministic:
/// identical inputs always produce the same text.
/// ```
/// use rnx_probe::prelude::*;
/// let examination = Examination::default();
/// let report = examination.report()
///     .with_file_name("site0010.24o")
///     .to_string();
/// assert!(report.contains("File: site0010.24o"));
/// assert!(report.contains("   Unknown (Unknown)"));
/// assert!(report.contains("   Converted:       Not calculated"));
/// ```
#[derive(Debug, Clone)]
pub struct Report<'a> {
    examination: &'a Examination,
    file_name: Option<String>,
    support: CompressionSupport,
}

impl<'a> Report<'a> {
    /// Creates a [Report], reporting the capabilities of the default [Loader]
    pub fn new(examination: &'a Examination) -> Self {
        Self {
            examination,
            file_name: None,
            support: Loader::default().support(),
        }
    }

    /// Names the examined file
    pub fn with_file_name(&self, name: &str) -> Self {
        let mut s = self.clone();
        s.file_name = Some(name.to_string());
        s
    }

    /// Reports the capabilities of a custom [Loader]
    pub fn with_support(&self, support: CompressionSupport) -> Self {
        let mut s = self.clone();
        s.support = support;
        s
    }

    fn fmt_file(&self, f: &mut Formatter) -> FmtResult {
        banner(f, "RINEX FILE INFORMATION")?;
        writeln!(f)?;
        if let Some(name) = &self.file_name {
            writeln!(f, "File: {}", name)?;
        }
        let compression = self.examination.compression;
        if compression.is_compressed() {
            writeln!(f, "Compression: {}", compression)?;
        }
        writeln!(f)
    }

    fn fmt_survey(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        let marker = &header.geodetic_marker;

        banner(f, "SURVEY METADATA")?;
        if let Some(name) = &marker.name {
            writeln!(f, "Marker Name:    {}", name)?;
        }
        if let Some(number) = &marker.number {
            writeln!(f, "Marker Number:  {}", number)?;
        }
        if let Some(marker_type) = &marker.marker_type {
            writeln!(f, "Marker Type:    {}", marker_type)?;
        }
        if let Some(observer) = &header.observer {
            writeln!(f, "Observer:       {}", observer)?;
        }
        if let Some(agency) = &header.agency {
            writeln!(f, "Agency:         {}", agency)?;
        }
        if let Some(model) = &header.rcvr.model {
            write!(f, "Receiver:       {}", model)?;
            if let Some(firmware) = &header.rcvr.firmware {
                write!(f, " (v{})", firmware)?;
            }
            if let Some(sn) = &header.rcvr.sn {
                write!(f, " S/N: {}", sn)?;
            }
            writeln!(f)?;
        }
        if let Some(sn) = &header.rcvr_antenna.sn {
            writeln!(f, "Antenna S/N:    {}", sn)?;
        }
        if header.lacks_survey_metadata() {
            writeln!(f, "⚠ No survey metadata found in header")?;
        }
        writeln!(f)
    }

    fn fmt_version(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        writeln!(f, "1. RINEX VERSION:")?;
        writeln!(
            f,
            "   {} ({})",
            header.version.as_deref().unwrap_or(UNKNOWN),
            header.file_type.as_deref().unwrap_or(UNKNOWN)
        )?;
        writeln!(f)
    }

    fn fmt_constellations(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        let observations = &self.examination.observations;
        writeln!(f, "2. SATELLITE CONSTELLATIONS:")?;
        if !header.constellations.is_empty() {
            writeln!(
                f,
                "   Observation types defined for: {}",
                system_names(&header.constellations)
            )?;
        }
        if !observations.constellations.is_empty() {
            writeln!(
                f,
                "   Satellites observed in data: {}",
                system_names(&observations.constellations)
            )?;
        }
        writeln!(f, "   Note: This appears to be an observation file.")?;
        writeln!(
            f,
            "         Ephemeris data would be in a separate navigation file."
        )?;
        writeln!(f)
    }

    fn fmt_interval(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        writeln!(f, "3. OBSERVATION INTERVAL (EPOCH RATE):")?;
        writeln!(
            f,
            "   Header value:     {} seconds",
            header.interval.as_deref().unwrap_or(UNKNOWN)
        )?;
        match &self.examination.interval {
            Some(summary) => {
                writeln!(f, "   Calculated value: {} seconds", summary)?;
                if let Some(declared) = header.interval_seconds() {
                    if summary.mismatches(declared) {
                        writeln!(
                            f,
                            "   ⚠ WARNING: Header and calculated intervals don't match!"
                        )?;
                    }
                }
                if !summary.consistent {
                    writeln!(
                        f,
                        "   ⚠ NOTE: Observation interval is NOT consistent (varies between epochs)"
                    )?;
                }
            },
            None => {
                if header.interval.is_none() {
                    writeln!(
                        f,
                        "   ⚠ No interval found in header and could not calculate from data"
                    )?;
                }
            },
        }
        writeln!(f)
    }

    fn fmt_duration(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        let observations = &self.examination.observations;
        writeln!(f, "4. OBSERVATION DURATION:")?;
        match (observations.first_epoch, observations.last_epoch) {
            (Some(first), Some(last)) => {
                let duration_s = observations.duration_seconds();
                writeln!(f, "   Start Time:  {}", format_utc(&first))?;
                writeln!(f, "   End Time:    {}", format_utc(&last))?;
                writeln!(
                    f,
                    "   Duration:    {:.1} seconds ({:.2} hours)",
                    duration_s,
                    duration_s / 3600.0
                )?;
                writeln!(f, "   Epochs:      {}", observations.num_epochs)?;
            },
            _ => {
                writeln!(
                    f,
                    "   From header: {}",
                    header.time_of_first_obs.as_deref().unwrap_or(UNKNOWN)
                )?;
                writeln!(
                    f,
                    "   To:          {}",
                    header.time_of_last_obs.as_deref().unwrap_or(UNKNOWN)
                )?;
                writeln!(
                    f,
                    "   (Could not parse observation data for exact duration)"
                )?;
            },
        }
        writeln!(f)
    }

    fn fmt_antenna(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        let antenna = &header.rcvr_antenna;

        writeln!(f, "5. ANTENNA MAKE/MODEL:")?;
        writeln!(f, "   {}", antenna.model.as_deref().unwrap_or(UNKNOWN))?;
        writeln!(f)?;

        writeln!(f, "6. ANTENNA HEIGHT:")?;
        writeln!(
            f,
            "   {} meters",
            antenna.height.as_deref().unwrap_or(UNKNOWN)
        )?;
        if let Some(delta) = &antenna.delta_hen {
            writeln!(f, "   (Full delta H/E/N: {})", delta)?;
        }
        writeln!(f)?;

        writeln!(f, "7. ANTENNA POSITION:")?;
        writeln!(
            f,
            "   Approximate XYZ: {}",
            header.approx_position.as_deref().unwrap_or(UNKNOWN)
        )?;
        match &header.rx_geodetic {
            Some(geo) => writeln!(f, "   Converted:       {}", geo)?,
            None => writeln!(f, "   Converted:       Not calculated")?,
        }
        writeln!(f)
    }

    fn fmt_quality(&self, f: &mut Formatter) -> FmtResult {
        let observations = &self.examination.observations;
        banner(f, "DATA QUALITY INDICATORS")?;
        writeln!(f)?;
        if observations.num_epochs > 0 {
            writeln!(f, "Total Epochs:      {}", observations.num_epochs)?;
        }
        if !observations.constellations.is_empty() {
            writeln!(
                f,
                "GNSS Systems:      {} system(s) - {}",
                observations.constellations.len(),
                system_names(&observations.constellations)
            )?;
        }
        if !observations.satellites.is_empty() {
            writeln!(f, "Satellites:        {}", observations.satellites.len())?;
        }
        if let Some(stats) = &observations.sat_per_epoch {
            writeln!(
                f,
                "Sats per epoch:    min {} / mean {:.1} / max {}",
                stats.min,
                stats.mean(),
                stats.max
            )?;
        }
        writeln!(f)
    }

    fn fmt_additional(&self, f: &mut Formatter) -> FmtResult {
        let header = &self.examination.header;
        banner(f, "ADDITIONAL INFORMATION")?;
        writeln!(f)?;
        if !header.observation_types.is_empty() {
            writeln!(f, "Observation Types:")?;
            for (system, codes) in header.observation_types.iter() {
                writeln!(f, "   {}: {}", system_name(system), codes.join(", "))?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "Satellite System: {}",
            header.satellite_system.as_deref().unwrap_or(UNKNOWN)
        )?;
        writeln!(
            f,
            "Leap Seconds: {}",
            header.leap_seconds.as_deref().unwrap_or(UNKNOWN)
        )?;
        writeln!(f)
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        self.fmt_file(f)?;
        self.fmt_survey(f)?;
        self.fmt_version(f)?;
        self.fmt_constellations(f)?;
        self.fmt_interval(f)?;
        self.fmt_duration(f)?;
        self.fmt_antenna(f)?;
        self.fmt_quality(f)?;
        self.fmt_additional(f)?;
        banner(f, "COMPRESSION SUPPORT STATUS")?;
        write!(f, "{}", self.support)
    }
}
