//! Header section parser
use crate::{
    constants::HeaderLayout,
    constellation::ALL_SYSTEMS,
    geodetic::GeodeticPosition,
    hardware::Receiver,
    header::Header,
    prelude::ParsingError,
};

/// Header fields we know how to interprate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Field {
    EndOfHeader,
    Version,
    MarkerName,
    MarkerNumber,
    MarkerType,
    ObserverAgency,
    Receiver,
    AntennaType,
    AntennaDelta,
    ApproxPosition,
    Interval,
    TimeOfFirstObs,
    TimeOfLastObs,
    LeapSeconds,
    SystemObservables,
    Observables,
}

/// Label patterns, in order of priority. Labels are matched by inclusion,
/// several patterns may designate the same [Field].
const LABELS: &[(&str, Field)] = &[
    (HeaderLayout::END_OF_HEADER, Field::EndOfHeader),
    ("RINEX VERSION", Field::Version),
    ("MARKER NAME", Field::MarkerName),
    ("MARKER NUMBER", Field::MarkerNumber),
    ("MARKER TYPE", Field::MarkerType),
    ("OBSERVER / AGENCY", Field::ObserverAgency),
    ("REC # / TYPE / VERS", Field::Receiver),
    ("ANT # / TYPE", Field::AntennaType),
    ("ANTENNA TYPE", Field::AntennaType),
    ("ANTENNA: DELTA H/E/N", Field::AntennaDelta),
    ("ANTENNA DELTA", Field::AntennaDelta),
    ("APPROX POSITION XYZ", Field::ApproxPosition),
    ("INTERVAL", Field::Interval),
    ("TIME OF FIRST OBS", Field::TimeOfFirstObs),
    ("TIME OF LAST OBS", Field::TimeOfLastObs),
    ("LEAP SECONDS", Field::LeapSeconds),
    ("SYS / # / OBS TYPES", Field::SystemObservables),
    ("TYPES OF OBSERV", Field::Observables),
];

impl Field {
    fn identify(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .find(|(pattern, _)| label.contains(pattern))
            .map(|(_, field)| *field)
    }
}

/// Observation types declaration being continued on following lines
#[derive(Debug, Clone, PartialEq)]
enum Continuation {
    /// V3: system being declared
    System(String),
    /// V2: declared number of observation types
    Observables(usize),
}

/// Splits a header line into its (content, label) parts, both trimmed
fn split_line(line: &str) -> Result<(&str, &str), ParsingError> {
    let offset = line
        .char_indices()
        .nth(HeaderLayout::CONTENT_WIDTH)
        .map(|(offset, _)| offset)
        .or_else(|| {
            if line.chars().count() == HeaderLayout::CONTENT_WIDTH {
                Some(line.len())
            } else {
                None
            }
        })
        .ok_or(ParsingError::HeaderLineTooShort)?;
    let (content, label) = line.split_at(offset);
    Ok((content.trim(), label.trim()))
}

impl Header {
    /// Parses [Header] from the first lines of the file.
    /// Returns the [Header] and the index of the first line following
    /// the "END OF HEADER" line, when that line was found.
    /// Lines that do not parse are skipped: this never fails.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> (Self, Option<usize>) {
        let mut header = Self::default();
        // observation types being declared, only lives during this scan
        let mut continuation: Option<Continuation> = None;

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let (content, label) = match split_line(line) {
                Ok(split) => split,
                Err(e) => {
                    debug!("line {}: {}", index + 1, e);
                    continue;
                },
            };

            let field = match Field::identify(label) {
                Some(Field::EndOfHeader) => return (header, Some(index + 1)),
                Some(field) => field,
                None => continue, // comments and unhandled fields
            };

            if let Err(e) = header.parse_field(field, content, &mut continuation) {
                debug!("line {} (\"{}\"): {}", index + 1, label, e);
            }
        }

        (header, None)
    }

    fn parse_field(
        &mut self,
        field: Field,
        content: &str,
        continuation: &mut Option<Continuation>,
    ) -> Result<(), ParsingError> {
        match field {
            Field::Version => {
                let items = content.split_whitespace().collect::<Vec<_>>();
                if items.len() < 2 {
                    return Err(ParsingError::MissingHeaderFields);
                }
                self.version = Some(items[0].to_string());
                self.file_type = Some(items[1].to_string());
                if let Some(system) = items.get(2) {
                    self.satellite_system = Some(system.to_string());
                }
            },
            Field::MarkerName => {
                self.geodetic_marker = self.geodetic_marker.with_name(content);
            },
            Field::MarkerNumber => {
                self.geodetic_marker = self.geodetic_marker.with_number(content);
            },
            Field::MarkerType => {
                self.geodetic_marker = self.geodetic_marker.with_type(content);
            },
            Field::ObserverAgency => {
                let items = content.split_whitespace().collect::<Vec<_>>();
                if let Some(observer) = items.first() {
                    self.observer = Some(observer.to_string());
                }
                if items.len() > 1 {
                    self.agency = Some(items[1..].join(" "));
                }
            },
            Field::Receiver => {
                let rcvr = Receiver::from_content(content);
                if !rcvr.is_empty() {
                    self.rcvr = rcvr;
                }
            },
            Field::AntennaType => {
                self.rcvr_antenna = self.rcvr_antenna.with_type_content(content);
            },
            Field::AntennaDelta => {
                self.rcvr_antenna = self.rcvr_antenna.with_delta_content(content);
            },
            Field::ApproxPosition => {
                self.approx_position = Some(content.to_string());
                self.rx_geodetic = None;
                let ecef = parse_ecef(content)?;
                match GeodeticPosition::from_ecef_wgs84(ecef) {
                    Ok(geo) => self.rx_geodetic = Some(geo),
                    Err(e) => debug!("approximate position: {}", e),
                }
            },
            Field::Interval => self.interval = Some(content.to_string()),
            Field::TimeOfFirstObs => self.time_of_first_obs = Some(content.to_string()),
            Field::TimeOfLastObs => self.time_of_last_obs = Some(content.to_string()),
            Field::LeapSeconds => self.leap_seconds = Some(content.to_string()),
            Field::SystemObservables => self.parse_v3_observables(content, continuation)?,
            Field::Observables => self.parse_v2_observables(content, continuation)?,
            Field::EndOfHeader => {},
        }
        Ok(())
    }

    /// Parses V3 "SYS / # / OBS TYPES": a line starting with a single
    /// letter declares a new system, any other line continues
    /// the declaration of the previous system.
    fn parse_v3_observables(
        &mut self,
        content: &str,
        continuation: &mut Option<Continuation>,
    ) -> Result<(), ParsingError> {
        let items = content.split_whitespace().collect::<Vec<_>>();
        let first = match items.first() {
            Some(first) => *first,
            None => return Ok(()),
        };

        let mut chars = first.chars();
        let new_system = match (chars.next(), chars.next()) {
            (Some(c), None) => c.is_alphabetic(),
            _ => false,
        };

        if new_system {
            items
                .get(1)
                .and_then(|count| count.parse::<u16>().ok())
                .ok_or(ParsingError::ObservationCount)?;

            let codes = items[2..].iter().map(|c| c.to_string()).collect();
            self.observation_types.insert(first, codes);
            self.constellations.insert(first.to_string());
            *continuation = Some(Continuation::System(first.to_string()));
        } else if let Some(Continuation::System(system)) = continuation {
            if let Some(codes) = self.observation_types.get_mut(system) {
                codes.extend(items.iter().map(|c| c.to_string()));
            }
        }
        Ok(())
    }

    /// Parses V2 "# / TYPES OF OBSERV". Observation types
    /// apply to all systems. Continuation lines (not starting with
    /// a count) complete the list, up to the declared count.
    fn parse_v2_observables(
        &mut self,
        content: &str,
        continuation: &mut Option<Continuation>,
    ) -> Result<(), ParsingError> {
        let items = content.split_whitespace().collect::<Vec<_>>();
        let first = match items.first() {
            Some(first) => *first,
            None => return Ok(()),
        };

        if let Ok(count) = first.parse::<usize>() {
            let codes = items
                .iter()
                .skip(1)
                .take(count)
                .map(|c| c.to_string())
                .collect();
            self.observation_types.insert(ALL_SYSTEMS, codes);
            *continuation = Some(Continuation::Observables(count));
            return Ok(());
        }

        match continuation {
            Some(Continuation::Observables(count)) => {
                let codes = self
                    .observation_types
                    .get_mut(ALL_SYSTEMS)
                    .ok_or(ParsingError::ObservationCount)?;
                let missing = count.saturating_sub(codes.len());
                codes.extend(items.iter().take(missing).map(|c| c.to_string()));
                Ok(())
            },
            _ => Err(ParsingError::ObservationCount),
        }
    }
}

/// Parses "APPROX POSITION XYZ" content: exactly 3 coordinates
fn parse_ecef(content: &str) -> Result<(f64, f64, f64), ParsingError> {
    let coords = content
        .split_whitespace()
        .map(|item| item.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParsingError::Coordinates)?;
    match coords[..] {
        [x, y, z] => Ok((x, y, z)),
        _ => Err(ParsingError::Coordinates),
    }
}
