//! Epoch lines decoding
use crate::{columns, prelude::Epoch, prelude::ParsingError, width};

/// Decoded epoch line
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EpochLine {
    /// Epoch, in UTC, truncated to integer seconds
    pub epoch: Epoch,
    /// Epoch flag, 0 and 1 are sampling epochs, 2 to 6 are events
    pub flag: Option<u8>,
    /// Number of satellites declared for this epoch
    pub num_sat: Option<u16>,
    /// Satellites listed on the epoch line itself (V2 only)
    pub satellites: Vec<String>,
}

impl EpochLine {
    /// True when this line describes a sampling epoch (flag 0 or 1, or omitted)
    pub fn is_sampling(&self) -> bool {
        matches!(self.flag, None | Some(0) | Some(1))
    }
}

/// V3 epoch lines are marked with '>'
pub(crate) fn is_v3_epoch(line: &str) -> bool {
    line.starts_with('>')
}

/// V2 epoch lines start with a blank followed by a two digit year
pub(crate) fn is_v2_epoch(line: &str) -> bool {
    if width(line) <= 29 || !line.starts_with(' ') {
        return false;
    }
    let year = columns(line, 1, 3).trim();
    !year.is_empty() && year.chars().all(|c| c.is_ascii_digit())
}

/// Builds an [Epoch] from its gregorian UTC fields. Fractional seconds are truncated.
pub(crate) fn parse_utc(
    year: &str,
    month: &str,
    day: &str,
    hours: &str,
    minutes: &str,
    seconds: &str,
) -> Result<Epoch, ParsingError> {
    let y = year
        .parse::<i32>()
        .map_err(|_| ParsingError::EpochYear(year.to_string()))?;
    parse_utc_with_year(year, y, month, day, hours, minutes, seconds)
}

fn parse_utc_with_year(
    year: &str,
    y: i32,
    month: &str,
    day: &str,
    hours: &str,
    minutes: &str,
    seconds: &str,
) -> Result<Epoch, ParsingError> {
    if !(1..=9999).contains(&y) {
        return Err(ParsingError::EpochYear(year.to_string()));
    }
    let m = month
        .parse::<u8>()
        .map_err(|_| ParsingError::EpochMonth(month.to_string()))?;
    let d = day
        .parse::<u8>()
        .map_err(|_| ParsingError::EpochDay(day.to_string()))?;
    let hh = hours
        .parse::<u8>()
        .map_err(|_| ParsingError::EpochHours(hours.to_string()))?;
    let mm = minutes
        .parse::<u8>()
        .map_err(|_| ParsingError::EpochMinutes(minutes.to_string()))?;
    let ss = seconds
        .parse::<f64>()
        .map_err(|_| ParsingError::EpochSeconds(seconds.to_string()))?
        .trunc();
    if !(0.0..60.0).contains(&ss) {
        return Err(ParsingError::EpochSeconds(seconds.to_string()));
    }
    Epoch::maybe_from_gregorian_utc(y, m, d, hh, mm, ss as u8, 0)
        .map_err(|_| ParsingError::DateTime)
}

/// Decodes a V3 epoch line:
/// `> YYYY MM DD HH MM SS.SSSSSSS  F NN`
pub(crate) fn parse_v3(line: &str) -> Result<EpochLine, ParsingError> {
    let items = line.split_whitespace().collect::<Vec<_>>();
    if items.len() < 7 {
        return Err(ParsingError::MissingEpochFields);
    }
    let epoch = parse_utc(items[1], items[2], items[3], items[4], items[5], items[6])?;
    let flag = items.get(7).and_then(|f| f.parse::<u8>().ok());
    let num_sat = items.get(8).and_then(|n| n.parse::<u16>().ok());
    Ok(EpochLine {
        epoch,
        flag,
        num_sat,
        satellites: Vec::new(),
    })
}

/// Decodes a V2 epoch line, fixed columns:
/// ` YY MM DD HH MM SS.SSSSSSS  F NNsnnsnn..`.
/// Two digit years from 80 are 20th century.
pub(crate) fn parse_v2(line: &str) -> Result<EpochLine, ParsingError> {
    let year = columns(line, 1, 3).trim();
    let y = year
        .parse::<i32>()
        .map_err(|_| ParsingError::EpochYear(year.to_string()))?;
    let y = if y >= 80 { y + 1900 } else { y + 2000 };

    let epoch = parse_utc_with_year(
        year,
        y,
        columns(line, 4, 6).trim(),
        columns(line, 7, 9).trim(),
        columns(line, 10, 12).trim(),
        columns(line, 13, 15).trim(),
        columns(line, 16, 26).trim(),
    )?;

    let flag = columns(line, 28, 29).trim().parse::<u8>().ok();
    let num_sat = columns(line, 29, 32).trim().parse::<u16>().ok();
    let satellites = match num_sat {
        Some(n) => parse_v2_satellites(columns(line, 32, 68), n),
        None => Vec::new(),
    };

    Ok(EpochLine {
        epoch,
        flag,
        num_sat,
        satellites,
    })
}

/// Parses V2 satellite list (up to 12 per line, 3 columns each).
/// A blank system identifier means GPS.
fn parse_v2_satellites(content: &str, num_sat: u16) -> Vec<String> {
    let mut satellites = Vec::with_capacity(num_sat as usize);
    for i in 0..(num_sat as usize).min(12) {
        let item = columns(content, i * 3, i * 3 + 3);
        let system = match item.chars().next() {
            Some(' ') => 'G',
            Some(c) if c.is_ascii_alphabetic() => c,
            _ => break,
        };
        match columns(item, 1, 3).trim().parse::<u8>() {
            Ok(prn) => satellites.push(format!("{}{:02}", system, prn)),
            Err(_) => break,
        }
    }
    satellites
}

/// Formats an [Epoch] as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_utc(epoch: &Epoch) -> String {
    let (y, m, d, hh, mm, ss, _) = epoch.to_gregorian_utc();
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        y, m, d, hh, mm, ss
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn v3_epoch() {
        let line = "> 2022 03 04 00 00 30.5000000  0 12";
        assert!(is_v3_epoch(line));
        assert!(!is_v2_epoch(line));

        let decoded = parse_v3(line).unwrap();
        assert_eq!(format_utc(&decoded.epoch), "2022-03-04 00:00:30");
        assert_eq!(decoded.flag, Some(0));
        assert_eq!(decoded.num_sat, Some(12));
        assert!(decoded.satellites.is_empty());
        assert!(decoded.is_sampling());
    }

    #[test]
    fn event_flags() {
        let decoded = parse_v3("> 2022 03 04 00 00 30.0000000  4  2").unwrap();
        assert_eq!(decoded.flag, Some(4));
        assert!(!decoded.is_sampling());

        let decoded = parse_v3("> 2022 03 04 00 00 30.0000000  1  2").unwrap();
        assert!(decoded.is_sampling());

        let decoded = parse_v2(" 21  1  1  0  0 30.0000000  3  1G05").unwrap();
        assert_eq!(decoded.flag, Some(3));
        assert!(!decoded.is_sampling());
    }

    #[test]
    fn year_out_of_range() {
        assert_eq!(
            parse_v3("> 0 01 01 00 00  0.0000000  0  1"),
            Err(ParsingError::EpochYear("0".to_string()))
        );
        assert_eq!(
            parse_v3("> 10000 01 01 00 00  0.0000000  0  1"),
            Err(ParsingError::EpochYear("10000".to_string()))
        );
        assert_eq!(
            parse_v3("> -5 01 01 00 00  0.0000000  0  1"),
            Err(ParsingError::EpochYear("-5".to_string()))
        );
        assert!(parse_v3("> 9999 12 31 00 00  0.0000000  0  1").is_ok());
        assert!(parse_v3("> 1 01 01 00 00  0.0000000  0  1").is_ok());
    }

    #[test]
    fn v3_epoch_failures() {
        assert_eq!(
            parse_v3("> 2022 03 04 00 00"),
            Err(ParsingError::MissingEpochFields)
        );
        assert_eq!(
            parse_v3("> 2022 13 04 00 00  0.0000000  0 12"),
            Err(ParsingError::DateTime)
        );
        assert_eq!(
            parse_v3("> 2022 02 30 00 00  0.0000000  0 12"),
            Err(ParsingError::DateTime)
        );
        assert_eq!(
            parse_v3("> 2022 02 03 0a 00  0.0000000  0 12"),
            Err(ParsingError::EpochHours("0a".to_string()))
        );
        assert_eq!(
            parse_v3("> 2022 02 03 00 00 60.0000000  0 12"),
            Err(ParsingError::EpochSeconds("60.0000000".to_string()))
        );
    }

    #[test]
    fn v2_epoch() {
        let line = " 21  1  1  0  0 30.0000000  0  8G01G02G08 10R01R02E11S23";
        assert!(is_v2_epoch(line));
        assert!(!is_v3_epoch(line));

        let decoded = parse_v2(line).unwrap();
        assert_eq!(format_utc(&decoded.epoch), "2021-01-01 00:00:30");
        assert_eq!(decoded.num_sat, Some(8));
        assert_eq!(
            decoded.satellites,
            vec!["G01", "G02", "G08", "G10", "R01", "R02", "E11", "S23"]
        );
    }

    #[test]
    fn v2_century() {
        let line = " 99 12 31 23 59 59.9000000  0  1G05";
        let decoded = parse_v2(line).unwrap();
        assert_eq!(format_utc(&decoded.epoch), "1999-12-31 23:59:59");

        let line = " 79 12 31 23 59 59.0000000  0  1G05";
        let decoded = parse_v2(line).unwrap();
        assert_eq!(format_utc(&decoded.epoch), "2079-12-31 23:59:59");
    }

    #[test]
    fn v2_epoch_detection() {
        // observation data: looks like an epoch, fails to decode
        let line = "  23619095.450  -53875.632 8  -41981.375 4";
        assert!(is_v2_epoch(line));
        assert!(parse_v2(line).is_err());
        // observation data, blank first columns
        assert!(!is_v2_epoch("                  -53875.632 8  -41981.375 4"));
        // too short
        assert!(!is_v2_epoch(" 21  1  1  0  0 30.0000000"));
        // not starting with a blank
        assert!(!is_v2_epoch("G01 21  1  1  0  0 30.0000000  0  1G05"));
    }

    #[test]
    fn v2_satellites_truncated() {
        // declared 3, only 2 listed
        let satellites = parse_v2_satellites("G01G02", 3);
        assert_eq!(satellites, vec!["G01", "G02"]);
        // continuation of more than 12 satellites is on following lines
        let satellites = parse_v2_satellites("G01G02G03G04G05G06G07G08G09G10G11G12", 14);
        assert_eq!(satellites.len(), 12);
    }
}
