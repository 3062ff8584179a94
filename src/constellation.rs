//! GNSS system codes, as they appear in RINEX
use std::str::FromStr;

use itertools::Itertools;

use crate::prelude::Constellation;

/// System key used for V2 observation types,
/// which are not tied to a particular constellation.
pub const ALL_SYSTEMS: &str = "ALL";

/// Returns the report name of a system code: single uppercase letter RINEX codes
/// are identified and translated, [ALL_SYSTEMS] is supported,
/// unknown codes are returned unchanged.
/// ```
/// use rnx_probe::constellation::system_name;
/// assert_eq!(system_name("I"), "IRNSS/NavIC");
/// assert_eq!(system_name("ALL"), "All Systems");
/// assert_eq!(system_name("X"), "X");
/// ```
pub fn system_name(code: &str) -> String {
    if code == ALL_SYSTEMS {
        return "All Systems".to_string();
    }
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => {},
        _ => return code.to_string(),
    }
    match Constellation::from_str(code) {
        Ok(Constellation::GPS) => "GPS".to_string(),
        Ok(Constellation::Glonass) => "GLONASS".to_string(),
        Ok(Constellation::Galileo) => "Galileo".to_string(),
        Ok(Constellation::BeiDou) => "BeiDou".to_string(),
        Ok(Constellation::QZSS) => "QZSS".to_string(),
        Ok(Constellation::IRNSS) => "IRNSS/NavIC".to_string(),
        Ok(Constellation::SBAS) => "SBAS".to_string(),
        Ok(Constellation::Mixed) => "Mixed".to_string(),
        _ => code.to_string(),
    }
}

/// Translates sorted system codes, joined with ", "
pub(crate) fn system_names<'a, I: IntoIterator<Item = &'a String>>(codes: I) -> String {
    codes
        .into_iter()
        .sorted()
        .map(|code| system_name(code))
        .join(", ")
}
