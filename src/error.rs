use thiserror::Error;

use crate::compression::Compression;

/// File level errors: examination of that file stops
#[derive(Error, Debug)]
pub enum Error {
    /// File cannot be opened or read at all
    #[error("failed to read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Decoder failure, or no decoder available for this compression
    #[error("{compression} decompression failed: {reason}")]
    Decompression {
        compression: Compression,
        reason: String,
    },
}

/// Line level errors. A line failing to parse is skipped,
/// these never leave the scanning loops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("header line is shorter than 60 columns")]
    HeaderLineTooShort,
    #[error("missing header fields")]
    MissingHeaderFields,
    #[error("invalid observation count")]
    ObservationCount,
    #[error("invalid coordinates")]
    Coordinates,
    #[error("missing epoch fields")]
    MissingEpochFields,
    #[error("invalid epoch year \"{0}\"")]
    EpochYear(String),
    #[error("invalid epoch month \"{0}\"")]
    EpochMonth(String),
    #[error("invalid epoch day \"{0}\"")]
    EpochDay(String),
    #[error("invalid epoch hours \"{0}\"")]
    EpochHours(String),
    #[error("invalid epoch minutes \"{0}\"")]
    EpochMinutes(String),
    #[error("invalid epoch seconds \"{0}\"")]
    EpochSeconds(String),
    #[error("invalid calendar date")]
    DateTime,
}

/// Geodetic conversion errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConversionError {
    #[error("non finite ECEF coordinates")]
    NonFiniteCoordinates,
    #[error("geodetic solution did not converge to finite values")]
    NonFiniteSolution,
}
