//! File compression identification, from file name only
use regex::Regex;

#[cfg(feature = "serde")]
use serde::Serialize;

lazy_static! {
    /// Old (V2) hatanaka naming convention: `.YYd`
    static ref HATANAKA_V2: Regex = Regex::new(r"\.\d{2}d$").unwrap();
    /// Gzip compressed old hatanaka naming convention: `.YYd.gz`
    static ref HATANAKA_V2_GZ: Regex = Regex::new(r"\.\d{2}d\.gz$").unwrap();
}

/// Compression (or encoding) applied to a RINEX file,
/// that needs to be undone prior parsing.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Compression {
    /// Readable as is
    #[default]
    None,
    /// Gzip compressed RINEX
    Gzip,
    /// Hatanaka compressed (CRINEX)
    Hatanaka,
    /// Gzip compressed CRINEX
    HatanakaGzip,
    /// Unix compress (.Z)
    Compress,
    Bzip2,
    Zip,
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Gzip => write!(f, "gzip"),
            Self::Hatanaka => write!(f, "hatanaka"),
            Self::HatanakaGzip => write!(f, "hatanaka+gz"),
            Self::Compress => write!(f, "compress"),
            Self::Bzip2 => write!(f, "bzip2"),
            Self::Zip => write!(f, "zip"),
        }
    }
}

impl Compression {
    /// Identifies the [Compression] from file name (or path), case insensitive.
    /// First match wins:
    ///  1. `.crx` or `.YYd` : Hatanaka
    ///  2. `.gz` : Gzip, or gzip compressed Hatanaka for `.crx.gz` and `.YYd.gz`
    ///  3. `.z` : Unix compress
    ///  4. `.bz2`, `.zip`
    /// ```
    /// use rnx_probe::prelude::Compression;
    /// assert_eq!(Compression::from_filename("ESBC00DNK_R_20201770000_01D_30S_MO.crx.gz"),
    ///     Compression::HatanakaGzip);
    /// assert_eq!(Compression::from_filename("site.24O"), Compression::None);
    /// ```
    pub fn from_filename(filename: &str) -> Self {
        let filename = filename.to_lowercase();
        if filename.ends_with(".crx") || HATANAKA_V2.is_match(&filename) {
            Self::Hatanaka
        } else if filename.ends_with(".gz") {
            if filename.contains(".crx.gz") || HATANAKA_V2_GZ.is_match(&filename) {
                Self::HatanakaGzip
            } else {
                Self::Gzip
            }
        } else if filename.ends_with(".z") {
            Self::Compress
        } else if filename.ends_with(".bz2") {
            Self::Bzip2
        } else if filename.ends_with(".zip") {
            Self::Zip
        } else {
            Self::None
        }
    }

    /// Returns true if content needs to be decoded prior parsing
    pub fn is_compressed(&self) -> bool {
        *self != Self::None
    }

    /// Returns true if the built-in decoders cannot handle this
    /// [Compression] and an [crate::reader::ArchiveDecoder] is required.
    pub fn needs_external_decoder(&self) -> bool {
        !matches!(self, Self::None | Self::Gzip)
    }
}
