//! CRINEX (Hatanaka compressed RINEX) decoding
use std::io::{BufReader, ErrorKind, Read};

use thiserror::Error;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use crate::{compression::Compression, reader::ArchiveDecoder};

mod decompressor;
mod numdiff;
mod textdiff;

pub use decompressor::Decompressor;
pub use numdiff::NumDiff;
pub use textdiff::TextDiff;

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("this is not a CRINEX file")]
    NotACrinex,
    #[error("non supported CRINEX revision \"{0}\"")]
    NonSupportedCrxVersion(String),
    #[error("epoch description was never initialized")]
    UninitializedEpoch,
    #[error("malformed epoch description (#nb sv)")]
    MalformedEpochDescriptor,
    #[error("no observables specified for \"{0}\"")]
    MissingObservables(String),
    #[error("malformed compressed field \"{0}\"")]
    MalformedField(String),
    #[error("differential data \"{0}\" without initialization")]
    UninitializedKernel(String),
    #[error("non supported compression order {0}")]
    CompressionOrder(usize),
}

/// [ArchiveDecoder] for CRINEX files, possibly gzip compressed
/// (when the `flate2` feature is enabled).
/// ```
/// use rnx_probe::prelude::*;
/// let loader = Loader::default().with_decoder(Hatanaka);
/// assert!(loader.support().supports(Compression::Hatanaka));
/// ```
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Hatanaka;

impl ArchiveDecoder for Hatanaka {
    fn name(&self) -> &str {
        "hatanaka"
    }

    fn supports(&self, compression: Compression) -> bool {
        match compression {
            Compression::Hatanaka => true,
            #[cfg(feature = "flate2")]
            Compression::HatanakaGzip => true,
            _ => false,
        }
    }

    fn decode(&self, reader: &mut dyn Read, compression: Compression) -> std::io::Result<Vec<u8>> {
        let recovered = match compression {
            Compression::Hatanaka => Decompressor::default().decompress(BufReader::new(reader)),
            #[cfg(feature = "flate2")]
            Compression::HatanakaGzip => {
                Decompressor::default().decompress(BufReader::new(GzDecoder::new(reader)))
            },
            compression => {
                return Err(std::io::Error::new(
                    ErrorKind::Unsupported,
                    format!("{} is not a CRINEX compression", compression),
                ))
            },
        };
        match recovered {
            Ok(content) => Ok(content.into_bytes()),
            Err(Error::Io(e)) => Err(e),
            Err(e) => Err(std::io::Error::new(ErrorKind::InvalidData, e)),
        }
    }
}
