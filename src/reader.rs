//! File loading: undoes the compression identified from the file name
//! and provides the content line by line.
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use itertools::Itertools;

use crate::{compression::Compression, error::Error};

/// External decoder, for the compressions that are not natively supported
/// (Hatanaka, Unix compress, bzip2, zip..). This is how the CRINEX
/// decompressor ([crate::hatanaka::Hatanaka]) or archive tools are plugged into a [Loader].
pub trait ArchiveDecoder {
    /// Decoder name, used in reports
    fn name(&self) -> &str;
    /// Returns true if this decoder can undo given [Compression]
    fn supports(&self, compression: Compression) -> bool;
    /// Decodes file content (already opened) into readable RINEX bytes
    fn decode(&self, reader: &mut dyn Read, compression: Compression) -> std::io::Result<Vec<u8>>;
}

/// Readable content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    /// Compression that was undone
    pub compression: Compression,
    /// Content lines, without termination
    pub lines: Vec<String>,
}

impl Content {
    /// Builds [Content] from decoded bytes. Invalid UTF-8 sequences
    /// are replaced, line terminations (\n or \r\n) removed.
    pub fn from_bytes(bytes: &[u8], compression: Compression) -> Self {
        Self {
            compression,
            lines: String::from_utf8_lossy(bytes)
                .lines()
                .map(|l| l.to_string())
                .collect(),
        }
    }
}

/// Decoding capabilities of a [Loader]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionSupport {
    /// Gzip is natively supported
    pub gzip: bool,
    /// Name of the external decoder, if any
    pub decoder: Option<String>,
    /// Compressions supported by the external decoder
    pub external: Vec<Compression>,
}

impl CompressionSupport {
    /// Returns true if content compressed with given [Compression] can be loaded
    pub fn supports(&self, compression: Compression) -> bool {
        match compression {
            Compression::None => true,
            Compression::Gzip if self.gzip => true,
            c => self.external.contains(&c),
        }
    }
}

impl std::fmt::Display for CompressionSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.gzip {
            writeln!(f, "✓ gzip decoder built in - .gz files supported")?;
        } else {
            writeln!(f, "✗ gzip decoder NOT built in")?;
        }
        let missing = Loader::EXTERNAL
            .iter()
            .filter(|c| !self.external.contains(*c))
            .join(", ");
        match &self.decoder {
            Some(name) => {
                writeln!(
                    f,
                    "✓ {} decoder installed - {} supported",
                    name,
                    self.external.iter().join(", ")
                )?;
                if !missing.is_empty() {
                    writeln!(f, "  Not supported: {}", missing)?;
                }
            },
            None => {
                writeln!(f, "✗ No archive decoder installed")?;
                writeln!(f, "  Not supported: {}", missing)?;
            },
        }
        Ok(())
    }
}

/// [Loader] reads local files, identifies their [Compression]
/// from the file name, and decodes them.
#[derive(Default)]
pub struct Loader {
    decoder: Option<Box<dyn ArchiveDecoder>>,
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("decoder", &self.decoder.as_ref().map(|d| d.name()))
            .finish()
    }
}

impl Loader {
    /// Compressions that require an [ArchiveDecoder]
    const EXTERNAL: [Compression; 5] = [
        Compression::Hatanaka,
        Compression::HatanakaGzip,
        Compression::Compress,
        Compression::Bzip2,
        Compression::Zip,
    ];

    /// Plugs an [ArchiveDecoder] into this [Loader]
    pub fn with_decoder<D: ArchiveDecoder + 'static>(self, decoder: D) -> Self {
        Self {
            decoder: Some(Box::new(decoder)),
        }
    }

    /// Returns the decoding capabilities of this [Loader]
    pub fn support(&self) -> CompressionSupport {
        let (decoder, external) = match &self.decoder {
            Some(decoder) => (
                Some(decoder.name().to_string()),
                Self::EXTERNAL
                    .iter()
                    .copied()
                    .filter(|c| decoder.supports(*c))
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        CompressionSupport {
            gzip: cfg!(feature = "flate2"),
            decoder,
            external,
        }
    }

    /// Loads local file. The [Compression] is identified from the file name.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Content, Error> {
        let path = path.as_ref();
        let io_error = |source: std::io::Error| Error::Io {
            path: path.to_string_lossy().to_string(),
            source,
        };

        let compression = path
            .file_name()
            .map(|name| Compression::from_filename(&name.to_string_lossy()))
            .unwrap_or_default();

        let fd = File::open(path).map_err(io_error)?;
        let mut reader = BufReader::new(fd);

        info!("loading {} ({})", path.display(), compression);

        match compression {
            Compression::None => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).map_err(io_error)?;
                Ok(Content::from_bytes(&bytes, compression))
            },
            compression => self.decode(&mut reader, compression),
        }
    }

    /// Decodes content, from any [Read]able interface
    pub fn decode<R: Read>(&self, reader: &mut R, compression: Compression) -> Result<Content, Error> {
        let failure = |reason: String| Error::Decompression {
            compression,
            reason,
        };

        #[cfg(feature = "flate2")]
        {
            if compression == Compression::Gzip {
                let mut bytes = Vec::new();
                GzDecoder::new(&mut *reader)
                    .read_to_end(&mut bytes)
                    .map_err(|e| failure(e.to_string()))?;
                return Ok(Content::from_bytes(&bytes, compression));
            }
        }

        if compression == Compression::None {
            let mut bytes = Vec::new();
            reader
                .read_to_end(&mut bytes)
                .map_err(|e| failure(e.to_string()))?;
            return Ok(Content::from_bytes(&bytes, compression));
        }

        match &self.decoder {
            Some(decoder) if decoder.supports(compression) => {
                let bytes = decoder
                    .decode(reader, compression)
                    .map_err(|e| failure(e.to_string()))?;
                Ok(Content::from_bytes(&bytes, compression))
            },
            Some(decoder) => Err(failure(format!(
                "not supported by {} decoder",
                decoder.name()
            ))),
            None => Err(failure("no decoder available".to_string())),
        }
    }
}
