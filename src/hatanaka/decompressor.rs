//! CRINEX decompression
use std::{
    collections::HashMap,
    io::BufRead,
    str::FromStr,
};

use crate::{
    columns,
    hatanaka::{Error, NumDiff, TextDiff},
    prelude::Constellation,
    width,
};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
enum State {
    /// Expecting "CRINEX VERS / TYPE"
    #[default]
    Version,
    /// Expecting "CRINEX PROG / DATE"
    Program,
    /// RINEX header, forwarded as is
    Header,
    /// Gathering epoch descriptor
    Epoch,
    /// Gathering clock offset, recovering complete epoch description
    Clock,
    /// Observations gathering and recovering
    Observation,
    /// Special records following an event epoch, forwarded as is
    Event(usize),
}

/// [Decompressor] recovers readable RINEX from CRINEX (compact RINEX),
/// following the specifications written by Y. Hatanaka.
/// Both CRINEX 1 (RINEX 2) and CRINEX 3 (RINEX 3 and 4) are supported.
/// Like RINEX, CRINEX is line based and so is this structure.
/// ```
/// use rnx_probe::hatanaka::Decompressor;
/// let crinex = "3.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE
/// RNX2CRX ver.4.0.7                       04-Mar-22 00:00     CRINEX PROG / DATE
///      3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE
/// G    1 C1C                                                  SYS / # / OBS TYPES
///                                                             END OF HEADER
/// > 2022 03 04 00 00  0.0000000  0  1      G01
///
/// 3&20147683700";
/// let rinex = Decompressor::default()
///     .decompress(crinex.as_bytes())
///     .unwrap();
/// assert!(rinex.ends_with("> 2022 03 04 00 00  0.0000000  0  1\nG01  20147683.700\n"));
/// ```
#[derive(Debug, Default)]
pub struct Decompressor {
    /// CRINEX 3 or CRINEX 1
    v3: bool,
    /// Internal Finite [State] Machine
    state: State,
    /// True once an epoch descriptor has been initialized
    initialized: bool,
    /// [TextDiff] that works on the entire epoch descriptor
    epoch_diff: TextDiff,
    /// Recovered epoch descriptor
    descriptor: String,
    /// Number of observables per [Constellation].
    /// CRINEX 1 declares one list for all, stored as [Constellation::Mixed].
    observables: HashMap<Constellation, usize>,
    /// Clock offset kernel
    clock_diff: Option<NumDiff>,
    /// Satellites of current epoch
    sats: Vec<String>,
    /// Satellites of previous epoch
    prev_sats: Vec<String>,
    sat_ptr: usize,
    /// Observation kernels, per satellite and observable
    obs_diff: HashMap<String, Vec<Option<NumDiff>>>,
    /// [TextDiff] for observation flags, per satellite
    flags_diff: HashMap<String, TextDiff>,
}

impl Decompressor {
    const V1_FLAG_OFFSET: usize = 27;
    const V1_NUMSAT_OFFSET: usize = Self::V1_FLAG_OFFSET + 1;
    const V1_SV_OFFSET: usize = Self::V1_NUMSAT_OFFSET + 3;
    /// Satellites on the first line of a V1 epoch
    const V1_SV_FIRST_LINE: usize = 12;

    const V3_FLAG_OFFSET: usize = 30;
    const V3_NUMSAT_OFFSET: usize = Self::V3_FLAG_OFFSET + 1;
    const V3_SV_OFFSET: usize = Self::V3_NUMSAT_OFFSET + 9;

    /// Decompresses a complete CRINEX stream into readable RINEX
    pub fn decompress<R: BufRead>(&mut self, reader: R) -> Result<String, Error> {
        let mut output = String::new();
        for line in reader.lines() {
            self.decompress_line(&line?, &mut output)?;
        }
        match self.state {
            State::Version => Err(Error::NotACrinex),
            State::Program | State::Header => {
                warn!("crinex: header terminator not found");
                Ok(output)
            },
            State::Clock | State::Observation | State::Event(_) => {
                warn!("crinex: last epoch is truncated");
                Ok(output)
            },
            State::Epoch => Ok(output),
        }
    }

    /// Decompresses following line and appends recovered lines to `output`.
    /// Several input lines may be needed to recover one epoch.
    pub fn decompress_line(&mut self, line: &str, output: &mut String) -> Result<(), Error> {
        match self.state {
            State::Version => self.run_version(line),
            State::Program => {
                self.state = State::Header;
                if line.contains("CRINEX PROG / DATE") {
                    Ok(())
                } else {
                    self.run_header(line, output)
                }
            },
            State::Header => self.run_header(line, output),
            State::Epoch => self.run_epoch(line, output),
            State::Clock => self.run_clock(line, output),
            State::Observation => self.run_observation(line, output),
            State::Event(remaining) => {
                push(output, line);
                self.state = if remaining > 1 {
                    State::Event(remaining - 1)
                } else {
                    State::Epoch
                };
                Ok(())
            },
        }
    }

    fn run_version(&mut self, line: &str) -> Result<(), Error> {
        if !line.contains("CRINEX VERS") {
            return Err(Error::NotACrinex);
        }
        let version = columns(line, 0, 20).trim();
        self.v3 = match version.split('.').next() {
            Some("1") => false,
            Some("3") => true,
            _ => return Err(Error::NonSupportedCrxVersion(version.to_string())),
        };
        debug!("crinex: revision {}", version);
        self.state = State::Program;
        Ok(())
    }

    /// Forwards header line, grabbing the observables specifications
    fn run_header(&mut self, line: &str, output: &mut String) -> Result<(), Error> {
        push(output, line);
        let label = columns(line, 60, 80);

        if label.contains("SYS / # / OBS TYPES") {
            let system = columns(line, 0, 1);
            if !system.trim().is_empty() {
                match (
                    Constellation::from_str(system),
                    columns(line, 3, 6).trim().parse::<usize>(),
                ) {
                    (Ok(constellation), Ok(numobs)) => {
                        self.observables.insert(constellation, numobs);
                    },
                    _ => debug!("crinex: invalid observables specification \"{}\"", line),
                }
            }
        } else if label.contains("# / TYPES OF OBSERV") {
            let count = columns(line, 0, 6).trim();
            if !count.is_empty() {
                match count.parse::<usize>() {
                    Ok(numobs) => {
                        self.observables.insert(Constellation::Mixed, numobs);
                    },
                    Err(_) => debug!("crinex: invalid observables specification \"{}\"", line),
                }
            }
        } else if label.contains("END OF HEADER") {
            self.state = State::Epoch;
        }
        Ok(())
    }

    /// Process following line, in [State::Epoch]
    fn run_epoch(&mut self, line: &str, output: &mut String) -> Result<(), Error> {
        let marker = if self.v3 { '>' } else { '&' };
        if line.starts_with(marker) {
            self.epoch_diff.force_init(columns(line, 1, width(line)));
            self.initialized = true;
        } else if self.initialized {
            self.epoch_diff.decompress(columns(line, 1, width(line)));
        } else if line.trim().is_empty() {
            return Ok(());
        } else {
            return Err(Error::UninitializedEpoch);
        }
        self.descriptor = self.epoch_diff.as_str().to_string();

        let (flag_offset, numsat_offset) = if self.v3 {
            (Self::V3_FLAG_OFFSET, Self::V3_NUMSAT_OFFSET)
        } else {
            (Self::V1_FLAG_OFFSET, Self::V1_NUMSAT_OFFSET)
        };

        let flag = columns(&self.descriptor, flag_offset, flag_offset + 1)
            .trim()
            .parse::<u8>()
            .unwrap_or(0);
        let numsat = columns(&self.descriptor, numsat_offset, numsat_offset + 3)
            .trim()
            .parse::<usize>();

        if flag > 1 {
            // event: special records follow, next epoch is initialized again
            let prefix = if self.v3 { '>' } else { ' ' };
            push(output, &format!("{}{}", prefix, self.descriptor));
            self.initialized = false;
            self.state = match numsat {
                Ok(n) if n > 0 => State::Event(n),
                _ => State::Epoch,
            };
            return Ok(());
        }

        let numsat = numsat.map_err(|_| Error::MalformedEpochDescriptor)?;
        let sv_offset = if self.v3 {
            Self::V3_SV_OFFSET
        } else {
            Self::V1_SV_OFFSET
        };

        self.sats.clear();
        for i in 0..numsat {
            let start = sv_offset + i * 3;
            let sat = columns(&self.descriptor, start, start + 3);
            if width(sat) < 3 {
                return Err(Error::MalformedEpochDescriptor);
            }
            self.sats.push(sat.to_string());
        }

        self.state = State::Clock;
        Ok(())
    }

    /// Process following line, in [State::Clock]
    fn run_clock(&mut self, line: &str, output: &mut String) -> Result<(), Error> {
        let line = line.trim();
        let clock = if line.is_empty() {
            self.clock_diff = None;
            None
        } else {
            Some(recover(&mut self.clock_diff, line)?)
        };

        // now that we have potentially recovered clock data
        // we can format the complete epoch description
        self.format_epoch(clock, output);

        // satellites that were not tracked in previous epoch start over
        for sat in self.sats.iter() {
            if !self.prev_sats.contains(sat) {
                self.flags_diff.insert(sat.clone(), TextDiff::default());
                self.obs_diff.remove(sat);
            }
        }

        self.sat_ptr = 0;
        if self.sats.is_empty() {
            self.prev_sats.clear();
            self.state = State::Epoch;
        } else {
            self.state = State::Observation;
        }
        Ok(())
    }

    fn format_epoch(&self, clock: Option<i64>, output: &mut String) {
        if self.v3 {
            let mut epoch = format!(">{}", columns(&self.descriptor, 0, 34));
            if let Some(clock) = clock {
                epoch.push_str(&format!("      {}", fixed_point(clock, 12, 15)));
            }
            push(output, &epoch);
        } else {
            let first_len = Self::V1_SV_OFFSET + 3 * Self::V1_SV_FIRST_LINE;
            let mut epoch = format!(" {}", columns(&self.descriptor, 0, first_len));
            if let Some(clock) = clock {
                epoch = format!("{:<68}{}", epoch, fixed_point(clock, 9, 12));
            }
            push(output, &epoch);

            // satellites that do not fit are wrapped
            let mut offset = first_len;
            while offset < width(&self.descriptor) {
                let end = offset + 3 * Self::V1_SV_FIRST_LINE;
                push(
                    output,
                    &format!("{:32}{}", "", columns(&self.descriptor, offset, end)),
                );
                offset = end;
            }
        }
    }

    /// Number of observables for this satellite
    fn numobs(&self, sat: &str) -> Result<usize, Error> {
        if let Some(numobs) = self.observables.get(&Constellation::Mixed) {
            return Ok(*numobs);
        }
        Constellation::from_str(columns(sat, 0, 1))
            .ok()
            .and_then(|constellation| self.observables.get(&constellation))
            .copied()
            .ok_or_else(|| Error::MissingObservables(sat.to_string()))
    }

    /// Process following line, in [State::Observation]
    fn run_observation(&mut self, line: &str, output: &mut String) -> Result<(), Error> {
        let sat = self
            .sats
            .get(self.sat_ptr)
            .cloned()
            .ok_or(Error::MalformedEpochDescriptor)?;
        let numobs = self.numobs(&sat)?;

        // blank fields are missing observations,
        // the remainder is the compressed flags
        let mut items = line.splitn(numobs + 1, ' ');

        let kernels = self.obs_diff.entry(sat.clone()).or_default();
        kernels.resize(numobs, None);

        let mut values = Vec::with_capacity(numobs);
        for kernel in kernels.iter_mut() {
            match items.next() {
                Some(field) if !field.is_empty() => values.push(Some(recover(kernel, field)?)),
                _ => {
                    *kernel = None;
                    values.push(None);
                },
            }
        }

        let flags = self
            .flags_diff
            .entry(sat.clone())
            .or_default()
            .decompress(items.next().unwrap_or(""))
            .chars()
            .collect::<Vec<_>>();
        let flag = |index: usize| flags.get(index).copied().unwrap_or(' ');

        let cells = values
            .iter()
            .enumerate()
            .map(|(i, value)| match value {
                Some(value) => format!(
                    "{}{}{}",
                    fixed_point(*value, 3, 14),
                    flag(2 * i),
                    flag(2 * i + 1)
                ),
                None => " ".repeat(16),
            })
            .collect::<Vec<_>>();

        if self.v3 {
            push(output, &format!("{}{}", sat, cells.concat()));
        } else {
            for chunk in cells.chunks(5) {
                push(output, &chunk.concat());
            }
        }

        self.sat_ptr += 1;
        if self.sat_ptr == self.sats.len() {
            self.prev_sats = std::mem::take(&mut self.sats);
            self.state = State::Epoch;
        }
        Ok(())
    }
}

/// Recovers one compressed integer: `N&value` starts a new arc of order N,
/// anything else is a difference with respect to the current arc.
fn recover(kernel: &mut Option<NumDiff>, field: &str) -> Result<i64, Error> {
    let malformed = || Error::MalformedField(field.to_string());
    match field.split_once('&') {
        Some((order, value)) => {
            let order = order.parse::<usize>().map_err(|_| malformed())?;
            let value = value.parse::<i64>().map_err(|_| malformed())?;
            *kernel = Some(NumDiff::new(order, value)?);
            Ok(value)
        },
        None => {
            let data = field.parse::<i64>().map_err(|_| malformed())?;
            match kernel {
                Some(kernel) => Ok(kernel.decompress(data)),
                None => Err(Error::UninitializedKernel(field.to_string())),
            }
        },
    }
}

/// Formats a scaled integer as a fixed point decimal number,
/// right aligned on `width` columns
fn fixed_point(value: i64, decimals: u32, width: usize) -> String {
    let scale = 10_u64.pow(decimals);
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let formatted = format!(
        "{}{}.{:0decimals$}",
        sign,
        abs / scale,
        abs % scale,
        decimals = decimals as usize
    );
    format!("{:>width$}", formatted, width = width)
}

/// Appends recovered line, without trailing whitespaces
fn push(output: &mut String, line: &str) {
    output.push_str(line.trim_end());
    output.push('\n');
}

#[cfg(test)]
mod test {
    use super::*;

    const V3: &str = "3.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE
RNX2CRX ver.4.0.7                       04-Mar-22 00:00     CRINEX PROG / DATE
     3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE
G    3 C1C L1C S1C                                          SYS / # / OBS TYPES
R    2 C1C L1C                                              SYS / # / OBS TYPES
                                                            END OF HEADER
> 2022 03 04 00 00  0.0000000  0  2      G01R09
2&123456789
3&20147683700 3&105873659141 3&45000   18
3&21309345172 3&113857648795    7
                   3
1000
5918760 92440 -250
21 -33   5
> 2022 03 04 00 01  0.0000000  4  1
                                                            COMMENT
> 2022 03 04 00 01 30.0000000  0  1      G01

3&20160000000  -500";

    const V1: &str = "1.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE
RNX2CRX ver.4.0.7                       28-Dec-21 00:17     CRINEX PROG / DATE
     2.11           OBSERVATION DATA    M (MIXED)           RINEX VERSION / TYPE
     6    C1    L1    L2    P2    S1    S2                  # / TYPES OF OBSERV
                                                            END OF HEADER
&21 12 21  0  0  0.0000000  0  2G07R19
3&123456789
3&23629347915 3&124178900000 3&96735300000  3&42500 3&38000
3&22000000000
                3
-210
1000 -500 -400  2 1
-33";

    #[test]
    fn crinex3() {
        let rinex = Decompressor::default()
            .decompress(V3.as_bytes())
            .unwrap();
        let lines = rinex.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "     3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE",
                "G    3 C1C L1C S1C                                          SYS / # / OBS TYPES",
                "R    2 C1C L1C                                              SYS / # / OBS TYPES",
                "                                                            END OF HEADER",
                "> 2022 03 04 00 00  0.0000000  0  2       0.000123456789",
                "G01  20147683.700   105873659.14118        45.000",
                "R09  21309345.172   113857648.795 7",
                "> 2022 03 04 00 00 30.0000000  0  2       0.000123457789",
                "G01  20153602.460   105873751.58118        44.750",
                "R09  21309345.193   113857648.76257",
                "> 2022 03 04 00 01  0.0000000  4  1",
                "                                                            COMMENT",
                "> 2022 03 04 00 01 30.0000000  0  1",
                "G01  20160000.000                          44.000",
            ]
        );
    }

    #[test]
    fn crinex1() {
        let rinex = Decompressor::default()
            .decompress(V1.as_bytes())
            .unwrap();
        let lines = rinex.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "     2.11           OBSERVATION DATA    M (MIXED)           RINEX VERSION / TYPE",
                "     6    C1    L1    L2    P2    S1    S2                  # / TYPES OF OBSERV",
                "                                                            END OF HEADER",
                " 21 12 21  0  0  0.0000000  0  2G07R19                               0.123456789",
                "  23629347.915   124178900.000    96735300.000                          42.500",
                "        38.000",
                "  22000000.000",
                "",
                " 21 12 21  0  0 30.0000000  0  2G07R19                               0.123456579",
                "  23629348.915   124178899.500    96735299.600                          42.502",
                "        38.001",
                "  21999999.967",
                "",
            ]
        );
    }

    #[test]
    fn crinex1_satellites_wrapping() {
        let crinex = "1.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE
RNX2CRX ver.4.0.7                       28-Dec-21 00:17     CRINEX PROG / DATE
     1    C1                                                # / TYPES OF OBSERV
                                                            END OF HEADER
&21 12 21  0  0  0.0000000  0 14G01G02G03G04G05G06G07G08G09G10G11G12G13G14

";
        let rinex = Decompressor::default()
            .decompress(crinex.as_bytes())
            .unwrap();
        let lines = rinex.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[2],
            " 21 12 21  0  0  0.0000000  0 14G01G02G03G04G05G06G07G08G09G10G11G12"
        );
        assert_eq!(lines[3], "                                G13G14");
    }

    #[test]
    fn not_a_crinex() {
        let rinex = "     3.04           OBSERVATION DATA    M                   RINEX VERSION / TYPE";
        assert!(matches!(
            Decompressor::default().decompress(rinex.as_bytes()),
            Err(Error::NotACrinex)
        ));
        assert!(matches!(
            Decompressor::default().decompress("".as_bytes()),
            Err(Error::NotACrinex)
        ));
        let crinex = "2.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE";
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::NonSupportedCrxVersion(_))
        ));
    }

    #[test]
    fn faulty_content() {
        let header = "3.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE
G    1 C1C                                                  SYS / # / OBS TYPES
                                                            END OF HEADER\n";

        // first epoch must be initialized
        let crinex = format!("{}                   3\n", header);
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::UninitializedEpoch)
        ));

        // differences require an initialized kernel
        let crinex = format!(
            "{}> 2022 03 04 00 00  0.0000000  0  1      G01\n\n1200\n",
            header
        );
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::UninitializedKernel(_))
        ));

        // no specifications for this system
        let crinex = format!(
            "{}> 2022 03 04 00 00  0.0000000  0  1      E01\n\n3&1200\n",
            header
        );
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::MissingObservables(_))
        ));

        let crinex = format!(
            "{}> 2022 03 04 00 00  0.0000000  0  1      G01\n\n9&1200\n",
            header
        );
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::CompressionOrder(9))
        ));

        let crinex = format!(
            "{}> 2022 03 04 00 00  0.0000000  0  1      G01\n\n3&12x0\n",
            header
        );
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::MalformedField(_))
        ));

        let crinex = format!("{}> 2022 03 04 00 00  0.0000000  0  2      G01\n", header);
        assert!(matches!(
            Decompressor::default().decompress(crinex.as_bytes()),
            Err(Error::MalformedEpochDescriptor)
        ));
    }

    #[test]
    fn truncated_epoch() {
        let crinex = "3.0                 COMPACT RINEX FORMAT                    CRINEX VERS   / TYPE
G    1 C1C                                                  SYS / # / OBS TYPES
                                                            END OF HEADER
> 2022 03 04 00 00  0.0000000  0  2      G01G02

3&20147683700";
        let rinex = Decompressor::default()
            .decompress(crinex.as_bytes())
            .unwrap();
        assert!(rinex.ends_with("> 2022 03 04 00 00  0.0000000  0  2\nG01  20147683.700\n"));
    }

    #[test]
    fn fixed_point_formatting() {
        assert_eq!(fixed_point(20243517560, 3, 14), "  20243517.560");
        assert_eq!(fixed_point(-1884837, 3, 14), "     -1884.837");
        assert_eq!(fixed_point(-500, 3, 14), "        -0.500");
        assert_eq!(fixed_point(0, 3, 14), "         0.000");
        assert_eq!(fixed_point(123456789, 12, 15), " 0.000123456789");
        assert_eq!(fixed_point(-123456789, 9, 12), "-0.123456789");
    }
}
