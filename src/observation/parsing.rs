//! Observation body scanner
use crate::{
    columns,
    constants::Scanning,
    epoch::{is_v2_epoch, is_v3_epoch, parse_v2, parse_v3, EpochLine},
    observation::Observations,
    width,
};

impl Observations {
    /// Scans the observation body, starting at given line index
    /// (first line following the header). Both V2 and V3 epoch lines
    /// are identified, whatever the declared revision. Lines that do not
    /// decode are skipped.
    pub fn scan<S: AsRef<str>>(lines: &[S], body_offset: usize) -> Self {
        let mut obs = Self::default();
        let mut in_epoch = false;

        for (index, line) in lines.iter().enumerate().skip(body_offset) {
            let line = line.as_ref();

            let decoded = if is_v3_epoch(line) {
                Some(parse_v3(line))
            } else if is_v2_epoch(line) {
                Some(parse_v2(line))
            } else {
                None
            };

            match decoded {
                Some(Ok(epoch)) => {
                    trace!("line {}: epoch {}", index + 1, epoch.epoch);
                    obs.push_epoch(epoch);
                    in_epoch = true;
                },
                Some(Err(e)) => {
                    debug!("line {}: epoch skipped: {}", index + 1, e);
                },
                None => {
                    if in_epoch && width(line) > 3 {
                        obs.push_satellite(columns(line, 0, 3).trim());
                    }
                },
            }
        }

        obs
    }

    fn push_epoch(&mut self, decoded: EpochLine) {
        self.num_epochs += 1;
        if self.epochs.len() < Scanning::MAX_RETAINED_EPOCHS {
            self.epochs.push(decoded.epoch);
        }
        if self.first_epoch.is_none() {
            self.first_epoch = Some(decoded.epoch);
        }
        self.last_epoch = Some(decoded.epoch);

        // event epochs count special records, not satellites
        if !decoded.is_sampling() {
            return;
        }
        if let Some(num_sat) = decoded.num_sat {
            self.push_num_sat(num_sat);
        }
        for sat in decoded.satellites {
            self.push_satellite(&sat);
        }
    }

    /// Records satellite identifier (like "G01"), when it starts
    /// with a system letter.
    fn push_satellite(&mut self, sat: &str) {
        let mut chars = sat.chars();
        match (chars.next(), chars.next()) {
            (Some(system), Some(_)) if system.is_alphabetic() => {
                self.constellations.insert(system.to_string());
                self.satellites.insert(sat.to_string());
            },
            _ => {},
        }
    }
}
