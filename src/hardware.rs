//! Receiver and antenna
#[cfg(feature = "serde")]
use serde::Serialize;

/// GNSS receiver description
#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Receiver {
    /// Receiver (hardware) model
    pub model: Option<String>,
    /// Receiver (hardware) identification info
    pub sn: Option<String>, // serial #
    /// Receiver embedded software info
    pub firmware: Option<String>, // firmware #
}

impl Receiver {
    /// Builds [Receiver] from `REC # / TYPE / VERS` content, whitespace separated:
    /// serial number, model then firmware version.
    pub(crate) fn from_content(content: &str) -> Self {
        let items = content.split_whitespace().collect::<Vec<_>>();
        let mut s = Self::default();
        if let Some(sn) = items.first() {
            s = s.with_serial_number(sn);
        }
        if let Some(model) = items.get(1) {
            s = s.with_model(model);
        }
        if let Some(firmware) = items.get(2) {
            s = s.with_firmware(firmware);
        }
        s
    }

    /// Returns true if [Receiver] was not described at all
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.sn.is_none() && self.firmware.is_none()
    }

    pub fn with_model(&self, model: &str) -> Self {
        let mut s = self.clone();
        s.model = Some(model.to_string());
        s
    }

    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = Some(sn.to_string());
        s
    }

    pub fn with_firmware(&self, firmware: &str) -> Self {
        let mut s = self.clone();
        s.firmware = Some(firmware.to_string());
        s
    }
}

/// Antenna description, as declared in the header.
/// Values are kept as they were written.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Antenna {
    /// Hardware model / make descriptor
    pub model: Option<String>,
    /// Serial number / identification number
    pub sn: Option<String>,
    /// `h` eccentricity (height component), as written
    pub height: Option<String>,
    /// Complete H/E/N eccentricity descriptor
    pub delta_hen: Option<String>,
}

impl Antenna {
    /// Updates [Antenna] from `ANT # / TYPE` content.
    /// When the first item is not purely alphabetic and is followed by
    /// other items, it is the serial number and the remaining items
    /// make up the model. Otherwise the complete content is the model.
    pub(crate) fn with_type_content(&self, content: &str) -> Self {
        let items = content.split_whitespace().collect::<Vec<_>>();
        match items.first() {
            Some(first) if items.len() > 1 && !first.chars().all(char::is_alphabetic) => self
                .with_serial_number(first)
                .with_model(&items[1..].join(" ")),
            Some(_) => self.with_model(content),
            None => self.clone(),
        }
    }

    /// Updates [Antenna] from `ANTENNA: DELTA H/E/N` content
    pub(crate) fn with_delta_content(&self, content: &str) -> Self {
        let items = content.split_whitespace().collect::<Vec<_>>();
        let mut s = self.clone();
        if let Some(h) = items.first() {
            s = s.with_height(h);
        }
        if items.len() > 2 {
            s.delta_hen = Some(format!("H:{} E:{} N:{}", items[0], items[1], items[2]));
        }
        s
    }

    /// Sets desired model
    pub fn with_model(&self, m: &str) -> Self {
        let mut s = self.clone();
        s.model = Some(m.to_string());
        s
    }

    /// Sets desired Serial Number
    pub fn with_serial_number(&self, sn: &str) -> Self {
        let mut s = self.clone();
        s.sn = Some(sn.to_string());
        s
    }

    /// Sets antenna `h` eccentricity component
    pub fn with_height(&self, h: &str) -> Self {
        let mut s = self.clone();
        s.height = Some(h.to_string());
        s
    }
}
