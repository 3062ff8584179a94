//! Describes the header section of a RINEX observation file
use std::collections::BTreeSet;

use crate::{
    geodetic::GeodeticPosition,
    hardware::{Antenna, Receiver},
    marker::GeodeticMarker,
    prelude::Duration,
};

#[cfg(feature = "serde")]
use serde::Serialize;

mod parsing;

/// Observation types (codes), per system code, in order of declaration.
/// V2 files declare a single list, under [crate::constellation::ALL_SYSTEMS].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ObservationTypes(Vec<(String, Vec<String>)>);

impl ObservationTypes {
    /// Declares (or re declares) the observation types of given system.
    /// A redeclared system keeps its original position.
    pub(crate) fn insert(&mut self, system: &str, codes: Vec<String>) {
        match self.0.iter_mut().find(|(sys, _)| sys == system) {
            Some((_, declared)) => *declared = codes,
            None => self.0.push((system.to_string(), codes)),
        }
    }

    pub(crate) fn get_mut(&mut self, system: &str) -> Option<&mut Vec<String>> {
        self.0
            .iter_mut()
            .find(|(sys, _)| sys == system)
            .map(|(_, codes)| codes)
    }

    /// Returns observation types declared for given system
    pub fn get(&self, system: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(sys, _)| sys == system)
            .map(|(_, codes)| codes.as_slice())
    }

    /// Iterates systems and their observation types, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> + '_ {
        self.0.iter().map(|(sys, codes)| (sys, codes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Header metadata. Every field is optional: [None] means
/// the field was not declared, which is not the same as a field
/// declared with empty content.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Header {
    /// Format revision, as written
    pub version: Option<String>,
    /// File type descriptor (first item, like "OBSERVATION")
    pub file_type: Option<String>,
    /// Satellite system descriptor
    pub satellite_system: Option<String>,
    /// Survey marker
    pub geodetic_marker: GeodeticMarker,
    /// Observer name
    pub observer: Option<String>,
    /// Agency in charge of the survey
    pub agency: Option<String>,
    /// Receiver
    pub rcvr: Receiver,
    /// Receiver antenna
    pub rcvr_antenna: Antenna,
    /// Approximate position, as written
    pub approx_position: Option<String>,
    /// Approximate position, converted to geodetic coordinates
    pub rx_geodetic: Option<GeodeticPosition>,
    /// Sampling interval, as written
    pub interval: Option<String>,
    /// Declared time of first observation, as written
    pub time_of_first_obs: Option<String>,
    /// Declared time of last observation, as written
    pub time_of_last_obs: Option<String>,
    /// Leap seconds, as written
    pub leap_seconds: Option<String>,
    /// Observation types, per system
    pub observation_types: ObservationTypes,
    /// Systems for which observation types were declared
    pub constellations: BTreeSet<String>,
}

impl Header {
    /// Returns declared sampling interval as a [Duration],
    /// when it is a positive number of seconds.
    pub fn sampling_interval(&self) -> Option<Duration> {
        let seconds = self.interval_seconds()?;
        if seconds > 0.0 {
            Some(Duration::from_seconds(seconds))
        } else {
            None
        }
    }

    /// Returns declared sampling interval in seconds
    pub(crate) fn interval_seconds(&self) -> Option<f64> {
        self.interval.as_ref()?.trim().parse::<f64>().ok()
    }

    /// Returns true if no survey metadata was declared at all
    pub fn lacks_survey_metadata(&self) -> bool {
        self.geodetic_marker.name.is_none()
            && self.geodetic_marker.number.is_none()
            && self.observer.is_none()
            && self.rcvr.model.is_none()
    }
}
