//! Geodetic marker description

#[cfg(feature = "serde")]
use serde::Serialize;

/// Survey marker, as declared in the header
#[derive(Default, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GeodeticMarker {
    /// Marker name
    pub name: Option<String>,
    /// Marker number, as written
    pub number: Option<String>,
    /// Marker type, as written
    pub marker_type: Option<String>,
}

impl GeodeticMarker {
    /// Returns a GeodeticMarker with given "name".
    pub fn with_name(&self, name: &str) -> Self {
        let mut s = self.clone();
        s.name = Some(name.to_string());
        s
    }
    /// Returns a GeodeticMarker with given "number".
    pub fn with_number(&self, number: &str) -> Self {
        let mut s = self.clone();
        s.number = Some(number.to_string());
        s
    }
    /// Returns a GeodeticMarker with given "type" descriptor.
    pub fn with_type(&self, marker_type: &str) -> Self {
        let mut s = self.clone();
        s.marker_type = Some(marker_type.to_string());
        s
    }
    /// Returns true if none of the marker fields were declared
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.number.is_none() && self.marker_type.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::GeodeticMarker;
    #[test]
    fn marker_type_as_written() {
        let marker = GeodeticMarker::default().with_type("GEODETIC");
        assert_eq!(marker.marker_type.as_deref(), Some("GEODETIC"));
        let marker = marker.with_type("PILLAR");
        assert_eq!(marker.marker_type.as_deref(), Some("PILLAR"));
    }
    #[test]
    fn present_but_empty() {
        let marker = GeodeticMarker::default();
        assert!(marker.is_empty());
        let marker = marker.with_name("");
        assert!(!marker.is_empty());
        assert_eq!(marker.name.as_deref(), Some(""));
    }
}
