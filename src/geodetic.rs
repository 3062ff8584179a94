//! ECEF to geodetic coordinates conversion
use crate::{
    constants::{Scanning, Wgs84},
    error::ConversionError,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Geodetic coordinates, referenced to WGS84 ellipsoid
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GeodeticPosition {
    /// Latitude in decimal degrees
    pub latitude_ddeg: f64,
    /// Longitude in decimal degrees
    pub longitude_ddeg: f64,
    /// Ellipsoidal height in meters
    pub altitude_m: f64,
}

impl std::fmt::Display for GeodeticPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Lat: {:.8}°, Lon: {:.8}°, Elev: {:.3}m",
            self.latitude_ddeg, self.longitude_ddeg, self.altitude_m
        )
    }
}

impl GeodeticPosition {
    /// Converts ECEF coordinates (in meters) to [GeodeticPosition].
    /// Latitude is refined over a fixed number of iterations (5),
    /// which gives sub millimeter convergence at terrestrial heights and
    /// makes the output reproducible to the printed precision.
    /// ```
    /// use rnx_probe::prelude::GeodeticPosition;
    /// let geo = GeodeticPosition::from_ecef_wgs84((-2694892.655, -4297473.720, 3854216.066))
    ///     .unwrap();
    /// assert!((geo.latitude_ddeg - 37.41379321).abs() < 1.0E-6);
    /// assert!((geo.longitude_ddeg + 122.09131635).abs() < 1.0E-6);
    /// assert!((geo.altitude_m - 406.483).abs() < 1.0E-3);
    /// ```
    pub fn from_ecef_wgs84(ecef_m: (f64, f64, f64)) -> Result<Self, ConversionError> {
        let (x, y, z) = ecef_m;
        if !x.is_finite() || !y.is_finite() || !z.is_finite() {
            return Err(ConversionError::NonFiniteCoordinates);
        }

        let a = Wgs84::SEMI_MAJOR_AXIS_M;
        let e2 = Wgs84::ECCENTRICITY_SQUARED;

        let lon = y.atan2(x);
        let p = (x * x + y * y).sqrt();
        let mut lat = z.atan2(p * (1.0 - e2));

        for _ in 0..Scanning::GEODETIC_ITERATIONS {
            let sin_lat = lat.sin();
            let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            lat = (z + e2 * n * sin_lat).atan2(p);
        }

        let sin_lat = lat.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let altitude_m = p / lat.cos() - n;

        let geo = Self {
            latitude_ddeg: lat.to_degrees(),
            longitude_ddeg: lon.to_degrees(),
            altitude_m,
        };

        if geo.latitude_ddeg.is_finite()
            && geo.longitude_ddeg.is_finite()
            && geo.altitude_m.is_finite()
        {
            Ok(geo)
        } else {
            Err(ConversionError::NonFiniteSolution)
        }
    }
}
