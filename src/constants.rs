//! Constant values used across the crate

/// WGS84 reference ellipsoid
pub(crate) struct Wgs84;

impl Wgs84 {
    /// Semi major axis (m)
    pub const SEMI_MAJOR_AXIS_M: f64 = 6378137.0;
    /// Flattening
    pub const FLATTENING: f64 = 1.0 / 298.257223563;
    /// Squared first eccentricity
    pub const ECCENTRICITY_SQUARED: f64 =
        2.0 * Self::FLATTENING - Self::FLATTENING * Self::FLATTENING;
}

/// Header lines layout
pub(crate) struct HeaderLayout;

impl HeaderLayout {
    /// Content occupies columns 0..60, label follows
    pub const CONTENT_WIDTH: usize = 60;
    /// Header section terminator
    pub const END_OF_HEADER: &'static str = "END OF HEADER";
}

/// Observation body scanning limits
pub(crate) struct Scanning;

impl Scanning {
    /// Number of epoch timestamps retained for interval analysis (first epochs only)
    pub const MAX_RETAINED_EPOCHS: usize = 100;
    /// Fixed latitude refinement budget of the geodetic solver
    pub const GEODETIC_ITERATIONS: usize = 5;
}

/// Plausible interval window (s), inclusive bounds
pub(crate) struct IntervalWindow;

impl IntervalWindow {
    pub const MIN_S: f64 = 0.001;
    pub const MAX_S: f64 = 3600.0;
    /// Relative spread (and header mismatch) tolerance
    pub const TOLERANCE: f64 = 0.01;
}
