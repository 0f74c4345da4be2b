//! # Geographic Distance Estimator
//!
//! Approximate great-circle distance between two US postal codes.
//!
//! Each code's 3-digit prefix is looked up in a table of metro-area
//! coordinates. Prefixes missing from the table fall back to one of ten
//! regional centroids keyed by the leading digit. Distances are floored at
//! [`MIN_DISTANCE_MILES`] so that no two delivery points are ever treated as
//! co-located.

use crate::domain::value_objects::PostalCode;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Lower bound on any estimated distance.
pub const MIN_DISTANCE_MILES: f64 = 50.0;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, north positive.
    pub lat: f64,
    /// Longitude in degrees, east positive.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point (Haversine), in miles.
    #[must_use]
    pub fn haversine_miles(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_MILES * c
    }
}

/// Metro-area coordinates keyed by 3-digit ZIP prefix.
const METRO_PREFIXES: &[(&str, Coordinate)] = &[
    ("021", Coordinate::new(42.3601, -71.0589)),   // Boston
    ("100", Coordinate::new(40.7128, -74.0060)),   // New York
    ("112", Coordinate::new(40.6782, -73.9442)),   // Brooklyn
    ("191", Coordinate::new(39.9526, -75.1652)),   // Philadelphia
    ("152", Coordinate::new(40.4406, -79.9959)),   // Pittsburgh
    ("200", Coordinate::new(38.9072, -77.0369)),   // Washington
    ("212", Coordinate::new(39.2904, -76.6122)),   // Baltimore
    ("282", Coordinate::new(35.2271, -80.8431)),   // Charlotte
    ("303", Coordinate::new(33.7490, -84.3880)),   // Atlanta
    ("328", Coordinate::new(28.5383, -81.3792)),   // Orlando
    ("331", Coordinate::new(25.7617, -80.1918)),   // Miami
    ("372", Coordinate::new(36.1627, -86.7816)),   // Nashville
    ("432", Coordinate::new(39.9612, -82.9988)),   // Columbus
    ("441", Coordinate::new(41.4993, -81.6944)),   // Cleveland
    ("462", Coordinate::new(39.7684, -86.1581)),   // Indianapolis
    ("482", Coordinate::new(42.3314, -83.0458)),   // Detroit
    ("532", Coordinate::new(43.0389, -87.9065)),   // Milwaukee
    ("554", Coordinate::new(44.9778, -93.2650)),   // Minneapolis
    ("606", Coordinate::new(41.8781, -87.6298)),   // Chicago
    ("631", Coordinate::new(38.6270, -90.1994)),   // St. Louis
    ("641", Coordinate::new(39.0997, -94.5786)),   // Kansas City
    ("681", Coordinate::new(41.2565, -95.9345)),   // Omaha
    ("701", Coordinate::new(29.9511, -90.0715)),   // New Orleans
    ("731", Coordinate::new(35.4676, -97.5164)),   // Oklahoma City
    ("752", Coordinate::new(32.7767, -96.7970)),   // Dallas
    ("770", Coordinate::new(29.7604, -95.3698)),   // Houston
    ("782", Coordinate::new(29.4241, -98.4936)),   // San Antonio
    ("787", Coordinate::new(30.2672, -97.7431)),   // Austin
    ("802", Coordinate::new(39.7392, -104.9903)),  // Denver
    ("841", Coordinate::new(40.7608, -111.8910)),  // Salt Lake City
    ("850", Coordinate::new(33.4484, -112.0740)),  // Phoenix
    ("871", Coordinate::new(35.0844, -106.6504)),  // Albuquerque
    ("891", Coordinate::new(36.1699, -115.1398)),  // Las Vegas
    ("900", Coordinate::new(34.0522, -118.2437)),  // Los Angeles
    ("902", Coordinate::new(34.0736, -118.4004)),  // Beverly Hills
    ("921", Coordinate::new(32.7157, -117.1611)),  // San Diego
    ("941", Coordinate::new(37.7749, -122.4194)),  // San Francisco
    ("951", Coordinate::new(37.3382, -121.8863)),  // San Jose
    ("958", Coordinate::new(38.5816, -121.4944)),  // Sacramento
    ("968", Coordinate::new(21.3069, -157.8583)),  // Honolulu
    ("972", Coordinate::new(45.5152, -122.6784)),  // Portland
    ("981", Coordinate::new(47.6062, -122.3321)),  // Seattle
    ("995", Coordinate::new(61.2181, -149.9003)),  // Anchorage
];

/// Regional centroids indexed by the leading ZIP digit.
const REGION_CENTROIDS: [Coordinate; 10] = [
    Coordinate::new(42.4, -72.0),  // 0: New England, NJ
    Coordinate::new(41.5, -76.0),  // 1: NY, PA, DE
    Coordinate::new(37.5, -79.0),  // 2: Mid-Atlantic, Carolinas
    Coordinate::new(32.5, -84.5),  // 3: Southeast
    Coordinate::new(40.5, -84.5),  // 4: Ohio Valley, Michigan
    Coordinate::new(44.5, -94.0),  // 5: Upper Midwest
    Coordinate::new(39.5, -92.5),  // 6: Central Plains
    Coordinate::new(32.0, -96.5),  // 7: South Central
    Coordinate::new(39.0, -110.0), // 8: Mountain West
    Coordinate::new(38.0, -121.0), // 9: Pacific
];

/// Resolves a postal code to an approximate coordinate.
#[must_use]
pub fn coordinate_for(code: &PostalCode) -> Coordinate {
    let prefix = code.prefix();
    METRO_PREFIXES
        .iter()
        .find(|(known, _)| *known == prefix)
        .map(|(_, coordinate)| *coordinate)
        .unwrap_or_else(|| region_centroid(code.region_digit()))
}

/// Returns the coarse centroid for a leading ZIP digit.
#[must_use]
pub fn region_centroid(digit: u8) -> Coordinate {
    REGION_CENTROIDS
        .get(usize::from(digit))
        .copied()
        .unwrap_or(REGION_CENTROIDS[0])
}

/// Estimates the distance between two postal codes in miles, never less than
/// [`MIN_DISTANCE_MILES`].
///
/// # Examples
///
/// ```
/// use shipquote::domain::services::geo::estimate_distance_miles;
/// use shipquote::domain::value_objects::PostalCode;
///
/// let la: PostalCode = "90012".parse().unwrap();
/// let nyc: PostalCode = "10001".parse().unwrap();
/// let miles = estimate_distance_miles(&la, &nyc);
/// assert!(miles > 2400.0 && miles < 2500.0);
///
/// assert_eq!(estimate_distance_miles(&la, &la), 50.0);
/// ```
#[must_use]
pub fn estimate_distance_miles(from: &PostalCode, to: &PostalCode) -> f64 {
    let miles = coordinate_for(from).haversine_miles(&coordinate_for(to));
    miles.max(MIN_DISTANCE_MILES)
}
