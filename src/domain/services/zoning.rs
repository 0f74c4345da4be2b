//! # Zone Classifier
//!
//! Buckets origin/destination pairs into pricing zones 1-8.
//!
//! ```text
//! same 3-digit prefix  -> 1
//! miles <=  150        -> 1
//! miles <=  300        -> 2
//! miles <=  600        -> 3
//! miles <= 1000        -> 4
//! miles <= 1400        -> 5
//! miles <= 1800        -> 6
//! miles <= 2200        -> 7
//! otherwise            -> 8
//! ```
//!
//! A distance exactly on a boundary takes the lower (cheaper) zone.

use crate::domain::services::geo::estimate_distance_miles;
use crate::domain::value_objects::{PostalCode, Zone};

/// Upper distance bound (inclusive, miles) for zones 1 through 7.
pub const ZONE_UPPER_BOUNDS_MILES: [f64; 7] = [150.0, 300.0, 600.0, 1000.0, 1400.0, 1800.0, 2200.0];

/// Maps a distance in miles to a zone.
///
/// Non-finite distances are treated as farthest.
///
/// # Examples
///
/// ```
/// use shipquote::domain::services::zoning::zone_for_distance;
///
/// assert_eq!(zone_for_distance(150.0).get(), 1);
/// assert_eq!(zone_for_distance(150.1).get(), 2);
/// assert_eq!(zone_for_distance(5000.0).get(), 8);
/// ```
#[must_use]
pub fn zone_for_distance(miles: f64) -> Zone {
    let position = ZONE_UPPER_BOUNDS_MILES
        .iter()
        .position(|bound| miles <= *bound)
        .unwrap_or(ZONE_UPPER_BOUNDS_MILES.len());

    u8::try_from(position + 1)
        .ok()
        .and_then(|value| Zone::new(value).ok())
        .unwrap_or(Zone::MAX)
}

/// Classifies an origin/destination pair into a zone.
///
/// Codes sharing a 3-digit prefix are zone 1 without any distance lookup.
#[must_use]
pub fn classify_zone(origin: &PostalCode, destination: &PostalCode) -> Zone {
    if origin.shares_prefix_with(destination) {
        tracing::debug!(%origin, %destination, "shared prefix, zone 1");
        return Zone::MIN;
    }

    let miles = estimate_distance_miles(origin, destination);
    let zone = zone_for_distance(miles);
    tracing::debug!(%origin, %destination, miles, %zone, "zone classified");
    zone
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn zip(s: &str) -> PostalCode {
        s.parse().unwrap()
    }

    #[test]
    fn boundaries_resolve_to_lower_zone() {
        let cases = [
            (0.0, 1),
            (50.0, 1),
            (150.0, 1),
            (150.01, 2),
            (300.0, 2),
            (600.0, 3),
            (1000.0, 4),
            (1400.0, 5),
            (1800.0, 6),
            (2200.0, 7),
            (2200.01, 8),
            (10_000.0, 8),
        ];
        for (miles, expected) in cases {
            assert_eq!(zone_for_distance(miles).get(), expected, "{miles} miles");
        }
    }

    #[test]
    fn nan_is_farthest() {
        assert_eq!(zone_for_distance(f64::NAN), Zone::MAX);
    }

    #[test]
    fn shared_prefix_is_zone_one() {
        assert_eq!(classify_zone(&zip("90210"), &zip("90211")), Zone::MIN);
        assert_eq!(classify_zone(&zip("59801"), &zip("59899")), Zone::MIN);
    }

    #[test]
    fn beverly_hills_to_new_york_is_zone_eight() {
        assert_eq!(classify_zone(&zip("90210"), &zip("10001")), Zone::MAX);
    }

    #[test]
    fn beverly_hills_regional_zones() {
        assert_eq!(classify_zone(&zip("90210"), &zip("90012")).get(), 1);
        assert_eq!(classify_zone(&zip("90210"), &zip("89101")).get(), 2);
        assert_eq!(classify_zone(&zip("90210"), &zip("94102")).get(), 3);
        assert_eq!(classify_zone(&zip("90210"), &zip("80202")).get(), 4);
        assert_eq!(classify_zone(&zip("90210"), &zip("75201")).get(), 5);
        assert_eq!(classify_zone(&zip("90210"), &zip("60601")).get(), 6);
    }
}
