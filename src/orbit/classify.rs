//! Orbit family classification from element-set parameters
//!
//! Classification is a one-time derived attribute: element parameters are
//! treated as constant for the session, so the class never changes after
//! ingestion.

use super::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2, SECONDS_PER_DAY};

/// Sidereal day in minutes, the geostationary period.
const GEO_PERIOD_MIN: f64 = 1436.1;
/// Half-width of the accepted geostationary period window.
const GEO_PERIOD_TOLERANCE_MIN: f64 = 30.0;
/// Eccentricity above which an orbit is treated as highly elliptical.
const HEO_ECCENTRICITY: f64 = 0.25;
/// Nominal sun-synchronous inclination in degrees.
const SSO_INCLINATION_DEG: f64 = 98.0;
const SSO_INCLINATION_TOLERANCE_DEG: f64 = 5.0;
const LEO_ALTITUDE_KM: f64 = 2000.0;
const GEO_ALTITUDE_KM: f64 = 35_700.0;

/// Coarse orbit family of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitClass {
    Leo,
    Meo,
    Geo,
    Heo,
    Sso,
    Unknown,
}

impl OrbitClass {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Leo => "LEO",
            Self::Meo => "MEO",
            Self::Geo => "GEO",
            Self::Heo => "HEO",
            Self::Sso => "SSO",
            Self::Unknown => "Other",
        }
    }
}

/// Classify an orbit from mean motion (rev/day), eccentricity, and
/// inclination (degrees). First matching rule wins:
///
/// 1. Non-positive or non-finite parameters are unusable.
/// 2. Eccentricity above 0.25 dominates every altitude bucket.
/// 3. Near-sidereal period, near-circular, near-equatorial is GEO.
/// 4. Below 2000 km at ~98 deg inclination is sun-synchronous.
/// 5. Otherwise bucket by altitude; orbits at or above the GEO shell
///    that failed the GEO test fall back to MEO.
pub fn classify(mean_motion_rev_day: f64, eccentricity: f64, inclination_deg: f64) -> OrbitClass {
    if mean_motion_rev_day <= 0.0 {
        return OrbitClass::Unknown;
    }

    let n_rad_min = mean_motion_rev_day * 2.0 * std::f64::consts::PI / (SECONDS_PER_DAY / 60.0);
    let period_min = 2.0 * std::f64::consts::PI / n_rad_min;

    let n_rad_s = mean_motion_rev_day * 2.0 * std::f64::consts::PI / SECONDS_PER_DAY;
    let semi_major_km = (MU_EARTH_KM3_S2 / (n_rad_s * n_rad_s)).cbrt();
    let altitude_km = semi_major_km - EARTH_RADIUS_KM;

    if !period_min.is_finite() || !altitude_km.is_finite() {
        return OrbitClass::Unknown;
    }

    if eccentricity > HEO_ECCENTRICITY {
        return OrbitClass::Heo;
    }

    if (period_min - GEO_PERIOD_MIN).abs() < GEO_PERIOD_TOLERANCE_MIN
        && eccentricity < 0.1
        && inclination_deg < 5.0
    {
        return OrbitClass::Geo;
    }

    if altitude_km < LEO_ALTITUDE_KM {
        if (inclination_deg - SSO_INCLINATION_DEG).abs() < SSO_INCLINATION_TOLERANCE_DEG {
            return OrbitClass::Sso;
        }
        return OrbitClass::Leo;
    }

    if altitude_km < GEO_ALTITUDE_KM {
        return OrbitClass::Meo;
    }

    // Very high non-geostationary orbits are lumped into MEO. Coarse, but
    // the boundary semantics are intentional.
    OrbitClass::Meo
}

/// Classify directly from a parsed element set.
pub fn classify_tle(tle: &satkit::TLE) -> OrbitClass {
    classify(tle.mean_motion, tle.eccen, tle.inclination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_mean_motion_is_unknown() {
        assert_eq!(classify(0.0, 0.0, 0.0), OrbitClass::Unknown);
        assert_eq!(classify(-1.0, 0.0, 45.0), OrbitClass::Unknown);
    }

    #[test]
    fn high_eccentricity_dominates() {
        // Molniya-like
        assert_eq!(classify(2.006, 0.69, 64.1), OrbitClass::Heo);
        // Even at LEO-like mean motion, eccentricity wins.
        assert_eq!(classify(15.7, 0.3, 51.6), OrbitClass::Heo);
        // At GEO-like period too.
        assert_eq!(classify(1.0027, 0.26, 0.1), OrbitClass::Heo);
    }

    #[test]
    fn geostationary_window() {
        assert_eq!(classify(1.0027, 0.0002, 0.05), OrbitClass::Geo);
        // Inclined at the same period is not GEO; it lands in the
        // high-altitude MEO fallback.
        assert_eq!(classify(1.0027, 0.0002, 30.0), OrbitClass::Meo);
    }

    #[test]
    fn sun_synchronous_beats_plain_leo() {
        assert_eq!(classify(14.57, 0.001, 98.2), OrbitClass::Sso);
        assert_eq!(classify(14.57, 0.001, 82.0), OrbitClass::Leo);
    }

    #[test]
    fn iss_parameters_are_leo() {
        assert_eq!(classify(15.72, 0.0006703, 51.6416), OrbitClass::Leo);
    }

    #[test]
    fn gps_parameters_are_meo() {
        assert_eq!(classify(2.0056, 0.01, 55.0), OrbitClass::Meo);
    }

    #[test]
    fn very_high_orbits_fall_back_to_meo() {
        // ~49000 km semi-major axis, period well outside the GEO window.
        assert_eq!(classify(0.8, 0.001, 10.0), OrbitClass::Meo);
    }

    #[test]
    fn classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify(15.72, 0.0006703, 51.6416), OrbitClass::Leo);
        }
    }
}
