//! SGP4 propagation to geocentric coordinates
//!
//! The adapter owns the frame conventions: SGP4 yields TEME positions,
//! which are rotated by Greenwich mean sidereal time into an Earth-fixed
//! frame and expressed as geocentric spherical latitude/longitude with a
//! mean-radius altitude. Scene positions use a Y-up frame with negated z
//! so longitude increases eastward across the globe texture; the globe
//! mesh is generated with the same formula.

use glam::Vec3;
use satkit::sgp4::sgp4;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Earth gravitational parameter, km^3/s^2.
pub const MU_EARTH_KM3_S2: f64 = 398600.4418;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Scene radius of the Earth mesh; satellite positions are in Earth radii.
pub const SCENE_EARTH_RADIUS: f32 = 1.0;
/// Altitude below which propagation is treated as terminal reentry.
const DECAY_ALTITUDE_KM: f64 = 80.0;

/// Geocentric state of a satellite at an instant.
#[derive(Debug, Clone, Copy)]
pub struct GeodeticState {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub altitude_km: f64,
}

/// Why a propagation attempt produced no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagateError {
    /// The orbit has degraded below a usable altitude. Terminal: the
    /// entity must never be propagated again.
    Decayed,
    /// SGP4 failed or produced non-finite output. Transient: the entity
    /// is hidden for this tick and may be retried.
    Numerical,
}

impl std::fmt::Display for PropagateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decayed => write!(f, "orbit has decayed"),
            Self::Numerical => write!(f, "propagation failed numerically"),
        }
    }
}

/// Propagate a parsed element set to geocentric coordinates at `when`.
///
/// The TLE is the reused propagation state: parsed once at ingestion and
/// passed mutably here every tick so SGP4 can keep its cached terms.
pub fn propagate_geodetic(
    tle: &mut satkit::TLE,
    when: &satkit::Instant,
) -> Result<GeodeticState, PropagateError> {
    let result = sgp4(tle, &[*when]).map_err(|_| PropagateError::Numerical)?;

    // TEME position in meters.
    let pos = result.pos.column(0);
    let (x, y, z) = (pos[0], pos[1], pos[2]);
    if !x.is_finite() || !y.is_finite() || !z.is_finite() {
        return Err(PropagateError::Numerical);
    }

    let r_m = (x * x + y * y + z * z).sqrt();
    if r_m <= 0.0 || !r_m.is_finite() {
        return Err(PropagateError::Numerical);
    }

    let altitude_km = r_m / 1000.0 - EARTH_RADIUS_KM;
    if altitude_km < DECAY_ALTITUDE_KM {
        return Err(PropagateError::Decayed);
    }

    // Rotate out Earth's rotation to recover longitude.
    let gmst = satkit::frametransform::gmst(when);
    let lat_rad = (z / r_m).asin();
    let lon_rad = wrap_longitude(y.atan2(x) - gmst);

    Ok(GeodeticState {
        lat_rad,
        lon_rad,
        altitude_km,
    })
}

/// Map geocentric coordinates to a scene position in Earth radii.
pub fn scene_position(state: &GeodeticState) -> Vec3 {
    let r = SCENE_EARTH_RADIUS + (state.altitude_km / EARTH_RADIUS_KM) as f32;
    let lat = state.lat_rad as f32;
    let lon = state.lon_rad as f32;
    Vec3::new(
        r * lat.cos() * lon.cos(),
        r * lat.sin(),
        -(r * lat.cos() * lon.sin()),
    )
}

fn wrap_longitude(rad: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut lon = rad % TAU;
    if lon > PI {
        lon -= TAU;
    } else if lon < -PI {
        lon += TAU;
    }
    lon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{iss_epoch, iss_tle};

    #[test]
    fn iss_propagates_to_plausible_state() {
        let mut tle = iss_tle();
        let state = propagate_geodetic(&mut tle, &iss_epoch()).unwrap();

        assert!(
            state.altitude_km > 250.0 && state.altitude_km < 500.0,
            "altitude {}",
            state.altitude_km
        );
        // Latitude is bounded by the inclination.
        assert!(state.lat_rad.abs() <= 52.0_f64.to_radians());
        assert!(state.lon_rad.abs() <= std::f64::consts::PI);
    }

    #[test]
    fn propagation_is_deterministic() {
        let when = iss_epoch();
        let mut a = iss_tle();
        let mut b = iss_tle();
        let s1 = propagate_geodetic(&mut a, &when).unwrap();
        let s2 = propagate_geodetic(&mut b, &when).unwrap();
        assert_eq!(s1.lat_rad, s2.lat_rad);
        assert_eq!(s1.lon_rad, s2.lon_rad);
        assert_eq!(s1.altitude_km, s2.altitude_km);
    }

    #[test]
    fn scene_position_matches_convention() {
        let state = GeodeticState {
            lat_rad: 0.0,
            lon_rad: 0.0,
            altitude_km: 0.0,
        };
        let p = scene_position(&state);
        assert!((p - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);

        // 90 degrees east on the equator lands at negative z.
        let east = GeodeticState {
            lat_rad: 0.0,
            lon_rad: std::f64::consts::FRAC_PI_2,
            altitude_km: 0.0,
        };
        let p = scene_position(&east);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);

        // North pole is +y.
        let pole = GeodeticState {
            lat_rad: std::f64::consts::FRAC_PI_2,
            lon_rad: 0.0,
            altitude_km: 0.0,
        };
        let p = scene_position(&pole);
        assert!((p - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn scene_radius_scales_with_altitude() {
        let state = GeodeticState {
            lat_rad: 0.4,
            lon_rad: -1.2,
            altitude_km: 6371.0,
        };
        // One Earth radius of altitude doubles the scene radius.
        assert!((scene_position(&state).length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn longitude_wraps_into_range() {
        use std::f64::consts::PI;
        assert!((wrap_longitude(1.9 * PI) - (-0.1 * PI)).abs() < 1e-12);
        assert!((wrap_longitude(-1.9 * PI) - (0.1 * PI)).abs() < 1e-12);
        assert!((wrap_longitude(0.5 * PI) - 0.5 * PI).abs() < 1e-12);
    }
}
