//! Live satellite entities

use glam::Vec3;

use crate::data::{catalog_entry, category_for, Category, ElementSetRecord};
use crate::orbit::{classify_tle, generate_track, OrbitClass, TRACK_MIN_POINTS};
use crate::renderer::DEFAULT_MARKER_COLOR;

use super::{step_opacity, OPACITY_EPSILON};

/// One tracked object, owned by the registry for the life of the session.
///
/// Mutated only from the single-threaded tick loop: the filter pass writes
/// `visible`, the propagation pass writes position and the last-known
/// coordinates, and the opacity pass animates the render/track opacities
/// toward the visibility target.
pub struct SatelliteEntity {
    pub name: String,
    pub catalog_id: String,
    /// Reused propagation state; parsed once, never recreated per frame.
    pub tle: satkit::TLE,
    pub orbit_class: OrbitClass,
    pub category: Category,
    pub has_camera: bool,

    /// Target visibility from the filter engine.
    pub visible: bool,
    /// Animated marker opacity chasing `visible`.
    pub render_opacity: f32,
    /// Animated track opacity chasing `visible`.
    pub track_opacity: f32,

    /// Scene position in Earth radii, recomputed every tick.
    pub position: Vec3,
    /// Whether `position` reflects a successful propagation this tick.
    pub position_valid: bool,
    pub last_lat_rad: f64,
    pub last_lon_rad: f64,
    pub last_altitude_km: f64,

    /// Fixed-window track polyline; empty when unusable.
    pub track: Vec<Vec3>,
    /// Terminal reentry flag; once set the entity is never propagated
    /// again and stays hidden.
    pub decayed: bool,

    /// Current marker color, re-evaluated every tick for hazard coloring.
    pub marker_color: [f32; 3],
}

impl SatelliteEntity {
    /// Build an entity from a validated record, classifying the orbit and
    /// precomputing its track around `reference`. Returns `None` when the
    /// element set is rejected by the propagation library.
    pub fn from_record(record: &ElementSetRecord, reference: &satkit::Instant) -> Option<Self> {
        let mut tle = match satkit::TLE::load_2line(&record.line1, &record.line2) {
            Ok(tle) => tle,
            Err(e) => {
                log::debug!("Rejected element set for {}: {}", record.name, e);
                return None;
            }
        };

        let orbit_class = classify_tle(&tle);
        let (category, has_camera) = category_for(&record.catalog_id);

        let mut track = generate_track(&mut tle, reference);
        if track.len() < TRACK_MIN_POINTS {
            track.clear();
        }

        Some(Self {
            name: record.name.clone(),
            catalog_id: record.catalog_id.clone(),
            tle,
            orbit_class,
            category,
            has_camera,
            visible: true,
            render_opacity: 0.0,
            track_opacity: 0.0,
            position: Vec3::ZERO,
            position_valid: false,
            last_lat_rad: 0.0,
            last_lon_rad: 0.0,
            last_altitude_km: 0.0,
            track,
            decayed: false,
            marker_color: DEFAULT_MARKER_COLOR,
        })
    }

    /// Permanently retire the entity after a terminal reentry report.
    pub fn mark_decayed(&mut self) {
        self.decayed = true;
        self.visible = false;
        self.position_valid = false;
    }

    /// Advance both opacities one smoothing step toward the visibility
    /// target.
    pub fn step_opacities(&mut self) {
        let target = if self.visible && !self.decayed { 1.0 } else { 0.0 };
        self.render_opacity = step_opacity(self.render_opacity, target);
        self.track_opacity = step_opacity(self.track_opacity, target);
    }

    /// Whether the marker participates in rendering and picking.
    pub fn renderable(&self) -> bool {
        self.position_valid && self.render_opacity > OPACITY_EPSILON
    }

    /// Whether the track polyline should be drawn.
    pub fn track_renderable(&self) -> bool {
        self.track.len() >= TRACK_MIN_POINTS && self.track_opacity > OPACITY_EPSILON
    }

    /// Public-field snapshot for the host detail panel.
    pub fn snapshot(&self) -> SatelliteSnapshot {
        let entry = catalog_entry(&self.catalog_id);
        SatelliteSnapshot {
            name: self.name.clone(),
            catalog_id: self.catalog_id.clone(),
            orbit_class: self.orbit_class,
            category: self.category,
            has_camera: self.has_camera,
            lat_deg: self.last_lat_rad.to_degrees(),
            lon_deg: self.last_lon_rad.to_degrees(),
            altitude_km: self.last_altitude_km,
            decayed: self.decayed,
            description: entry.map(|e| e.description),
            live_feed_url: entry.and_then(|e| e.live_feed_url),
        }
    }
}

/// Immutable copy of an entity's public state, emitted on click.
#[derive(Debug, Clone)]
pub struct SatelliteSnapshot {
    pub name: String,
    pub catalog_id: String,
    pub orbit_class: OrbitClass,
    pub category: Category,
    pub has_camera: bool,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub altitude_km: f64,
    pub decayed: bool,
    pub description: Option<&'static str>,
    pub live_feed_url: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_element_sets;
    use crate::orbit::OrbitClass;
    use crate::testutil::{iss_epoch, iss_text};

    fn iss_record() -> ElementSetRecord {
        parse_element_sets(&iss_text(), 1).remove(0)
    }

    #[test]
    fn entity_is_built_with_class_category_and_track() {
        let entity = SatelliteEntity::from_record(&iss_record(), &iss_epoch()).unwrap();
        assert_eq!(entity.orbit_class, OrbitClass::Leo);
        assert_eq!(entity.category, Category::Iss);
        assert!(entity.has_camera);
        assert!(entity.track.len() >= TRACK_MIN_POINTS);
        assert!(!entity.decayed);
        assert_eq!(entity.render_opacity, 0.0);
    }

    #[test]
    fn decay_is_permanent_and_hides() {
        let mut entity = SatelliteEntity::from_record(&iss_record(), &iss_epoch()).unwrap();
        entity.mark_decayed();
        assert!(entity.decayed);
        assert!(!entity.visible);

        // Even if a later filter pass wants it visible, opacity keeps
        // falling toward zero.
        entity.visible = false;
        for _ in 0..50 {
            entity.step_opacities();
        }
        assert!(entity.render_opacity < 0.01);
        assert!(!entity.renderable());
    }

    #[test]
    fn snapshot_reflects_entity_state() {
        let mut entity = SatelliteEntity::from_record(&iss_record(), &iss_epoch()).unwrap();
        entity.last_lat_rad = 0.5;
        entity.last_altitude_km = 415.0;
        let snap = entity.snapshot();
        assert_eq!(snap.catalog_id, "25544");
        assert!((snap.lat_deg - 0.5_f64.to_degrees()).abs() < 1e-9);
        assert_eq!(snap.altitude_km, 415.0);
        assert!(snap.description.is_some());
    }
}
