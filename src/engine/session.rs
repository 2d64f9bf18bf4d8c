//! Visualization session lifecycle
//!
//! One `GlobeSession` exists per mounted view and owns every piece of
//! mutable engine state: the registry, the simulation clock, filter and
//! risk configuration, and hover/selection state. Dropping the session
//! tears everything down; GPU resources are owned by the host renderer
//! and released with it.

use chrono::{Datelike, Timelike};
use glam::Mat4;
use satkit::{Duration, Instant};

use crate::data::RiskLevel;
use crate::engine::{pick_entity, project_to_screen, FilterState, PointerRay, SatelliteRegistry};

use super::SatelliteSnapshot;

/// The three mutually exclusive user-visible states of a session.
#[derive(Debug, Clone)]
pub enum SessionPhase {
    Loading,
    Error(String),
    Ready,
}

/// Simulated-time clock, seeded from the wall clock and advanced by the
/// frame loop.
pub struct SimClock {
    now: Instant,
    pub playing: bool,
    pub speed: f64,
}

impl SimClock {
    pub fn from_wall_clock() -> Self {
        let now = chrono::Utc::now();
        let start = Instant::from_datetime(
            now.year(),
            now.month() as i32,
            now.day() as i32,
            now.hour() as i32,
            now.minute() as i32,
            now.second() as f64,
        )
        .unwrap_or_else(|_| Instant::from_datetime(2026, 1, 1, 0, 0, 0.0).unwrap());
        Self::starting_at(start)
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            now,
            playing: true,
            speed: 1.0,
        }
    }

    /// Advance simulated time by one frame of wall time.
    pub fn advance(&mut self, wall_dt_seconds: f64) {
        if self.playing {
            self.now = self.now + Duration::from_seconds(wall_dt_seconds * self.speed);
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn format(&self) -> String {
        let (year, month, day, hour, min, sec) = self.now.as_datetime();
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            year, month, day, hour, min, sec as u32
        )
    }
}

/// Hover state derived every frame; never persisted.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    pub name: Option<String>,
    pub screen_pos: Option<(f32, f32)>,
}

pub struct GlobeSession {
    registry: SatelliteRegistry,
    pub clock: SimClock,
    /// Host-owned configuration, pushed in before each tick.
    pub filter: FilterState,
    pub risk: RiskLevel,

    hovered: Option<usize>,
    hover: HoverState,
    selected: Option<usize>,
}

impl GlobeSession {
    pub fn new(registry: SatelliteRegistry, clock: SimClock) -> Self {
        Self {
            registry,
            clock,
            filter: FilterState::default(),
            risk: RiskLevel::None,
            hovered: None,
            hover: HoverState::default(),
            selected: None,
        }
    }

    pub fn registry(&self) -> &SatelliteRegistry {
        &self.registry
    }

    /// One frame of the update loop: advance time, re-apply filters,
    /// propagate, recolor, and refresh the hover label projection. The
    /// host renders immediately afterwards.
    pub fn tick(&mut self, wall_dt_seconds: f64, view_proj: &Mat4, viewport: (f32, f32)) {
        self.clock.advance(wall_dt_seconds);
        let now = self.clock.now();
        self.registry.tick(&now, &self.filter, self.risk);

        self.hover = match self.hovered.and_then(|i| self.registry.get(i)) {
            Some(entity) if entity.renderable() => {
                match project_to_screen(entity.position, view_proj, viewport) {
                    Some(pos) => HoverState {
                        name: Some(entity.name.clone()),
                        screen_pos: Some(pos),
                    },
                    None => HoverState::default(),
                }
            }
            _ => HoverState::default(),
        };
    }

    /// Continuous hover update from pointer movement. Returns the hovered
    /// name (the `on_satellite_hover` event payload), or `None` when the
    /// pointer is over empty space.
    pub fn pointer_hover(&mut self, ray: &PointerRay) -> Option<&str> {
        self.hovered = pick_entity(self.registry.entities(), ray);
        self.hovered
            .and_then(|i| self.registry.get(i))
            .map(|e| e.name.as_str())
    }

    /// Discrete click: emits a full snapshot only on an actual hit.
    pub fn pointer_click(&mut self, ray: &PointerRay) -> Option<SatelliteSnapshot> {
        let index = pick_entity(self.registry.entities(), ray)?;
        self.selected = Some(index);
        self.registry.get(index).map(|e| e.snapshot())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Snapshot of the currently selected entity, refreshed from live
    /// state at tick boundaries.
    pub fn selected_snapshot(&self) -> Option<SatelliteSnapshot> {
        self.selected
            .and_then(|i| self.registry.get(i))
            .map(|e| e.snapshot())
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_element_sets;
    use crate::engine::{CategoryFilter, OrbitFilter};
    use crate::renderer::Camera;
    use crate::testutil::{iss_epoch, iss_text, molniya_text};

    fn session() -> GlobeSession {
        let text = format!("{}{}", iss_text(), molniya_text());
        let records = parse_element_sets(&text, 10);
        let registry = SatelliteRegistry::from_records(&records, &iss_epoch());
        GlobeSession::new(registry, SimClock::starting_at(iss_epoch()))
    }

    fn tick_n(session: &mut GlobeSession, n: usize) {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix(16.0 / 9.0);
        for _ in 0..n {
            session.tick(0.016, &vp, (1280.0, 720.0));
        }
    }

    #[test]
    fn clock_advances_only_while_playing() {
        let mut clock = SimClock::starting_at(iss_epoch());
        clock.advance(10.0);
        let advanced = clock.now();
        assert!(((advanced - iss_epoch()).as_seconds() - 10.0).abs() < 1e-9);

        clock.playing = false;
        clock.advance(10.0);
        assert_eq!((clock.now() - advanced).as_seconds(), 0.0);

        clock.playing = true;
        clock.speed = 60.0;
        clock.advance(1.0);
        assert!(((clock.now() - advanced).as_seconds() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn tick_clears_hover_when_nothing_hovered() {
        let mut session = session();
        tick_n(&mut session, 2);
        assert!(session.hover().name.is_none());
        assert!(session.hover().screen_pos.is_none());
    }

    /// View transform with the eye placed twice as far out as `target`,
    /// on the same radial, so the target sits centered, in front of the
    /// eye, and never behind the globe.
    fn aimed_view(target: glam::Vec3) -> (glam::Vec3, Mat4) {
        let eye = target * 2.0;
        let view = Mat4::look_at_rh(eye, glam::Vec3::ZERO, glam::Vec3::Y);
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 16.0 / 9.0, 0.01, 100.0);
        (eye, proj * view)
    }

    #[test]
    fn hover_label_tracks_a_renderable_entity() {
        let mut session = session();
        tick_n(&mut session, 60);

        let index = session
            .registry()
            .entities()
            .iter()
            .position(|e| e.renderable())
            .expect("something renderable after convergence");
        let target = session.registry().get(index).unwrap().position;
        let (eye, vp) = aimed_view(target);

        let ray = PointerRay {
            origin: eye,
            dir: (target - eye).normalize(),
        };
        let name = session.pointer_hover(&ray).map(str::to_string);
        assert!(name.is_some());

        // Zero-dt tick: positions hold, hover label is recomputed.
        session.tick(0.0, &vp, (1280.0, 720.0));
        assert_eq!(session.hover().name, name);
        assert!(session.hover().screen_pos.is_some());
    }

    #[test]
    fn click_on_empty_space_emits_nothing() {
        let mut session = session();
        tick_n(&mut session, 60);

        let ray = PointerRay {
            origin: glam::Vec3::new(0.0, 0.0, 4.0),
            dir: glam::Vec3::new(0.0, 1.0, 0.0),
        };
        assert!(session.pointer_click(&ray).is_none());
        assert!(session.selected_snapshot().is_none());
    }

    #[test]
    fn click_snapshot_carries_public_fields() {
        let mut session = session();
        session.filter = FilterState {
            orbit: OrbitFilter::All,
            category: CategoryFilter::All,
        };
        tick_n(&mut session, 60);

        let index = session
            .registry()
            .entities()
            .iter()
            .position(|e| e.renderable())
            .unwrap();
        let target = session.registry().get(index).unwrap().position;
        let (eye, _) = aimed_view(target);
        let ray = PointerRay {
            origin: eye,
            dir: (target - eye).normalize(),
        };

        let snapshot = session.pointer_click(&ray).expect("click should hit");
        assert!(!snapshot.name.is_empty());
        assert!(!snapshot.catalog_id.is_empty());
        assert!(session.selected_snapshot().is_some());
    }
}
