//! Filter evaluation and opacity animation
//!
//! Filters are re-evaluated every tick rather than on change: visibility
//! is a target, and the animated opacities chase it continuously so that
//! filter flips fade rather than pop. Entities below the opacity epsilon
//! are excluded from rendering and picking.

use crate::data::Category;
use crate::orbit::OrbitClass;

/// Per-tick exponential smoothing factor for opacities.
pub const OPACITY_SMOOTHING: f32 = 0.1;
/// Below this opacity an entity is neither rendered nor pickable.
pub const OPACITY_EPSILON: f32 = 0.05;

/// Orbit-family filter selected by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitFilter {
    #[default]
    All,
    Leo,
    Meo,
    Geo,
    Heo,
    Sso,
    /// Objects whose orbit could not be classified.
    Other,
}

impl OrbitFilter {
    pub const ALL: [OrbitFilter; 7] = [
        OrbitFilter::All,
        OrbitFilter::Leo,
        OrbitFilter::Meo,
        OrbitFilter::Geo,
        OrbitFilter::Heo,
        OrbitFilter::Sso,
        OrbitFilter::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All orbits",
            Self::Leo => "LEO",
            Self::Meo => "MEO",
            Self::Geo => "GEO",
            Self::Heo => "HEO",
            Self::Sso => "SSO",
            Self::Other => "Other",
        }
    }

    pub fn matches(&self, class: OrbitClass) -> bool {
        match self {
            Self::All => true,
            Self::Leo => class == OrbitClass::Leo,
            Self::Meo => class == OrbitClass::Meo,
            Self::Geo => class == OrbitClass::Geo,
            Self::Heo => class == OrbitClass::Heo,
            Self::Sso => class == OrbitClass::Sso,
            Self::Other => class == OrbitClass::Unknown,
        }
    }
}

/// Category filter selected by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Iss,
    EarthObservation,
    CameraEquipped,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Iss,
        CategoryFilter::EarthObservation,
        CategoryFilter::CameraEquipped,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All categories",
            Self::Iss => "Station",
            Self::EarthObservation => "Earth observation",
            Self::CameraEquipped => "Camera equipped",
        }
    }

    pub fn matches(&self, category: Category, has_camera: bool) -> bool {
        match self {
            Self::All => true,
            Self::Iss => category == Category::Iss,
            Self::EarthObservation => category == Category::EarthObservation,
            Self::CameraEquipped => has_camera,
        }
    }
}

/// The host-owned filter configuration, read-only to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub orbit: OrbitFilter,
    pub category: CategoryFilter,
}

/// Target visibility for an entity under the current filters.
pub fn entity_visibility(
    filter: &FilterState,
    class: OrbitClass,
    category: Category,
    has_camera: bool,
) -> bool {
    filter.orbit.matches(class) && filter.category.matches(category, has_camera)
}

/// One smoothing step of an opacity toward its target.
pub fn step_opacity(current: f32, target: f32) -> f32 {
    current + (target - current) * OPACITY_SMOOTHING
}
