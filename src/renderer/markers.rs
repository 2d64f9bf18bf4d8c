//! Marker and track vertex data, and the marker palette

use bytemuck::{Pod, Zeroable};

use crate::data::{Category, RiskLevel};

/// Latitude beyond which elevated radiation risk recolors a marker.
pub const HAZARD_LATITUDE_DEG: f64 = 50.0;

/// Default marker color for most satellites.
pub const DEFAULT_MARKER_COLOR: [f32; 3] = [0.35, 0.78, 1.0];
/// Distinguished color for crewed stations.
pub const STATION_MARKER_COLOR: [f32; 3] = [1.0, 0.85, 0.25];
/// Hazard color applied under elevated radiation risk at high latitude.
pub const HAZARD_MARKER_COLOR: [f32; 3] = [1.0, 0.25, 0.2];

/// Marker color for an entity this tick.
///
/// Purely visual and re-evaluated every tick, since latitude moves
/// continuously while the risk level is session configuration.
pub fn marker_color(category: Category, lat_rad: f64, risk: RiskLevel) -> [f32; 3] {
    if risk.is_elevated() && lat_rad.abs() > HAZARD_LATITUDE_DEG.to_radians() {
        return HAZARD_MARKER_COLOR;
    }
    if category == Category::Iss {
        return STATION_MARKER_COLOR;
    }
    DEFAULT_MARKER_COLOR
}

/// Per-satellite instance streamed to the marker pipeline each frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MarkerInstance {
    /// World position in Earth radii.
    pub position: [f32; 3],
    /// RGBA; alpha carries the animated render opacity.
    pub color: [f32; 4],
    pub size: f32,
}

impl MarkerInstance {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 28,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Track polyline vertex; tracks are drawn as line lists with per-vertex
/// alpha from the owning entity's track opacity.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TrackVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl TrackVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TrackVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_requires_elevated_risk_and_high_latitude() {
        let high_lat = 60.0_f64.to_radians();
        let low_lat = 30.0_f64.to_radians();

        assert_eq!(
            marker_color(Category::Weather, high_lat, RiskLevel::Severe),
            HAZARD_MARKER_COLOR
        );
        assert_eq!(
            marker_color(Category::Weather, high_lat, RiskLevel::Low),
            DEFAULT_MARKER_COLOR
        );
        assert_eq!(
            marker_color(Category::Weather, low_lat, RiskLevel::Extreme),
            DEFAULT_MARKER_COLOR
        );
        // Southern latitudes count too.
        assert_eq!(
            marker_color(Category::Weather, -high_lat, RiskLevel::High),
            HAZARD_MARKER_COLOR
        );
    }

    #[test]
    fn stations_get_the_distinguished_color() {
        assert_eq!(
            marker_color(Category::Iss, 0.0, RiskLevel::None),
            STATION_MARKER_COLOR
        );
        // Hazard still wins over the station color.
        assert_eq!(
            marker_color(Category::Iss, 1.0, RiskLevel::Extreme),
            HAZARD_MARKER_COLOR
        );
    }
}
