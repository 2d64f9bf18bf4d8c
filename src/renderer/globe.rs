//! Globe mesh generation
//!
//! The sphere is parameterized by geocentric latitude/longitude using the
//! same axis convention as satellite scene positions (Y-up, z negated for
//! eastward longitude), so the equirectangular texture and every marker
//! and track point agree on where a given coordinate sits.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex for the globe mesh.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlobeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GlobeVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlobeVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Scene position of a point on the unit globe at the given geocentric
/// coordinates. The single source of the axis convention.
pub fn globe_point(lat_rad: f32, lon_rad: f32) -> Vec3 {
    Vec3::new(
        lat_rad.cos() * lon_rad.cos(),
        lat_rad.sin(),
        -(lat_rad.cos() * lon_rad.sin()),
    )
}

/// Generate the unit-radius globe mesh. Returns (vertices, indices).
pub fn generate_globe(segments: u32, rings: u32) -> (Vec<GlobeVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);

    for ring in 0..=rings {
        // North pole at v = 0 down to the south pole.
        let lat = std::f32::consts::FRAC_PI_2 - std::f32::consts::PI * ring as f32 / rings as f32;
        for seg in 0..=segments {
            // Texture seam at the antimeridian.
            let lon = -std::f32::consts::PI
                + 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
            let position = globe_point(lat, lon);

            vertices.push(GlobeVertex {
                position: position.to_array(),
                normal: position.to_array(),
                uv: [
                    seg as f32 / segments as f32,
                    ring as f32 / rings as f32,
                ],
            });
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            indices.push(current);
            indices.push(next);
            indices.push(current + 1);

            indices.push(current + 1);
            indices.push(next);
            indices.push(next + 1);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_dimensions() {
        let (vertices, indices) = generate_globe(64, 32);
        assert_eq!(vertices.len(), 65 * 33);
        assert_eq!(indices.len(), 64 * 32 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn vertices_lie_on_the_unit_sphere() {
        let (vertices, _) = generate_globe(16, 8);
        for v in &vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 1.0).abs() < 1e-5);
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn convention_matches_satellite_positions() {
        use crate::orbit::{scene_position, GeodeticState};

        for (lat, lon) in [(0.0, 0.0), (0.7, 1.3), (-0.9, -2.4), (1.2, 3.0)] {
            let mesh_point = globe_point(lat as f32, lon as f32);
            let sat_point = scene_position(&GeodeticState {
                lat_rad: lat,
                lon_rad: lon,
                altitude_km: 0.0,
            });
            assert!((mesh_point - sat_point).length() < 1e-5);
        }
    }

    #[test]
    fn poles_map_to_y_axis() {
        assert!((globe_point(std::f32::consts::FRAC_PI_2, 0.5) - Vec3::Y).length() < 1e-5);
        assert!((globe_point(-std::f32::consts::FRAC_PI_2, 2.0) + Vec3::Y).length() < 1e-5);
    }
}
