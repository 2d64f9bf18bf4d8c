//! Pointer picking and hover projection
//!
//! Picking casts a ray from the camera through the pointer and tests it
//! against distance-scaled spheres around each renderable marker. Markers
//! hidden by the filter fade (opacity under the epsilon) or sitting
//! behind the globe are never hit.

use glam::{Mat4, Vec3};

use super::SatelliteEntity;

/// Pick sphere radius as a fraction of the marker's camera distance.
const PICK_RADIUS_PER_DISTANCE: f32 = 0.035;
const PICK_RADIUS_MIN: f32 = 0.01;

/// A world-space ray from the camera through a pointer position.
#[derive(Debug, Clone, Copy)]
pub struct PointerRay {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl PointerRay {
    /// Build a ray through normalized device coordinates (x right, y up,
    /// both in [-1, 1]) using the camera's view-projection matrix.
    pub fn from_ndc(view_proj: &Mat4, camera_pos: Vec3, ndc_x: f32, ndc_y: f32) -> Self {
        let inv = view_proj.inverse();
        let target = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.5));
        let dir = (target - camera_pos).normalize_or_zero();
        Self {
            origin: camera_pos,
            dir,
        }
    }
}

/// Index of the nearest renderable entity hit by the ray, if any.
pub fn pick_entity(entities: &[SatelliteEntity], ray: &PointerRay) -> Option<usize> {
    let earth_t = ray_sphere(ray, Vec3::ZERO, 1.0);

    let mut best: Option<(usize, f32)> = None;
    for (index, entity) in entities.iter().enumerate() {
        if !entity.renderable() {
            continue;
        }

        let distance = (entity.position - ray.origin).length();
        let radius = (distance * PICK_RADIUS_PER_DISTANCE).max(PICK_RADIUS_MIN);
        let Some(t) = ray_sphere(ray, entity.position, radius) else {
            continue;
        };

        // The globe blocks everything past its silhouette.
        if let Some(te) = earth_t {
            if te < t {
                continue;
            }
        }

        if best.map_or(true, |(_, bt)| t < bt) {
            best = Some((index, t));
        }
    }

    best.map(|(index, _)| index)
}

/// Nearest positive ray parameter where the ray enters the sphere.
fn ray_sphere(ray: &PointerRay, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = 2.0 * oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - 4.0 * c;
    if disc < 0.0 {
        return None;
    }

    let sqrt_disc = disc.sqrt();
    let t1 = (-b - sqrt_disc) / 2.0;
    let t2 = (-b + sqrt_disc) / 2.0;
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Project a world position to viewport pixel coordinates.
///
/// Returns `None` when the position is behind the camera or at/beyond the
/// far depth limit, which is also the signal to clear the hover label.
pub fn project_to_screen(
    position: Vec3,
    view_proj: &Mat4,
    viewport: (f32, f32),
) -> Option<(f32, f32)> {
    let clip = *view_proj * position.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if ndc.z >= 1.0 {
        return None;
    }

    let (width, height) = viewport;
    let x = (ndc.x * 0.5 + 0.5) * width;
    let y = (0.5 - ndc.y * 0.5) * height;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_element_sets;
    use crate::engine::SatelliteEntity;
    use crate::renderer::Camera;
    use crate::testutil::{iss_epoch, iss_text};

    fn entity_at(position: Vec3, opacity: f32) -> SatelliteEntity {
        let record = parse_element_sets(&iss_text(), 1).remove(0);
        let mut entity = SatelliteEntity::from_record(&record, &iss_epoch()).unwrap();
        entity.position = position;
        entity.position_valid = true;
        entity.render_opacity = opacity;
        entity
    }

    fn center_ray() -> PointerRay {
        let camera = Camera::default();
        PointerRay::from_ndc(
            &camera.view_projection_matrix(16.0 / 9.0),
            camera.position(),
            0.0,
            0.0,
        )
    }

    #[test]
    fn ray_through_center_hits_marker_on_axis() {
        let camera = Camera::default();
        // Marker between the camera and the globe, on the view axis.
        let towards = camera.position() * 0.5;
        let entities = vec![entity_at(towards, 1.0)];
        assert_eq!(pick_entity(&entities, &center_ray()), Some(0));
    }

    #[test]
    fn faded_markers_are_never_picked() {
        let camera = Camera::default();
        let towards = camera.position() * 0.5;
        let entities = vec![entity_at(towards, 0.01)];
        assert_eq!(pick_entity(&entities, &center_ray()), None);
    }

    #[test]
    fn globe_occludes_far_side_markers() {
        let camera = Camera::default();
        // Directly behind the globe on the view axis.
        let behind = -camera.position().normalize() * 1.2;
        let entities = vec![entity_at(behind, 1.0)];
        assert_eq!(pick_entity(&entities, &center_ray()), None);
    }

    #[test]
    fn nearest_of_two_markers_wins() {
        let camera = Camera::default();
        let near = camera.position() * 0.6;
        let far = camera.position() * 0.4;
        let entities = vec![entity_at(far, 1.0), entity_at(near, 1.0)];
        assert_eq!(pick_entity(&entities, &center_ray()), Some(1));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let entities = vec![entity_at(Vec3::new(0.0, 5.0, 0.0), 1.0)];
        assert_eq!(pick_entity(&entities, &center_ray()), None);
    }

    #[test]
    fn projection_round_trip_and_depth_reject() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix(1.0);

        // The look-at target projects to the viewport center.
        let (x, y) = project_to_screen(Vec3::ZERO, &vp, (800.0, 600.0)).unwrap();
        assert!((x - 400.0).abs() < 1.0);
        assert!((y - 300.0).abs() < 1.0);

        // A point behind the camera is rejected.
        let behind = camera.position() * 2.0;
        assert!(project_to_screen(behind, &vp, (800.0, 600.0)).is_none());
    }
}
