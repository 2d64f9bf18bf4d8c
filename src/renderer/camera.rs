//! Orbital camera for the globe viewport

use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 1.15;
const MAX_DISTANCE: f32 = 40.0;

/// Camera orbiting a target point, spherical-coordinate controlled.
#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Vec3,
    /// Distance from the target in Earth radii.
    pub distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 4.0,
            azimuth: 0.0,
            elevation: 0.3,
            fov: 45.0_f32.to_radians(),
            near: 0.01,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Drag-to-orbit.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth += delta_x * 0.01;
        self.elevation = (self.elevation + delta_y * 0.01).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );
    }

    /// Scroll-to-zoom.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Shift-drag panning of the look-at target.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        self.target += right * delta_x * 0.01 * self.distance;
        self.target += Vec3::Y * delta_y * 0.01 * self.distance;
    }

    /// Recenter on the globe after a deselect.
    pub fn reset(&mut self) {
        self.target = Vec3::ZERO;
    }
}

/// Camera uniform block shared by every pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera, aspect_ratio: f32) -> Self {
        let pos = camera.position();
        Self {
            view_proj: camera
                .view_projection_matrix(aspect_ratio)
                .to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            camera_pos: [pos.x, pos.y, pos.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_respects_limits() {
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.zoom(1.0);
        }
        assert!(camera.distance >= MIN_DISTANCE);
        for _ in 0..100 {
            camera.zoom(-1.0);
        }
        assert!(camera.distance <= MAX_DISTANCE);
    }

    #[test]
    fn elevation_never_reaches_the_poles() {
        let mut camera = Camera::default();
        for _ in 0..10_000 {
            camera.orbit(0.0, 10.0);
        }
        assert!(camera.elevation < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn position_is_distance_from_target() {
        let camera = Camera::default();
        assert!((camera.position().length() - camera.distance).abs() < 1e-5);
    }
}
