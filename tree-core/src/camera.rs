//! Perspective projection and the pointer-driven orbit camera.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Keeps the pitch away from the poles where the view basis degenerates.
const PITCH_LIMIT: f32 = 1.55;

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            aspect: 1.0,
            znear: 0.1,
            zfar: 1500.0,
        }
    }
}

impl Camera {
    /// Updates the aspect ratio from viewport dimensions in pixels.
    ///
    /// Degenerate sizes are ignored so a collapsed window never produces a
    /// NaN projection.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar)
    }
}

/// Orbit camera: a [`Camera`] revolving around a focus point.
///
/// State is `(target, yaw, pitch, distance)`; the eye position is always
/// derived from it. Pointer deltas feed [`OrbitCamera::rotate`] and
/// [`OrbitCamera::pan`], scroll feeds [`OrbitCamera::zoom`].
#[derive(Clone, Copy, Debug)]
pub struct OrbitCamera {
    pub camera: Camera,
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    /// Starting view: 1000 units out along +X, looking at the origin.
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            target: Vec3::ZERO,
            yaw: FRAC_PI_2,
            pitch: 0.0,
            distance: 1000.0,
            rotate_speed: 0.008,
            pan_speed: 0.001,
            zoom_speed: 0.001,
        }
    }

    /// Restores the starting view while keeping the current aspect ratio.
    pub fn reset(&mut self) {
        let aspect = self.camera.aspect;
        *self = Self::new();
        self.camera.aspect = aspect;
    }

    /// Eye position derived from yaw/pitch/distance around the target.
    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.target + dir * self.distance
    }

    /// Applies a pointer drag as an orbit around the target.
    ///
    /// Horizontal motion spins the yaw, vertical motion tilts the pitch;
    /// pitch is clamped short of the poles.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.rotate_speed;
        self.pitch = (self.pitch + delta.y * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Applies scroll input as a multiplicative dolly toward or away from
    /// the target, clamped inside the near/far planes.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * self.zoom_speed)).clamp(10.0, 1400.0);
    }

    /// Slides the target along the camera's right and up axes.
    ///
    /// The step is proportional to the current distance so panning covers a
    /// similar on-screen span at any zoom level.
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);

        let step = self.distance * self.pan_speed;
        self.target += right * (-delta.x * step) + up * (delta.y * step);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Combined view-projection matrix for the current state.
    pub fn view_proj(&self) -> Mat4 {
        self.camera.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_tracks_viewport_dimensions_exactly() {
        let mut camera = Camera::default();

        camera.set_viewport(800.0, 600.0);
        assert_eq!(camera.aspect, 800.0 / 600.0);

        camera.set_viewport(1920.0, 1080.0);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn degenerate_viewport_is_ignored() {
        let mut camera = Camera::default();
        camera.set_viewport(800.0, 600.0);
        camera.set_viewport(0.0, 600.0);
        camera.set_viewport(800.0, 0.0);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn initial_eye_sits_on_the_x_axis() {
        let orbit = OrbitCamera::new();
        let eye = orbit.eye();
        assert!(eye.abs_diff_eq(Vec3::new(1000.0, 0.0, 0.0), 1e-3), "{eye}");
    }

    #[test]
    fn target_projects_to_the_center_of_the_view() {
        let mut orbit = OrbitCamera::new();
        orbit.camera.set_viewport(800.0, 600.0);

        let clip = orbit.view_proj() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn pitch_clamps_short_of_the_poles() {
        let mut orbit = OrbitCamera::new();
        orbit.rotate(Vec2::new(0.0, 10_000.0));
        assert!(orbit.eye().y < orbit.distance);

        // The view matrix stays well-formed at the clamp.
        let view = orbit.view();
        assert!(view.is_finite());
    }

    #[test]
    fn zoom_is_clamped_inside_the_clip_planes() {
        let mut orbit = OrbitCamera::new();

        orbit.zoom(1.0e9);
        assert!(orbit.distance >= 10.0);

        orbit.zoom(-1.0e9);
        assert!(orbit.distance <= 1400.0);
        assert!(orbit.distance < orbit.camera.zfar);
    }

    #[test]
    fn pan_moves_the_target_but_not_the_framing() {
        let mut orbit = OrbitCamera::new();
        let before = orbit.eye() - orbit.target;

        orbit.pan(Vec2::new(40.0, -25.0));

        // Eye follows the target; the offset between them is unchanged.
        let after = orbit.eye() - orbit.target;
        assert!(after.abs_diff_eq(before, 1e-3));
        assert!(orbit.target != Vec3::ZERO);
    }

    #[test]
    fn reset_restores_the_initial_view_but_keeps_aspect() {
        let mut orbit = OrbitCamera::new();
        orbit.camera.set_viewport(1920.0, 1080.0);
        orbit.rotate(Vec2::new(120.0, 60.0));
        orbit.zoom(300.0);
        orbit.pan(Vec2::new(10.0, 10.0));

        orbit.reset();

        assert!(orbit.eye().abs_diff_eq(Vec3::new(1000.0, 0.0, 0.0), 1e-3));
        assert_eq!(orbit.camera.aspect, 1920.0 / 1080.0);
    }
}
