use glam::{Mat4, Vec3};

/// Field-of-view bounds in degrees, shared by the panel slider and wheel zoom.
pub const FOVY_MIN: f32 = 1.0;
pub const FOVY_MAX: f32 = 100.0;

/// Perspective camera parameters.
///
/// `up` must not be parallel to `at - eye`; the panel's ranges keep the
/// defaults well away from that, and this core does not re-validate
/// (malformed parameters are a panel concern, not a render-loop one).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub at: Vec3,
    pub up: Vec3,

    /// Vertical field of view, degrees.
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(-5.0, 3.0, 3.0),
            at: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 35.0,
            near: 0.1,
            far: 20.0,
        }
    }
}

impl Camera {
    /// Standard look-at view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.at, self.up)
    }

    /// Standard perspective projection (0..1 depth range for wgpu).
    ///
    /// Camera near/far are used here and only here; the resize path merely
    /// updates `aspect` on the caller's side.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), aspect, self.near, self.far)
    }

    /// Clamps and installs a new field of view.
    pub fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy.clamp(FOVY_MIN, FOVY_MAX);
    }

    /// Multiplicative wheel zoom: a positive (scroll-down) delta narrows the
    /// field of view. Clamped to [`FOVY_MIN`, `FOVY_MAX`] for any delta.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        let factor = 1.0 - delta_y / 1000.0;
        self.set_fovy(self.fovy * factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_zoom_never_leaves_bounds() {
        let mut camera = Camera::default();

        for _ in 0..100 {
            camera.zoom_by_wheel(900.0);
        }
        assert!(camera.fovy >= FOVY_MIN);

        for _ in 0..100 {
            camera.zoom_by_wheel(-900.0);
        }
        assert!(camera.fovy <= FOVY_MAX);

        // Absurd single deltas stay clamped too.
        camera.zoom_by_wheel(1.0e9);
        assert!(camera.fovy >= FOVY_MIN && camera.fovy <= FOVY_MAX);
        camera.zoom_by_wheel(-1.0e9);
        assert!(camera.fovy >= FOVY_MIN && camera.fovy <= FOVY_MAX);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let camera = Camera::default();
        let eye_in_view = camera.view_matrix().transform_point3(camera.eye);
        assert!(eye_in_view.length() < 1e-5);
    }

    #[test]
    fn view_matrix_looks_down_negative_z() {
        let camera = Camera::default();
        let at_in_view = camera.view_matrix().transform_point3(camera.at);
        assert!(at_in_view.z < 0.0);
        assert!(at_in_view.x.abs() < 1e-5 && at_in_view.y.abs() < 1e-5);
    }
}
