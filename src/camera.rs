//! Camera state and view matrix derivation.
//!
//! This module defines the [`Camera`] struct, a passive holder of position
//! and orientation from which the view matrix is derived.

use glam::{Mat4, Vec3};

/// A passive camera: a position plus view and up directions.
///
/// The view direction and up direction must not be collinear; the derived
/// view matrix is singular otherwise. No validation is performed, keeping
/// the two apart is the caller's responsibility.
pub struct Camera {
    position: Vec3,
    view_direction: Vec3,
    up_direction: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            view_direction: Vec3::NEG_Z,
            up_direction: Vec3::Y,
        }
    }
}

impl Camera {
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_view_direction(&mut self, view_direction: Vec3) {
        self.view_direction = view_direction;
    }

    pub fn set_up_direction(&mut self, up_direction: Vec3) {
        self.up_direction = up_direction;
    }

    /// Builds the right-handed look-at matrix for the current state.
    /// Recomputed on every call, nothing is cached.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.position,
            self.position + self.view_direction,
            self.up_direction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_identity() {
        let camera = Camera::default();
        let p = Vec3::new(1.5, -2.0, -7.0);
        let mapped = camera.view_matrix().transform_point3(p);
        assert!((mapped - p).length() < 1e-6);
    }

    #[test]
    fn look_at_puts_the_target_straight_ahead() {
        let mut camera = Camera::default();
        let position = Vec3::new(3.0, -2.0, 7.0);
        let view_direction = Vec3::new(1.0, 2.0, 2.0); // length 3
        let up_direction = Vec3::new(2.0, -2.0, 1.0); // orthogonal to the view direction
        camera.set_position(position);
        camera.set_view_direction(view_direction);
        camera.set_up_direction(up_direction);

        let mapped = camera
            .view_matrix()
            .transform_point3(position + view_direction);
        assert!((mapped - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-4);
    }

    #[test]
    fn position_maps_to_the_origin() {
        let mut camera = Camera::default();
        let position = Vec3::new(0.0, 4.0, -9.0);
        camera.set_position(position);
        let mapped = camera.view_matrix().transform_point3(position);
        assert!(mapped.length() < 1e-5);
    }
}
