//! Directional light placed on an orbit around the origin.
//!
//! Uses the same yaw-then-pitch composition as the camera, with no drag
//! coupling and no up vector to resolve.

use glam::{Quat, Vec3};

use crate::camera::orbit_rotation;

pub const DEFAULT_LIGHT_DISTANCE: f32 = 10.0;
pub const DEFAULT_INDICATOR_LENGTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTransform {
    pub position: Vec3,
    /// Unit direction the light travels, from its position toward the origin.
    pub direction: Vec3,
    pub rotation: Quat,
    pub intensity: f32,
    pub ambient: f32,
}

/// Line drawn from the origin toward the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightIndicator {
    pub start: Vec3,
    pub end: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone)]
pub struct LightController {
    distance: f32,
    orbit_x: f32,
    orbit_y: f32,
    intensity: f32,
    ambient: f32,
    indicator_length: f32,
}

impl LightController {
    pub fn new(orbit_x: f32, orbit_y: f32, intensity: f32, ambient: f32) -> Self {
        Self {
            distance: DEFAULT_LIGHT_DISTANCE,
            orbit_x,
            orbit_y,
            intensity,
            ambient,
            indicator_length: DEFAULT_INDICATOR_LENGTH,
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_indicator_length(mut self, length: f32) -> Self {
        self.indicator_length = length;
        self
    }

    pub fn orbit_x(&self) -> f32 {
        self.orbit_x
    }

    pub fn orbit_y(&self) -> f32 {
        self.orbit_y
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_orbit_x(&mut self, degrees: f32) {
        self.orbit_x = degrees;
    }

    pub fn set_orbit_y(&mut self, degrees: f32) {
        self.orbit_y = degrees;
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    fn rotation(&self) -> glam::Mat3 {
        orbit_rotation(self.orbit_x, -self.orbit_y)
    }

    pub fn light_transform(&self) -> LightTransform {
        let rotation = self.rotation();
        LightTransform {
            position: rotation * Vec3::new(0.0, 0.0, self.distance),
            direction: rotation * Vec3::NEG_Z,
            rotation: Quat::from_mat3(&rotation),
            intensity: self.intensity,
            ambient: self.ambient,
        }
    }

    pub fn indicator(&self) -> LightIndicator {
        let rotation = self.rotation();
        LightIndicator {
            start: Vec3::ZERO,
            end: rotation * Vec3::new(0.0, 0.0, self.indicator_length),
            rotation: Quat::from_mat3(&rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_angles_place_light_on_z() {
        let light = LightController::new(0.0, 0.0, 1.0, 0.3);
        let transform = light.light_transform();
        assert_abs_diff_eq!(transform.position.z, DEFAULT_LIGHT_DISTANCE, epsilon = 1e-5);
        assert_abs_diff_eq!(transform.direction.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_vertical_angle_raises_light() {
        let light = LightController::new(0.0, 90.0, 1.0, 0.3);
        let transform = light.light_transform();
        assert_abs_diff_eq!(transform.position.y, DEFAULT_LIGHT_DISTANCE, epsilon = 1e-4);
        assert_abs_diff_eq!(transform.direction.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_indicator_points_at_light() {
        let light = LightController::new(-22.5, 45.0, 1.0, 0.3);
        let indicator = light.indicator();
        let position = light.light_transform().position;
        assert_eq!(indicator.start, Vec3::ZERO);
        assert_abs_diff_eq!(indicator.end.length(), DEFAULT_INDICATOR_LENGTH, epsilon = 1e-5);
        assert!(indicator.end.normalize().dot(position.normalize()) > 0.9999);
    }
}
