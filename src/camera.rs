//! Orbit camera driven by mouse drags.
//!
//! Angles are in degrees, wrapped into [0, 360). The horizontal angle yaws
//! about world Y, the vertical angle pitches about world X. The vertical angle
//! is not clamped: the camera may roll over a pole, so the up vector flips with
//! the hemisphere and is taken from the horizontal angle alone at the poles.

use glam::{Mat3, Mat4, Vec3};

const DEFAULT_FOV_DEGREES: f32 = 60.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;
const FULL_TURN: f32 = 360.0;
const NORTH_POLE: f32 = 90.0;
const SOUTH_POLE: f32 = 270.0;
/// Vertical angles this close to a pole use the pole up vector.
const POLE_TOLERANCE: f32 = 1e-4;

/// Wraps `degrees` into [0, 360).
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees % FULL_TURN;
    let wrapped = if wrapped < 0.0 {
        wrapped + FULL_TURN
    } else {
        wrapped
    };
    // a tiny negative remainder rounds up to a full turn
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Rotation taking the rest vector (0, 0, distance) to an orbit position:
/// yaw about Y composed with pitch about X.
pub(crate) fn orbit_rotation(yaw_degrees: f32, pitch_degrees: f32) -> Mat3 {
    Mat3::from_rotation_y(yaw_degrees.to_radians())
        * Mat3::from_rotation_x(pitch_degrees.to_radians())
}

/// Eye placement handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraTransform {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}

/// Drag-integrated orbit state around the origin.
#[derive(Debug, Clone)]
pub struct OrbitController {
    horizontal: f32,
    vertical: f32,
    distance: f32,
    dragging: bool,
}

impl OrbitController {
    pub fn new(distance: f32) -> Self {
        Self {
            horizontal: 0.0,
            vertical: 0.0,
            distance,
            dragging: false,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.vertical
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Jumps straight to a viewpoint, wrapping both angles into `[0, 360)`.
    ///
    /// Reset entry point only. Interactive motion goes through
    /// [`accumulate`](Self::accumulate), and the viewer never calls this.
    pub fn set_angles(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = wrap_degrees(horizontal);
        self.vertical = wrap_degrees(vertical);
    }

    /// Integrates a drag delta. Returns `false` when nothing changed, either
    /// because no drag is active or because the delta is not finite.
    pub fn accumulate(&mut self, dx: f32, dy: f32) -> bool {
        if !self.dragging {
            return false;
        }
        if !(dx.is_finite() && dy.is_finite()) {
            log::warn!("Ignoring non-finite drag delta ({dx}, {dy})");
            return false;
        }

        // past a pole the view is upside down, so lateral drag runs backwards
        let horizontal = if self.is_inverted() {
            self.horizontal - dx
        } else {
            self.horizontal + dx
        };
        self.horizontal = wrap_degrees(horizontal);
        self.vertical = wrap_degrees(self.vertical + dy);
        true
    }

    /// Whether the vertical angle lies strictly between the poles, where the
    /// camera is upside down.
    fn is_inverted(&self) -> bool {
        self.vertical > NORTH_POLE && self.vertical < SOUTH_POLE
    }

    pub fn camera_transform(&self) -> CameraTransform {
        let rotation = orbit_rotation(-self.horizontal, -self.vertical);
        CameraTransform {
            position: rotation * Vec3::new(0.0, 0.0, self.distance),
            target: Vec3::ZERO,
            up: self.up_vector(),
        }
    }

    fn up_vector(&self) -> Vec3 {
        if (self.vertical - SOUTH_POLE).abs() <= POLE_TOLERANCE {
            self.pole_up()
        } else if (self.vertical - NORTH_POLE).abs() <= POLE_TOLERANCE {
            -self.pole_up()
        } else if self.is_inverted() {
            Vec3::NEG_Y
        } else {
            Vec3::Y
        }
    }

    /// Horizontal up vector used when looking straight along the Y axis.
    fn pole_up(&self) -> Vec3 {
        let yaw = (-self.horizontal).to_radians();
        Vec3::new(yaw.sin(), 0.0, yaw.cos())
    }
}

/// Perspective camera fed with orbit transforms.
pub struct Camera {
    transform: CameraTransform,
    aspect_ratio: f32,
    view_projection_matrix: Mat4,
}

impl Camera {
    pub fn new(aspect_ratio: f32, transform: CameraTransform) -> Self {
        let mut camera = Self {
            transform,
            aspect_ratio,
            view_projection_matrix: Mat4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }

    pub fn transform(&self) -> CameraTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: CameraTransform) {
        self.transform = transform;
        self.update_matrices();
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_matrices();
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }

    fn update_matrices(&mut self) {
        self.view_projection_matrix =
            projection_matrix(self.aspect_ratio) * self.transform.view_matrix();
    }
}

pub fn projection_matrix(aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh(
        DEFAULT_FOV_DEGREES.to_radians(),
        aspect_ratio,
        NEAR_PLANE,
        FAR_PLANE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-10.0), 350.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-720.0), 0.0);
        let tiny = wrap_degrees(-1e-6);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_drag_ignored_when_inactive() {
        let mut orbit = OrbitController::new(4.0);
        assert!(!orbit.accumulate(10.0, 10.0));
        assert_eq!(orbit.horizontal(), 0.0);
        assert_eq!(orbit.vertical(), 0.0);
    }

    #[test]
    fn test_lateral_drag_inverts_past_pole() {
        let mut orbit = OrbitController::new(4.0);
        orbit.set_angles(100.0, 180.0);
        orbit.begin_drag();
        orbit.accumulate(10.0, 0.0);
        assert_eq!(orbit.horizontal(), 90.0);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut orbit = OrbitController::new(4.0);
        orbit.begin_drag();
        assert!(!orbit.accumulate(f32::NAN, 0.0));
        assert!(!orbit.accumulate(0.0, f32::INFINITY));
        assert_eq!(orbit.horizontal(), 0.0);
    }

    #[test]
    fn test_rest_position_on_positive_z() {
        let orbit = OrbitController::new(4.0);
        let transform = orbit.camera_transform();
        assert!((transform.position - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-6);
        assert_eq!(transform.target, Vec3::ZERO);
        assert_eq!(transform.up, Vec3::Y);
    }
}
