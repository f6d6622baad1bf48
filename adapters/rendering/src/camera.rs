//! Third-person orbit camera that follows the player.

use std::time::Duration;

use glam::{Quat, Vec3};
use maw_core::{InputSource, Key};

/// Degrees per second applied while an orbit key is held.
pub const ORBIT_SPEED: f32 = 500.0;
/// Lowest pitch the camera may reach, in degrees.
pub const MIN_PITCH: f32 = -80.0;
/// Highest pitch the camera may reach, in degrees.
pub const MAX_PITCH: f32 = 20.0;
/// Pitch the camera starts with, in degrees.
pub const INITIAL_PITCH: f32 = -15.0;
/// Offset from the look-at target before the orbit rotation is applied.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 6.0);
/// Lift from the followed position to the look-at target.
pub const TARGET_LIFT: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Orbit keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraControls {
    /// Orbit left.
    pub orbit_left: bool,
    /// Orbit right.
    pub orbit_right: bool,
    /// Tilt up.
    pub tilt_up: bool,
    /// Tilt down.
    pub tilt_down: bool,
}

impl CameraControls {
    /// Samples the camera keys from the provided source.
    #[must_use]
    pub fn sample<S>(source: &S) -> Self
    where
        S: InputSource + ?Sized,
    {
        Self {
            orbit_left: source.is_pressed(Key::CameraLeft),
            orbit_right: source.is_pressed(Key::CameraRight),
            tilt_up: source.is_pressed(Key::CameraUp),
            tilt_down: source.is_pressed(Key::CameraDown),
        }
    }
}

/// Yaw and pitch of the orbit camera, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    yaw: f32,
    pitch: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: INITIAL_PITCH,
        }
    }
}

impl CameraRig {
    /// Creates a rig with the given angles; pitch is clamped.
    #[must_use]
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
        }
    }

    /// Current yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Applies the held orbit keys for `dt`.
    pub fn update(&mut self, controls: CameraControls, dt: Duration) {
        let step = ORBIT_SPEED * dt.as_secs_f32();
        if controls.orbit_left {
            self.yaw += step;
        }
        if controls.orbit_right {
            self.yaw -= step;
        }
        if controls.tilt_up {
            self.pitch += step;
        }
        if controls.tilt_down {
            self.pitch -= step;
        }
        self.pitch = self.pitch.clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Point the camera looks at when following `focus`.
    #[must_use]
    pub fn target(&self, focus: Vec3) -> Vec3 {
        focus + TARGET_LIFT
    }

    /// Camera position when following `focus`.
    #[must_use]
    pub fn eye(&self, focus: Vec3) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.yaw.to_radians())
            * Quat::from_rotation_x(self.pitch.to_radians());
        self.target(focus) + rotation * CAMERA_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn level_camera_sits_behind_and_above_the_target() {
        let rig = CameraRig::new(0.0, 0.0);
        let focus = Vec3::new(1.0, 0.5, -3.0);

        assert!(close(rig.target(focus), Vec3::new(1.0, 1.0, -3.0)));
        assert!(close(rig.eye(focus), Vec3::new(1.0, 3.0, 3.0)));
    }

    #[test]
    fn half_turn_moves_the_camera_in_front() {
        let rig = CameraRig::new(180.0, 0.0);
        assert!(close(rig.eye(Vec3::ZERO), Vec3::new(0.0, 2.5, -6.0)));
    }

    #[test]
    fn orbit_keys_turn_at_a_fixed_rate_and_clamp_pitch() {
        let mut rig = CameraRig::default();
        let controls = CameraControls {
            orbit_left: true,
            tilt_down: true,
            ..CameraControls::default()
        };

        rig.update(controls, Duration::from_millis(200));
        assert!((rig.yaw() - 100.0).abs() < 1e-3);
        assert!((rig.pitch() - MIN_PITCH).abs() < f32::EPSILON);

        rig.update(
            CameraControls {
                tilt_up: true,
                ..CameraControls::default()
            },
            Duration::from_secs(1),
        );
        assert!((rig.pitch() - MAX_PITCH).abs() < f32::EPSILON);
    }
}
