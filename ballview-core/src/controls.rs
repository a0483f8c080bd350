/// Damped orbit controls for rotating the camera around a focus point
use nalgebra::{Point3, Vector3};

use crate::camera::Camera;

/// Camera controls that orbit a focus target.
///
/// Rotation input feeds an angular velocity which is applied and then
/// decayed by the damping factor on every update, so motion eases out
/// instead of stopping instantly.
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub enable_damping: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            target: Point3::origin(),
            damping_factor: 0.1,
            rotate_speed: 1.0,
            enable_damping: true,
            enable_zoom: false,
            enable_pan: false,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    /// Feed a rotation gesture (radians of yaw and pitch)
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw_velocity += yaw * self.rotate_speed;
        self.pitch_velocity += pitch * self.rotate_speed;
    }

    /// Move the camera toward or away from the target.
    /// Ignored while zoom is disabled.
    pub fn zoom(&mut self, camera: &mut Camera, factor: f32) {
        if !self.enable_zoom {
            return;
        }
        let offset = camera.position - self.target;
        camera.position = self.target + offset * factor;
    }

    /// Slide the focus target in the camera plane.
    /// Ignored while pan is disabled.
    pub fn pan(&mut self, camera: &Camera, dx: f32, dy: f32) {
        if !self.enable_pan {
            return;
        }
        let forward = (self.target - camera.position).normalize();
        let right = forward.cross(&camera.up).normalize();
        let up = right.cross(&forward);
        self.target += right * dx + up * dy;
    }

    pub fn set_target(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    /// Advance the damped rotation one step and re-aim the camera.
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.position - self.target;
        let radius = offset.norm().max(1e-4);

        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).acos();

        yaw += self.yaw_velocity;
        pitch = (pitch - self.pitch_velocity).clamp(0.01, std::f32::consts::PI - 0.01);

        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        camera.position = self.target
            + Vector3::new(
                radius * sin_pitch * sin_yaw,
                radius * cos_pitch,
                radius * sin_pitch * cos_yaw,
            );
        camera.target = self.target;

        if self.enable_damping {
            self.yaw_velocity *= 1.0 - self.damping_factor;
            self.pitch_velocity *= 1.0 - self.damping_factor;
        } else {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
        }
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
