/// Procedural floating/rotation animation for the loaded object
use crate::scene::SceneObject;

/// Time advanced per frame tick
pub const TIME_STEP: f32 = 0.02;

const BOB_AMPLITUDE: f32 = 0.05;
const DRIFT_AMPLITUDE: f32 = 0.1;
const DRIFT_RATE: f32 = 0.05;
const SPIN_Y: f32 = 0.01;
const SPIN_X: f32 = 0.005;

/// Drives the slow bobbing/drifting motion and the continuous spin.
///
/// One `step` call corresponds to one frame tick; the offsets are written
/// as absolute values against the object's home position, so stepping is a
/// pure function of the tick counter and cannot drift.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    t: f32,
}

impl Animation {
    pub fn new() -> Self {
        Self { t: 0.0 }
    }

    /// Elapsed animation time
    pub fn time(&self) -> f32 {
        self.t
    }

    /// Advance one frame tick, mutating the object's transform
    pub fn step(&mut self, object: &mut SceneObject) {
        self.t += TIME_STEP;

        object.position.y = object.home.y + (self.t).sin() * BOB_AMPLITUDE;
        object.position.x = object.home.x + (self.t * DRIFT_RATE).sin() * DRIFT_AMPLITUDE;

        object.rotation.rotate(SPIN_X, SPIN_Y, 0.0);
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::scene::SceneObject;

    fn test_object() -> SceneObject {
        let (object, _) = SceneObject::from_mesh(Mesh::cube(1.0), 1.0, true);
        object
    }

    #[test]
    fn test_offsets_after_n_steps() {
        let mut animation = Animation::new();
        let mut object = test_object();

        let n = 100;
        for _ in 0..n {
            animation.step(&mut object);
        }

        let t = TIME_STEP * n as f32;
        let vertical = object.position.y - object.home.y;
        let horizontal = object.position.x - object.home.x;
        assert!((vertical - t.sin() * 0.05).abs() < 1e-4);
        assert!((horizontal - (t * 0.05).sin() * 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut animation = Animation::new();
        let mut object = test_object();

        for _ in 0..50 {
            animation.step(&mut object);
        }
        assert!((object.rotation.y - 0.5).abs() < 1e-4);
        assert!((object.rotation.x - 0.25).abs() < 1e-4);
        assert_eq!(object.rotation.z, 0.0);
    }

    #[test]
    fn test_first_step_uses_incremented_time() {
        let mut animation = Animation::new();
        let mut object = test_object();

        animation.step(&mut object);
        assert!((animation.time() - TIME_STEP).abs() < 1e-6);
        let vertical = object.position.y - object.home.y;
        assert!((vertical - TIME_STEP.sin() * 0.05).abs() < 1e-6);
    }
}
