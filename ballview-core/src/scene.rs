/// Scene container, loaded object, and the fixed light rig
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Mesh;
use crate::transform::{RotationState, Transform};

/// Uniform scale applied to the loaded model
pub const MODEL_SCALE: f32 = 2.0;

/// A directional light (sun-like), positioned but shining at the origin
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub position: Point3<f32>,
    pub intensity: f32,
}

/// A spot light with a cone angle and a soft penumbra edge
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    pub position: Point3<f32>,
    pub intensity: f32,
    /// Cone half-angle in radians
    pub angle: f32,
    /// Fraction of the cone over which intensity falls off to zero
    pub penumbra: f32,
}

/// Uniform fill light
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub intensity: f32,
}

/// The viewer's light rig: one directional, one spot, one ambient.
/// Intensities and positions are fixed; there is no dynamic lighting.
#[derive(Debug, Clone, Copy)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub spot: SpotLight,
    pub ambient: AmbientLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            directional: DirectionalLight {
                position: Point3::new(0.0, 20.0, 20.0),
                intensity: 2.0,
            },
            spot: SpotLight {
                position: Point3::new(10.0, 30.0, 10.0),
                intensity: 1.5,
                angle: std::f32::consts::PI / 6.0,
                penumbra: 0.3,
            },
            ambient: AmbientLight { intensity: 0.5 },
        }
    }
}

impl LightRig {
    /// Sum of all light intensities, used to normalize shading
    pub fn total_intensity(&self) -> f32 {
        self.directional.intensity + self.spot.intensity + self.ambient.intensity
    }
}

/// The loaded model with its transform.
///
/// `home` is the position the object was inserted at; the bobbing animation
/// writes absolute offsets against it rather than accumulating drift.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub position: Vector3<f32>,
    pub home: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: f32,
}

impl SceneObject {
    /// Place a freshly loaded mesh in the world.
    ///
    /// Returns the object and the focus point for the camera controls (the
    /// mesh's bounding-box center, or the origin when `recenter` moved the
    /// object there).
    pub fn from_mesh(mesh: Mesh, scale: f32, recenter: bool) -> (Self, Point3<f32>) {
        let center = mesh
            .bounding_box()
            .map(|b| b.center())
            .unwrap_or_else(Point3::origin);

        let (position, focus) = if recenter {
            (-center.coords * scale, Point3::origin())
        } else {
            (Vector3::zeros(), Point3::from(center.coords * scale))
        };

        let object = Self {
            mesh,
            position,
            home: position,
            rotation: RotationState::zero(),
            scale,
        };
        (object, focus)
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::model_matrix(&self.position, &self.rotation, self.scale)
    }
}

/// Ownership container for everything renderable
pub struct Scene {
    pub object: Option<SceneObject>,
    pub lights: LightRig,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            object: None,
            lights: LightRig::default(),
        }
    }

    /// Insert the loaded object, replacing any previous one.
    /// Returns the camera focus point.
    pub fn insert_object(&mut self, mesh: Mesh, recenter: bool) -> Point3<f32> {
        let (object, focus) = SceneObject::from_mesh(mesh, MODEL_SCALE, recenter);
        self.object = Some(object);
        focus
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
