/// Ballview Core Library - Scene, camera, and animation logic
///
/// This library provides the stateless core functionality for the model
/// viewer: geometry and bounding boxes, the perspective camera, damped
/// orbit controls, the per-frame animation step, and glTF asset import.

pub mod animate;
pub mod asset;
pub mod camera;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use animate::{Animation, TIME_STEP};
pub use asset::{LoadStatus, FAILURE_MESSAGE};
pub use camera::Camera;
pub use controls::OrbitControls;
pub use error::{Error, Result};
pub use geometry::{Aabb, Mesh, Triangle, Vertex};
pub use scene::{LightRig, Scene, SceneObject};
pub use transform::{RotationState, Transform};
