/// Perspective camera and screen projection
use nalgebra::{Matrix4, Point3, Vector3};

/// Vertical field of view, 75 degrees
pub const DEFAULT_FOV: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Perspective camera for 3D rendering.
///
/// The aspect ratio must always match the viewport's width/height ratio;
/// `set_viewport` re-establishes it after a resize.
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 1.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: DEFAULT_FOV,
            aspect: width as f32 / height as f32,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    /// Refit the projection to new viewport dimensions.
    /// Calling this with unchanged dimensions is a no-op.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        let mvp = projection * view * model_matrix;

        // Transform to clip space
        let clip = mvp.transform_point(point);

        // Prevent division by near-zero depth values
        if clip.z.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.z;
        let ndc_y = clip.y / clip.z;
        let depth = clip.z;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_matches_viewport() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        assert!((camera.near - 0.1).abs() < 1e-6);
        assert!((camera.far - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(120, 40);
        assert!((camera.aspect - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(100, 50);
        let aspect = camera.aspect;
        let projection = camera.projection_matrix();
        camera.set_viewport(100, 50);
        assert_eq!(camera.aspect, aspect);
        assert_eq!(camera.projection_matrix(), projection);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::new(80, 24);
        let model = Matrix4::identity();
        let (x, y, depth) = camera
            .project_to_screen(&camera.target, &model, 80, 24)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 12.0).abs() < 1e-3);
        assert!(depth > 0.0);
    }
}
