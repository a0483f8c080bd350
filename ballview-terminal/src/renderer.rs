/// ASCII rasterizer for terminal rendering
use ballview_core::scene::LightRig;
use ballview_core::{Camera, Scene, Triangle};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that converts the scene to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate the buffers for new terminal dimensions.
    /// A no-op when the dimensions are unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        let size = width * height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.char_buffer = vec![' '; size];
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
        }
    }

    /// Rasterize the scene's object, if one is loaded, under its light rig
    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera) {
        if let Some(object) = &scene.object {
            let model = object.model_matrix();
            for triangle in &object.mesh.triangles {
                self.render_triangle(triangle, &model, camera, &scene.lights);
            }
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lights: &LightRig,
    ) {
        // Project vertices to screen space
        let mut screen_coords = Vec::new();
        for vertex in &triangle.vertices {
            if let Some((x, y, z)) = camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                screen_coords.push((x, y, z));
            } else {
                return; // Triangle is clipped
            }
        }

        if screen_coords.len() != 3 {
            return;
        }

        let brightness = shade(triangle, model_matrix, lights);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        // Rasterize triangle using scanline algorithm
        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Evaluate the light rig for one face: ambient fill, a Lambertian
/// directional term, and the spot cone with penumbra falloff, normalized
/// by the rig's total intensity.
fn shade(triangle: &Triangle, model_matrix: &Matrix4<f32>, lights: &LightRig) -> f32 {
    let normal = model_matrix
        .transform_vector(&triangle.calculate_normal())
        .normalize();
    let centroid = world_centroid(triangle, model_matrix);

    let mut level = lights.ambient.intensity;

    let to_directional = lights.directional.position.coords.normalize();
    level += lights.directional.intensity * normal.dot(&to_directional).max(0.0);

    level += spot_term(&lights.spot, &normal, &centroid) * lights.spot.intensity;

    (level / lights.total_intensity()).clamp(0.0, 1.0)
}

fn spot_term(
    spot: &ballview_core::scene::SpotLight,
    normal: &Vector3<f32>,
    point: &Point3<f32>,
) -> f32 {
    let to_point = point - spot.position;
    if to_point.norm() < 1e-6 {
        return 0.0;
    }
    let to_point = to_point.normalize();

    // The spot aims at the origin
    let axis = (-spot.position.coords).normalize();
    let cos_angle = to_point.dot(&axis);
    let outer = spot.angle.cos();
    let inner = (spot.angle * (1.0 - spot.penumbra)).cos();

    if cos_angle < outer {
        return 0.0;
    }
    let cone = ((cos_angle - outer) / (inner - outer).max(1e-6)).clamp(0.0, 1.0);
    cone * normal.dot(&(-to_point)).max(0.0)
}

fn world_centroid(triangle: &Triangle, model_matrix: &Matrix4<f32>) -> Point3<f32> {
    let sum = triangle
        .vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.position.coords);
    model_matrix.transform_point(&Point3::from(sum / 3.0))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballview_core::geometry::Vertex;
    use ballview_core::Mesh;

    #[test]
    fn test_resize_reallocates_buffers() {
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.resize(100, 40);
        assert_eq!(renderer.width(), 100);
        assert_eq!(renderer.height(), 40);
        assert_eq!(renderer.char_buffer.len(), 100 * 40);
    }

    #[test]
    fn test_resize_same_size_is_noop() {
        let mut renderer = AsciiRenderer::new(80, 24);
        renderer.char_buffer[0] = '@';
        renderer.resize(80, 24);
        assert_eq!(renderer.char_buffer[0], '@');
    }

    #[test]
    fn test_draw_emits_one_row_per_line() {
        let renderer = AsciiRenderer::new(10, 4);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let newlines = out.iter().filter(|&&b| b == b'\n').count();
        assert_eq!(newlines, 4);
    }

    #[test]
    fn test_empty_scene_renders_blank() {
        let mut renderer = AsciiRenderer::new(20, 10);
        let scene = Scene::new();
        let camera = Camera::new(20, 10);
        renderer.clear();
        renderer.render_scene(&scene, &camera);
        assert!(renderer.char_buffer.iter().all(|&c| c == ' '));
    }

    #[test]
    fn test_lit_face_shades_brighter_than_unlit() {
        let rig = LightRig::default();
        let model = Matrix4::identity();

        // Face looking up toward the lights vs. looking straight down
        let up = Triangle::new(
            Vertex::new(-1.0, 0.0, -1.0, 0.0, 1.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0, 0.0, 1.0, 0.0),
            Vertex::new(1.0, 0.0, -1.0, 0.0, 1.0, 0.0),
        );
        let down = Triangle::new(
            Vertex::new(-1.0, 0.0, -1.0, 0.0, -1.0, 0.0),
            Vertex::new(1.0, 0.0, -1.0, 0.0, -1.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0, 0.0, -1.0, 0.0),
        );
        let lit = shade(&up, &model, &rig);
        let unlit = shade(&down, &model, &rig);
        assert!(lit > unlit);
        assert!((0.0..=1.0).contains(&lit));
        assert!((0.0..=1.0).contains(&unlit));
    }

    #[test]
    fn test_object_produces_visible_output() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut scene = Scene::new();
        scene.insert_object(Mesh::cube(0.5), true);
        let mut camera = Camera::new(40, 20);
        camera.position = nalgebra::Point3::new(0.0, 0.0, 2.0);

        renderer.clear();
        renderer.render_scene(&scene, &camera);
        assert!(renderer.char_buffer.iter().any(|&c| c != ' '));
    }
}
