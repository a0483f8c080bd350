/// glTF asset import and load-progress tracking
use std::path::Path;

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle, Vertex};

/// Status message shown when the asset cannot be loaded
pub const FAILURE_MESSAGE: &str = "Failed to load.";

/// Load a glTF file into a single flattened triangle mesh.
///
/// All meshes and primitives in the document are merged; parsing of the
/// format itself is delegated to the `gltf` crate.
pub fn load_mesh(path: &Path) -> Result<Mesh> {
    let (document, buffers, _images) = gltf::import(path)?;

    let mut mesh = Mesh::new();
    for gltf_mesh in document.meshes() {
        for primitive in gltf_mesh.primitives() {
            let reader = primitive
                .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

            let positions = reader
                .read_positions()
                .ok_or_else(|| Error::Asset("primitive has no POSITION attribute".into()))?;
            let normals = reader
                .read_normals()
                .ok_or_else(|| Error::Asset("primitive has no NORMAL attribute".into()))?;

            let vertices: Vec<Vertex> = positions
                .zip(normals)
                .map(|(p, n)| Vertex::new(p[0], p[1], p[2], n[0], n[1], n[2]))
                .collect();

            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..vertices.len() as u32).collect(),
            };

            for tri in indices.chunks_exact(3) {
                let fetch = |i: u32| {
                    vertices
                        .get(i as usize)
                        .copied()
                        .ok_or_else(|| Error::Asset(format!("index {} out of range", i)))
                };
                mesh.add_triangle(Triangle::new(fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?));
            }
        }
    }

    if mesh.triangles.is_empty() {
        return Err(Error::Asset("no geometry in asset".into()));
    }
    tracing::debug!(triangles = mesh.triangles.len(), "imported glTF asset");
    Ok(mesh)
}

/// Progress of the one asset load, per run:
/// `Loading → Loaded` or `Loading → Failed`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading { percent: u8 },
    Loaded,
    Failed,
}

impl LoadStatus {
    pub fn new() -> Self {
        LoadStatus::Loading { percent: 0 }
    }

    /// Record a progress event. Ignored once loading has finished or failed.
    pub fn progress(&mut self, loaded: u64, total: u64) {
        if let LoadStatus::Loading { percent } = self {
            *percent = if total == 0 {
                100
            } else {
                (100.0 * loaded as f64 / total as f64).round() as u8
            };
        }
    }

    /// Mark the load as complete
    pub fn complete(&mut self) {
        if let LoadStatus::Loading { .. } = self {
            *self = LoadStatus::Loaded;
        }
    }

    /// Mark the load as failed. Failure is terminal for the run.
    pub fn fail(&mut self) {
        if let LoadStatus::Loading { .. } = self {
            *self = LoadStatus::Failed;
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }

    /// Text for the status line, or None once the indicator should be hidden
    pub fn status_line(&self) -> Option<String> {
        match self {
            LoadStatus::Loading { percent } if *percent >= 100 => None,
            LoadStatus::Loading { percent } => Some(format!("{}% loaded", percent)),
            LoadStatus::Loaded => None,
            LoadStatus::Failed => Some(FAILURE_MESSAGE.to_string()),
        }
    }
}

impl Default for LoadStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // One triangle, positions and normals in a data-URI buffer
    const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "mesh": 0 }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0, "NORMAL": 1 } }] }],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 36 }
  ],
  "buffers": [{
    "byteLength": 72,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/"
  }]
}"#;

    #[test]
    fn test_load_minimal_gltf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("triangle.gltf");
        std::fs::write(&path, TRIANGLE_GLTF).unwrap();

        let mesh = load_mesh(&path).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        let bbox = mesh.bounding_box().unwrap();
        assert!((bbox.max.x - 1.0).abs() < 1e-6);
        assert!((bbox.max.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gltf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not a gltf document").unwrap();

        assert!(load_mesh(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_mesh(Path::new("does/not/exist.gltf")).is_err());
    }

    #[test]
    fn test_progress_percentage_rounds() {
        let mut status = LoadStatus::new();
        status.progress(1, 3);
        assert_eq!(status.status_line().unwrap(), "33% loaded");
        status.progress(2, 3);
        assert_eq!(status.status_line().unwrap(), "67% loaded");
    }

    #[test]
    fn test_full_progress_hides_indicator() {
        let mut status = LoadStatus::new();
        status.progress(512, 1024);
        assert!(status.status_line().is_some());
        status.progress(1024, 1024);
        assert!(status.status_line().is_none());
    }

    #[test]
    fn test_complete_hides_indicator() {
        let mut status = LoadStatus::new();
        status.progress(1, 2);
        status.complete();
        assert!(status.is_loaded());
        assert!(status.status_line().is_none());
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut status = LoadStatus::new();
        status.progress(1, 4);
        status.fail();
        assert_eq!(status.status_line().unwrap(), FAILURE_MESSAGE);

        // Late events change nothing once failed
        status.progress(4, 4);
        status.complete();
        assert_eq!(status, LoadStatus::Failed);
        assert_eq!(status.status_line().unwrap(), FAILURE_MESSAGE);
    }
}
