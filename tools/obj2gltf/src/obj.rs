//! OBJ mesh ingestion
//!
//! Reads vertex positions and faces into a [`GeometryRecord`]. Texture
//! coordinates, normals, groups and material statements are ignored.

use crate::error::LoadError;
use gltf_assembler::GeometryRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Source of geometry records for a file type
pub trait GeometryLoader: Sync {
    /// File extension (without dot) this loader accepts, matched case-sensitively
    fn extension(&self) -> &str;

    /// Load one geometry from `path`
    fn load(&self, path: &Path) -> Result<GeometryRecord, LoadError>;

    /// Whether `path` names a file this loader accepts
    fn accepts(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension())
    }
}

/// Wavefront OBJ loader
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjLoader;

impl GeometryLoader for ObjLoader {
    fn extension(&self) -> &str {
        "obj"
    }

    fn load(&self, path: &Path) -> Result<GeometryRecord, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let geometry = parse_obj(BufReader::new(file), &name, path)?;
        tracing::info!(
            "Loaded {:?}: {} vertices, {} triangles",
            path,
            geometry.vertex_count(),
            geometry.triangle_count()
        );
        Ok(geometry)
    }
}

/// Parse OBJ text into a geometry named `name`; `path` is only used in errors
pub fn parse_obj<R: BufRead>(
    reader: R,
    name: &str,
    path: &Path,
) -> Result<GeometryRecord, LoadError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let parse_error = |line: usize, message: String| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        message,
    };

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(parse_error(line_no, "vertex needs 3 coordinates".into()));
                }
                let mut pos = [0.0f32; 3];
                for (slot, part) in pos.iter_mut().zip(&parts[1..4]) {
                    *slot = part
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("invalid coordinate {part:?}")))?;
                }
                positions.push(pos);
            }
            "f" => {
                let corners = parts[1..]
                    .iter()
                    .map(|corner| resolve_corner(corner, positions.len()))
                    .collect::<Result<Vec<u32>, String>>()
                    .map_err(|message| parse_error(line_no, message))?;

                if corners.len() < 3 {
                    return Err(parse_error(line_no, "face needs at least 3 vertices".into()));
                }

                // Fan triangulation for convex polygons
                for i in 1..corners.len() - 1 {
                    indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    GeometryRecord::new(name, positions, indices).map_err(|source| LoadError::Geometry {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a face corner ("v", "v/vt", "v/vt/vn" or "v//vn") to a 0-based vertex index.
///
/// OBJ indices are 1-based; negative indices count back from the last vertex.
fn resolve_corner(corner: &str, vertex_count: usize) -> Result<u32, String> {
    let position = corner.split('/').next().unwrap_or_default();
    let raw: i64 = position
        .parse()
        .map_err(|_| format!("invalid face vertex {corner:?}"))?;

    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(vertex_count as i64 + r),
    };

    match resolved {
        Some(idx) if idx >= 0 && (idx as usize) < vertex_count => Ok(idx as u32),
        _ => Err(format!(
            "face vertex {corner:?} out of range ({vertex_count} vertices defined)"
        )),
    }
}
