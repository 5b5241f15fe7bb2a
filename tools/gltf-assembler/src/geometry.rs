//! Geometry records handed to the assembler

use crate::error::{AssembleError, Result};

/// Bytes per vertex position (3 x f32)
pub const POSITION_STRIDE: u64 = 12;

/// Bytes per index (u32)
pub const INDEX_STRIDE: u64 = 4;

/// One named triangle mesh: shared vertex positions plus a triangle list.
///
/// Construct through [`GeometryRecord::new`], which checks that the index
/// count is a multiple of three and that every index refers to an existing
/// vertex. The record is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    name: String,
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl GeometryRecord {
    /// Create a record, validating the triangle list
    pub fn new(
        name: impl Into<String>,
        positions: Vec<[f32; 3]>,
        indices: Vec<u32>,
    ) -> Result<Self> {
        let name = name.into();

        if indices.len() % 3 != 0 {
            return Err(AssembleError::InvalidGeometry {
                name,
                reason: format!("index count {} is not a multiple of 3", indices.len()),
            });
        }

        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(AssembleError::InvalidGeometry {
                name,
                reason: format!(
                    "index {} out of range for {} vertices",
                    bad,
                    positions.len()
                ),
            });
        }

        Ok(Self {
            name,
            positions,
            indices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Total scalar index count (3 per triangle)
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Size of the vertex block in the binary buffer
    pub fn vertex_bytes(&self) -> u64 {
        self.positions.len() as u64 * POSITION_STRIDE
    }

    /// Size of the index block in the binary buffer
    pub fn index_bytes(&self) -> u64 {
        self.indices.len() as u64 * INDEX_STRIDE
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_sizes() {
        let geometry = GeometryRecord::new(
            "tri",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        )
        .unwrap();

        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.triangle_count(), 1);
        assert_eq!(geometry.vertex_bytes(), 36);
        assert_eq!(geometry.index_bytes(), 12);
        assert!(!geometry.is_empty());
    }

    #[test]
    fn test_geometry_rejects_partial_triangle() {
        let err = GeometryRecord::new("bad", vec![[0.0; 3]; 3], vec![0, 1]).unwrap_err();
        assert!(matches!(err, AssembleError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_geometry_rejects_out_of_range_index() {
        let err = GeometryRecord::new("bad", vec![[0.0; 3]; 3], vec![0, 1, 3]).unwrap_err();
        match err {
            AssembleError::InvalidGeometry { name, reason } => {
                assert_eq!(name, "bad");
                assert!(reason.contains("index 3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_geometry_empty() {
        let geometry = GeometryRecord::new("empty", Vec::new(), Vec::new()).unwrap();
        assert!(geometry.is_empty());
        assert_eq!(geometry.vertex_bytes(), 0);
    }
}
