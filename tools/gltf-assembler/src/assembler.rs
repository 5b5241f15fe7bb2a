//! Incremental document assembly
//!
//! [`DocumentAssembler`] owns the binary buffer, the material registry and the
//! scene graph for one document. Geometries are added one at a time, in
//! order; [`DocumentAssembler::finalize`] seals the buffer length and hands
//! back the finished document.

use crate::buffer::{BufferBuilder, GeometryAccessors};
use crate::document::{mesh_name, GltfBuilder};
use crate::error::{AssembleError, Result};
use crate::geometry::GeometryRecord;
use crate::layout::{self, BlockLayout};
use crate::material::{ColorPolicy, MaterialRegistry};
use gltf_json as json;

/// What to do with geometries that have no vertices or no triangles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyGeometryPolicy {
    /// Assemble as an empty mesh with zero-length views and no bounds
    #[default]
    Allow,
    /// Fail with [`AssembleError::EmptyGeometry`]
    Reject,
}

/// Indices created for one assembled geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryHandles {
    pub accessors: GeometryAccessors,
    pub layout: BlockLayout,
    pub material: u32,
    pub mesh: u32,
    pub node: u32,
}

/// A finished document: glTF root plus the bytes of its single buffer
pub struct AssembledDocument {
    pub root: json::Root,
    pub blob: Vec<u8>,
}

impl AssembledDocument {
    /// Declared length of buffer 0
    pub fn byte_length(&self) -> u64 {
        self.root
            .buffers
            .first()
            .map(|buffer| buffer.byte_length.0)
            .unwrap_or(0)
    }
}

/// Single-pass assembler for one document
pub struct DocumentAssembler {
    buffer: BufferBuilder,
    materials: MaterialRegistry,
    gltf: GltfBuilder,
    empty_geometry: EmptyGeometryPolicy,
}

impl DocumentAssembler {
    pub fn new(color_policy: ColorPolicy, empty_geometry: EmptyGeometryPolicy) -> Self {
        Self {
            buffer: BufferBuilder::new(),
            materials: MaterialRegistry::new(color_policy),
            gltf: GltfBuilder::new(),
            empty_geometry,
        }
    }

    /// Cumulative buffer length committed so far
    pub fn byte_length(&self) -> u64 {
        self.buffer.byte_length()
    }

    pub fn geometry_count(&self) -> usize {
        self.gltf.node_count() as usize
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Add one geometry to the document.
    ///
    /// Fallible checks run first; on error the document is untouched.
    pub fn add_geometry(&mut self, geometry: &GeometryRecord) -> Result<GeometryHandles> {
        if geometry.is_empty() {
            match self.empty_geometry {
                EmptyGeometryPolicy::Reject => {
                    return Err(AssembleError::EmptyGeometry(geometry.name().to_string()));
                }
                EmptyGeometryPolicy::Allow => {
                    tracing::warn!("Geometry \"{}\" is empty", geometry.name());
                }
            }
        }

        let name = mesh_name(geometry.name());
        let material = self.materials.resolve(&name)?;

        let layout = layout::plan(self.buffer.byte_length(), geometry);
        tracing::debug!(
            "Layout for \"{}\": vertices {}+{}, indices {}+{}",
            geometry.name(),
            layout.vertex_offset,
            layout.vertex_length,
            layout.index_offset,
            layout.index_length
        );

        let accessors = self.buffer.push_views(&layout, geometry);
        let mesh = self.gltf.add_mesh(&name, &accessors, material);
        let node = self.gltf.add_node(mesh);
        self.buffer.append(&layout, geometry);

        tracing::info!(
            "Assembled \"{}\": {} vertices, {} triangles, material {}",
            geometry.name(),
            geometry.vertex_count(),
            geometry.triangle_count(),
            material
        );

        Ok(GeometryHandles {
            accessors,
            layout,
            material,
            mesh: mesh.value() as u32,
            node,
        })
    }

    /// Seal the buffer and return the completed document
    pub fn finalize(self, generator: &str) -> AssembledDocument {
        let byte_length = self.buffer.byte_length();
        let (blob, views, accessors) = self.buffer.into_parts();
        let root = self.gltf.build(
            byte_length,
            views,
            accessors,
            self.materials.into_materials(),
            generator,
        );
        AssembledDocument { root, blob }
    }
}
