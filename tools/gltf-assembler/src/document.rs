//! Scene graph assembly and final document construction

use crate::buffer::GeometryAccessors;
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use std::collections::BTreeMap;
use std::path::Path;

/// Builder for the mesh/node/scene part of a document.
///
/// Each geometry gets one mesh with one triangle primitive, one node pointing
/// at that mesh, and one entry in the single scene's node list.
pub struct GltfBuilder {
    nodes: Vec<json::Node>,
    meshes: Vec<json::Mesh>,
    scene_nodes: Vec<u32>,
}

impl GltfBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            meshes: Vec::new(),
            scene_nodes: Vec::new(),
        }
    }

    /// Get the current node count
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    /// Node indices in scene order
    pub fn scene_nodes(&self) -> &[u32] {
        &self.scene_nodes
    }

    /// Add a mesh with a single primitive, returning its index.
    ///
    /// `name` is used as given; see [`mesh_name`].
    pub fn add_mesh(
        &mut self,
        name: &str,
        accessors: &GeometryAccessors,
        material: u32,
    ) -> json::Index<json::Mesh> {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            Valid(json::mesh::Semantic::Positions),
            accessors.positions.as_json_index(),
        );

        let primitive = json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: Some(accessors.indices.as_json_index()),
            material: Some(json::Index::new(material)),
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        };

        self.meshes.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            primitives: vec![primitive],
            weights: None,
        });

        json::Index::new(self.meshes.len() as u32 - 1)
    }

    /// Add a node for `mesh` and append it to the scene, returning the node index
    pub fn add_node(&mut self, mesh: json::Index<json::Mesh>) -> u32 {
        self.nodes.push(json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(mesh),
            name: None,
            rotation: None,
            scale: None,
            skin: None,
            translation: None,
            weights: None,
        });

        let node_idx = self.nodes.len() as u32 - 1;
        self.scene_nodes.push(node_idx);
        node_idx
    }

    /// Build the final glTF root around the packed buffer descriptors
    pub fn build(
        self,
        buffer_byte_length: u64,
        buffer_views: Vec<json::buffer::View>,
        accessors: Vec<json::Accessor>,
        materials: Vec<json::Material>,
        generator: &str,
    ) -> json::Root {
        let buffers = vec![json::Buffer {
            byte_length: buffer_byte_length.into(),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            uri: None,
        }];

        let scenes = vec![json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            nodes: self
                .scene_nodes
                .iter()
                .map(|n| json::Index::new(*n))
                .collect(),
        }];

        json::Root {
            accessors,
            animations: Vec::new(),
            asset: json::Asset {
                copyright: None,
                extensions: Default::default(),
                extras: Default::default(),
                generator: Some(generator.to_string()),
                min_version: None,
                version: "2.0".to_string(),
            },
            buffers,
            buffer_views,
            cameras: Vec::new(),
            extensions: Default::default(),
            extensions_required: Vec::new(),
            extensions_used: Vec::new(),
            extras: Default::default(),
            images: Vec::new(),
            materials,
            meshes: self.meshes,
            nodes: self.nodes,
            samplers: Vec::new(),
            scene: Some(json::Index::new(0)),
            scenes,
            skins: Vec::new(),
            textures: Vec::new(),
        }
    }
}

impl Default for GltfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mesh name for a geometry name: directories and one trailing `.obj` stripped.
///
/// Other dots are part of the name, so `part.a.obj` becomes `part.a`.
pub fn mesh_name(name: &str) -> String {
    let mut base = Path::new(name)
        .file_name()
        .map(|file| file.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let len = base.strip_suffix(".obj").map_or(base.len(), str::len);
    base.truncate(len);
    base
}
