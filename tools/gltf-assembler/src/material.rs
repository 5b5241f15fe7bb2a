//! Material registry with per-document deduplication
//!
//! Each geometry resolves to a material index through the configured
//! [`ColorPolicy`]. The registry keeps at most one material per identity key,
//! and material indices follow first-seen order.

use crate::error::{AssembleError, Result};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use hashbrown::HashMap;
use std::fmt;

/// Linear RGBA color factor, components conventionally in [0, 1]
pub type Rgba = [f32; 4];

/// Opaque white, used when no color is configured
pub const DEFAULT_COLOR: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Produces a material for a mesh name.
///
/// Materials are deduplicated by their `name`; two meshes whose generated
/// materials share a name share one material entry.
pub trait MaterialGenerator {
    fn generate(&self, mesh_name: &str) -> json::Material;
}

impl<F> MaterialGenerator for F
where
    F: Fn(&str) -> json::Material,
{
    fn generate(&self, mesh_name: &str) -> json::Material {
        self(mesh_name)
    }
}

/// How geometries get their material
#[derive(Default)]
pub enum ColorPolicy {
    /// One opaque white material shared by every geometry
    #[default]
    Default,
    /// One material of the given color shared by every geometry
    Uniform(Rgba),
    /// One material per geometry name, colors looked up by name
    PerName(HashMap<String, Rgba>),
    /// Materials produced by a caller-supplied generator
    Generator(Box<dyn MaterialGenerator>),
}

impl fmt::Debug for ColorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorPolicy::Default => f.write_str("Default"),
            ColorPolicy::Uniform(color) => f.debug_tuple("Uniform").field(color).finish(),
            ColorPolicy::PerName(colors) => f.debug_tuple("PerName").field(colors).finish(),
            ColorPolicy::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

/// Identity of a registered material
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MaterialKey {
    /// Shared material of the uniform and default policies
    Shared,
    /// Per-name color entry, keyed by geometry name
    Mesh(String),
    /// Generator output, keyed by material name
    Generated(Option<String>),
}

/// Deduplicating store mapping material identity to document index
#[derive(Debug)]
pub struct MaterialRegistry {
    policy: ColorPolicy,
    materials: Vec<json::Material>,
    index: HashMap<MaterialKey, u32>,
}

impl MaterialRegistry {
    pub fn new(policy: ColorPolicy) -> Self {
        Self {
            policy,
            materials: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Material index for `mesh_name`, registering the material on first use.
    ///
    /// Nothing is registered when the lookup fails.
    pub fn resolve(&mut self, mesh_name: &str) -> Result<u32> {
        let (key, material) = match &self.policy {
            ColorPolicy::Generator(generator) => {
                let material = generator.generate(mesh_name);
                (MaterialKey::Generated(material.name.clone()), material)
            }
            ColorPolicy::Uniform(color) => (MaterialKey::Shared, color_material(*color, None)),
            ColorPolicy::PerName(colors) => {
                let color = colors
                    .get(mesh_name)
                    .ok_or_else(|| AssembleError::MissingMaterialKey(mesh_name.to_string()))?;
                (
                    MaterialKey::Mesh(mesh_name.to_string()),
                    color_material(*color, Some(mesh_name.to_string())),
                )
            }
            ColorPolicy::Default => (MaterialKey::Shared, color_material(DEFAULT_COLOR, None)),
        };

        if let Some(&existing) = self.index.get(&key) {
            return Ok(existing);
        }

        let idx = self.materials.len() as u32;
        tracing::debug!("Registered material {} for {:?}", idx, key);
        self.materials.push(material);
        self.index.insert(key, idx);
        Ok(idx)
    }

    /// Number of distinct materials registered so far
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn materials(&self) -> &[json::Material] {
        &self.materials
    }

    pub fn into_materials(self) -> Vec<json::Material> {
        self.materials
    }
}

/// Plain metallic-roughness material with a base color factor.
///
/// Colors with alpha below 1 are marked for blending.
pub fn color_material(color: Rgba, name: Option<String>) -> json::Material {
    let alpha_mode = if color[3] < 1.0 {
        json::material::AlphaMode::Blend
    } else {
        json::material::AlphaMode::Opaque
    };

    json::Material {
        alpha_cutoff: None,
        alpha_mode: Valid(alpha_mode),
        double_sided: false,
        name,
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor(color),
            base_color_texture: None,
            metallic_factor: json::material::StrengthFactor(1.0),
            roughness_factor: json::material::StrengthFactor(1.0),
            metallic_roughness_texture: None,
            extensions: Default::default(),
            extras: Default::default(),
        },
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        extensions: Default::default(),
        extras: Default::default(),
    }
}
