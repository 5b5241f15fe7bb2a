//! glTF document assembly for triangle meshes
//!
//! Turns already-loaded geometries into one glTF 2.0 document backed by a
//! single binary buffer:
//! - `layout`: analytic byte offsets for each geometry's vertex/index blocks;
//!   [`plan_all`] lays out a whole set up front so callers can fill blocks
//!   concurrently before handing the geometries to the assembler
//! - `buffer`: buffer views, accessors (with position bounds) and the blob
//! - `material`: deduplicating material registry and color policies
//! - `document`: meshes, nodes and the scene
//! - `assembler`: ordered per-geometry assembly and finalization
//!
//! # Example
//!
//! ```
//! use gltf_assembler::*;
//!
//! let square = GeometryRecord::new(
//!     "square",
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
//!     vec![0, 1, 2, 0, 2, 3],
//! )
//! .unwrap();
//!
//! let mut assembler = DocumentAssembler::new(ColorPolicy::Default, EmptyGeometryPolicy::Allow);
//! assembler.add_geometry(&square).unwrap();
//!
//! let doc = assembler.finalize("gltf-assembler");
//! assert_eq!(doc.byte_length(), 72);
//! ```

pub mod assembler;
pub mod bounds;
pub mod buffer;
pub mod document;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod material;

pub use assembler::{
    AssembledDocument, DocumentAssembler, EmptyGeometryPolicy, GeometryHandles,
};
pub use bounds::compute_bounds;
pub use buffer::{AccessorIndex, BufferBuilder, GeometryAccessors};
pub use document::{mesh_name, GltfBuilder};
pub use error::AssembleError;
pub use geometry::GeometryRecord;
pub use layout::{plan, plan_all, BlockLayout};
pub use material::{
    color_material, ColorPolicy, MaterialGenerator, MaterialRegistry, Rgba, DEFAULT_COLOR,
};

// Re-export commonly used gltf-json types
pub use gltf_json as json;
pub use gltf_json::validation::Checked::Valid;
