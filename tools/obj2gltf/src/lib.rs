//! obj2gltf library
//!
//! Converts one OBJ file, or every OBJ file in a folder, into a single glTF
//! 2.0 document. Loading and file handling live here; layout, materials and
//! the scene graph are assembled by `gltf_assembler`.

pub mod config;
pub mod error;
pub mod obj;
pub mod source;
pub mod writer;

pub use config::{parse_color, parse_list, BatchFailurePolicy, ColorTable, ConvertOptions};
pub use error::{ConvertError, LoadError};
pub use obj::{parse_obj, GeometryLoader, ObjLoader};
pub use source::{convert, discover, output_path, ConversionReport, Source};
pub use writer::{assemble_glb, write_document, OutputFormat};

// Re-export the engine for callers that supply their own material generator
pub use gltf_assembler;
