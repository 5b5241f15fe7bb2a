//! Document serialization (.gltf + .bin, or .glb)

use crate::error::{ConvertError, Result};
use gltf_assembler::json;
use gltf_assembler::AssembledDocument;
use std::path::{Path, PathBuf};

/// On-disk container chosen from the output extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON document with the buffer in a sibling `.bin` file
    Gltf,
    /// Single binary container
    Glb,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("glb") => OutputFormat::Glb,
            _ => OutputFormat::Gltf,
        }
    }
}

/// Write `doc` to `path`, returning every file created
pub fn write_document(mut doc: AssembledDocument, path: &Path) -> Result<Vec<PathBuf>> {
    let written = match OutputFormat::from_path(path) {
        OutputFormat::Gltf => {
            let bin_path = path.with_extension("bin");
            let bin_name = bin_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            if let Some(buffer) = doc.root.buffers.first_mut() {
                buffer.uri = Some(bin_name);
            }

            let json_string = json::serialize::to_string_pretty(&doc.root)
                .map_err(|e| ConvertError::Serialize(e.to_string()))?;
            write_file(path, json_string.as_bytes())?;
            write_file(&bin_path, &doc.blob)?;
            vec![path.to_path_buf(), bin_path]
        }
        OutputFormat::Glb => {
            let glb = assemble_glb(&doc.root, &doc.blob)?;
            write_file(path, &glb)?;
            vec![path.to_path_buf()]
        }
    };

    tracing::info!("Saved {:?} ({} buffer bytes)", path, doc.blob.len());
    Ok(written)
}

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

/// Pack `root` and `buffer_data` into a GLB container.
///
/// Layout: 12-byte header, then a JSON chunk padded with spaces and a BIN
/// chunk padded with zeros, each chunk 4-byte aligned.
pub fn assemble_glb(root: &json::Root, buffer_data: &[u8]) -> Result<Vec<u8>> {
    let json_bytes =
        json::serialize::to_vec(root).map_err(|e| ConvertError::Serialize(e.to_string()))?;

    let padded = |len: usize| len.next_multiple_of(4);
    let total_length = 12 + 8 + padded(json_bytes.len()) + 8 + padded(buffer_data.len());

    let mut glb = Vec::with_capacity(total_length);
    glb.extend_from_slice(GLB_MAGIC);
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());
    push_chunk(&mut glb, CHUNK_JSON, &json_bytes, b' ');
    push_chunk(&mut glb, CHUNK_BIN, buffer_data, 0);

    debug_assert_eq!(glb.len(), total_length);
    Ok(glb)
}

fn push_chunk(glb: &mut Vec<u8>, kind: u32, data: &[u8], pad: u8) {
    let length = data.len().next_multiple_of(4);
    glb.extend_from_slice(&(length as u32).to_le_bytes());
    glb.extend_from_slice(&kind.to_le_bytes());
    glb.extend_from_slice(data);
    glb.resize(glb.len() + length - data.len(), pad);
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}
