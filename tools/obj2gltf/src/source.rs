//! Source resolution, batch discovery and the conversion driver

use crate::config::{BatchFailurePolicy, ConvertOptions};
use crate::error::{ConvertError, LoadError, Result};
use crate::obj::GeometryLoader;
use crate::writer::write_document;
use gltf_assembler::{DocumentAssembler, GeometryRecord};
use rayon::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What the source path points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// One mesh file
    File(PathBuf),
    /// A folder whose mesh files are merged into one document
    Folder(PathBuf),
}

impl Source {
    /// Classify `path`, failing before any assembly work happens
    pub fn resolve(path: &Path, loader: &dyn GeometryLoader) -> Result<Self> {
        if path.is_file() && loader.accepts(path) {
            Ok(Source::File(path.to_path_buf()))
        } else if path.is_dir() {
            Ok(Source::Folder(path.to_path_buf()))
        } else {
            Err(ConvertError::InvalidSource(path.to_path_buf()))
        }
    }
}

/// Summary of a finished conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub output: PathBuf,
    /// Files written (document and sidecar buffer, if any)
    pub written: Vec<PathBuf>,
    pub geometries: usize,
    pub materials: usize,
    pub byte_length: u64,
    /// Batch entries that failed to load and were skipped, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Where the document for `source` is written.
///
/// An explicit path is used as given when it ends in `.gltf` or `.glb`,
/// otherwise `.gltf` is appended. Without one, a file source becomes
/// `<input-without-extension>.gltf` and a folder becomes
/// `<folder>_model.gltf` next to the folder.
pub fn output_path(source: &Source, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        let known = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gltf") || ext.eq_ignore_ascii_case("glb"));
        if known {
            return path.to_path_buf();
        }
        let mut name = OsString::from(path.as_os_str());
        name.push(".gltf");
        return PathBuf::from(name);
    }

    match source {
        Source::File(path) => path.with_extension("gltf"),
        Source::Folder(folder) => batch_output_path(folder),
    }
}

fn batch_output_path(folder: &Path) -> PathBuf {
    // "." and similar have no file name of their own
    let folder = match folder.file_name() {
        Some(_) => folder.to_path_buf(),
        None => std::fs::canonicalize(folder).unwrap_or_else(|_| folder.to_path_buf()),
    };
    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string());
    let file_name = format!("{name}_model.gltf");
    match folder.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Mesh files of `folder` in file-name order, minus excluded names.
///
/// Only regular files ending in the loader's extension are kept; both the
/// extension and the exclusion match are case-sensitive.
pub fn discover(
    folder: &Path,
    loader: &dyn GeometryLoader,
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let io_error = |source| ConvertError::Load {
        path: folder.to_path_buf(),
        source: LoadError::Io {
            path: folder.to_path_buf(),
            source,
        },
    };

    let suffix = format!(".{}", loader.extension());
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(&suffix) {
            continue;
        }
        if exclude.iter().any(|excluded| *excluded == name) {
            tracing::info!("Excluding {:?}", path);
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Convert the mesh file or folder at `source_path` into one glTF document.
///
/// Nothing is written unless every step succeeds.
pub fn convert(
    source_path: &Path,
    options: ConvertOptions,
    loader: &dyn GeometryLoader,
) -> Result<ConversionReport> {
    let source = Source::resolve(source_path, loader)?;
    let output = output_path(&source, options.output.as_deref());
    let mut assembler = DocumentAssembler::new(options.color_policy, options.empty_geometry);
    let mut skipped = Vec::new();

    match &source {
        Source::File(path) => {
            let geometry = loader.load(path).map_err(|source| ConvertError::Load {
                path: path.clone(),
                source,
            })?;
            add_geometry(&mut assembler, &geometry)?;
        }
        Source::Folder(folder) => {
            let files = discover(folder, loader, &options.exclude)?;
            if files.is_empty() {
                tracing::warn!("No .{} files found in {:?}", loader.extension(), folder);
            }

            // Ingestion runs in parallel; assembly stays in listing order.
            let loaded: Vec<(PathBuf, std::result::Result<GeometryRecord, LoadError>)> = files
                .into_par_iter()
                .map(|path| {
                    let geometry = loader.load(&path);
                    (path, geometry)
                })
                .collect();

            for (path, geometry) in loaded {
                match geometry {
                    Ok(geometry) => add_geometry(&mut assembler, &geometry)?,
                    Err(err) => match options.batch_failure {
                        BatchFailurePolicy::Skip => {
                            tracing::warn!("Skipping {:?}: {}", path, err);
                            skipped.push((path, err.to_string()));
                        }
                        BatchFailurePolicy::Abort => {
                            return Err(ConvertError::Load { path, source: err });
                        }
                    },
                }
            }
        }
    }

    let geometries = assembler.geometry_count();
    let materials = assembler.material_count();
    let doc = assembler.finalize(&options.generator);
    let byte_length = doc.byte_length();
    let written = write_document(doc, &output)?;

    Ok(ConversionReport {
        output,
        written,
        geometries,
        materials,
        byte_length,
        skipped,
    })
}

fn add_geometry(assembler: &mut DocumentAssembler, geometry: &GeometryRecord) -> Result<()> {
    assembler
        .add_geometry(geometry)
        .map(|_| ())
        .map_err(|source| ConvertError::Assemble {
            name: geometry.name().to_string(),
            source,
        })
}
