//! obj2gltf - convert OBJ meshes to glTF 2.0
//!
//! Accepts a single .obj file or a folder of them; a folder becomes one
//! document with one mesh and node per file.

use anyhow::{Context, Result};
use clap::Parser;
use gltf_assembler::{ColorPolicy, EmptyGeometryPolicy};
use obj2gltf::{
    convert, parse_color, parse_list, BatchFailurePolicy, ColorTable, ConvertOptions, ObjLoader,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "obj2gltf")]
#[command(about = "Convert an OBJ file or a folder of OBJ files to glTF")]
#[command(version)]
struct Cli {
    /// Path to the .obj file or folder
    source: PathBuf,

    /// Output .gltf/.glb path (".gltf" is appended to other names)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File names to skip in folder mode, e.g. "[a.obj,b.obj]"
    #[arg(long = "exclude_list", num_args = 1..)]
    exclude_list: Vec<String>,

    /// One RGBA color for every mesh, e.g. "[1,0,0,1]"
    #[arg(long, value_parser = parse_color, conflicts_with = "color_table")]
    colors: Option<[f32; 4]>,

    /// TOML file with a [colors] table mapping mesh names to RGBA colors
    #[arg(long)]
    color_table: Option<PathBuf>,

    /// Fail on meshes without vertices or triangles
    #[arg(long)]
    reject_empty: bool,

    /// Stop at the first file that fails to load in folder mode
    #[arg(long)]
    fail_fast: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let color_policy = match (cli.colors, &cli.color_table) {
        (Some(color), _) => ColorPolicy::Uniform(color),
        (None, Some(path)) => ColorTable::load(path)?.into_policy(),
        (None, None) => ColorPolicy::Default,
    };

    let options = ConvertOptions {
        output: cli.output,
        exclude: parse_list(&cli.exclude_list),
        color_policy,
        empty_geometry: if cli.reject_empty {
            EmptyGeometryPolicy::Reject
        } else {
            EmptyGeometryPolicy::Allow
        },
        batch_failure: if cli.fail_fast {
            BatchFailurePolicy::Abort
        } else {
            BatchFailurePolicy::Skip
        },
        ..Default::default()
    };

    tracing::info!("Converting {:?}", cli.source);
    let report = convert(&cli.source, options, &ObjLoader)
        .with_context(|| format!("Failed to convert {:?}", cli.source))?;

    if !report.skipped.is_empty() {
        tracing::warn!("{} file(s) could not be loaded and were skipped", report.skipped.len());
    }
    tracing::info!(
        "Wrote {:?}: {} meshes, {} materials, {} buffer bytes",
        report.output,
        report.geometries,
        report.materials,
        report.byte_length
    );

    Ok(())
}
