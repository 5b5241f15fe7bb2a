//! End-to-end tests for the obj2gltf binary

mod generate_test_assets;

use generate_test_assets::{write_obj, TRIANGLE_OBJ, UNIT_SQUARE_OBJ};
use std::path::Path;
use std::process::{Command, ExitStatus};
use tempfile::tempdir;

fn run_obj2gltf(args: &[&str]) -> ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_obj2gltf"))
        .args(args)
        .status()
        .expect("Failed to run obj2gltf")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

#[test]
fn test_cli_single_file_default_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("square.obj");
    write_obj(&input, UNIT_SQUARE_OBJ).expect("Failed to write OBJ");

    let status = run_obj2gltf(&[path_arg(&input)]);
    assert!(status.success(), "obj2gltf failed on a single file");
    assert!(dir.path().join("square.gltf").exists());
    assert!(dir.path().join("square.bin").exists());
}

#[test]
fn test_cli_folder_with_colors_and_exclusions() {
    let dir = tempdir().expect("Failed to create temp dir");
    let folder = dir.path().join("parts");
    std::fs::create_dir(&folder).unwrap();
    for name in ["a.obj", "b.obj", "c.obj"] {
        write_obj(&folder.join(name), TRIANGLE_OBJ).expect("Failed to write OBJ");
    }
    let output = dir.path().join("parts_out");

    let status = run_obj2gltf(&[
        path_arg(&folder),
        "--output",
        path_arg(&output),
        "--exclude_list",
        "[b.obj]",
        "--colors",
        "[1,0,0,1]",
    ]);
    assert!(status.success(), "obj2gltf failed on a folder");

    let (document, _, _) =
        gltf::import(dir.path().join("parts_out.gltf")).expect("Failed to import output");
    assert_eq!(document.meshes().count(), 2);
    assert_eq!(document.materials().count(), 1);
    assert_eq!(
        document
            .materials()
            .next()
            .unwrap()
            .pbr_metallic_roughness()
            .base_color_factor(),
        [1.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn test_cli_color_table() {
    let dir = tempdir().expect("Failed to create temp dir");
    let folder = dir.path().join("set");
    std::fs::create_dir(&folder).unwrap();
    write_obj(&folder.join("chair.obj"), TRIANGLE_OBJ).expect("Failed to write OBJ");
    write_obj(&folder.join("table.obj"), UNIT_SQUARE_OBJ).expect("Failed to write OBJ");

    let table = dir.path().join("colors.toml");
    std::fs::write(
        &table,
        "[colors]\nchair = [1.0, 0.0, 0.0, 1.0]\ntable = [0.0, 1.0, 0.0, 1.0]\n",
    )
    .unwrap();

    let status = run_obj2gltf(&[path_arg(&folder), "--color-table", path_arg(&table)]);
    assert!(status.success(), "obj2gltf failed with a color table");
    assert!(dir.path().join("set_model.gltf").exists());
}

#[test]
fn test_cli_fails_on_missing_color_entry() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("lamp.obj");
    write_obj(&input, TRIANGLE_OBJ).expect("Failed to write OBJ");
    let table = dir.path().join("colors.toml");
    std::fs::write(&table, "[colors]\nchair = [1.0, 0.0, 0.0, 1.0]\n").unwrap();

    let status = run_obj2gltf(&[path_arg(&input), "--color-table", path_arg(&table)]);
    assert!(!status.success(), "missing color entry should fail");
    assert!(!dir.path().join("lamp.gltf").exists());
}

#[test]
fn test_cli_fails_on_invalid_source() {
    let dir = tempdir().expect("Failed to create temp dir");
    let status = run_obj2gltf(&[path_arg(&dir.path().join("missing.obj"))]);
    assert!(!status.success(), "invalid source should fail");
}

#[test]
fn test_cli_rejects_bad_color() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("square.obj");
    write_obj(&input, UNIT_SQUARE_OBJ).expect("Failed to write OBJ");

    let status = run_obj2gltf(&[path_arg(&input), "--colors", "[1,0,0]"]);
    assert!(!status.success(), "three-component color should be rejected");
}
