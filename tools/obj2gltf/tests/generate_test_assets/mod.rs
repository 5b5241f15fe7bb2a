//! OBJ fixtures written to disk for integration tests

#![allow(dead_code)]

use std::path::Path;

/// Unit square in the XY plane: 4 vertices, 2 triangles
pub const UNIT_SQUARE_OBJ: &str = "\
# unit square
o Square
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3
f 1 3 4
";

/// Single triangle: 3 vertices, 1 triangle
pub const TRIANGLE_OBJ: &str = "\
v -1.0 0.0 0.5
v 1.0 0.0 0.5
v 0.0 2.0 -0.5
f 1/1/1 2/2/1 3/3/1
";

/// Cube with quad faces: 8 vertices, 12 triangles
pub const CUBE_OBJ: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

/// Face referencing a vertex that does not exist
pub const BROKEN_OBJ: &str = "\
v 0 0 0
v 1 0 0
f 1 2 9
";

pub fn write_obj(path: &Path, content: &str) -> std::io::Result<()> {
    std::fs::write(path, content)
}
