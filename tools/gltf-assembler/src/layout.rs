//! Byte layout planning for geometry blocks
//!
//! Offsets are computed from the current cumulative length and the geometry
//! sizes alone. The planner never inspects the buffer, so views can be built
//! before any bytes are appended.

use crate::geometry::GeometryRecord;

/// Placement of one geometry's (vertex, index) block pair in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub vertex_offset: u64,
    pub vertex_length: u64,
    pub index_offset: u64,
    pub index_length: u64,
}

impl BlockLayout {
    /// Cumulative buffer length once this block pair is appended
    pub fn end(&self) -> u64 {
        self.index_offset + self.index_length
    }

    /// Total bytes covered by both blocks
    pub fn byte_length(&self) -> u64 {
        self.vertex_length + self.index_length
    }
}

/// Plan the block pair for `geometry` starting at cumulative length `start`
pub fn plan(start: u64, geometry: &GeometryRecord) -> BlockLayout {
    let vertex_length = geometry.vertex_bytes();
    let index_offset = start + vertex_length;
    BlockLayout {
        vertex_offset: start,
        vertex_length,
        index_offset,
        index_length: geometry.index_bytes(),
    }
}

/// Plan every geometry up front as a prefix sum over block sizes.
///
/// Produces the same layouts as calling [`plan`] incrementally, but once
/// sizes are known each block can be filled independently.
pub fn plan_all(geometries: &[GeometryRecord], start: u64) -> Vec<BlockLayout> {
    geometries
        .iter()
        .scan(start, |cursor, geometry| {
            let layout = plan(*cursor, geometry);
            *cursor = layout.end();
            Some(layout)
        })
        .collect()
}
