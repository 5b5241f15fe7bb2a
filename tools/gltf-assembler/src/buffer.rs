//! Binary buffer packing, buffer views and accessors
//!
//! Building a geometry's descriptors and appending its bytes are separate
//! steps. Both take the [`BlockLayout`] computed by [`crate::layout::plan`],
//! so the view offsets and the byte order always agree.

use crate::bounds::compute_bounds;
use crate::geometry::GeometryRecord;
use crate::layout::BlockLayout;
use gltf_json as json;
use gltf_json::validation::Checked::Valid;

/// Accessor index returned by buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorIndex(pub u32);

impl AccessorIndex {
    pub fn as_json_index(&self) -> json::Index<json::Accessor> {
        json::Index::new(self.0)
    }
}

/// The two accessors created for one geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryAccessors {
    /// VEC3/FLOAT over the vertex block
    pub positions: AccessorIndex,
    /// SCALAR/UNSIGNED_INT over the index block
    pub indices: AccessorIndex,
}

/// Append-only binary buffer plus the views and accessors describing it
pub struct BufferBuilder {
    buffer: Vec<u8>,
    byte_length: u64,
    views: Vec<json::buffer::View>,
    accessors: Vec<json::Accessor>,
}

impl BufferBuilder {
    /// Create a new empty buffer builder
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            byte_length: 0,
            views: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Cumulative length of all committed blocks
    pub fn byte_length(&self) -> u64 {
        self.byte_length
    }

    /// Get the current accessor count
    pub fn accessor_count(&self) -> u32 {
        self.accessors.len() as u32
    }

    /// Get the binary buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the buffer views
    pub fn views(&self) -> &[json::buffer::View] {
        &self.views
    }

    /// Get the accessors
    pub fn accessors(&self) -> &[json::Accessor] {
        &self.accessors
    }

    /// Split into (data, views, accessors)
    pub fn into_parts(self) -> (Vec<u8>, Vec<json::buffer::View>, Vec<json::Accessor>) {
        (self.buffer, self.views, self.accessors)
    }

    /// Create the vertex view, index view and their accessors for a planned block pair.
    ///
    /// Must run before [`BufferBuilder::append`] for the same layout.
    pub fn push_views(
        &mut self,
        layout: &BlockLayout,
        geometry: &GeometryRecord,
    ) -> GeometryAccessors {
        let vertex_view = self.push_view(
            layout.vertex_offset,
            layout.vertex_length,
            json::buffer::Target::ArrayBuffer,
        );

        let (min, max) = match compute_bounds(geometry.positions()) {
            Some((min, max)) => (Some(vec3_value(min)), Some(vec3_value(max))),
            None => (None, None),
        };

        let positions = self.push_accessor(
            vertex_view,
            geometry.vertex_count(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            min,
            max,
        );

        let index_view = self.push_view(
            layout.index_offset,
            layout.index_length,
            json::buffer::Target::ElementArrayBuffer,
        );

        let indices = self.push_accessor(
            index_view,
            geometry.index_count(),
            json::accessor::ComponentType::U32,
            json::accessor::Type::Scalar,
            None,
            None,
        );

        GeometryAccessors { positions, indices }
    }

    /// Append the geometry's vertex block then index block, little-endian.
    ///
    /// The cumulative length only advances once both blocks are written.
    pub fn append(&mut self, layout: &BlockLayout, geometry: &GeometryRecord) {
        debug_assert_eq!(
            self.buffer.len() as u64,
            layout.vertex_offset,
            "block appended out of planned order"
        );

        self.buffer.reserve(layout.byte_length() as usize);
        let components: &[f32] = bytemuck::cast_slice(geometry.positions());
        for component in components {
            self.buffer.extend_from_slice(&component.to_le_bytes());
        }
        for index in geometry.indices() {
            self.buffer.extend_from_slice(&index.to_le_bytes());
        }

        debug_assert_eq!(self.buffer.len() as u64, layout.end());
        self.byte_length = layout.end();
    }

    fn push_view(
        &mut self,
        offset: u64,
        length: u64,
        target: json::buffer::Target,
    ) -> json::Index<json::buffer::View> {
        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: length.into(),
            byte_offset: Some(offset.into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: Some(Valid(target)),
        });
        json::Index::new(self.views.len() as u32 - 1)
    }

    fn push_accessor(
        &mut self,
        view: json::Index<json::buffer::View>,
        count: usize,
        component_type: json::accessor::ComponentType,
        type_: json::accessor::Type,
        min: Option<json::Value>,
        max: Option<json::Value>,
    ) -> AccessorIndex {
        let accessor_idx = self.accessors.len() as u32;
        self.accessors.push(json::Accessor {
            buffer_view: Some(view),
            byte_offset: Some(0u64.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(component_type)),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(type_),
            min,
            max,
            name: None,
            normalized: false,
            sparse: None,
        });
        AccessorIndex(accessor_idx)
    }
}

impl Default for BufferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn vec3_value(v: [f32; 3]) -> json::Value {
    json::Value::Array(v.into_iter().map(json::Value::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::plan;

    fn triangle() -> GeometryRecord {
        GeometryRecord::new(
            "tri",
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_push_views_then_append() {
        let mut builder = BufferBuilder::new();
        let geometry = triangle();
        let layout = plan(builder.byte_length(), &geometry);

        let accessors = builder.push_views(&layout, &geometry);
        assert_eq!(accessors.positions, AccessorIndex(0));
        assert_eq!(accessors.indices, AccessorIndex(1));
        assert_eq!(builder.views().len(), 2);
        assert!(builder.data().is_empty());

        builder.append(&layout, &geometry);
        // 3 positions * 12 bytes + 3 indices * 4 bytes
        assert_eq!(builder.data().len(), 48);
        assert_eq!(builder.byte_length(), 48);
    }

    #[test]
    fn test_views_reference_planned_offsets() {
        let mut builder = BufferBuilder::new();
        let geometry = triangle();

        for _ in 0..2 {
            let layout = plan(builder.byte_length(), &geometry);
            builder.push_views(&layout, &geometry);
            builder.append(&layout, &geometry);
        }

        let offsets: Vec<u64> = builder
            .views()
            .iter()
            .map(|v| v.byte_offset.map(|o| o.0).unwrap_or(0))
            .collect();
        assert_eq!(offsets, vec![0, 36, 48, 84]);
        assert_eq!(
            builder.views()[1].target,
            Some(Valid(json::buffer::Target::ElementArrayBuffer))
        );
    }

    #[test]
    fn test_position_accessor_bounds() {
        let mut builder = BufferBuilder::new();
        let geometry = triangle();
        let layout = plan(0, &geometry);
        builder.push_views(&layout, &geometry);

        let accessor = &builder.accessors()[0];
        assert_eq!(accessor.min, Some(vec3_value([0.0, 0.0, 0.0])));
        assert_eq!(accessor.max, Some(vec3_value([1.0, 1.0, 0.0])));
        assert!(builder.accessors()[1].min.is_none());
    }

    #[test]
    fn test_empty_geometry_omits_bounds() {
        let mut builder = BufferBuilder::new();
        let empty = GeometryRecord::new("empty", Vec::new(), Vec::new()).unwrap();
        let layout = plan(0, &empty);
        builder.push_views(&layout, &empty);
        builder.append(&layout, &empty);

        assert_eq!(builder.views().len(), 2);
        assert_eq!(builder.views()[0].byte_length.0, 0);
        assert!(builder.accessors()[0].min.is_none());
        assert!(builder.accessors()[0].max.is_none());
        assert_eq!(builder.byte_length(), 0);
    }

    #[test]
    fn test_append_is_little_endian() {
        let mut builder = BufferBuilder::new();
        let geometry =
            GeometryRecord::new("one", vec![[1.0, 2.0, 3.0]; 3], vec![0, 1, 2]).unwrap();
        let layout = plan(0, &geometry);
        builder.push_views(&layout, &geometry);
        builder.append(&layout, &geometry);

        assert_eq!(&builder.data()[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&builder.data()[40..44], &1u32.to_le_bytes());
    }
}
