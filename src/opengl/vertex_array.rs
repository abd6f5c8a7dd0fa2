use super::{
    buffer::{Buffer, BufferTarget},
    Context, OpenGLObject,
};
use std::collections::BTreeMap;

/// Scalar type of one vertex attribute component.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ComponentType {
    F32,
    I32,
    U32,
    I16,
    U16,
    I8,
    U8,
}

impl ComponentType {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::F32 => gl::FLOAT,
            Self::I32 => gl::INT,
            Self::U32 => gl::UNSIGNED_INT,
            Self::I16 => gl::SHORT,
            Self::U16 => gl::UNSIGNED_SHORT,
            Self::I8 => gl::BYTE,
            Self::U8 => gl::UNSIGNED_BYTE,
        }
    }

    pub fn byte_size(self) -> usize {
        match self {
            Self::F32 | Self::I32 | Self::U32 => 4,
            Self::I16 | Self::U16 => 2,
            Self::I8 | Self::U8 => 1,
        }
    }
}

/// How one shader input slot reads from the currently bound vertex buffer.
///
/// Stride and offset are taken on faith: no validation is performed against
/// the buffer's actual interleaving, and a mismatch renders garbage rather
/// than reporting an error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AttributeBinding {
    pub index: u32,
    pub components: i32,
    pub component_type: ComponentType,
    pub normalized: bool,
    pub stride: i32,
    pub offset: usize,
}

impl AttributeBinding {
    /// A tightly packed float attribute at the given slot: stride covers
    /// exactly `components` floats, offset zero.
    pub fn packed_f32(index: u32, components: i32) -> Self {
        Self {
            index,
            components,
            component_type: ComponentType::F32,
            normalized: false,
            stride: components * ComponentType::F32.byte_size() as i32,
            offset: 0,
        }
    }
}

/// The recorded attribute slots of a vertex array, keyed by slot index.
///
/// Pure bookkeeping; nothing here touches the driver until a
/// [`VertexArrayObject`] commits it.
#[derive(Default)]
pub struct VertexLayout {
    attributes: BTreeMap<u32, AttributeBinding>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layout of consecutive attributes interleaved in one buffer,
    /// assigning offsets in declaration order and the packed total as the
    /// shared stride.
    pub fn interleaved(attributes: &[(u32, i32, ComponentType)]) -> Self {
        let stride: usize = attributes
            .iter()
            .map(|(_, components, component_type)| {
                *components as usize * component_type.byte_size()
            })
            .sum();

        let mut layout = Self::new();
        let mut offset = 0;
        for (index, components, component_type) in attributes.iter().copied() {
            layout.link_attribute(AttributeBinding {
                index,
                components,
                component_type,
                normalized: false,
                stride: stride as i32,
                offset,
            });
            offset += components as usize * component_type.byte_size();
        }

        layout
    }

    /// Records a slot binding. A slot already recorded is replaced; other
    /// slots are untouched.
    pub fn link_attribute(&mut self, binding: AttributeBinding) {
        self.attributes.insert(binding.index, binding);
    }

    pub fn attribute(&self, index: u32) -> Option<&AttributeBinding> {
        self.attributes.get(&index)
    }

    pub fn slots(&self) -> impl Iterator<Item = u32> + '_ {
        self.attributes.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One vertex array object: a driver handle plus the layout recorded for it.
pub struct VertexArrayObject {
    handle: u32,
    layout: VertexLayout,
}

impl VertexArrayObject {
    /// Allocates an empty vertex array.
    pub fn new(_: &Context) -> Self {
        let mut handle = 0;
        unsafe { gl::GenVertexArrays(1, &raw mut handle) };

        Self {
            handle,
            layout: VertexLayout::new(),
        }
    }

    /// Records a slot binding without touching the driver; takes effect on
    /// the next [`commit`](Self::commit).
    pub fn link_attribute(&mut self, binding: AttributeBinding) {
        self.layout.link_attribute(binding);
    }

    /// Records the minimal layout: slot 0 reading tightly packed vec3 floats.
    pub fn link_vertex_buffer(&mut self) {
        self.link_attribute(AttributeBinding::packed_f32(0, 3));
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Binds the array and the vertex buffer, then enables every recorded
    /// slot and points it into `vertex_buffer`. An element buffer, if given,
    /// is attached to the array (element binding is array state, so it must
    /// stay bound; the vertex buffer is unbound again).
    pub fn commit(
        &self,
        ctx: &Context,
        vertex_buffer: &Buffer<f32>,
        element_buffer: Option<&Buffer<u32>>,
    ) {
        assert!(
            vertex_buffer.target() == BufferTarget::Array,
            "Vertex data must come from an array buffer."
        );

        self.bind(ctx);
        vertex_buffer.bind(ctx);

        for binding in self.layout.attributes.values() {
            unsafe {
                gl::VertexAttribPointer(
                    binding.index,
                    binding.components,
                    binding.component_type.gl_enum(),
                    binding.normalized as u8,
                    binding.stride,
                    binding.offset as *const _,
                );
                gl::EnableVertexAttribArray(binding.index);
            }
        }

        if let Some(element_buffer) = element_buffer {
            assert!(
                element_buffer.target() == BufferTarget::Element,
                "Index data must come from an element buffer."
            );
            element_buffer.bind(ctx);
        }

        vertex_buffer.unbind(ctx);
        self.unbind(ctx);
    }

    /// Makes this array current for draw calls.
    pub fn bind(&self, _: &Context) {
        unsafe { gl::BindVertexArray(self.handle) };
    }

    pub fn unbind(&self, _: &Context) {
        unsafe { gl::BindVertexArray(0) };
    }
}

impl OpenGLObject for VertexArrayObject {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl Drop for VertexArrayObject {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &raw const self.handle) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_f32_covers_the_minimal_case() {
        let binding = AttributeBinding::packed_f32(0, 3);

        assert_eq!(binding.index, 0);
        assert_eq!(binding.components, 3);
        assert_eq!(binding.component_type, ComponentType::F32);
        assert_eq!(binding.stride, 12);
        assert_eq!(binding.offset, 0);
        assert!(!binding.normalized);
    }

    #[test]
    fn linking_records_the_exact_slot_passed() {
        let mut layout = VertexLayout::new();
        layout.link_attribute(AttributeBinding::packed_f32(0, 3));
        layout.link_attribute(AttributeBinding::packed_f32(2, 2));

        assert_eq!(layout.slots().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(layout.attribute(0).unwrap().components, 3);
        assert_eq!(layout.attribute(2).unwrap().components, 2);
        assert!(layout.attribute(1).is_none());
    }

    #[test]
    fn relinking_a_slot_replaces_only_that_slot() {
        let mut layout = VertexLayout::new();
        layout.link_attribute(AttributeBinding::packed_f32(0, 3));
        layout.link_attribute(AttributeBinding::packed_f32(1, 3));
        layout.link_attribute(AttributeBinding::packed_f32(0, 2));

        assert_eq!(layout.slots().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(layout.attribute(0).unwrap().components, 2);
        assert_eq!(layout.attribute(1).unwrap().components, 3);
    }

    #[test]
    fn interleaved_layout_assigns_shared_stride_and_running_offsets() {
        let layout = VertexLayout::interleaved(&[
            (0, 3, ComponentType::F32),
            (1, 3, ComponentType::F32),
            (2, 2, ComponentType::F32),
        ]);

        let position = layout.attribute(0).unwrap();
        let color = layout.attribute(1).unwrap();
        let tex = layout.attribute(2).unwrap();

        assert_eq!(position.stride, 32);
        assert_eq!(color.stride, 32);
        assert_eq!(tex.stride, 32);

        assert_eq!(position.offset, 0);
        assert_eq!(color.offset, 12);
        assert_eq!(tex.offset, 24);
    }

    #[test]
    fn component_byte_sizes() {
        assert_eq!(ComponentType::F32.byte_size(), 4);
        assert_eq!(ComponentType::U16.byte_size(), 2);
        assert_eq!(ComponentType::U8.byte_size(), 1);
    }
}
