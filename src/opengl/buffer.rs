use super::{Context, OpenGLObject};
use std::mem::size_of;

/// Binding category for a buffer. Each category has its own "currently
/// bound" slot in the driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BufferTarget {
    Array,
    Element,
}

impl BufferTarget {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Array => gl::ARRAY_BUFFER,
            Self::Element => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Usage hint passed to the driver at upload time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BufferUsage {
    Stream,
    Static,
    Dynamic,
}

impl BufferUsage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Stream => gl::STREAM_DRAW,
            Self::Static => gl::STATIC_DRAW,
            Self::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

/// One GPU-side buffer holding `data_len` elements of `T`.
pub struct Buffer<T: Copy> {
    handle: u32,
    target: BufferTarget,
    data_len: usize,
    marker: std::marker::PhantomData<T>,
}

impl<T: Copy> Buffer<T> {
    /// Allocates a buffer and uploads `data` immediately.
    ///
    /// Uploading binds this buffer as the current object for `target`, and
    /// leaves it bound.
    pub fn with_data(_: &Context, target: BufferTarget, data: &[T], usage: BufferUsage) -> Self {
        let mut handle = 0;
        unsafe {
            gl::GenBuffers(1, &raw mut handle);
            gl::BindBuffer(target.gl_enum(), handle);
            gl::BufferData(
                target.gl_enum(),
                (data.len() * size_of::<T>()) as isize,
                data.as_ptr() as *const _,
                usage.gl_enum(),
            );
        }

        Self {
            handle,
            target,
            data_len: data.len(),
            marker: std::marker::PhantomData,
        }
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn data_len(&self) -> usize {
        self.data_len
    }

    pub fn byte_len(&self) -> usize {
        self.data_len * size_of::<T>()
    }

    /// Makes this buffer the current object for its target category.
    pub fn bind(&self, _: &Context) {
        unsafe { gl::BindBuffer(self.target.gl_enum(), self.handle) };
    }

    /// Clears the current-object slot for this buffer's target category.
    pub fn unbind(&self, _: &Context) {
        unsafe { gl::BindBuffer(self.target.gl_enum(), 0) };
    }
}

impl<T: Copy> OpenGLObject for Buffer<T> {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl<T: Copy> Drop for Buffer<T> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &raw const self.handle) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_map_to_gl_constants() {
        assert_eq!(BufferTarget::Array.gl_enum(), gl::ARRAY_BUFFER);
        assert_eq!(BufferTarget::Element.gl_enum(), gl::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn usage_hints_map_to_gl_constants() {
        assert_eq!(BufferUsage::Stream.gl_enum(), gl::STREAM_DRAW);
        assert_eq!(BufferUsage::Static.gl_enum(), gl::STATIC_DRAW);
        assert_eq!(BufferUsage::Dynamic.gl_enum(), gl::DYNAMIC_DRAW);
    }
}
