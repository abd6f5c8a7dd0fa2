//! Thin RAII wrappers over OpenGL 3.3 core objects: buffers, vertex arrays,
//! shader programs and 2D textures, plus the windowing glue to stand up a
//! context and run a clear/draw/present loop.
//!
//! Every wrapper method that touches driver state takes a [`opengl::Context`]
//! reference, so a handle cannot be used before a context exists.

#[macro_use]
extern crate log;
extern crate gl;

pub mod logger;
pub mod opengl;
