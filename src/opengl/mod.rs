pub mod buffer;
pub mod context;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use context::Context;

/// Common surface of every GL-side resource wrapper: each owns exactly one
/// driver handle, valid from creation until the wrapper is dropped.
pub trait OpenGLObject {
    fn handle(&self) -> u32;
}

/// Drains the GL error queue, logging one line per pending error.
///
/// The wrappers themselves never query the driver for error state; this is
/// the opt-in diagnostic for callers who want it.
pub fn check_errors() {
    loop {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }

        error!("OpenGL error: {} (0x{:X})", error_name(code), code);
    }
}

fn error_name(code: u32) -> &'static str {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unrecognized error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names_cover_core_codes() {
        assert_eq!(error_name(gl::INVALID_ENUM), "GL_INVALID_ENUM");
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(0xDEAD), "unrecognized error code");
    }
}
