use super::{Context, OpenGLObject};

/// One 2D RGBA texture with mipmaps.
///
/// Decoding the image file is the caller's business; this type only consumes
/// the decoded byte buffer and its dimensions.
pub struct Texture2d {
    handle: u32,
    width: u32,
    height: u32,
}

impl Texture2d {
    /// Uploads an 8-bit RGBA pixel buffer, row-major, top row first.
    ///
    /// Uploading binds this texture as the current 2D texture and leaves it
    /// bound.
    pub fn from_rgba(_: &Context, width: u32, height: u32, pixels: &[u8]) -> Self {
        assert!(
            pixels.len() == (width as usize) * (height as usize) * 4,
            "Pixel buffer length must be width * height * 4 bytes."
        );

        let mut handle = 0;
        unsafe {
            gl::GenTextures(1, &raw mut handle);
            gl::BindTexture(gl::TEXTURE_2D, handle);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const _,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        Self {
            handle,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds this texture to the given texture unit for sampling.
    pub fn bind_unit(&self, _: &Context, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.handle);
        }
    }

    pub fn unbind(&self, _: &Context) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, 0) };
    }
}

impl OpenGLObject for Texture2d {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl Drop for Texture2d {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &raw const self.handle) };
    }
}
