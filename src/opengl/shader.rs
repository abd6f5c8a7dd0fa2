use super::{Context, OpenGLObject};
use std::{
    collections::BTreeMap,
    ffi::CString,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("failed to read shader source {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}

/// Reads a shader source file wholesale as UTF-8 text, distinguishing a
/// missing file from any other read failure.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(ShaderError::SourceNotFound {
                path: path.to_owned(),
            })
        }
        Err(source) => Err(ShaderError::SourceRead {
            path: path.to_owned(),
            source,
        }),
    }
}

/// One compiled and linked vertex+fragment program.
///
/// Uniform locations are reflected once at link time; setters look names up
/// in that cache and log a warning for names the linker did not keep.
pub struct Program {
    handle: u32,
    uniforms: BTreeMap<String, i32>,
    source_paths: Option<(PathBuf, PathBuf)>,
}

impl Program {
    /// Reads, compiles and links a program from two source files.
    ///
    /// Both files are read before any driver work happens, so a missing file
    /// never leaves a half-built program behind.
    pub fn from_files(
        ctx: &Context,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_src = read_source(vertex_path.as_ref())?;
        let fragment_src = read_source(fragment_path.as_ref())?;

        let mut program = Self::from_sources(ctx, &vertex_src, &fragment_src)?;
        program.source_paths = Some((
            vertex_path.as_ref().to_owned(),
            fragment_path.as_ref().to_owned(),
        ));

        debug!(
            "Linked shader program {} from {:?} + {:?}.",
            program.handle,
            vertex_path.as_ref(),
            fragment_path.as_ref()
        );

        Ok(program)
    }

    /// Compiles and links a program from in-memory sources.
    ///
    /// The intermediate stage objects are deleted right after linking,
    /// whether or not the link succeeded.
    pub fn from_sources(
        ctx: &Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(ctx, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(ctx, ShaderStage::Fragment, fragment_src) {
            Ok(handle) => handle,
            Err(err) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(err);
            }
        };

        let handle = unsafe {
            let handle = gl::CreateProgram();
            gl::AttachShader(handle, vertex);
            gl::AttachShader(handle, fragment);
            gl::LinkProgram(handle);

            // Stage objects are no longer needed once the link has run.
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            let mut status = 0;
            gl::GetProgramiv(handle, gl::LINK_STATUS, &raw mut status);
            if status == 0 {
                let log = program_info_log(handle).unwrap_or_default();
                gl::DeleteProgram(handle);
                return Err(ShaderError::Link { log });
            }

            handle
        };

        let uniforms = reflect_uniforms(handle);

        Ok(Self {
            handle,
            uniforms,
            source_paths: None,
        })
    }

    pub fn source_paths(&self) -> Option<(&Path, &Path)> {
        self.source_paths
            .as_ref()
            .map(|(vertex, fragment)| (vertex.as_path(), fragment.as_path()))
    }

    /// Makes this program current for draw calls and uniform assignment.
    pub fn activate(&self, _: &Context) {
        unsafe { gl::UseProgram(self.handle) };
    }

    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        self.uniforms.get(name).copied()
    }

    pub fn uniforms(&self) -> impl Iterator<Item = &str> {
        self.uniforms.keys().map(String::as_str)
    }

    pub fn set_uniform_f32(&self, _: &Context, name: &str, value: f32) {
        match self.uniform_location(name) {
            Some(location) => unsafe { gl::Uniform1f(location, value) },
            None => warn!("No active uniform named {:?}.", name),
        }
    }

    pub fn set_uniform_i32(&self, _: &Context, name: &str, value: i32) {
        match self.uniform_location(name) {
            Some(location) => unsafe { gl::Uniform1i(location, value) },
            None => warn!("No active uniform named {:?}.", name),
        }
    }

    pub fn set_uniform_mat4(&self, _: &Context, name: &str, value: glam::Mat4) {
        match self.uniform_location(name) {
            Some(location) => unsafe {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, value.to_cols_array().as_ptr())
            },
            None => warn!("No active uniform named {:?}.", name),
        }
    }
}

impl OpenGLObject for Program {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.handle) };
    }
}

fn compile_stage(_: &Context, stage: ShaderStage, source: &str) -> Result<u32, ShaderError> {
    unsafe {
        let handle = gl::CreateShader(stage.gl_enum());

        let src_ptr = source.as_ptr() as *const _;
        let src_len = source.len() as i32;
        gl::ShaderSource(handle, 1, &raw const src_ptr, &raw const src_len);
        gl::CompileShader(handle);

        let mut status = 0;
        gl::GetShaderiv(handle, gl::COMPILE_STATUS, &raw mut status);
        if status == 0 {
            let log = shader_info_log(handle).unwrap_or_default();
            gl::DeleteShader(handle);
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(handle)
    }
}

fn shader_info_log(handle: u32) -> Option<String> {
    let mut log_len = 0;
    unsafe { gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &raw mut log_len) };

    if log_len > 0 {
        let mut log = vec![0u8; log_len as usize];
        unsafe {
            gl::GetShaderInfoLog(
                handle,
                log.len() as i32,
                &raw mut log_len,
                log.as_mut_ptr() as *mut _,
            )
        };
        log.truncate(log_len as usize);

        Some(String::from_utf8_lossy(&log).into_owned())
    } else {
        None
    }
}

fn program_info_log(handle: u32) -> Option<String> {
    let mut log_len = 0;
    unsafe { gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &raw mut log_len) };

    if log_len > 0 {
        let mut log = vec![0u8; log_len as usize];
        unsafe {
            gl::GetProgramInfoLog(
                handle,
                log.len() as i32,
                &raw mut log_len,
                log.as_mut_ptr() as *mut _,
            )
        };
        log.truncate(log_len as usize);

        Some(String::from_utf8_lossy(&log).into_owned())
    } else {
        None
    }
}

fn reflect_uniforms(handle: u32) -> BTreeMap<String, i32> {
    let mut uniforms = BTreeMap::new();

    unsafe {
        let mut uniform_count = 0;
        let mut max_uniform_len = 0;
        gl::GetProgramiv(handle, gl::ACTIVE_UNIFORMS, &raw mut uniform_count);
        gl::GetProgramiv(
            handle,
            gl::ACTIVE_UNIFORM_MAX_LENGTH,
            &raw mut max_uniform_len,
        );

        debug!("Identified {} uniforms for current shader.", uniform_count);

        for index in 0..(uniform_count as u32) {
            let mut name_buffer = vec![0u8; (max_uniform_len as usize).max(1)];
            let mut name_len = 0;
            let mut size = 0;
            let mut data_type = 0;

            gl::GetActiveUniform(
                handle,
                index,
                name_buffer.len() as i32,
                &raw mut name_len,
                &raw mut size,
                &raw mut data_type,
                name_buffer.as_mut_ptr() as *mut _,
            );
            name_buffer.truncate(name_len as usize);

            let name = match String::from_utf8(name_buffer) {
                Ok(name) => name,
                Err(_) => {
                    warn!("Skipping uniform {} with a non-UTF-8 name.", index);
                    continue;
                }
            };

            if let Ok(c_name) = CString::new(name.as_str()) {
                let location = gl::GetUniformLocation(handle, c_name.as_ptr());
                uniforms.insert(name, location);
            }
        }
    }

    uniforms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("shaders")
            .join(name)
    }

    #[test]
    fn reading_existing_sources_succeeds() {
        let vertex = read_source(fixture("triangle.vert")).unwrap();
        let fragment = read_source(fixture("triangle.frag")).unwrap();

        assert!(vertex.contains("void main"));
        assert!(fragment.contains("void main"));
    }

    #[test]
    fn reading_a_missing_source_reports_not_found() {
        let path = fixture("does_not_exist.vert");

        match read_source(&path) {
            Err(ShaderError::SourceNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected SourceNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn not_found_error_names_the_file() {
        let err = read_source(fixture("does_not_exist.vert")).unwrap_err();
        assert!(err.to_string().contains("does_not_exist.vert"));
    }

    #[test]
    fn stage_names_render_lowercase() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
