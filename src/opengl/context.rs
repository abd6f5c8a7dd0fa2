use winit::{dpi::LogicalSize, event_loop::EventLoop, window::Window};

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct ClearFlags: u32 {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
    }
}

/// An open window with a current OpenGL 3.3 core context.
///
/// The driver keeps one implicit "currently bound" slot per resource
/// category. Every wrapper operation that reads or writes that state takes a
/// `&Context`, which both proves a context exists and marks the call sites
/// where global driver state changes.
pub struct Context {
    window: Window,
    gl_context: raw_gl_context::GlContext,
}

impl Context {
    /// Opens a window, creates a GL context on it, makes the context current
    /// and loads the GL function pointers.
    pub fn create(title: &str, width: f64, height: f64) -> (EventLoop<()>, Self) {
        let event_loop = EventLoop::new();
        let window = winit::window::WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .build(&event_loop)
            .unwrap();

        let gl_context = raw_gl_context::GlContext::create(
            &window,
            raw_gl_context::GlConfig {
                version: (3, 3),
                profile: raw_gl_context::Profile::Core,
                red_bits: 8,
                blue_bits: 8,
                green_bits: 8,
                alpha_bits: 0,
                depth_bits: 24,
                stencil_bits: 0,
                samples: None,
                srgb: true,
                double_buffer: true,
                vsync: true,
            },
        )
        .unwrap();
        gl_context.make_current();
        gl::load_with(|s| gl_context.get_proc_address(s) as *const _);

        unsafe {
            let version = std::ffi::CStr::from_ptr(gl::GetString(gl::VERSION) as *const _);
            info!("OpenGL version string: {:?}", version);

            let inner_size = window.inner_size();
            gl::Viewport(0, 0, inner_size.width as i32, inner_size.height as i32);
        }

        (event_loop, Self { window, gl_context })
    }

    pub fn viewport(&self) -> glam::Vec4 {
        let inner_size = self.window.inner_size();
        glam::Vec4::new(0.0, 0.0, inner_size.width as f32, inner_size.height as f32)
    }

    pub fn aspect_ratio(&self) -> f32 {
        let inner_size = self.window.inner_size();
        (inner_size.width as f32) / (inner_size.height as f32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    pub fn resize_viewport(&self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
    }

    pub fn set_clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) };
    }

    pub fn clear(&self, flags: ClearFlags) {
        unsafe { gl::Clear(flags.bits()) };
    }

    /// Presents the back buffer. Called once per loop iteration, after
    /// drawing.
    pub fn swap_buffers(&self) {
        self.gl_context.swap_buffers();
    }
}
