//! The minimal case: one tightly packed vertex buffer, slot 0, no indices,
//! shader sources embedded in the binary.

use glprimer::{
    logger,
    opengl::{
        buffer::{Buffer, BufferTarget, BufferUsage},
        context::ClearFlags,
        shader::Program,
        vertex_array::VertexArrayObject,
        Context,
    },
};
use winit::event_loop::ControlFlow;

#[macro_use]
extern crate log;

const VERTEX_SRC: &str = r#"
    #version 330 core

    layout (location = 0) in vec3 a_pos;

    void main() {
        gl_Position = vec4(a_pos, 1.0);
    }
"#;

const FRAGMENT_SRC: &str = r#"
    #version 330 core

    out vec4 f_color;

    void main() {
        f_color = vec4(0.8, 0.3, 0.02, 1.0);
    }
"#;

#[rustfmt::skip]
const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

fn main() {
    logger::init(log::LevelFilter::Debug);

    let (event_loop, ctx) = Context::create("triangle", 800.0, 800.0);

    let program = match Program::from_sources(&ctx, VERTEX_SRC, FRAGMENT_SRC) {
        Ok(program) => program,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let vertex_buffer = Buffer::with_data(&ctx, BufferTarget::Array, &VERTICES, BufferUsage::Static);

    let mut vao = VertexArrayObject::new(&ctx);
    vao.link_vertex_buffer();
    vao.commit(&ctx, &vertex_buffer, None);

    ctx.set_clear_color(0.07, 0.13, 0.17, 1.0);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        use winit::event::{Event, WindowEvent};

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => ctx.resize_viewport(size.width, size.height),

            Event::MainEventsCleared => {
                ctx.clear(ClearFlags::COLOR);

                program.activate(&ctx);
                vao.bind(&ctx);
                unsafe {
                    gl::DrawArrays(gl::TRIANGLES, 0, vertex_buffer.data_len() as i32);
                }

                ctx.swap_buffers();
            }

            _ => {}
        }
    })
}
