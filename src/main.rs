use glprimer::{
    logger,
    opengl::{
        self,
        buffer::{Buffer, BufferTarget, BufferUsage},
        context::ClearFlags,
        shader::Program,
        texture::Texture2d,
        vertex_array::{ComponentType, VertexArrayObject, VertexLayout},
        Context,
    },
};
use winit::event_loop::ControlFlow;

#[macro_use]
extern crate log;

// Interleaved quad: position (vec3), color (vec3), texture coords (vec2).
#[rustfmt::skip]
const VERTICES: [f32; 32] = [
    -0.5, -0.5, 0.0,    1.0, 0.2, 0.2,    0.0, 0.0,
     0.5, -0.5, 0.0,    0.2, 1.0, 0.2,    1.0, 0.0,
     0.5,  0.5, 0.0,    0.2, 0.2, 1.0,    1.0, 1.0,
    -0.5,  0.5, 0.0,    1.0, 1.0, 1.0,    0.0, 1.0,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

fn main() {
    logger::init(log::LevelFilter::Debug);

    let (event_loop, ctx) = Context::create("glprimer", 800.0, 800.0);

    let program = match Program::from_files(&ctx, "shaders/texture.vert", "shaders/texture.frag") {
        Ok(program) => program,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let vertex_buffer = Buffer::with_data(&ctx, BufferTarget::Array, &VERTICES, BufferUsage::Static);
    let index_buffer = Buffer::with_data(&ctx, BufferTarget::Element, &INDICES, BufferUsage::Static);

    let mut vao = VertexArrayObject::new(&ctx);
    let layout = VertexLayout::interleaved(&[
        (0, 3, ComponentType::F32),
        (1, 3, ComponentType::F32),
        (2, 2, ComponentType::F32),
    ]);
    for slot in layout.slots() {
        vao.link_attribute(*layout.attribute(slot).unwrap());
    }
    vao.commit(&ctx, &vertex_buffer, Some(&index_buffer));

    let image = match image::open("assets/checkerboard.png") {
        Ok(image) => image.flipv().to_rgba8(),
        Err(err) => {
            error!("Failed to decode texture image: {}", err);
            std::process::exit(1);
        }
    };
    let texture = Texture2d::from_rgba(&ctx, image.width(), image.height(), image.as_raw());
    info!("Loaded {}x{} texture.", texture.width(), texture.height());

    program.activate(&ctx);
    program.set_uniform_i32(&ctx, "tex0", 0);
    program.set_uniform_f32(&ctx, "scale", 1.5);

    ctx.set_clear_color(0.07, 0.13, 0.17, 1.0);
    opengl::check_errors();

    let started = std::time::Instant::now();
    let mut last_frame = std::time::Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        use winit::event::{Event, VirtualKeyCode, WindowEvent};

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => ctx.resize_viewport(size.width, size.height),

            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { input, .. },
                ..
            } => match input.virtual_keycode {
                Some(VirtualKeyCode::Escape) => *control_flow = ControlFlow::Exit,
                Some(VirtualKeyCode::E) => opengl::check_errors(),
                _ => {}
            },

            Event::MainEventsCleared => {
                let delta = last_frame.elapsed();
                last_frame = std::time::Instant::now();
                ctx.set_title(format!("glprimer FPS {:.0}", 1.0 / delta.as_secs_f64()).as_str());

                ctx.clear(ClearFlags::COLOR | ClearFlags::DEPTH);

                program.activate(&ctx);
                let angle = started.elapsed().as_secs_f32() * 0.5;
                program.set_uniform_mat4(&ctx, "transform", glam::Mat4::from_rotation_z(angle));

                texture.bind_unit(&ctx, 0);
                vao.bind(&ctx);
                unsafe {
                    gl::DrawElements(
                        gl::TRIANGLES,
                        index_buffer.data_len() as i32,
                        gl::UNSIGNED_INT,
                        std::ptr::null(),
                    );
                }

                ctx.swap_buffers();
            }

            _ => {}
        }
    })
}
