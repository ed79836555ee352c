//! SDL2 window and OpenGL context creation.
//!
//! [`App`] owns everything the windowing collaborator provides: the SDL
//! handles, the window, the live GL context and the event pump. The renderer
//! core never creates or destroys the context itself; it only consumes the
//! [`GraphicsContext`] built here.

use std::rc::Rc;

use crate::abs::context::GraphicsContext;

pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    // Declared before the raw GL context so registry teardown still has a
    // live context during drop.
    pub ctx: Rc<GraphicsContext>,
    pub gl_context: sdl2::video::GLContext,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window and a 3.3 core profile GL context. Any failure
    /// here is fatal; there is nothing to render into without a window.
    pub fn new(title: &str, width: u32, height: u32, fullscreen: bool) -> Self {
        let sdl = sdl2::init().unwrap();
        let video_subsystem = sdl.video().unwrap();
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        let mut window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .unwrap();
        window
            .set_fullscreen(if fullscreen {
                sdl2::video::FullscreenType::Desktop
            } else {
                sdl2::video::FullscreenType::Off
            })
            .unwrap();
        let gl_context = window.gl_create_context().unwrap();
        window.gl_make_current(&gl_context).unwrap();
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().unwrap();
        let ctx = GraphicsContext::new(gl);

        Self {
            sdl,
            video_subsystem,
            window,
            ctx,
            gl_context,
            event_pump,
        }
    }
}
