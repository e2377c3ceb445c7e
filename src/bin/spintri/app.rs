use glutin::config::{Config as GlConfig, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};

use std::ffi::{CStr, CString};
use std::num::NonZeroU32;
use std::time::Instant;

use log::{debug, error, info, trace};

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

use spintri::config::{Config, WINDOW_TITLE};
use spintri::geometry::{TRIANGLE_INDICES, TRIANGLE_VERTICES};
use spintri::transform::{compose, to_columns};
use spintri::{AnimationState, MotionSettings};

use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{PBError, Program, ProgramBuilder, UniformLocation};
use gl_wrapper::renderer::GlRenderer;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    gl_renderer: GlRenderer,
    triangle: TriangleScene,
    settings: MotionSettings,
    animation: AnimationState,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                config.window.width,
                config.window.height,
            )))
            .with_title(WINDOW_TITLE);

        let (window, gl_config) = create_window(&event_loop, window_builder)?;

        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if !(gl::CreateShader::is_loaded()
            && gl::GenVertexArrays::is_loaded()
            && gl::UniformMatrix4fv::is_loaded()
            && gl::DrawElements::is_loaded())
        {
            return Err(AppError::GlLoader);
        }

        info!("OpenGL {}", gl_version());

        let triangle = TriangleScene::new()?;

        let gl_renderer = GlRenderer::new();
        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        gl_renderer.resize(width, height);

        let (settings, animation) = config.animation.clone().into_parts();
        debug!("Motion settings: {:?}", settings);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            gl_renderer,
            triangle,
            settings,
            animation,
        })
    }

    pub fn run(self) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            mut gl_renderer,
            triangle,
            settings,
            mut animation,
        } = self;

        // GL objects have to go while the context is still current
        let mut triangle = Some(triangle);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, _window_target, control_flow| match event {
            Event::NewEvents(StartCause::Init) => {
                control_flow.set_poll();
                last_frame = Instant::now();
            }
            Event::MainEventsCleared => {
                let now = Instant::now();
                let delta_time = now.duration_since(last_frame).as_secs_f32();
                last_frame = now;

                animation = animation.advance(&settings, delta_time);
                trace!("dt {delta_time:.4}s -> {:?}", animation);

                gl_window.window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                if let Some(scene) = &triangle {
                    let transform = to_columns(&compose(&animation));

                    gl_renderer.clear_color(0.0, 0.0, 0.0);
                    gl_renderer.set_uniform_mat4(&scene.program, scene.transform, &transform);
                    gl_renderer.draw(&scene.geometry, &scene.program);
                }

                if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                    error!("Could not present frame: {e}");
                    control_flow.set_exit_with_code(-1);
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    if let (Some(w), Some(h)) =
                        (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                    {
                        debug!("Resized to {}x{}", size.width, size.height);
                        gl_window.surface.resize(&gl_context, w, h);
                        gl_renderer.resize(size.width, size.height);
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => {
                    info!("Escape pressed, exiting");
                    control_flow.set_exit();
                }
                WindowEvent::CloseRequested => {
                    control_flow.set_exit();
                }
                _ => (),
            },
            Event::LoopDestroyed => {
                drop(triangle.take());
            }
            _ => (),
        })
    }
}

/// The one object on screen: interleaved position/color buffer, its shader
/// program and the location of the `transform` uniform.
struct TriangleScene {
    geometry: Geometry,
    program: Program,
    transform: UniformLocation,
}

impl TriangleScene {
    fn new() -> Result<Self, AppError> {
        let program = ProgramBuilder::new(
            include_str!("gl_shaders/triangle_vert.glsl"),
            include_str!("gl_shaders/triangle_frag.glsl"),
        )
        .build()?;

        let transform = program.uniform_location("transform")?;

        let geometry = GeometryBuilder::new(&TRIANGLE_VERTICES)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&TRIANGLE_INDICES)
            .build()?;

        Ok(Self {
            geometry,
            program,
            transform,
        })
    }
}

// WGL needs the window before the display, the other backends pick the
// config first so the window can be created with a matching visual.
#[cfg(not(windows))]
fn create_window<T>(
    event_loop: &EventLoopWindowTarget<T>,
    window_builder: WindowBuilder,
) -> Result<(Window, GlConfig), AppError> {
    let gl_display =
        unsafe { Display::new(event_loop.raw_display_handle(), display_preference())? };
    let template = ConfigTemplateBuilder::new().build();
    let gl_config = pick_config(unsafe { gl_display.find_configs(template)? })?;

    let window = glutin_winit::finalize_window(event_loop, window_builder, &gl_config)
        .map_err(|e| AppError::Window(e.to_string()))?;

    Ok((window, gl_config))
}

#[cfg(windows)]
fn create_window<T>(
    event_loop: &EventLoopWindowTarget<T>,
    window_builder: WindowBuilder,
) -> Result<(Window, GlConfig), AppError> {
    let window = window_builder
        .build(event_loop)
        .map_err(|e| AppError::Window(e.to_string()))?;
    let handle = window.raw_window_handle();

    let gl_display = unsafe {
        Display::new(
            event_loop.raw_display_handle(),
            DisplayApiPreference::WglThenEgl(Some(handle)),
        )?
    };
    let template = ConfigTemplateBuilder::new()
        .compatible_with_native_window(handle)
        .build();
    let gl_config = pick_config(unsafe { gl_display.find_configs(template)? })?;

    Ok((window, gl_config))
}

#[cfg(target_os = "macos")]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_preference() -> DisplayApiPreference {
    DisplayApiPreference::EglThenGlx(Box::new(winit::platform::unix::register_xlib_error_hook))
}

fn pick_config<C>(mut configs: impl Iterator<Item = C>) -> Result<C, AppError> {
    configs.next().ok_or(AppError::NoGlConfig)
}

fn gl_version() -> String {
    let ptr = unsafe { gl::GetString(gl::VERSION) };

    if ptr.is_null() {
        return "unknown".into();
    }

    unsafe { CStr::from_ptr(ptr as *const _) }
        .to_string_lossy()
        .into_owned()
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &GlConfig) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to create window: {0}")]
    Window(String),
    #[error("No OpenGL config available for this display")]
    NoGlConfig,
    #[error("Window surface has a zero dimension")]
    ZeroSize,
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("Failed to load OpenGL functions")]
    GlLoader,
    #[error("Failed to build shader program: {0}")]
    Program(#[from] PBError),
    #[error("Failed to build triangle geometry: {0}")]
    Geometry(#[from] GBError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_list_is_an_error() {
        let picked = pick_config(std::iter::empty::<GlConfig>());

        assert!(matches!(picked, Err(AppError::NoGlConfig)));
    }

    #[test]
    fn first_offered_config_wins() {
        assert!(matches!(pick_config([3, 1, 2].into_iter()), Ok(3)));
    }
}
