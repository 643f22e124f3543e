use std::{cell::Cell, ffi::CStr, num::NonZeroU32, rc::Rc, time::Duration};

use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{Display, DisplayApiPreference},
    prelude::*,
    surface::{Surface, SurfaceAttributesBuilder, WindowSurface},
};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::WindowId,
};

use crate::error::Error;

/// Close and resize requests collected for one window.
#[derive(Debug, Default)]
struct WindowFlags {
    close_requested: Cell<bool>,
    resized: Cell<Option<(u32, u32)>>,
}

/// The process-wide windowing library.
///
/// Exactly one `Platform` exists per process; it must outlive every
/// [`Window`] created from it.
pub struct Platform {
    event_loop: EventLoop<()>,
    windows: Vec<(WindowId, Rc<WindowFlags>)>,
}

impl Platform {
    pub fn init() -> Result<Self, Error> {
        let event_loop = EventLoop::new().map_err(Error::event_loop_failed)?;
        log::debug!("windowing library initialized");
        Ok(Self { event_loop, windows: Vec::new() })
    }

    /// Processes pending OS events without blocking.
    pub fn events(&mut self) {
        self.windows.retain(|(_, flags)| Rc::strong_count(flags) > 1);

        let mut collector = EventCollector { windows: &self.windows };
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut collector);
        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with status {code}");
            for (_, flags) in &self.windows {
                flags.close_requested.set(true);
            }
        }
    }

    pub fn terminate(self) {
        log::debug!("windowing library terminated");
    }
}

struct EventCollector<'a> {
    windows: &'a [(WindowId, Rc<WindowFlags>)],
}

impl ApplicationHandler for EventCollector<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some((_, flags)) = self.windows.iter().find(|(window, _)| *window == id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => flags.close_requested.set(true),
            WindowEvent::Resized(size) => flags.resized.set(Some((size.width, size.height))),
            _ => {}
        }
    }
}

/// The GL side of a window, created by [`Window::current`].
struct ContextSurface {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    gl: Rc<glow::Context>,
}

/// A top-level window with an optional OpenGL 3.3 core context.
pub struct Window {
    // dropped before the native window
    gl: Option<ContextSurface>,
    flags: Rc<WindowFlags>,
    window: winit::window::Window,
}

impl Window {
    pub fn new(platform: &mut Platform, width: u32, height: u32, title: &str) -> Result<Self, Error> {
        let attrs = winit::window::Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height));

        #[allow(deprecated)]
        let window = platform.event_loop.create_window(attrs).map_err(Error::window_creation_failed)?;

        let flags = Rc::new(WindowFlags::default());
        platform.windows.push((window.id(), flags.clone()));
        log::info!("created window '{title}' ({width}x{height})");

        Ok(Self { gl: None, flags, window })
    }

    /// Makes the window's context current on this thread and returns the
    /// loaded GL entry points. The context is created on first use.
    pub fn current(&mut self) -> Result<Rc<glow::Context>, Error> {
        if let Some(gl) = &self.gl {
            gl.context.make_current(&gl.surface).map_err(Error::context_creation_failed)?;
            return Ok(gl.gl.clone());
        }

        let gl = self.create_context()?;
        let loaded = gl.gl.clone();
        self.gl = Some(gl);
        Ok(loaded)
    }

    pub fn closing(&self) -> bool {
        self.flags.close_requested.get()
    }

    /// Presents the back buffer.
    pub fn swap(&self) -> Result<(), Error> {
        match &self.gl {
            Some(gl) => gl.surface.swap_buffers(&gl.context).map_err(Error::surface_failed),
            None => Err(Error::surface_failed("window has no GL context")),
        }
    }

    /// Returns the latest size change since the previous call, resizing the
    /// GL surface to match.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        let (width, height) = self.flags.resized.take()?;
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            // minimized
            return None;
        };

        if let Some(gl) = &self.gl {
            gl.surface.resize(&gl.context, w, h);
        }
        Some((width, height))
    }

    pub fn size(&self) -> (u32, u32) {
        self.window.inner_size().into()
    }

    pub fn destroy(self) {
        log::debug!("window destroyed");
    }

    fn create_context(&self) -> Result<ContextSurface, Error> {
        let display_handle = self.window.display_handle().map_err(Error::display_failed)?.as_raw();
        let window_handle = self.window.window_handle().map_err(Error::display_failed)?.as_raw();

        let display = unsafe { Display::new(display_handle, api_preference(window_handle)) }
            .map_err(Error::display_failed)?;

        let template = ConfigTemplateBuilder::new()
            .with_depth_size(24)
            .with_transparency(false)
            .build();
        let config = unsafe { display.find_configs(template) }
            .map_err(Error::display_failed)?
            .next()
            .ok_or_else(Error::no_suitable_config)?;

        let (width, height) = self.size();
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(Error::context_creation_failed("window has zero size"));
        };
        let surface_attributes =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(window_handle, width, height);
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(Error::context_creation_failed)?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(window_handle));
        let context = unsafe { display.create_context(&config, &context_attributes) }
            .map_err(Error::context_creation_failed)?
            .make_current(&surface)
            .map_err(Error::context_creation_failed)?;

        // a context without resolvable entry points is useless
        let probe: &CStr = c"glGetString";
        if display.get_proc_address(probe).is_null() {
            return Err(Error::function_loading_failed("glGetString"));
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };
        let version = glow::HasContext::version(&gl);
        log::info!("OpenGL {}.{} {}", version.major, version.minor, version.vendor_info);

        Ok(ContextSurface { context, surface, gl: Rc::new(gl) })
    }
}

#[cfg(target_os = "windows")]
fn api_preference(window_handle: RawWindowHandle) -> DisplayApiPreference {
    log::debug!("using WGL for the OpenGL context");
    DisplayApiPreference::Wgl(Some(window_handle))
}

#[cfg(target_os = "macos")]
fn api_preference(_window_handle: RawWindowHandle) -> DisplayApiPreference {
    log::debug!("using CGL for the OpenGL context");
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn api_preference(_window_handle: RawWindowHandle) -> DisplayApiPreference {
    log::debug!("using EGL for the OpenGL context");
    DisplayApiPreference::Egl
}
