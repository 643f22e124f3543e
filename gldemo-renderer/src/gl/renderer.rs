use std::rc::Rc;

use crate::{
    error::Error,
    gl::{context::GlState, GlBackend},
};

/// Rendering context handed to [`Drawable`]s: the current GL context and its
/// tracked state.
pub struct RenderContext<'a, G: GlBackend> {
    pub gl: &'a G,
    pub state: &'a mut GlState,
}

/// Frame-level driver of a GL context.
///
/// The `Renderer` owns the tracked GL state and provides a small interface for
/// rendering drawable objects: it keeps the viewport in step with the window,
/// clears the framebuffer at the start of each frame and, once the drawables
/// have been rendered, checks `glGetError` so that a failing frame stops the
/// loop.
#[derive(Debug)]
pub struct Renderer<G: GlBackend> {
    gl: Rc<G>,
    state: GlState,
    clear_mask: u32,
    background: (f32, f32, f32),
}

impl<G: GlBackend> Renderer<G> {
    /// Creates a renderer for the context that is current on this thread.
    ///
    /// The viewport is set to cover the whole framebuffer. Depth testing is
    /// off and the clear color is black until configured otherwise.
    ///
    /// # Parameters
    /// * `gl` - Shared handle to the current GL context
    /// * `width` - Framebuffer width in pixels
    /// * `height` - Framebuffer height in pixels
    ///
    /// # Returns
    /// A renderer clearing only the color buffer
    pub fn new(gl: &Rc<G>, width: u32, height: u32) -> Self {
        let mut renderer = Self {
            gl: gl.clone(),
            state: GlState::new(),
            clear_mask: glow::COLOR_BUFFER_BIT,
            background: (0.0, 0.0, 0.0),
        };
        renderer.resize(width, height);
        renderer
    }

    /// Enables depth testing and clears the depth buffer every frame.
    ///
    /// Scenes drawing overlapping 3D geometry, like the cube, need this; flat
    /// scenes leave it off.
    pub fn with_depth_test(mut self) -> Self {
        self.state.depth_test(self.gl.as_ref(), true);
        self.clear_mask |= glow::DEPTH_BUFFER_BIT;
        self
    }

    /// Sets the color the framebuffer is cleared to at the start of each frame.
    ///
    /// # Parameters
    /// * `color` - Packed `0xRRGGBB` value; the alpha channel is always opaque
    pub fn background(mut self, color: u32) -> Self {
        let r = ((color >> 16) & 0xFF) as f32 / 255.0;
        let g = ((color >> 8) & 0xFF) as f32 / 255.0;
        let b = (color & 0xFF) as f32 / 255.0;
        self.background = (r, g, b);
        self
    }

    /// Adjusts the viewport to a new framebuffer size.
    ///
    /// # Parameters
    /// * `width` - New framebuffer width in pixels
    /// * `height` - New framebuffer height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.viewport(self.gl.as_ref(), 0, 0, width as i32, height as i32);
    }

    /// Begins a new frame by clearing the configured buffers.
    pub fn begin_frame(&mut self) {
        let (r, g, b) = self.background;
        self.state.clear_color(self.gl.as_ref(), r, g, b, 1.0);
        self.gl.clear(self.clear_mask);
    }

    /// Renders a drawable object.
    ///
    /// Calls the drawable's prepare, draw and cleanup methods in sequence,
    /// handing each a render context over this renderer's GL state.
    ///
    /// # Parameters
    /// * `drawable` - Object implementing the `Drawable` trait
    pub fn render(&mut self, drawable: &mut impl Drawable<G>) {
        let mut context = RenderContext { gl: self.gl.as_ref(), state: &mut self.state };

        drawable.prepare(&mut context);
        drawable.draw(&mut context);
        drawable.cleanup(&mut context);
    }

    /// Ends the current frame by checking the context's error flag.
    ///
    /// # Returns
    /// * `Ok(())` - No error was recorded since the previous check
    /// * `Err(Error)` - The context reported an error
    ///
    /// # Errors
    /// * `Error::Frame` - Carries the code returned by `glGetError`
    pub fn end_frame(&mut self) -> Result<(), Error> {
        match self.gl.get_error() {
            glow::NO_ERROR => Ok(()),
            code => Err(Error::Frame(code)),
        }
    }

    /// Returns the shared GL context handle.
    pub fn gl(&self) -> &Rc<G> {
        &self.gl
    }

    /// Returns the current viewport dimensions.
    ///
    /// # Returns
    /// Tuple containing (width, height) in pixels
    pub fn viewport_size(&self) -> (i32, i32) {
        self.state.viewport_size()
    }
}

/// Something the [`Renderer`] can draw once per frame.
pub trait Drawable<G: GlBackend> {
    /// Prepares the object for rendering.
    ///
    /// Activates the program, binds textures and uploads per-frame data such
    /// as uniforms.
    ///
    /// # Parameters
    /// * `context` - Mutable reference to the render context
    fn prepare(&mut self, context: &mut RenderContext<'_, G>);

    /// Issues the draw calls. All state should already be set up by
    /// `prepare()`.
    ///
    /// # Parameters
    /// * `context` - Mutable reference to the render context
    fn draw(&mut self, context: &mut RenderContext<'_, G>);

    /// Cleans up after rendering.
    ///
    /// Restores the bindings changed by `prepare()` so that the next drawable
    /// starts from a known state.
    ///
    /// # Parameters
    /// * `context` - Mutable reference to the render context
    fn cleanup(&mut self, context: &mut RenderContext<'_, G>);
}
