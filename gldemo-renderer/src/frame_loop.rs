use crate::{
    error::Error,
    gl::{Drawable, GlBackend, Renderer},
    window::{Platform, Window},
};

/// The event and presentation side of the frame loop.
pub trait Presenter {
    /// Polls pending events; returns the new framebuffer size after a resize.
    fn events(&mut self) -> Option<(u32, u32)>;

    /// Whether closing the window was requested.
    fn closing(&self) -> bool;

    /// Presents the completed frame.
    fn swap(&mut self) -> Result<(), Error>;
}

/// [`Presenter`] over a real platform and window.
pub struct WindowPresenter<'a> {
    platform: &'a mut Platform,
    window: &'a mut Window,
}

impl<'a> WindowPresenter<'a> {
    pub fn new(platform: &'a mut Platform, window: &'a mut Window) -> Self {
        Self { platform, window }
    }
}

impl Presenter for WindowPresenter<'_> {
    fn events(&mut self) -> Option<(u32, u32)> {
        self.platform.events();
        self.window.take_resize()
    }

    fn closing(&self) -> bool {
        self.window.closing()
    }

    fn swap(&mut self) -> Result<(), Error> {
        self.window.swap()
    }
}

/// Why [`run_frames`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user closed the window.
    Closed,
    /// `glGetError` reported this code after a frame; the frame was not presented.
    GlError(u32),
}

/// Renders `drawable` once per iteration until the window closes or a frame
/// leaves a GL error behind.
///
/// Each iteration polls events, clears, renders, checks the error state and
/// swaps. Only presentation failures are returned as errors.
pub fn run_frames<G, P, D>(
    presenter: &mut P,
    renderer: &mut Renderer<G>,
    drawable: &mut D,
) -> Result<LoopExit, Error>
where
    G: GlBackend,
    P: Presenter,
    D: Drawable<G>,
{
    let mut frames: u64 = 0;

    while !presenter.closing() {
        if let Some((width, height)) = presenter.events() {
            log::debug!("framebuffer resized to {width}x{height}");
            renderer.resize(width, height);
        }

        renderer.begin_frame();
        renderer.render(drawable);

        match renderer.end_frame() {
            Ok(()) => {}
            Err(Error::Frame(code)) => {
                log::error!("GL error 0x{code:04X} after {frames} frames");
                return Ok(LoopExit::GlError(code));
            }
            Err(e) => return Err(e),
        }

        presenter.swap()?;
        frames += 1;
    }

    log::info!("window closed after {frames} frames");
    Ok(LoopExit::Closed)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::gl::{testing::RecordingGl, RenderContext};

    /// Closes after a fixed number of polls.
    struct ScriptedPresenter {
        polls_left: u32,
        resize_at: Option<(u32, (u32, u32))>,
        polls: u32,
        swaps: u32,
    }

    impl ScriptedPresenter {
        fn closing_after(polls: u32) -> Self {
            Self { polls_left: polls, resize_at: None, polls: 0, swaps: 0 }
        }
    }

    impl Presenter for ScriptedPresenter {
        fn events(&mut self) -> Option<(u32, u32)> {
            self.polls += 1;
            self.polls_left = self.polls_left.saturating_sub(1);
            match self.resize_at {
                Some((at, size)) if at == self.polls => Some(size),
                _ => None,
            }
        }

        fn closing(&self) -> bool {
            self.polls_left == 0
        }

        fn swap(&mut self) -> Result<(), Error> {
            self.swaps += 1;
            Ok(())
        }
    }

    /// Draws a triangle; raises a GL error on the given frame.
    struct Triangle {
        frames: u32,
        fail_on: Option<u32>,
    }

    impl Drawable<RecordingGl> for Triangle {
        fn prepare(&mut self, _: &mut RenderContext<'_, RecordingGl>) {
            self.frames += 1;
        }

        fn draw(&mut self, context: &mut RenderContext<'_, RecordingGl>) {
            context.gl.draw_elements(glow::TRIANGLES, 3, glow::UNSIGNED_INT, 0);
            if self.fail_on == Some(self.frames) {
                context.gl.push_error(glow::INVALID_ENUM);
            }
        }

        fn cleanup(&mut self, _: &mut RenderContext<'_, RecordingGl>) {}
    }

    #[test]
    fn test_runs_until_closed() {
        let gl = Rc::new(RecordingGl::new());
        let mut renderer = Renderer::new(&gl, 640, 480);
        let mut presenter = ScriptedPresenter::closing_after(3);
        let mut triangle = Triangle { frames: 0, fail_on: None };

        let exit = run_frames(&mut presenter, &mut renderer, &mut triangle).unwrap();

        assert_eq!(exit, LoopExit::Closed);
        assert_eq!(triangle.frames, 3);
        assert_eq!(presenter.swaps, 3);
        assert_eq!(gl.count("draw_elements"), 3);
    }

    #[test]
    fn test_gl_error_breaks_before_swap() {
        let gl = Rc::new(RecordingGl::new());
        let mut renderer = Renderer::new(&gl, 640, 480);
        let mut presenter = ScriptedPresenter::closing_after(10);
        let mut triangle = Triangle { frames: 0, fail_on: Some(2) };

        let exit = run_frames(&mut presenter, &mut renderer, &mut triangle).unwrap();

        assert_eq!(exit, LoopExit::GlError(glow::INVALID_ENUM));
        assert_eq!(triangle.frames, 2);
        assert_eq!(presenter.swaps, 1);
    }

    #[test]
    fn test_closed_window_renders_nothing() {
        let gl = Rc::new(RecordingGl::new());
        let mut renderer = Renderer::new(&gl, 640, 480);
        let mut presenter = ScriptedPresenter::closing_after(0);
        let mut triangle = Triangle { frames: 0, fail_on: None };

        let exit = run_frames(&mut presenter, &mut renderer, &mut triangle).unwrap();

        assert_eq!(exit, LoopExit::Closed);
        assert_eq!(presenter.polls, 0);
        assert_eq!(gl.count("draw_elements"), 0);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let gl = Rc::new(RecordingGl::new());
        let mut renderer = Renderer::new(&gl, 640, 480);
        let mut presenter = ScriptedPresenter::closing_after(2);
        presenter.resize_at = Some((2, (1024, 768)));
        let mut triangle = Triangle { frames: 0, fail_on: None };

        run_frames(&mut presenter, &mut renderer, &mut triangle).unwrap();

        assert_eq!(renderer.viewport_size(), (1024, 768));
        let resize = gl.position("viewport(0, 0, 1024, 768)").unwrap();
        let last_draw = gl.calls().iter().rposition(|c| c.starts_with("draw_elements")).unwrap();
        assert!(resize < last_draw);
    }
}
